use sentidash::ml::artifacts::{
    ArtifactError, MODEL_FILE_NAME, VECTORIZER_FILE_NAME, load_artifacts, save_artifacts,
};
use sentidash::ml::corpus::TOY_CORPUS;
use sentidash::ml::trainer::{TrainerOptions, train_toy_model};

#[test]
fn trained_artifacts_round_trip_through_disk() {
    let report = train_toy_model(&TrainerOptions::default()).expect("train");
    assert_eq!(report.train_size + report.test_size, TOY_CORPUS.len());

    let temp = tempfile::tempdir().expect("tempdir");
    let out = temp.path().join("artifacts");
    save_artifacts(&out, &report.artifacts.vectorizer, &report.artifacts.model).expect("save");
    assert!(out.join(VECTORIZER_FILE_NAME).is_file());
    assert!(out.join(MODEL_FILE_NAME).is_file());

    let loaded = load_artifacts(&out).expect("load");
    let texts: Vec<&str> = TOY_CORPUS.iter().map(|(text, _)| *text).collect();
    assert_eq!(
        loaded.predict(&texts).expect("predict loaded"),
        report.artifacts.predict(&texts).expect("predict trained")
    );
}

#[test]
fn artifacts_declare_version_and_kind() {
    let report = train_toy_model(&TrainerOptions::default()).expect("train");
    let temp = tempfile::tempdir().expect("tempdir");
    save_artifacts(temp.path(), &report.artifacts.vectorizer, &report.artifacts.model)
        .expect("save");
    let model: serde_json::Value = serde_json::from_str(
        &std::fs::read_to_string(temp.path().join(MODEL_FILE_NAME)).expect("read"),
    )
    .expect("json");
    assert_eq!(model["format_version"], 1);
    assert_eq!(model["kind"], "multinomial_logreg");
    assert_eq!(
        model["classes"],
        serde_json::json!(["Negative", "Neutral", "Positive"])
    );

    std::fs::remove_file(temp.path().join(VECTORIZER_FILE_NAME)).expect("remove");
    assert!(matches!(
        load_artifacts(temp.path()),
        Err(ArtifactError::Read { .. })
    ));
}

#[test]
fn training_is_reproducible_for_a_seed() {
    let a = train_toy_model(&TrainerOptions::default()).expect("train a");
    let b = train_toy_model(&TrainerOptions::default()).expect("train b");
    assert_eq!(a.artifacts, b.artifacts);
    assert_eq!(a.confusion, b.confusion);
}
