mod support;

use std::sync::Arc;

use sentidash::classify::{BatchClassifier, analyze};
use sentidash::input::{ReviewSource, reviews_from_csv_path};
use sentidash::model::{LexiconModel, ModelHandle};
use sentidash::report::{CategoryView, DonutChart, ReportSummary, export};
use sentidash::sentiment::Sentiment;

fn bundled() -> ModelHandle {
    Arc::new(LexiconModel::bundled().expect("bundled lexicon"))
}

#[test]
fn csv_upload_to_report_and_export() {
    let temp = tempfile::tempdir().expect("tempdir");
    let path = temp.path().join("uploads").join("hotel.csv");
    support::write_fixture(
        &path,
        "guest,Review_Text,stars\n\
         Ann,Great stay!,5\n\
         Bo,Terrible room,1\n\
         Cy,It was an average stay,3\n\
         Di,\"Staff were very friendly and helpful\",5\n",
    );

    let batch = reviews_from_csv_path(&path).expect("load csv");
    assert_eq!(
        batch.source,
        ReviewSource::Upload {
            file_name: "hotel.csv".into(),
            column: "Review_Text".into()
        }
    );
    let classifier = BatchClassifier::with_default_batch_size(bundled());
    let results = analyze(&classifier, batch.reviews.clone(), |_| {}).expect("analyze");
    assert_eq!(
        results.labels(),
        vec![
            Sentiment::Positive,
            Sentiment::Negative,
            Sentiment::Neutral,
            Sentiment::Positive
        ]
    );
    let reviews: Vec<&str> = results.iter().map(|r| r.review.as_str()).collect();
    assert_eq!(reviews, batch.reviews);

    let summary = ReportSummary::from_results(&results);
    assert_eq!(summary.total, 4);
    assert_eq!(summary.stat(Sentiment::Positive).percentage_label(), "50.0%");
    let chart = DonutChart::from_summary(&summary);
    assert_eq!(chart.slices.len(), 3);
    let negative = CategoryView::for_sentiment(&results, Sentiment::Negative);
    assert_eq!(negative.reviews, vec!["Terrible room"]);

    let out = temp.path().join("hotel_sentiment_report.csv");
    export::write_csv(&results, &out).expect("export");
    let reread = export::parse_csv(std::fs::File::open(&out).expect("open")).expect("parse");
    assert_eq!(reread, results);
}

#[test]
fn chunk_size_does_not_change_labels() {
    let reviews: Vec<String> = (0..237)
        .map(|i| match i % 3 {
            0 => format!("Great stay number {i}"),
            1 => format!("Terrible experience {i}, never coming back"),
            _ => format!("Room {i} was okay"),
        })
        .collect();
    let model = bundled();
    let mut seen = Vec::new();
    let chunked = analyze(&BatchClassifier::new(model.clone(), 100), reviews.clone(), |p| {
        seen.push(p.completed)
    })
    .expect("chunked");
    let single = analyze(&BatchClassifier::new(model.clone(), 1), reviews.clone(), |_| {})
        .expect("single");
    let whole = analyze(&BatchClassifier::new(model, 1000), reviews, |_| {}).expect("whole");
    assert_eq!(seen, vec![100, 200, 237]);
    assert_eq!(chunked, single);
    assert_eq!(chunked, whole);
}

#[test]
fn split_runs_concatenate_to_the_single_run() {
    let reviews: Vec<String> = (0..237)
        .map(|i| match i % 4 {
            0 => format!("Lovely pool and spotless room {i}"),
            1 => format!("Dirty bathroom {i}"),
            2 => format!("Stayed {i} nights"),
            _ => format!("Staff were rude {i} but the view was amazing"),
        })
        .collect();
    let classifier = BatchClassifier::new(bundled(), 100);
    let whole = analyze(&classifier, reviews.clone(), |_| {}).expect("whole");

    let k = 137;
    let head = analyze(&classifier, reviews[..k].to_vec(), |_| {}).expect("head");
    let tail = analyze(&classifier, reviews[k..].to_vec(), |_| {}).expect("tail");
    let joined: Vec<_> = head.iter().chain(tail.iter()).cloned().collect();

    assert_eq!(joined.len(), whole.len());
    assert_eq!(joined.as_slice(), whole.as_slice());
}

#[test]
fn percentages_cover_the_whole_set() {
    let reviews: Vec<String> = ["Great stay!", "Terrible room", "It was an average stay"]
        .iter()
        .cycle()
        .take(7)
        .map(|s| s.to_string())
        .collect();
    let classifier = BatchClassifier::with_default_batch_size(bundled());
    let results = analyze(&classifier, reviews, |_| {}).expect("analyze");
    let summary = ReportSummary::from_results(&results);
    let sum: f64 = summary.categories.iter().map(|c| c.percentage).sum();
    assert!((sum - 100.0).abs() < 1e-9);
    let counted: usize = summary.categories.iter().map(|c| c.count).sum();
    assert_eq!(counted, 7);
}
