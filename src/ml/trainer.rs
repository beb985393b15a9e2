//! Split, fit and evaluate the toy sentiment model.

use std::time::Instant;

use thiserror::Error;

use super::artifacts::TrainedArtifacts;
use super::corpus::{LabeledText, toy_samples};
use super::logreg::{LogRegError, TrainDataset, TrainOptions, train_logreg};
use super::metrics::{ClassificationReport, ConfusionMatrix};
use super::split::{SplitError, stratified_split};
use super::tfidf::{TfidfError, TfidfSettings, TfidfVectorizer};

#[derive(Debug, Clone)]
pub struct TrainerOptions {
    /// Seed for both the split and weight initialization.
    pub seed: u64,
    pub test_fraction: f64,
    pub tfidf: TfidfSettings,
    pub logreg: TrainOptions,
}

impl Default for TrainerOptions {
    fn default() -> Self {
        Self {
            seed: 42,
            test_fraction: 0.2,
            tfidf: TfidfSettings::default(),
            logreg: TrainOptions::default(),
        }
    }
}

#[derive(Debug, Error)]
pub enum TrainError {
    #[error(transparent)]
    Split(#[from] SplitError),
    #[error(transparent)]
    Vectorizer(#[from] TfidfError),
    #[error(transparent)]
    Model(#[from] LogRegError),
}

/// Everything a training run produced.
#[derive(Debug, Clone)]
pub struct TrainingReport {
    pub train_size: usize,
    pub test_size: usize,
    pub train_accuracy: f32,
    /// Held-out evaluation.
    pub report: ClassificationReport,
    pub confusion: ConfusionMatrix,
    pub artifacts: TrainedArtifacts,
}

impl TrainingReport {
    pub fn classes(&self) -> &[String] {
        &self.artifacts.model.classes
    }

    pub fn vocabulary_size(&self) -> usize {
        self.artifacts.vectorizer.dim()
    }

    /// Classification report followed by the confusion matrix.
    pub fn render(&self) -> String {
        format!(
            "Classification Report:\n{}\nConfusion Matrix:\n{}",
            self.report,
            self.confusion.render(self.classes())
        )
    }
}

/// Train on the built-in toy corpus.
pub fn train_toy_model(options: &TrainerOptions) -> Result<TrainingReport, TrainError> {
    train_on(&toy_samples(), options)
}

/// Split `samples`, fit TF-IDF and logistic regression on train, evaluate on test.
pub fn train_on(
    samples: &[LabeledText],
    options: &TrainerOptions,
) -> Result<TrainingReport, TrainError> {
    let started = Instant::now();
    let split = stratified_split(samples, options.seed, options.test_fraction)?;
    let mut classes: Vec<String> = samples.iter().map(|s| s.label.clone()).collect();
    classes.sort_unstable();
    classes.dedup();

    let train_texts: Vec<&str> = split.train.iter().map(|s| s.text.as_str()).collect();
    let (vectorizer, train_x) = TfidfVectorizer::fit_transform(&train_texts, options.tfidf)?;
    let train_y = label_indices(&split.train, &classes);
    let dataset = TrainDataset {
        classes: classes.clone(),
        x: train_x,
        y: train_y.clone(),
    };
    let logreg_options = TrainOptions {
        seed: options.seed,
        ..options.logreg.clone()
    };
    let model = train_logreg(&dataset, &logreg_options)?;

    let train_pred: Vec<usize> = dataset
        .x
        .iter()
        .map(|row| model.predict_class_index(row))
        .collect();
    let train_accuracy =
        super::metrics::accuracy(&ConfusionMatrix::from_pairs(classes.len(), &train_y, &train_pred));

    let test_texts: Vec<&str> = split.test.iter().map(|s| s.text.as_str()).collect();
    let test_pred: Vec<usize> = vectorizer
        .transform(&test_texts)?
        .iter()
        .map(|row| model.predict_class_index(row))
        .collect();
    let test_y = label_indices(&split.test, &classes);
    let confusion = ConfusionMatrix::from_pairs(classes.len(), &test_y, &test_pred);
    let report = ClassificationReport::from_confusion(&confusion, &classes);

    tracing::info!(
        train = split.train.len(),
        test = split.test.len(),
        vocabulary = vectorizer.dim(),
        train_accuracy,
        test_accuracy = report.accuracy,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Training finished"
    );
    Ok(TrainingReport {
        train_size: split.train.len(),
        test_size: split.test.len(),
        train_accuracy,
        report,
        confusion,
        artifacts: TrainedArtifacts { vectorizer, model },
    })
}

fn label_indices(samples: &[LabeledText], classes: &[String]) -> Vec<usize> {
    samples
        .iter()
        .filter_map(|s| classes.binary_search(&s.label).ok())
        .collect()
}
