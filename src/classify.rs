//! Chunked batch inference over a pretrained model handle.

use std::ops::Range;
use std::time::Instant;

use thiserror::Error;

use crate::config::DEFAULT_BATCH_SIZE;
use crate::model::{ModelError, ModelHandle};
use crate::sentiment::{LengthMismatch, ResultSet, Sentiment, UnknownLabel};

/// Cumulative progress after a chunk completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub completed: usize,
    pub total: usize,
}

impl Progress {
    /// Completed share in `[0, 1]`.
    pub fn fraction(&self) -> f32 {
        if self.total == 0 {
            1.0
        } else {
            (self.completed as f32 / self.total as f32).min(1.0)
        }
    }
}

/// Why a single chunk could not be classified.
#[derive(Debug, Error)]
pub enum ChunkFailure {
    #[error(transparent)]
    Model(#[from] ModelError),
    #[error("model returned {got} predictions for {expected} reviews")]
    CountMismatch { expected: usize, got: usize },
    #[error(transparent)]
    Label(#[from] UnknownLabel),
}

/// A failed chunk, with its position in the input.
#[derive(Debug, Error)]
#[error("Chunk {chunk_index} (reviews {}..{}) failed: {source}", .range.start, .range.end)]
pub struct ChunkError {
    pub chunk_index: usize,
    pub range: Range<usize>,
    pub source: ChunkFailure,
}

/// Result of classifying one chunk.
pub type ChunkOutcome = Result<Vec<Sentiment>, ChunkError>;

/// Errors that end an analysis run.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Nothing to analyze; the model is not invoked.
    #[error("Please upload or enter reviews.")]
    NoReviews,
    #[error(transparent)]
    Chunk(#[from] ChunkError),
    #[error(transparent)]
    Length(#[from] LengthMismatch),
}

/// Feeds reviews to a model in fixed-size, sequential chunks.
#[derive(Clone)]
pub struct BatchClassifier {
    model: ModelHandle,
    batch_size: usize,
}

impl BatchClassifier {
    pub fn new(model: ModelHandle, batch_size: usize) -> Self {
        Self {
            model,
            batch_size: batch_size.max(1),
        }
    }

    pub fn with_default_batch_size(model: ModelHandle) -> Self {
        Self::new(model, DEFAULT_BATCH_SIZE)
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    pub fn model_id(&self) -> &str {
        self.model.model_id()
    }

    /// Classify every chunk, yielding one outcome per chunk in order.
    ///
    /// Chunks are processed lazily and sequentially; callers decide whether a failed
    /// chunk ends the run.
    pub fn classify_chunks<'a, S: AsRef<str>>(
        &'a self,
        reviews: &'a [S],
    ) -> impl Iterator<Item = ChunkOutcome> + 'a {
        reviews
            .chunks(self.batch_size)
            .enumerate()
            .map(move |(chunk_index, chunk)| {
                let start = chunk_index * self.batch_size;
                let range = start..start + chunk.len();
                self.classify_chunk(chunk)
                    .map_err(|source| ChunkError {
                        chunk_index,
                        range,
                        source,
                    })
            })
    }

    /// Classify all reviews, aborting on the first failed chunk.
    ///
    /// `progress` is called after every successful chunk.
    pub fn classify<S, F>(&self, reviews: &[S], mut progress: F) -> Result<Vec<Sentiment>, ChunkError>
    where
        S: AsRef<str>,
        F: FnMut(Progress),
    {
        let total = reviews.len();
        let mut labels = Vec::with_capacity(total);
        for outcome in self.classify_chunks(reviews) {
            labels.extend(outcome?);
            progress(Progress {
                completed: labels.len(),
                total,
            });
        }
        Ok(labels)
    }

    fn classify_chunk<S: AsRef<str>>(&self, chunk: &[S]) -> Result<Vec<Sentiment>, ChunkFailure> {
        let texts: Vec<&str> = chunk.iter().map(AsRef::as_ref).collect();
        let predictions = self.model.predict(&texts)?;
        if predictions.len() != texts.len() {
            return Err(ChunkFailure::CountMismatch {
                expected: texts.len(),
                got: predictions.len(),
            });
        }
        predictions
            .iter()
            .map(|prediction| Sentiment::from_model_label(&prediction.label).map_err(Into::into))
            .collect()
    }
}

/// Run a full analysis: classify `reviews` and pair them with their labels.
pub fn analyze<F>(
    classifier: &BatchClassifier,
    reviews: Vec<String>,
    progress: F,
) -> Result<ResultSet, AnalysisError>
where
    F: FnMut(Progress),
{
    if reviews.is_empty() {
        return Err(AnalysisError::NoReviews);
    }
    let started = Instant::now();
    tracing::info!(
        reviews = reviews.len(),
        batch_size = classifier.batch_size(),
        model = classifier.model_id(),
        "Analyzing reviews"
    );
    let labels = classifier.classify(&reviews, progress).inspect_err(|err| {
        tracing::error!("Analysis aborted: {err}");
    })?;
    let results = ResultSet::from_parts(reviews, labels)?;
    tracing::info!(
        reviews = results.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Analysis finished"
    );
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ModelPrediction, SentimentPipeline};
    use std::sync::{Arc, Mutex};

    /// Labels by review length parity and records the size of every call.
    struct ParityModel {
        calls: Mutex<Vec<usize>>,
        fail_on_call: Option<usize>,
    }

    impl ParityModel {
        fn new() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                fail_on_call: None,
            }
        }

        fn failing_on(call: usize) -> Self {
            Self {
                fail_on_call: Some(call),
                ..Self::new()
            }
        }
    }

    impl SentimentPipeline for ParityModel {
        fn model_id(&self) -> &str {
            "parity"
        }

        fn predict(&self, batch: &[&str]) -> Result<Vec<ModelPrediction>, ModelError> {
            let mut calls = self.calls.lock().unwrap();
            calls.push(batch.len());
            if self.fail_on_call == Some(calls.len() - 1) {
                return Err(ModelError::Inference("out of memory".into()));
            }
            Ok(batch
                .iter()
                .map(|text| ModelPrediction {
                    label: if text.len() % 2 == 0 { "positive" } else { "negative" }.into(),
                    score: 1.0,
                })
                .collect())
        }
    }

    struct ShortModel;

    impl SentimentPipeline for ShortModel {
        fn model_id(&self) -> &str {
            "short"
        }

        fn predict(&self, batch: &[&str]) -> Result<Vec<ModelPrediction>, ModelError> {
            Ok(batch
                .iter()
                .skip(1)
                .map(|_| ModelPrediction {
                    label: "neutral".into(),
                    score: 1.0,
                })
                .collect())
        }
    }

    fn reviews(n: usize) -> Vec<String> {
        (0..n).map(|i| "x".repeat(i + 1)).collect()
    }

    #[test]
    fn chunks_are_sized_and_progress_is_cumulative() {
        let model = Arc::new(ParityModel::new());
        let classifier = BatchClassifier::new(model.clone(), 100);
        let mut seen = Vec::new();
        let labels = classifier
            .classify(&reviews(250), |progress| seen.push(progress))
            .unwrap();
        assert_eq!(labels.len(), 250);
        assert_eq!(*model.calls.lock().unwrap(), vec![100, 100, 50]);
        let completed: Vec<usize> = seen.iter().map(|p| p.completed).collect();
        assert_eq!(completed, vec![100, 200, 250]);
        assert_eq!(seen.last().unwrap().fraction(), 1.0);
    }

    #[test]
    fn labels_follow_input_order() {
        let classifier = BatchClassifier::new(Arc::new(ParityModel::new()), 3);
        let labels = classifier.classify(&reviews(5), |_| {}).unwrap();
        use Sentiment::*;
        assert_eq!(labels, vec![Negative, Positive, Negative, Positive, Negative]);
    }

    #[test]
    fn failed_chunk_aborts_without_partial_labels() {
        let model = Arc::new(ParityModel::failing_on(1));
        let classifier = BatchClassifier::new(model.clone(), 2);
        let mut progress_calls = 0;
        let err = classifier
            .classify(&reviews(6), |_| progress_calls += 1)
            .unwrap_err();
        assert_eq!(err.chunk_index, 1);
        assert_eq!(err.range, 2..4);
        assert!(matches!(err.source, ChunkFailure::Model(_)));
        assert_eq!(progress_calls, 1);
        assert_eq!(model.calls.lock().unwrap().len(), 2);
    }

    #[test]
    fn chunk_outcomes_allow_partial_reporting() {
        let classifier = BatchClassifier::new(Arc::new(ParityModel::failing_on(0)), 2);
        let outcomes: Vec<ChunkOutcome> = classifier.classify_chunks(&reviews(5)).collect();
        assert_eq!(outcomes.len(), 3);
        assert!(outcomes[0].is_err());
        assert_eq!(outcomes[1].as_ref().unwrap().len(), 2);
        assert_eq!(outcomes[2].as_ref().unwrap().len(), 1);
    }

    #[test]
    fn short_model_output_is_a_chunk_failure() {
        let classifier = BatchClassifier::new(Arc::new(ShortModel), 10);
        let err = classifier.classify(&reviews(3), |_| {}).unwrap_err();
        assert!(matches!(
            err.source,
            ChunkFailure::CountMismatch { expected: 3, got: 2 }
        ));
    }

    #[test]
    fn empty_input_never_reaches_the_model() {
        let model = Arc::new(ParityModel::new());
        let classifier = BatchClassifier::new(model.clone(), 10);
        let err = analyze(&classifier, Vec::new(), |_| {}).unwrap_err();
        assert!(matches!(err, AnalysisError::NoReviews));
        assert!(model.calls.lock().unwrap().is_empty());
    }

    #[test]
    fn zero_batch_size_is_clamped() {
        let classifier = BatchClassifier::new(Arc::new(ParityModel::new()), 0);
        assert_eq!(classifier.batch_size(), 1);
    }
}
