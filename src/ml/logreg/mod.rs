//! Multinomial logistic regression over dense feature vectors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

mod train;
pub use train::{TrainDataset, TrainOptions, train_logreg};

#[derive(Debug, Error, PartialEq)]
pub enum LogRegError {
    #[error("Empty training set")]
    EmptyTrainingSet,
    #[error("Mismatched training inputs/labels ({inputs} rows, {labels} labels)")]
    MismatchedLabels { inputs: usize, labels: usize },
    #[error("No classes available for training")]
    NoClasses,
    #[error("Inconsistent feature row length {found} (expected {expected})")]
    RowLength { found: usize, expected: usize },
    #[error("Label index {label} out of range for {classes} classes")]
    LabelOutOfRange { label: usize, classes: usize },
    #[error("Invalid model: {0}")]
    Invalid(String),
}

/// Softmax classifier: `weights` is row-major `classes x feature_dim`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRegModel {
    pub feature_dim: usize,
    pub classes: Vec<String>,
    pub weights: Vec<f32>,
    pub bias: Vec<f32>,
}

impl LogRegModel {
    /// Validate the model dimensions.
    pub fn validate(&self) -> Result<(), LogRegError> {
        let classes = self.classes.len();
        if classes == 0 {
            return Err(LogRegError::Invalid("No classes defined".into()));
        }
        if self.feature_dim == 0 {
            return Err(LogRegError::Invalid("feature_dim must be > 0".into()));
        }
        if self.weights.len() != classes * self.feature_dim {
            return Err(LogRegError::Invalid("weights length mismatch".into()));
        }
        if self.bias.len() != classes {
            return Err(LogRegError::Invalid("bias length mismatch".into()));
        }
        if self.weights.iter().chain(&self.bias).any(|v| !v.is_finite()) {
            return Err(LogRegError::Invalid("non-finite parameter".into()));
        }
        Ok(())
    }

    /// Class probabilities for one feature row; empty when the row has the wrong length.
    pub fn predict_proba(&self, features: &[f32]) -> Vec<f32> {
        if features.len() != self.feature_dim || self.classes.is_empty() {
            return Vec::new();
        }
        softmax(&self.logits(features))
    }

    /// Return the argmax class index for the given row.
    pub fn predict_class_index(&self, features: &[f32]) -> usize {
        let proba = self.predict_proba(features);
        let mut best = 0usize;
        let mut best_val = f32::NEG_INFINITY;
        for (idx, &p) in proba.iter().enumerate() {
            if p > best_val {
                best_val = p;
                best = idx;
            }
        }
        best
    }

    pub fn predict_label(&self, features: &[f32]) -> Option<&str> {
        self.classes
            .get(self.predict_class_index(features))
            .map(String::as_str)
    }

    fn logits(&self, features: &[f32]) -> Vec<f32> {
        self.bias
            .iter()
            .enumerate()
            .map(|(c, bias)| {
                let row = &self.weights[c * self.feature_dim..(c + 1) * self.feature_dim];
                bias + row.iter().zip(features).map(|(w, x)| w * x).sum::<f32>()
            })
            .collect()
    }
}

/// Numerically stable softmax.
pub fn softmax(raw: &[f32]) -> Vec<f32> {
    if raw.is_empty() {
        return Vec::new();
    }
    let max = raw
        .iter()
        .copied()
        .fold(f32::NEG_INFINITY, |a, b| a.max(b));
    let mut exps: Vec<f32> = raw.iter().map(|v| (v - max).exp()).collect();
    let sum: f32 = exps.iter().sum();
    if sum == 0.0 {
        return vec![1.0 / raw.len() as f32; raw.len()];
    }
    for v in &mut exps {
        *v /= sum;
    }
    exps
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> LogRegModel {
        LogRegModel {
            feature_dim: 2,
            classes: vec!["a".into(), "b".into()],
            weights: vec![1.0, 0.0, 0.0, 1.0],
            bias: vec![0.0, 0.0],
        }
    }

    #[test]
    fn probabilities_sum_to_one() {
        let model = model();
        model.validate().unwrap();
        let proba = model.predict_proba(&[0.3, 0.9]);
        assert!((proba.iter().sum::<f32>() - 1.0).abs() < 1e-6);
        assert_eq!(model.predict_label(&[0.3, 0.9]), Some("b"));
        assert!(model.predict_proba(&[1.0]).is_empty());
    }

    #[test]
    fn validate_catches_shape_errors() {
        let mut bad = model();
        bad.bias.pop();
        assert!(bad.validate().is_err());
    }

    #[test]
    fn softmax_handles_large_logits() {
        let out = softmax(&[1000.0, 1000.0]);
        assert!((out[0] - 0.5).abs() < 1e-6);
    }
}
