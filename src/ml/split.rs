//! Deterministic stratified train/test split.
//!
//! Within each class, samples are ordered by a seeded blake3 hash of their text and the
//! first `round(n * test_fraction)` go to the test split. At least one sample per class
//! stays in train when the class has more than one.

use std::collections::BTreeMap;

use thiserror::Error;

use super::corpus::LabeledText;

#[derive(Debug, Error, PartialEq)]
pub enum SplitError {
    #[error("test_fraction must be in (0, 1), got {0}")]
    InvalidFraction(f64),
    #[error("Cannot split an empty sample set")]
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Split {
    pub train: Vec<LabeledText>,
    pub test: Vec<LabeledText>,
}

pub fn stratified_split(
    samples: &[LabeledText],
    seed: u64,
    test_fraction: f64,
) -> Result<Split, SplitError> {
    if !(test_fraction > 0.0 && test_fraction < 1.0) {
        return Err(SplitError::InvalidFraction(test_fraction));
    }
    if samples.is_empty() {
        return Err(SplitError::Empty);
    }
    let mut by_class: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
    for (idx, sample) in samples.iter().enumerate() {
        by_class.entry(sample.label.as_str()).or_default().push(idx);
    }
    let mut test_indices = Vec::new();
    for (label, mut indices) in by_class {
        indices.sort_by_cached_key(|&idx| split_key(seed, label, &samples[idx].text));
        let n = indices.len();
        let mut n_test = (n as f64 * test_fraction).round() as usize;
        if n > 1 {
            n_test = n_test.min(n - 1);
        } else {
            n_test = 0;
        }
        test_indices.extend_from_slice(&indices[..n_test]);
    }
    test_indices.sort_unstable();
    let mut train = Vec::with_capacity(samples.len() - test_indices.len());
    let mut test = Vec::with_capacity(test_indices.len());
    for (idx, sample) in samples.iter().enumerate() {
        if test_indices.binary_search(&idx).is_ok() {
            test.push(sample.clone());
        } else {
            train.push(sample.clone());
        }
    }
    tracing::debug!(train = train.len(), test = test.len(), seed, "Stratified split");
    Ok(Split { train, test })
}

fn split_key(seed: u64, label: &str, text: &str) -> [u8; 32] {
    *blake3::hash(format!("sentidash-split-v1|{seed}|{label}|{text}").as_bytes()).as_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ml::corpus::toy_samples;

    #[test]
    fn toy_corpus_splits_twelve_three() {
        let split = stratified_split(&toy_samples(), 42, 0.2).unwrap();
        assert_eq!(split.train.len(), 12);
        assert_eq!(split.test.len(), 3);
        let mut labels: Vec<&str> = split.test.iter().map(|s| s.label.as_str()).collect();
        labels.sort_unstable();
        assert_eq!(labels, vec!["Negative", "Neutral", "Positive"]);
    }

    #[test]
    fn split_is_deterministic_per_seed() {
        let a = stratified_split(&toy_samples(), 7, 0.2).unwrap();
        let b = stratified_split(&toy_samples(), 7, 0.2).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn singleton_classes_stay_in_train() {
        let samples = vec![
            LabeledText::new("only one", "Positive"),
            LabeledText::new("first", "Negative"),
            LabeledText::new("second", "Negative"),
        ];
        let split = stratified_split(&samples, 1, 0.9).unwrap();
        assert!(split.train.iter().any(|s| s.label == "Positive"));
        assert_eq!(split.test.len(), 1);
        assert_eq!(split.test[0].label, "Negative");
    }

    #[test]
    fn rejects_bad_fraction() {
        assert_eq!(
            stratified_split(&toy_samples(), 1, 1.0),
            Err(SplitError::InvalidFraction(1.0))
        );
        assert_eq!(stratified_split(&[], 1, 0.2), Err(SplitError::Empty));
    }
}
