//! Canonical sentiment labels and the per-run result set.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Sentiment category assigned to a review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    /// All categories in presentation order.
    pub const ALL: [Sentiment; 3] = [Sentiment::Positive, Sentiment::Neutral, Sentiment::Negative];

    pub fn as_str(self) -> &'static str {
        match self {
            Sentiment::Positive => "Positive",
            Sentiment::Neutral => "Neutral",
            Sentiment::Negative => "Negative",
        }
    }

    /// Map a model's native label onto the canonical set by capitalizing it.
    ///
    /// `"positive"`, `"POSITIVE"` and `"Positive"` all resolve to [`Sentiment::Positive`].
    pub fn from_model_label(label: &str) -> Result<Self, UnknownLabel> {
        capitalize(label.trim()).parse()
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sentiment {
    type Err = UnknownLabel;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "Positive" => Ok(Sentiment::Positive),
            "Neutral" => Ok(Sentiment::Neutral),
            "Negative" => Ok(Sentiment::Negative),
            other => Err(UnknownLabel(other.to_string())),
        }
    }
}

/// A label outside the canonical `{Positive, Neutral, Negative}` set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown sentiment label '{0}'")]
pub struct UnknownLabel(pub String);

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// One review paired with its predicted label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    #[serde(rename = "Review")]
    pub review: String,
    #[serde(rename = "Sentiment")]
    pub sentiment: Sentiment,
}

/// Reviews and labels did not line up when building a [`ResultSet`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Got {labels} labels for {reviews} reviews")]
pub struct LengthMismatch {
    pub reviews: usize,
    pub labels: usize,
}

/// Ordered results of a single analysis run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultSet {
    items: Vec<ClassificationResult>,
}

impl ResultSet {
    /// Pair reviews with labels position by position.
    pub fn from_parts(
        reviews: Vec<String>,
        labels: Vec<Sentiment>,
    ) -> Result<Self, LengthMismatch> {
        if reviews.len() != labels.len() {
            return Err(LengthMismatch {
                reviews: reviews.len(),
                labels: labels.len(),
            });
        }
        let items = reviews
            .into_iter()
            .zip(labels)
            .map(|(review, sentiment)| ClassificationResult { review, sentiment })
            .collect();
        Ok(Self { items })
    }

    pub fn from_results(items: Vec<ClassificationResult>) -> Self {
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ClassificationResult> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[ClassificationResult] {
        &self.items
    }

    /// Number of results carrying `sentiment`.
    pub fn count(&self, sentiment: Sentiment) -> usize {
        self.items
            .iter()
            .filter(|item| item.sentiment == sentiment)
            .count()
    }

    /// Reviews labelled `sentiment`, in input order.
    pub fn reviews_with(&self, sentiment: Sentiment) -> impl Iterator<Item = &str> {
        self.items
            .iter()
            .filter(move |item| item.sentiment == sentiment)
            .map(|item| item.review.as_str())
    }

    pub fn labels(&self) -> Vec<Sentiment> {
        self.items.iter().map(|item| item.sentiment).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_labels_are_capitalized() {
        assert_eq!(Sentiment::from_model_label("positive"), Ok(Sentiment::Positive));
        assert_eq!(Sentiment::from_model_label("NEUTRAL"), Ok(Sentiment::Neutral));
        assert_eq!(Sentiment::from_model_label(" negative "), Ok(Sentiment::Negative));
        assert!(Sentiment::from_model_label("mixed").is_err());
        assert!(Sentiment::from_model_label("").is_err());
    }

    #[test]
    fn result_set_requires_matching_lengths() {
        let err = ResultSet::from_parts(vec!["a".into(), "b".into()], vec![Sentiment::Positive])
            .unwrap_err();
        assert_eq!(err, LengthMismatch { reviews: 2, labels: 1 });
    }

    #[test]
    fn filters_preserve_input_order() {
        let set = ResultSet::from_parts(
            vec!["one".into(), "two".into(), "three".into()],
            vec![Sentiment::Negative, Sentiment::Positive, Sentiment::Negative],
        )
        .unwrap();
        let negatives: Vec<&str> = set.reviews_with(Sentiment::Negative).collect();
        assert_eq!(negatives, vec!["one", "three"]);
        assert_eq!(set.count(Sentiment::Neutral), 0);
    }
}
