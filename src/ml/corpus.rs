//! Built-in toy training corpus.

use crate::sentiment::Sentiment;

/// A training sentence and its gold label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabeledText {
    pub text: String,
    pub label: String,
}

impl LabeledText {
    pub fn new(text: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            label: label.into(),
        }
    }
}

/// Fifteen hotel sentences, five per category.
pub const TOY_CORPUS: [(&str, Sentiment); 15] = [
    ("The room was clean and comfortable", Sentiment::Positive),
    ("Staff were very friendly and helpful", Sentiment::Positive),
    ("Amazing service and great food", Sentiment::Positive),
    ("I loved my stay here, will come again", Sentiment::Positive),
    ("The view from the hotel was breathtaking", Sentiment::Positive),
    ("The room was dirty and smelled bad", Sentiment::Negative),
    ("Staff were rude and unhelpful", Sentiment::Negative),
    ("Terrible experience, never coming back", Sentiment::Negative),
    ("The bed was uncomfortable and noisy", Sentiment::Negative),
    ("The food was cold and tasteless", Sentiment::Negative),
    ("The hotel was okay, nothing special", Sentiment::Neutral),
    ("It was an average stay", Sentiment::Neutral),
    ("The room was fine, not great but not bad", Sentiment::Neutral),
    ("Just a regular hotel experience", Sentiment::Neutral),
    ("The service was acceptable", Sentiment::Neutral),
];

/// The toy corpus as owned samples.
pub fn toy_samples() -> Vec<LabeledText> {
    TOY_CORPUS
        .iter()
        .map(|(text, label)| LabeledText::new(*text, label.as_str()))
        .collect()
}
