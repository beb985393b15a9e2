//! Valence-lexicon sentiment model, the offline fallback to the transformer.
//!
//! Scores a text by summing pretrained term valences with a few local rules
//! (phrases, intensifiers, negation, contrastive "but") and squashing the sum into a
//! compound score in `[-1, 1]`.

use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::{ModelError, ModelPrediction, SentimentPipeline};

/// Current on-disk format of lexicon files.
pub const LEXICON_FORMAT_VERSION: u32 = 1;
/// Identifier of the bundled lexicon.
pub const LEXICON_MODEL_ID: &str = "hotel-review-lexicon-v1";

const BUNDLED_LEXICON: &str = include_str!("../../assets/ml/sentiment_lexicon.json");
const NEGATION_WINDOW: usize = 3;
const CONTRAST_WORD: &str = "but";

static TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[a-z0-9]+(?:'[a-z]+)?").expect("valid token regex"));

/// Serialized lexicon asset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LexiconFile {
    pub format_version: u32,
    pub model_id: String,
    /// Normalization constant for the compound score.
    pub alpha: f32,
    /// `|compound|` below this is neutral.
    pub neutral_threshold: f32,
    pub negation_scalar: f32,
    pub intensifier_boost: f32,
    pub contrast_before: f32,
    pub contrast_after: f32,
    pub negations: Vec<String>,
    /// Word -> direction multiplier (`1.0` boosts, `-1.0` dampens).
    pub intensifiers: HashMap<String, f32>,
    /// Multi-word expressions scored as a unit.
    #[serde(default)]
    pub phrases: HashMap<String, f32>,
    pub terms: HashMap<String, f32>,
}

/// Loaded lexicon ready for inference.
#[derive(Debug, Clone)]
pub struct LexiconModel {
    model_id: String,
    alpha: f32,
    neutral_threshold: f32,
    negation_scalar: f32,
    intensifier_boost: f32,
    contrast_before: f32,
    contrast_after: f32,
    negations: HashSet<String>,
    intensifiers: HashMap<String, f32>,
    phrases: Vec<(Vec<String>, f32)>,
    terms: HashMap<String, f32>,
}

impl LexiconModel {
    /// Load the lexicon bundled with the binary.
    pub fn bundled() -> Result<Self, ModelError> {
        Self::from_json(BUNDLED_LEXICON, "bundled lexicon")
    }

    pub fn from_path(path: &Path) -> Result<Self, ModelError> {
        let text = std::fs::read_to_string(path).map_err(|source| ModelError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text, &path.display().to_string())
    }

    pub fn from_json(text: &str, origin: &str) -> Result<Self, ModelError> {
        let file: LexiconFile =
            serde_json::from_str(text).map_err(|source| ModelError::Parse {
                origin: origin.to_string(),
                source,
            })?;
        Self::from_file(file)
    }

    pub fn from_file(file: LexiconFile) -> Result<Self, ModelError> {
        validate(&file)?;
        let mut phrases: Vec<(Vec<String>, f32)> = file
            .phrases
            .into_iter()
            .map(|(phrase, valence)| (tokenize(&phrase), valence))
            .filter(|(tokens, _)| !tokens.is_empty())
            .collect();
        // Longest phrases first so "never coming back" beats "never".
        phrases.sort_by(|a, b| b.0.len().cmp(&a.0.len()).then_with(|| a.0.cmp(&b.0)));
        Ok(Self {
            model_id: file.model_id,
            alpha: file.alpha,
            neutral_threshold: file.neutral_threshold,
            negation_scalar: file.negation_scalar,
            intensifier_boost: file.intensifier_boost,
            contrast_before: file.contrast_before,
            contrast_after: file.contrast_after,
            negations: file.negations.into_iter().collect(),
            intensifiers: file.intensifiers,
            phrases,
            terms: file.terms,
        })
    }

    pub fn term_count(&self) -> usize {
        self.terms.len()
    }

    /// Compound score in `[-1, 1]` for a single text.
    pub fn compound(&self, text: &str) -> f32 {
        let tokens = tokenize(text);
        let mut scored: Vec<(usize, f32)> = Vec::new();
        let mut idx = 0usize;
        while idx < tokens.len() {
            if let Some((len, valence)) = self.match_phrase(&tokens[idx..]) {
                scored.push((idx, valence));
                idx += len;
                continue;
            }
            if let Some(&base) = self.terms.get(&tokens[idx]) {
                scored.push((idx, self.adjust(&tokens, idx, base)));
            }
            idx += 1;
        }
        if let Some(pivot) = tokens.iter().position(|token| token == CONTRAST_WORD) {
            for (position, valence) in &mut scored {
                if *position < pivot {
                    *valence *= self.contrast_before;
                } else if *position > pivot {
                    *valence *= self.contrast_after;
                }
            }
        }
        let sum: f32 = scored.iter().map(|(_, valence)| valence).sum();
        if sum == 0.0 {
            return 0.0;
        }
        (sum / (sum * sum + self.alpha).sqrt()).clamp(-1.0, 1.0)
    }

    /// Classify a single text.
    pub fn classify(&self, text: &str) -> ModelPrediction {
        let compound = self.compound(text);
        let magnitude = compound.abs();
        if magnitude < self.neutral_threshold {
            let closeness = if self.neutral_threshold > 0.0 {
                magnitude / self.neutral_threshold
            } else {
                0.0
            };
            return ModelPrediction {
                label: "neutral".to_string(),
                score: 1.0 - 0.5 * closeness,
            };
        }
        let label = if compound > 0.0 { "positive" } else { "negative" };
        ModelPrediction {
            label: label.to_string(),
            score: 0.5 + 0.5 * magnitude,
        }
    }

    fn match_phrase(&self, tokens: &[String]) -> Option<(usize, f32)> {
        self.phrases
            .iter()
            .find(|(phrase, _)| tokens.starts_with(phrase))
            .map(|(phrase, valence)| (phrase.len(), *valence))
    }

    fn adjust(&self, tokens: &[String], idx: usize, base: f32) -> f32 {
        let mut valence = base;
        if idx > 0
            && let Some(direction) = self.intensifiers.get(&tokens[idx - 1])
        {
            valence += base.signum() * self.intensifier_boost * direction;
        }
        let window_start = idx.saturating_sub(NEGATION_WINDOW);
        if tokens[window_start..idx]
            .iter()
            .any(|token| self.negations.contains(token))
        {
            valence *= self.negation_scalar;
        }
        valence
    }
}

impl SentimentPipeline for LexiconModel {
    fn model_id(&self) -> &str {
        &self.model_id
    }

    fn predict(&self, batch: &[&str]) -> Result<Vec<ModelPrediction>, ModelError> {
        Ok(batch.iter().map(|text| self.classify(text)).collect())
    }
}

fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase().replace('\u{2019}', "'");
    TOKEN_RE
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect()
}

fn validate(file: &LexiconFile) -> Result<(), ModelError> {
    if file.format_version != LEXICON_FORMAT_VERSION {
        return Err(ModelError::UnsupportedVersion {
            found: file.format_version,
            expected: LEXICON_FORMAT_VERSION,
        });
    }
    if file.model_id.trim().is_empty() {
        return Err(ModelError::InvalidLexicon("model_id is empty".into()));
    }
    if !file.alpha.is_finite() || file.alpha <= 0.0 {
        return Err(ModelError::InvalidLexicon("alpha must be > 0".into()));
    }
    if !(0.0..1.0).contains(&file.neutral_threshold) {
        return Err(ModelError::InvalidLexicon(
            "neutral_threshold must be in [0, 1)".into(),
        ));
    }
    if file.terms.is_empty() {
        return Err(ModelError::InvalidLexicon("no terms defined".into()));
    }
    let scalars = [
        file.negation_scalar,
        file.intensifier_boost,
        file.contrast_before,
        file.contrast_after,
    ];
    if scalars.iter().any(|value| !value.is_finite()) {
        return Err(ModelError::InvalidLexicon("non-finite rule weight".into()));
    }
    if let Some((term, _)) = file
        .terms
        .iter()
        .chain(file.phrases.iter())
        .find(|(_, valence)| !valence.is_finite())
    {
        return Err(ModelError::InvalidLexicon(format!(
            "non-finite valence for '{term}'"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn label(model: &LexiconModel, text: &str) -> String {
        model.classify(text).label
    }

    #[test]
    fn bundled_lexicon_validates() {
        let model = LexiconModel::bundled().unwrap();
        assert_eq!(model.model_id(), LEXICON_MODEL_ID);
        assert!(model.term_count() > 100);
    }

    #[test]
    fn clear_reviews_get_clear_labels() {
        let model = LexiconModel::bundled().unwrap();
        assert_eq!(label(&model, "Great stay!"), "positive");
        assert_eq!(label(&model, "Staff were very friendly and helpful"), "positive");
        assert_eq!(label(&model, "Terrible room"), "negative");
        assert_eq!(label(&model, "Terrible experience, never coming back"), "negative");
        assert_eq!(label(&model, "It was an average stay"), "neutral");
        assert_eq!(label(&model, "The hotel was okay, nothing special"), "neutral");
    }

    #[test]
    fn negation_flips_polarity() {
        let model = LexiconModel::bundled().unwrap();
        assert!(model.compound("The room was clean") > 0.0);
        assert!(model.compound("The room was not clean") < 0.0);
        assert!(model.compound("The room wasn\u{2019}t clean") < 0.0);
    }

    #[test]
    fn text_without_known_terms_is_neutral() {
        let model = LexiconModel::bundled().unwrap();
        assert_eq!(model.compound("Room 204, third floor"), 0.0);
        let prediction = model.classify("");
        assert_eq!(prediction.label, "neutral");
        assert_eq!(prediction.score, 1.0);
    }

    #[test]
    fn scores_stay_in_unit_range() {
        let model = LexiconModel::bundled().unwrap();
        let text = "amazing amazing amazing excellent perfect wonderful fantastic";
        let prediction = model.classify(text);
        assert!(prediction.score <= 1.0 && prediction.score >= 0.5);
        assert!(model.compound(text) <= 1.0);
    }

    #[test]
    fn rejects_unknown_format_version() {
        let mut file: LexiconFile = serde_json::from_str(BUNDLED_LEXICON).unwrap();
        file.format_version = 7;
        assert!(matches!(
            LexiconModel::from_file(file),
            Err(ModelError::UnsupportedVersion { found: 7, .. })
        ));
    }

    #[test]
    fn predictions_do_not_depend_on_batch_neighbours() {
        let model = LexiconModel::bundled().unwrap();
        let alone = model.predict(&["Dirty towels"]).unwrap();
        let batched = model
            .predict(&["Lovely view", "Dirty towels", "Fine"])
            .unwrap();
        assert_eq!(alone[0], batched[1]);
    }
}
