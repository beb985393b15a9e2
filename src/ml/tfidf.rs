//! TF-IDF text vectorizer on top of `linfa-preprocessing`.
//!
//! The crate's count vectorizer does the tokenizing (`\b\w\w+\b` on lowercased text),
//! drops English stop words, caps the vocabulary at `max_features` and counts terms.
//! Its smooth idf `ln((1 + n) / (1 + df)) + 1` is fixed at fit time from the training
//! documents and kept next to the vocabulary, so the pair can be persisted and reloaded.
//! Terms are indexed alphabetically; each row is L2-normalized.

use linfa_preprocessing::PreprocessingError;
use linfa_preprocessing::{CountVectorizer, CountVectorizerParams};
use linfa_preprocessing::tf_idf_vectorization::TfIdfMethod;
use ndarray::Array1;
use serde::{Deserialize, Serialize};
use stop_words::LANGUAGE;
use thiserror::Error;

pub const DEFAULT_MAX_FEATURES: usize = 5000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TfidfSettings {
    pub lowercase: bool,
    pub remove_stop_words: bool,
    pub max_features: usize,
}

impl Default for TfidfSettings {
    fn default() -> Self {
        Self {
            lowercase: true,
            remove_stop_words: true,
            max_features: DEFAULT_MAX_FEATURES,
        }
    }
}

#[derive(Debug, Error)]
pub enum TfidfError {
    #[error("Cannot fit a vectorizer on zero documents")]
    NoDocuments,
    #[error("Empty vocabulary; documents contain only stop words")]
    EmptyVocabulary,
    #[error("Vocabulary has {terms} terms but {idf} idf weights")]
    LengthMismatch { terms: usize, idf: usize },
    #[error("Vocabulary terms must be unique and sorted")]
    UnsortedVocabulary,
    #[error("Counted term '{0}' is not in the fitted vocabulary")]
    UnknownTerm(String),
    #[error("Text vectorization failed: {0}")]
    Preprocessing(#[from] PreprocessingError),
}

/// Fitted vocabulary plus idf weights.
#[derive(Debug, Clone, PartialEq)]
pub struct TfidfVectorizer {
    settings: TfidfSettings,
    terms: Vec<String>,
    idf: Vec<f32>,
}

impl TfidfVectorizer {
    /// Learn vocabulary and idf weights from `documents`.
    pub fn fit<S: AsRef<str>>(documents: &[S], settings: TfidfSettings) -> Result<Self, TfidfError> {
        if documents.is_empty() {
            return Err(TfidfError::NoDocuments);
        }
        let corpus = to_array(documents);
        let counter = count_params(&settings).fit(&corpus)?;
        let mut terms = counter.vocabulary().to_vec();
        if terms.is_empty() {
            return Err(TfidfError::EmptyVocabulary);
        }
        terms.sort_unstable();

        let columns = column_order(&counter, &terms)?;
        let counts = counter.transform(&corpus)?;
        let mut df = vec![0usize; terms.len()];
        for (&count, (_, col)) in counts.iter() {
            if count > 0 {
                df[columns[col]] += 1;
            }
        }
        let idf = df
            .into_iter()
            .map(|df| TfIdfMethod::Smooth.compute_idf(documents.len(), df) as f32)
            .collect();
        tracing::debug!(documents = documents.len(), terms = terms.len(), "Fitted TF-IDF");
        Ok(Self {
            settings,
            terms,
            idf,
        })
    }

    /// Rebuild a fitted vectorizer from persisted parts.
    pub fn from_parts(
        settings: TfidfSettings,
        terms: Vec<String>,
        idf: Vec<f32>,
    ) -> Result<Self, TfidfError> {
        if terms.len() != idf.len() {
            return Err(TfidfError::LengthMismatch {
                terms: terms.len(),
                idf: idf.len(),
            });
        }
        if terms.is_empty() {
            return Err(TfidfError::EmptyVocabulary);
        }
        if terms.windows(2).any(|pair| pair[0] >= pair[1]) {
            return Err(TfidfError::UnsortedVocabulary);
        }
        Ok(Self {
            settings,
            terms,
            idf,
        })
    }

    pub fn fit_transform<S: AsRef<str>>(
        documents: &[S],
        settings: TfidfSettings,
    ) -> Result<(Self, Vec<Vec<f32>>), TfidfError> {
        let vectorizer = Self::fit(documents, settings)?;
        let rows = vectorizer.transform(documents)?;
        Ok((vectorizer, rows))
    }

    /// Dense, L2-normalized TF-IDF rows; unknown terms are ignored.
    pub fn transform<S: AsRef<str>>(&self, documents: &[S]) -> Result<Vec<Vec<f32>>, TfidfError> {
        let mut rows = vec![vec![0.0f32; self.terms.len()]; documents.len()];
        if documents.is_empty() {
            return Ok(rows);
        }
        let counter = count_params(&self.settings).fit_vocabulary(self.terms.as_slice())?;
        let columns = column_order(&counter, &self.terms)?;
        let counts = counter.transform(&to_array(documents))?;
        for (&count, (row, col)) in counts.iter() {
            let idx = columns[col];
            rows[row][idx] = count as f32 * self.idf[idx];
        }
        for row in &mut rows {
            l2_normalize(row);
        }
        Ok(rows)
    }

    pub fn transform_one(&self, document: &str) -> Result<Vec<f32>, TfidfError> {
        Ok(self.transform(&[document])?.pop().unwrap_or_default())
    }

    pub fn settings(&self) -> TfidfSettings {
        self.settings
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn idf(&self) -> &[f32] {
        &self.idf
    }

    pub fn dim(&self) -> usize {
        self.terms.len()
    }
}

fn count_params(settings: &TfidfSettings) -> CountVectorizerParams {
    let params = CountVectorizer::params()
        .convert_to_lowercase(settings.lowercase)
        .max_features(Some(settings.max_features.max(1)));
    if settings.remove_stop_words {
        params.stopwords(stop_words::get(LANGUAGE::English))
    } else {
        params
    }
}

fn to_array<S: AsRef<str>>(documents: &[S]) -> Array1<String> {
    documents.iter().map(|doc| doc.as_ref().to_string()).collect()
}

/// Position of each counter column in the sorted term list.
fn column_order(counter: &CountVectorizer, terms: &[String]) -> Result<Vec<usize>, TfidfError> {
    counter
        .vocabulary()
        .iter()
        .map(|term| {
            terms
                .binary_search(term)
                .map_err(|_| TfidfError::UnknownTerm(term.clone()))
        })
        .collect()
}

fn l2_normalize(row: &mut [f32]) {
    let norm = row.iter().map(|v| v * v).sum::<f32>().sqrt();
    if norm > 0.0 {
        for value in row {
            *value /= norm;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vocabulary_is_sorted_and_stop_words_dropped() {
        let docs = ["The room was clean", "The room was dirty, a mess"];
        let vectorizer = TfidfVectorizer::fit(&docs, TfidfSettings::default()).unwrap();
        assert_eq!(vectorizer.terms(), ["clean", "dirty", "mess", "room"]);
    }

    #[test]
    fn stop_words_stay_when_disabled() {
        let settings = TfidfSettings {
            remove_stop_words: false,
            ..TfidfSettings::default()
        };
        let vectorizer = TfidfVectorizer::fit(&["The room was clean"], settings).unwrap();
        assert_eq!(vectorizer.terms(), ["clean", "room", "the", "was"]);
    }

    #[test]
    fn idf_is_smoothed() {
        let docs = ["room clean", "room dirty"];
        let vectorizer = TfidfVectorizer::fit(&docs, TfidfSettings::default()).unwrap();
        let room = vectorizer.terms().iter().position(|t| t == "room").unwrap();
        let clean = vectorizer.terms().iter().position(|t| t == "clean").unwrap();
        assert!((vectorizer.idf()[room] - 1.0).abs() < 1e-6);
        assert!((vectorizer.idf()[clean] - ((3.0f32 / 2.0).ln() + 1.0)).abs() < 1e-6);
    }

    #[test]
    fn rows_are_unit_length() {
        let docs = ["great great food", "cold food", "noisy bed"];
        let (vectorizer, rows) =
            TfidfVectorizer::fit_transform(&docs, TfidfSettings::default()).unwrap();
        for row in &rows {
            let norm: f32 = row.iter().map(|v| v * v).sum::<f32>().sqrt();
            assert!((norm - 1.0).abs() < 1e-5);
        }
        let great = vectorizer.terms().iter().position(|t| t == "great").unwrap();
        let food = vectorizer.terms().iter().position(|t| t == "food").unwrap();
        assert!(rows[0][great] > rows[0][food]);
        let unseen = vectorizer.transform_one("completely unseen words").unwrap();
        assert!(unseen.iter().all(|v| *v == 0.0));
    }

    #[test]
    fn transform_lowercases_like_fit() {
        let vectorizer =
            TfidfVectorizer::fit(&["clean room", "dirty room"], TfidfSettings::default()).unwrap();
        let upper = vectorizer.transform_one("DIRTY Room").unwrap();
        let lower = vectorizer.transform_one("dirty room").unwrap();
        assert_eq!(upper, lower);
        assert!(upper.iter().any(|v| *v > 0.0));
    }

    #[test]
    fn max_features_keeps_most_frequent() {
        let docs = ["food food food bed", "food view", "food bed"];
        let settings = TfidfSettings {
            max_features: 2,
            ..TfidfSettings::default()
        };
        let vectorizer = TfidfVectorizer::fit(&docs, settings).unwrap();
        assert_eq!(vectorizer.terms(), ["bed", "food"]);
    }

    #[test]
    fn only_stop_words_is_an_error() {
        assert!(TfidfVectorizer::fit(&["the and was"], TfidfSettings::default()).is_err());
        assert!(matches!(
            TfidfVectorizer::fit::<&str>(&[], TfidfSettings::default()),
            Err(TfidfError::NoDocuments)
        ));
    }

    #[test]
    fn from_parts_validates() {
        let settings = TfidfSettings::default();
        assert!(matches!(
            TfidfVectorizer::from_parts(settings, vec!["b".into(), "a".into()], vec![1.0, 1.0]),
            Err(TfidfError::UnsortedVocabulary)
        ));
        assert!(matches!(
            TfidfVectorizer::from_parts(settings, vec!["a".into()], vec![]),
            Err(TfidfError::LengthMismatch { .. })
        ));
    }

    #[test]
    fn reloaded_parts_transform_identically() {
        let docs = ["clean quiet room", "dirty noisy room", "quiet pool"];
        let (fitted, rows) =
            TfidfVectorizer::fit_transform(&docs, TfidfSettings::default()).unwrap();
        let reloaded = TfidfVectorizer::from_parts(
            fitted.settings(),
            fitted.terms().to_vec(),
            fitted.idf().to_vec(),
        )
        .unwrap();
        assert_eq!(reloaded.transform(&docs).unwrap(), rows);
    }
}
