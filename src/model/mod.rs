//! Pretrained sentiment model handle.
//!
//! The dashboard never trains anything: it loads a pretrained model once at startup
//! (the `rust-bert` transformer, or the bundled lexicon as an offline fallback) and
//! hands the resulting [`ModelHandle`] to the batch classifier. Models report their
//! own native labels (`positive` / `neutral` / `negative`); mapping onto
//! [`crate::sentiment::Sentiment`] happens in [`crate::classify`].

use std::path::PathBuf;
use std::sync::Arc;

use rust_bert::RustBertError;
use thiserror::Error;

use crate::config::{ModelBackend, ModelSettings};

mod lexicon;
mod transformer;
pub use lexicon::{LEXICON_FORMAT_VERSION, LEXICON_MODEL_ID, LexiconModel};
pub use transformer::{TRANSFORMER_MODEL_ID, TransformerModel};

/// Raw output of a model for one input text.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelPrediction {
    /// Native label as reported by the model.
    pub label: String,
    /// Confidence in `[0, 1]`.
    pub score: f32,
}

/// A pretrained text classifier invoked as a black box.
pub trait SentimentPipeline: Send + Sync {
    /// Stable identifier of the loaded model.
    fn model_id(&self) -> &str;

    /// Predict one label per input, in input order.
    fn predict(&self, batch: &[&str]) -> Result<Vec<ModelPrediction>, ModelError>;
}

/// Shared, read-only model instance.
pub type ModelHandle = Arc<dyn SentimentPipeline>;

/// Errors raised while loading or running a model.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Failed to read model file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid model file {origin}: {source}")]
    Parse {
        origin: String,
        source: serde_json::Error,
    },
    #[error("Unsupported model format version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },
    #[error("Invalid lexicon: {0}")]
    InvalidLexicon(String),
    #[error("Failed to load pretrained transformer: {0}")]
    Transformer(#[from] RustBertError),
    #[error("Model inference failed: {0}")]
    Inference(String),
}

/// Initialize the configured model once.
///
/// The transformer is the default. The lexicon backend reads `settings.lexicon_path`
/// when set, otherwise the bundled lexicon.
pub fn load_model(settings: &ModelSettings) -> Result<ModelHandle, ModelError> {
    match settings.backend {
        ModelBackend::Transformer => {
            tracing::info!(model_id = TRANSFORMER_MODEL_ID, "Loading sentiment model");
            let model = TransformerModel::load(settings.neutral_threshold)?;
            tracing::info!(
                model_id = model.model_id(),
                neutral_threshold = model.neutral_threshold(),
                "Sentiment model loaded"
            );
            Ok(Arc::new(model))
        }
        ModelBackend::Lexicon => {
            let model = match &settings.lexicon_path {
                Some(path) => LexiconModel::from_path(path)?,
                None => LexiconModel::bundled()?,
            };
            tracing::info!(
                model_id = model.model_id(),
                terms = model.term_count(),
                "Offline lexicon model loaded"
            );
            Ok(Arc::new(model))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lexicon_settings() -> ModelSettings {
        ModelSettings {
            backend: ModelBackend::Lexicon,
            ..ModelSettings::default()
        }
    }

    #[test]
    fn transformer_is_the_default_backend() {
        assert_eq!(ModelSettings::default().backend, ModelBackend::Transformer);
    }

    #[test]
    fn lexicon_backend_loads_bundled_model() {
        let handle = load_model(&lexicon_settings()).unwrap();
        assert_eq!(handle.model_id(), LEXICON_MODEL_ID);
        let out = handle.predict(&["Wonderful stay"]).unwrap();
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn missing_lexicon_path_is_a_read_error() {
        let settings = ModelSettings {
            lexicon_path: Some(PathBuf::from("/definitely/not/here.json")),
            ..lexicon_settings()
        };
        assert!(matches!(load_model(&settings), Err(ModelError::Read { .. })));
    }
}
