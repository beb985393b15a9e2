//! Versioned JSON artifacts written by the trainer.
//!
//! `vectorizer.json` holds the fitted TF-IDF vocabulary and idf weights;
//! `sentiment_model.json` holds the logistic regression parameters. Both carry a
//! `format_version` and a `kind` tag that loading checks before anything else.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde::de::DeserializeOwned;
use thiserror::Error;

use super::logreg::{LogRegError, LogRegModel};
use super::tfidf::{TfidfError, TfidfSettings, TfidfVectorizer};

pub const ARTIFACT_FORMAT_VERSION: u32 = 1;
pub const VECTORIZER_FILE_NAME: &str = "vectorizer.json";
pub const MODEL_FILE_NAME: &str = "sentiment_model.json";
pub const VECTORIZER_KIND: &str = "tfidf_vectorizer";
pub const MODEL_KIND: &str = "multinomial_logreg";

#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("Failed to create artifact directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Unsupported format_version {found} in {path} (expected {expected})")]
    UnsupportedVersion {
        path: PathBuf,
        found: u32,
        expected: u32,
    },
    #[error("Unexpected kind '{found}' in {path} (expected '{expected}')")]
    WrongKind {
        path: PathBuf,
        found: String,
        expected: &'static str,
    },
    #[error("Model expects {model} features but the vectorizer produces {vectorizer}")]
    DimensionMismatch { model: usize, vectorizer: usize },
    #[error(transparent)]
    Vectorizer(#[from] TfidfError),
    #[error(transparent)]
    Model(#[from] LogRegError),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct VectorizerFile {
    format_version: u32,
    kind: String,
    settings: TfidfSettings,
    vocabulary: Vec<String>,
    idf: Vec<f32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ModelFile {
    format_version: u32,
    kind: String,
    feature_dim: usize,
    classes: Vec<String>,
    weights: Vec<f32>,
    bias: Vec<f32>,
}

/// A fitted vectorizer and classifier that belong together.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainedArtifacts {
    pub vectorizer: TfidfVectorizer,
    pub model: LogRegModel,
}

impl TrainedArtifacts {
    /// Predict a class label for each text.
    pub fn predict<S: AsRef<str>>(&self, texts: &[S]) -> Result<Vec<String>, TfidfError> {
        Ok(self
            .vectorizer
            .transform(texts)?
            .iter()
            .map(|row| self.model.predict_label(row).unwrap_or_default().to_string())
            .collect())
    }
}

/// Paths written by [`save_artifacts`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub vectorizer: PathBuf,
    pub model: PathBuf,
}

/// Persist both artifacts into `dir`, creating it if needed.
pub fn save_artifacts(
    dir: &Path,
    vectorizer: &TfidfVectorizer,
    model: &LogRegModel,
) -> Result<ArtifactPaths, ArtifactError> {
    if model.feature_dim != vectorizer.dim() {
        return Err(ArtifactError::DimensionMismatch {
            model: model.feature_dim,
            vectorizer: vectorizer.dim(),
        });
    }
    std::fs::create_dir_all(dir).map_err(|source| ArtifactError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;
    let paths = ArtifactPaths {
        vectorizer: dir.join(VECTORIZER_FILE_NAME),
        model: dir.join(MODEL_FILE_NAME),
    };
    write_json(
        &paths.vectorizer,
        &VectorizerFile {
            format_version: ARTIFACT_FORMAT_VERSION,
            kind: VECTORIZER_KIND.to_string(),
            settings: vectorizer.settings(),
            vocabulary: vectorizer.terms().to_vec(),
            idf: vectorizer.idf().to_vec(),
        },
    )?;
    write_json(
        &paths.model,
        &ModelFile {
            format_version: ARTIFACT_FORMAT_VERSION,
            kind: MODEL_KIND.to_string(),
            feature_dim: model.feature_dim,
            classes: model.classes.clone(),
            weights: model.weights.clone(),
            bias: model.bias.clone(),
        },
    )?;
    tracing::info!("Saved artifacts to {}", dir.display());
    Ok(paths)
}

/// Load and validate both artifacts from `dir`.
pub fn load_artifacts(dir: &Path) -> Result<TrainedArtifacts, ArtifactError> {
    let vectorizer_path = dir.join(VECTORIZER_FILE_NAME);
    let file: VectorizerFile = read_json(&vectorizer_path)?;
    check_header(&vectorizer_path, file.format_version, &file.kind, VECTORIZER_KIND)?;
    let vectorizer = TfidfVectorizer::from_parts(file.settings, file.vocabulary, file.idf)?;

    let model_path = dir.join(MODEL_FILE_NAME);
    let file: ModelFile = read_json(&model_path)?;
    check_header(&model_path, file.format_version, &file.kind, MODEL_KIND)?;
    let model = LogRegModel {
        feature_dim: file.feature_dim,
        classes: file.classes,
        weights: file.weights,
        bias: file.bias,
    };
    model.validate()?;
    if model.feature_dim != vectorizer.dim() {
        return Err(ArtifactError::DimensionMismatch {
            model: model.feature_dim,
            vectorizer: vectorizer.dim(),
        });
    }
    Ok(TrainedArtifacts { vectorizer, model })
}

fn check_header(
    path: &Path,
    version: u32,
    kind: &str,
    expected_kind: &'static str,
) -> Result<(), ArtifactError> {
    if version != ARTIFACT_FORMAT_VERSION {
        return Err(ArtifactError::UnsupportedVersion {
            path: path.to_path_buf(),
            found: version,
            expected: ARTIFACT_FORMAT_VERSION,
        });
    }
    if kind != expected_kind {
        return Err(ArtifactError::WrongKind {
            path: path.to_path_buf(),
            found: kind.to_string(),
            expected: expected_kind,
        });
    }
    Ok(())
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), ArtifactError> {
    let data = serde_json::to_vec_pretty(value).map_err(|source| ArtifactError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    std::fs::write(path, data).map_err(|source| ArtifactError::Write {
        path: path.to_path_buf(),
        source,
    })
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ArtifactError> {
    let bytes = std::fs::read(path).map_err(|source| ArtifactError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_slice(&bytes).map_err(|source| ArtifactError::Json {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn fitted() -> (TfidfVectorizer, LogRegModel) {
        let vectorizer =
            TfidfVectorizer::fit(&["clean room", "dirty room"], TfidfSettings::default()).unwrap();
        let model = LogRegModel {
            feature_dim: vectorizer.dim(),
            classes: vec!["Negative".into(), "Positive".into()],
            weights: vec![0.0, 1.0, 0.0, 1.0, 0.0, 0.0],
            bias: vec![0.0, 0.0],
        };
        (vectorizer, model)
    }

    #[test]
    fn artifacts_round_trip() {
        let dir = tempdir().unwrap();
        let (vectorizer, model) = fitted();
        let out = dir.path().join("artifacts");
        let paths = save_artifacts(&out, &vectorizer, &model).unwrap();
        assert!(paths.vectorizer.ends_with(VECTORIZER_FILE_NAME));
        let loaded = load_artifacts(&out).unwrap();
        assert_eq!(loaded.vectorizer, vectorizer);
        assert_eq!(loaded.model, model);
        assert_eq!(loaded.predict(&["a dirty place"]).unwrap(), vec!["Negative"]);
    }

    #[test]
    fn rejects_other_versions_and_kinds() {
        let dir = tempdir().unwrap();
        let (vectorizer, model) = fitted();
        save_artifacts(dir.path(), &vectorizer, &model).unwrap();
        let model_path = dir.path().join(MODEL_FILE_NAME);
        let text = std::fs::read_to_string(&model_path).unwrap();
        std::fs::write(&model_path, text.replace("\"format_version\": 1", "\"format_version\": 2"))
            .unwrap();
        assert!(matches!(
            load_artifacts(dir.path()),
            Err(ArtifactError::UnsupportedVersion { found: 2, .. })
        ));

        let vec_path = dir.path().join(VECTORIZER_FILE_NAME);
        let text = std::fs::read_to_string(&vec_path).unwrap();
        std::fs::write(&vec_path, text.replace(VECTORIZER_KIND, "bag_of_words")).unwrap();
        assert!(matches!(
            load_artifacts(dir.path()),
            Err(ArtifactError::WrongKind { .. })
        ));
    }

    #[test]
    fn missing_directory_is_a_read_error() {
        let dir = tempdir().unwrap();
        assert!(matches!(
            load_artifacts(&dir.path().join("nope")),
            Err(ArtifactError::Read { .. })
        ));
    }
}
