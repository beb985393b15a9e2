//! Dashboard settings persisted as TOML under the app directory.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::app_dirs::{self, AppDirError, AppDirs};

/// Default filename used to store the app configuration.
pub const CONFIG_FILE_NAME: &str = "config.toml";
/// Number of reviews sent to the model per call.
pub const DEFAULT_BATCH_SIZE: usize = 100;
/// Transformer confidence below which a review counts as neutral.
pub const DEFAULT_NEUTRAL_THRESHOLD: f32 = 0.75;
/// Suggested file name for the CSV export.
pub const DEFAULT_EXPORT_FILE_NAME: &str = "hotel_sentiment_report.csv";

/// Errors that may occur while loading or saving app configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unable to create config directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config at {path}: {source}")]
    ParseToml {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("Failed to serialize config to TOML at {path}: {source}")]
    SerializeToml {
        path: PathBuf,
        source: toml::ser::Error,
    },
    #[error("No suitable config directory found")]
    NoConfigDir,
}

/// Aggregate application settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Folder the last CSV upload was picked from.
    #[serde(default)]
    pub last_upload_dir: Option<PathBuf>,
    #[serde(default)]
    pub analysis: AnalysisSettings,
    #[serde(default)]
    pub model: ModelSettings,
    #[serde(default)]
    pub export: ExportSettings,
}

/// Batch inference tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSettings {
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

/// Pretrained model selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSettings {
    #[serde(default)]
    pub backend: ModelBackend,
    /// Binary transformer verdicts below this confidence are reported as neutral.
    #[serde(default = "default_neutral_threshold")]
    pub neutral_threshold: f32,
    /// Lexicon file to load instead of the bundled one. Lexicon backend only.
    #[serde(default)]
    pub lexicon_path: Option<PathBuf>,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            backend: ModelBackend::default(),
            neutral_threshold: DEFAULT_NEUTRAL_THRESHOLD,
            lexicon_path: None,
        }
    }
}

/// Which pretrained classifier the dashboard loads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelBackend {
    /// DistilBERT fine-tuned on SST-2; weights are downloaded and cached on first use.
    #[default]
    Transformer,
    /// Bundled valence lexicon, for machines without the transformer runtime or network.
    Lexicon,
}

/// CSV export preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportSettings {
    #[serde(default = "default_export_file_name")]
    pub file_name: String,
    /// Folder the last export was written to.
    #[serde(default)]
    pub last_dir: Option<PathBuf>,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            file_name: DEFAULT_EXPORT_FILE_NAME.to_string(),
            last_dir: None,
        }
    }
}

impl AppConfig {
    /// Folder the upload dialog opens in.
    pub fn upload_dialog_dir(&self) -> Option<PathBuf> {
        app_dirs::dialog_start_dir(self.last_upload_dir.as_deref())
    }

    /// Clamp values that would make the dashboard misbehave.
    pub fn normalized(mut self) -> Self {
        self.analysis.batch_size = self.analysis.batch_size.max(1);
        if !(0.5..1.0).contains(&self.model.neutral_threshold) {
            self.model.neutral_threshold = DEFAULT_NEUTRAL_THRESHOLD;
        }
        if self.export.file_name.trim().is_empty() {
            self.export.file_name = DEFAULT_EXPORT_FILE_NAME.to_string();
        }
        self
    }
}

impl ExportSettings {
    /// Folder the save dialog opens in.
    pub fn dialog_dir(&self) -> Option<PathBuf> {
        app_dirs::dialog_start_dir(self.last_dir.as_deref())
    }

    /// Default destination for the report: the dialog folder joined with the file name.
    pub fn suggested_path(&self) -> PathBuf {
        match self.dialog_dir() {
            Some(dir) => dir.join(&self.file_name),
            None => PathBuf::from(&self.file_name),
        }
    }
}

fn default_batch_size() -> usize {
    DEFAULT_BATCH_SIZE
}

fn default_neutral_threshold() -> f32 {
    DEFAULT_NEUTRAL_THRESHOLD
}

fn default_export_file_name() -> String {
    DEFAULT_EXPORT_FILE_NAME.to_string()
}

/// Resolve the configuration file path, ensuring the parent directory exists.
pub fn config_path() -> Result<PathBuf, ConfigError> {
    config_path_in(&AppDirs::resolve().map_err(map_app_dir_error)?)
}

/// `config.toml` inside an explicit app folder.
pub fn config_path_in(dirs: &AppDirs) -> Result<PathBuf, ConfigError> {
    let dir = dirs.ensure_root().map_err(map_app_dir_error)?;
    Ok(dir.join(CONFIG_FILE_NAME))
}

/// Load configuration from disk, returning defaults if missing.
pub fn load_or_default() -> Result<AppConfig, ConfigError> {
    load_from_path(&config_path()?)
}

/// Persist configuration to the default location.
pub fn save(config: &AppConfig) -> Result<(), ConfigError> {
    save_to_path(config, &config_path()?)
}

pub fn load_from_path(path: &Path) -> Result<AppConfig, ConfigError> {
    if !path.exists() {
        return Ok(AppConfig::default());
    }
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str::<AppConfig>(&text)
        .map(AppConfig::normalized)
        .map_err(|source| ConfigError::ParseToml {
            path: path.to_path_buf(),
            source,
        })
}

/// Save configuration to a specific path, creating parent directories as needed.
pub fn save_to_path(config: &AppConfig, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| ConfigError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let data = toml::to_string_pretty(config).map_err(|source| ConfigError::SerializeToml {
        path: path.to_path_buf(),
        source,
    })?;
    std::fs::write(path, data).map_err(|source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    })
}

fn map_app_dir_error(error: AppDirError) -> ConfigError {
    match error {
        AppDirError::NoBaseDir => ConfigError::NoConfigDir,
        AppDirError::CreateDir { path, source } => ConfigError::CreateDir { path, source },
    }
}
