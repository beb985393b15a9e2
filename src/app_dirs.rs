//! Where sentidash keeps its own files and where its file dialogs open.
//!
//! Settings and logs live in a `.sentidash` folder under the OS config directory
//! (`~/.config` on Linux, `%APPDATA%` on Windows). `SENTIDASH_CONFIG_HOME` replaces that
//! base for portable setups. Upload and export dialogs reopen the folder remembered in
//! the config and otherwise start in the user's documents folder.

use std::path::{Path, PathBuf};

use directories::{BaseDirs, UserDirs};
use thiserror::Error;

/// Name of the application directory that lives under the config base.
pub const APP_DIR_NAME: &str = ".sentidash";
/// Environment variable that replaces the OS config directory as the base.
pub const CONFIG_HOME_ENV: &str = "SENTIDASH_CONFIG_HOME";
const LOGS_DIR_NAME: &str = "logs";

/// Errors that can occur while resolving or preparing application directories.
#[derive(Debug, Error)]
pub enum AppDirError {
    #[error("No suitable base config directory available for application files")]
    NoBaseDir,
    #[error("Failed to create application directory at {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// The `.sentidash` folder. Nothing is created until a directory is asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppDirs {
    root: PathBuf,
}

impl AppDirs {
    /// Anchor under `SENTIDASH_CONFIG_HOME`, or the OS config directory when unset.
    pub fn resolve() -> Result<Self, AppDirError> {
        let base = std::env::var_os(CONFIG_HOME_ENV)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
            .or_else(|| BaseDirs::new().map(|dirs| dirs.config_dir().to_path_buf()))
            .ok_or(AppDirError::NoBaseDir)?;
        Ok(Self::under(&base))
    }

    /// Anchor under an explicit base folder.
    pub fn under(base: &Path) -> Self {
        Self {
            root: base.join(APP_DIR_NAME),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The `.sentidash` folder, created on demand.
    pub fn ensure_root(&self) -> Result<PathBuf, AppDirError> {
        ensure_dir(self.root.clone())
    }

    /// Per-launch log files, created on demand.
    pub fn logs_dir(&self) -> Result<PathBuf, AppDirError> {
        ensure_dir(self.root.join(LOGS_DIR_NAME))
    }
}

/// Folder a CSV dialog should open in.
///
/// A remembered folder is used while it still exists; afterwards the dialog falls back
/// to the documents folder, then the home folder.
pub fn dialog_start_dir(remembered: Option<&Path>) -> Option<PathBuf> {
    if let Some(dir) = remembered.filter(|dir| dir.is_dir()) {
        return Some(dir.to_path_buf());
    }
    let dirs = UserDirs::new()?;
    Some(
        dirs.document_dir()
            .unwrap_or_else(|| dirs.home_dir())
            .to_path_buf(),
    )
}

fn ensure_dir(path: PathBuf) -> Result<PathBuf, AppDirError> {
    std::fs::create_dir_all(&path).map_err(|source| AppDirError::CreateDir {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}
