//! Hotel review sentiment dashboard.
//!
//! Library exports for reuse in the binaries, benchmarks and tests.

/// Per-user application directories.
pub mod app_dirs;
/// Chunked classification of review batches.
pub mod classify;
/// Persisted user settings.
pub mod config;
/// Shared egui UI modules.
pub mod egui_app;
/// Review collection from CSV uploads and manual entry.
pub mod input;
/// Logging setup.
pub mod logging;
/// Offline training pipeline for the toy model.
pub mod ml;
/// Pretrained sentiment model handle.
pub mod model;
/// Report projections and CSV export.
pub mod report;
/// Sentiment labels and result sets.
pub mod sentiment;
