//! Dashboard session: collected input, the running analysis and the last results.

mod jobs;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use rfd::FileDialog;

use crate::classify::BatchClassifier;
use crate::config::{self, AppConfig};
use crate::egui_app::state::*;
use crate::input::{self, ReviewBatch, ReviewSource};
use crate::model::ModelHandle;
use crate::report::{CategoryView, DonutChart, ReportSummary, export};
use crate::sentiment::{ResultSet, Sentiment};

use jobs::{AnalysisJob, AnalysisMessage, JobPoll};

/// Maintains app state and bridges the analysis pipeline to the egui UI.
pub struct DashboardController {
    pub ui: UiState,
    classifier: BatchClassifier,
    config: AppConfig,
    /// Where settings are persisted; `None` keeps them in memory only.
    config_path: Option<PathBuf>,
    upload: Option<ReviewBatch>,
    results: Option<Arc<ResultSet>>,
    job: Option<AnalysisJob>,
}

impl DashboardController {
    pub fn new(model: ModelHandle, config: AppConfig) -> Self {
        let classifier = BatchClassifier::new(model, config.analysis.batch_size);
        Self {
            ui: UiState::default(),
            classifier,
            config,
            config_path: None,
            upload: None,
            results: None,
            job: None,
        }
    }

    /// Persist settings changes (upload/export folders) to `path`.
    pub fn with_config_path(mut self, path: PathBuf) -> Self {
        self.config_path = Some(path);
        self
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn set_status(&mut self, text: impl Into<String>, tone: StatusTone) {
        self.ui.status = StatusBarState::new(text, tone);
    }

    pub fn set_input_tab(&mut self, tab: InputTab) {
        self.ui.input_tab = tab;
    }

    pub fn set_result_tab(&mut self, sentiment: Sentiment) {
        self.ui.result_tab = sentiment;
    }

    /// Load reviews from a CSV file on disk as the upload input.
    pub fn load_csv_path(&mut self, path: &Path) {
        self.ui.input_tab = InputTab::Upload;
        match input::reviews_from_csv_path(path) {
            Ok(batch) => {
                let (file_name, column) = match &batch.source {
                    ReviewSource::Upload { file_name, column } => {
                        (file_name.clone(), column.clone())
                    }
                    ReviewSource::Manual => (path.display().to_string(), String::new()),
                };
                self.set_status(
                    format!("Loaded {} reviews from {column}", batch.len()),
                    StatusTone::Success,
                );
                self.ui.upload = Some(UploadSummary {
                    file_name,
                    column,
                    count: batch.len(),
                });
                self.upload = Some(batch);
                if let Some(parent) = path.parent() {
                    self.config.last_upload_dir = Some(parent.to_path_buf());
                    self.persist_config();
                }
            }
            Err(err) => {
                tracing::warn!("Rejected upload {}: {err}", path.display());
                self.upload = None;
                self.ui.upload = None;
                self.set_status(err.to_string(), StatusTone::Error);
            }
        }
    }

    /// Open a native file picker and load the chosen CSV.
    pub fn pick_csv_via_dialog(&mut self) {
        let mut dialog = FileDialog::new().add_filter("CSV", &["csv"]);
        if let Some(dir) = self.config.upload_dialog_dir() {
            dialog = dialog.set_directory(dir);
        }
        if let Some(path) = dialog.pick_file() {
            self.load_csv_path(&path);
        }
    }

    /// Load the first CSV among files dropped onto the window.
    pub fn handle_dropped_files(&mut self, files: &[egui::DroppedFile]) {
        if files.is_empty() {
            return;
        }
        let csv = files
            .iter()
            .filter_map(|file| file.path.as_deref())
            .find(|path| is_csv(path));
        match csv {
            Some(path) => {
                let path = path.to_path_buf();
                self.load_csv_path(&path);
            }
            None => self.set_status("Drop a .csv file to upload reviews", StatusTone::Warning),
        }
    }

    /// Replace the manual entry text.
    pub fn set_manual_text(&mut self, text: impl Into<String>) {
        self.ui.manual_text = text.into();
        self.ui.manual_count = input::reviews_from_text(&self.ui.manual_text).len();
        self.ui.input_tab = InputTab::Manual;
        if self.is_busy() {
            return;
        }
        if self.ui.manual_count > 0 {
            self.set_status(
                format!("{} reviews ready for analysis.", self.ui.manual_count),
                StatusTone::Info,
            );
        } else {
            self.ui.status = StatusBarState::idle();
        }
    }

    /// Reviews the next analysis would run on, taken from the active input tab.
    pub fn collected_reviews(&self) -> Option<ReviewBatch> {
        match self.ui.input_tab {
            InputTab::Upload => self.upload.clone(),
            InputTab::Manual => Some(input::manual_batch(&self.ui.manual_text)),
        }
        .filter(|batch| !batch.is_empty())
    }

    pub fn is_busy(&self) -> bool {
        self.job.is_some()
    }

    /// Kick off an analysis of the collected reviews on the worker thread.
    pub fn start_analysis(&mut self) {
        if self.is_busy() {
            self.set_status("Analysis already running", StatusTone::Info);
            return;
        }
        let Some(batch) = self.collected_reviews() else {
            self.set_status(
                crate::classify::AnalysisError::NoReviews.to_string(),
                StatusTone::Warning,
            );
            return;
        };
        let total = batch.len();
        tracing::info!(reviews = total, source = %batch.source, "Starting analysis");
        match AnalysisJob::spawn(self.classifier.clone(), batch.reviews) {
            Ok(job) => {
                self.job = Some(job);
                self.ui.progress = ProgressState::start(total);
                self.set_status(format!("Analyzing {total} reviews..."), StatusTone::Busy);
            }
            Err(err) => {
                tracing::error!("Failed to start analysis worker: {err}");
                self.set_status(format!("Failed to start analysis: {err}"), StatusTone::Error);
            }
        }
    }

    /// Drain worker messages; returns true when anything changed.
    pub fn poll_jobs(&mut self) -> bool {
        let mut changed = false;
        while let Some(job) = self.job.as_ref() {
            match job.try_next() {
                JobPoll::Pending => break,
                JobPoll::Message(AnalysisMessage::Progress(progress)) => {
                    self.ui.progress.advance(progress);
                    changed = true;
                }
                JobPoll::Message(AnalysisMessage::Finished(result)) => {
                    let elapsed = job.elapsed();
                    self.job = None;
                    self.ui.progress.visible = false;
                    match result {
                        Ok(results) => {
                            self.set_status(
                                format!("Done! Time: {:.2}s", elapsed.as_secs_f64()),
                                StatusTone::Success,
                            );
                            self.results = Some(Arc::new(results));
                        }
                        Err(err) => self.set_status(err.to_string(), StatusTone::Error),
                    }
                    changed = true;
                }
                JobPoll::Lost => {
                    let total = job.total();
                    self.job = None;
                    self.ui.progress.visible = false;
                    tracing::error!(reviews = total, "Analysis worker exited without a result");
                    self.set_status("Analysis stopped unexpectedly", StatusTone::Error);
                    changed = true;
                }
            }
        }
        changed
    }

    pub fn results(&self) -> Option<&Arc<ResultSet>> {
        self.results.as_ref()
    }

    pub fn summary(&self) -> Option<ReportSummary> {
        self.results
            .as_deref()
            .map(ReportSummary::from_results)
    }

    pub fn chart(&self) -> Option<DonutChart> {
        self.summary().as_ref().map(DonutChart::from_summary)
    }

    pub fn category_view(&self, sentiment: Sentiment) -> Option<CategoryView> {
        self.results
            .as_deref()
            .map(|results| CategoryView::for_sentiment(results, sentiment))
    }

    /// Write the current results as CSV to `path`.
    pub fn export_to_path(&mut self, path: &Path) {
        let Some(results) = self.results.clone() else {
            self.set_status("Nothing to export yet", StatusTone::Warning);
            return;
        };
        match export::write_csv(&results, path) {
            Ok(()) => {
                self.set_status(
                    format!("Saved {} results to {}", results.len(), path.display()),
                    StatusTone::Success,
                );
                if let Some(parent) = path.parent() {
                    self.config.export.last_dir = Some(parent.to_path_buf());
                    self.persist_config();
                }
            }
            Err(err) => {
                tracing::error!("Export failed: {err}");
                self.set_status(err.to_string(), StatusTone::Error);
            }
        }
    }

    /// Ask for a destination with a native save dialog, then export.
    pub fn export_via_dialog(&mut self) {
        if self.results.is_none() {
            self.set_status("Nothing to export yet", StatusTone::Warning);
            return;
        }
        let mut dialog = FileDialog::new()
            .add_filter("CSV", &["csv"])
            .set_file_name(&self.config.export.file_name);
        if let Some(dir) = self.config.export.dialog_dir() {
            dialog = dialog.set_directory(dir);
        }
        if let Some(path) = dialog.save_file() {
            self.export_to_path(&path);
        }
    }

    fn persist_config(&mut self) {
        let Some(path) = self.config_path.as_deref() else {
            return;
        };
        if let Err(err) = config::save_to_path(&self.config, path) {
            tracing::warn!("Failed to save config: {err}");
        }
    }
}

fn is_csv(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
}
