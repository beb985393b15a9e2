//! Shared state types for the egui UI.

use egui::Color32;

use crate::classify::Progress;
use crate::egui_app::ui::style;
use crate::sentiment::Sentiment;

/// Top-level UI model consumed by the egui renderer.
#[derive(Clone, Debug)]
pub struct UiState {
    pub input_tab: InputTab,
    /// Raw contents of the manual entry box.
    pub manual_text: String,
    /// Non-blank lines in `manual_text`.
    pub manual_count: usize,
    /// The CSV currently loaded on the upload tab.
    pub upload: Option<UploadSummary>,
    pub progress: ProgressState,
    pub status: StatusBarState,
    /// Category shown in the review browser.
    pub result_tab: Sentiment,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            input_tab: InputTab::Upload,
            manual_text: String::new(),
            manual_count: 0,
            upload: None,
            progress: ProgressState::default(),
            status: StatusBarState::idle(),
            result_tab: Sentiment::Positive,
        }
    }
}

/// Which input mode feeds the next analysis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputTab {
    Upload,
    Manual,
}

impl InputTab {
    pub fn label(self) -> &'static str {
        match self {
            InputTab::Upload => "Upload Review Data",
            InputTab::Manual => "Manual Entry",
        }
    }
}

/// What the upload tab shows about the loaded file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadSummary {
    pub file_name: String,
    pub column: String,
    pub count: usize,
}

/// Progress of the running analysis.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProgressState {
    pub visible: bool,
    pub completed: usize,
    pub total: usize,
}

impl ProgressState {
    pub fn start(total: usize) -> Self {
        Self {
            visible: true,
            completed: 0,
            total,
        }
    }

    pub fn advance(&mut self, progress: Progress) {
        self.completed = progress.completed;
        self.total = progress.total;
    }

    pub fn fraction(&self) -> f32 {
        Progress {
            completed: self.completed,
            total: self.total,
        }
        .fraction()
    }
}

/// Tone of a status message; drives the badge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusTone {
    Idle,
    Busy,
    Info,
    Success,
    Warning,
    Error,
}

impl StatusTone {
    pub fn label(self) -> &'static str {
        match self {
            StatusTone::Idle => "Idle",
            StatusTone::Busy => "Analyzing",
            StatusTone::Info => "Info",
            StatusTone::Success => "Done",
            StatusTone::Warning => "Warning",
            StatusTone::Error => "Error",
        }
    }
}

/// Status badge + text shown in the footer.
#[derive(Clone, Debug, PartialEq)]
pub struct StatusBarState {
    pub text: String,
    pub tone: StatusTone,
    pub badge_label: String,
    pub badge_color: Color32,
}

impl StatusBarState {
    pub fn idle() -> Self {
        Self::new("Upload a CSV or enter reviews to get started", StatusTone::Idle)
    }

    pub fn new(text: impl Into<String>, tone: StatusTone) -> Self {
        Self {
            text: text.into(),
            tone,
            badge_label: tone.label().into(),
            badge_color: style::status_badge_color(tone),
        }
    }
}
