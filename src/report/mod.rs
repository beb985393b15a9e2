//! Projections of a [`crate::sentiment::ResultSet`] for presentation.
//!
//! Nothing here mutates the result set; every type is rebuilt from it on demand.

pub mod chart;
pub mod export;
mod summary;
mod views;

pub use chart::{ChartSlice, DonutChart, Rgb, sentiment_color};
pub use summary::{CategoryStat, ReportSummary, TOTAL_CAPTION, format_count, metric_caption};
pub use views::CategoryView;
