//! Donut chart model: slices, proportions and the fixed category palette.

use crate::sentiment::Sentiment;

use super::ReportSummary;

pub const CHART_TITLE: &str = "Distribution of Sentiment Classes";
/// Inner radius as a share of the outer radius.
pub const HOLE_RATIO: f32 = 0.55;

/// Plain RGB color, independent of any UI toolkit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// `#RRGGBB`.
    pub fn hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

/// Fixed color of each category: green, amber, red.
pub fn sentiment_color(sentiment: Sentiment) -> Rgb {
    match sentiment {
        Sentiment::Positive => Rgb(0x4C, 0xAF, 0x50),
        Sentiment::Neutral => Rgb(0xFF, 0xC1, 0x07),
        Sentiment::Negative => Rgb(0xF4, 0x43, 0x36),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartSlice {
    pub sentiment: Sentiment,
    pub count: usize,
    /// Share of the whole in `[0, 1]`.
    pub fraction: f32,
    pub color: Rgb,
}

impl ChartSlice {
    /// Caption drawn on the slice, e.g. `"Positive 60.0%"`.
    pub fn caption(&self) -> String {
        format!("{} {:.1}%", self.sentiment, self.fraction * 100.0)
    }
}

/// Proportion chart keyed by category.
#[derive(Debug, Clone, PartialEq)]
pub struct DonutChart {
    pub title: &'static str,
    pub hole_ratio: f32,
    /// Non-empty categories only, in presentation order.
    pub slices: Vec<ChartSlice>,
}

impl DonutChart {
    pub fn from_summary(summary: &ReportSummary) -> Self {
        let slices = summary
            .categories
            .iter()
            .filter(|stat| stat.count > 0)
            .map(|stat| ChartSlice {
                sentiment: stat.sentiment,
                count: stat.count,
                fraction: (stat.percentage / 100.0) as f32,
                color: sentiment_color(stat.sentiment),
            })
            .collect();
        Self {
            title: CHART_TITLE,
            hole_ratio: HOLE_RATIO,
            slices,
        }
    }

    /// Start and end angle of every slice, in turns (`0..1`), clockwise from the top.
    pub fn spans(&self) -> Vec<(f32, f32)> {
        let mut start = 0.0f32;
        self.slices
            .iter()
            .map(|slice| {
                let end = start + slice.fraction;
                let span = (start, end);
                start = end;
                span
            })
            .collect()
    }
}
