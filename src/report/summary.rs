use crate::sentiment::{ResultSet, Sentiment};

/// Caption of the headline total card.
pub const TOTAL_CAPTION: &str = "TOTAL REVIEWS ANALYZED";

/// Count and share of one category.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryStat {
    pub sentiment: Sentiment,
    pub count: usize,
    /// Share of the total in `[0, 100]`.
    pub percentage: f64,
}

impl CategoryStat {
    /// Metric card caption for this category.
    pub fn caption(&self) -> &'static str {
        metric_caption(self.sentiment)
    }

    /// `"60.0%"`.
    pub fn percentage_label(&self) -> String {
        format!("{:.1}%", self.percentage)
    }

    /// `"6 Reviews"`.
    pub fn count_label(&self) -> String {
        format!("{} Reviews", format_count(self.count))
    }
}

/// Headline metrics for a result set.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportSummary {
    pub total: usize,
    /// One entry per category, in [`Sentiment::ALL`] order.
    pub categories: [CategoryStat; 3],
}

impl ReportSummary {
    pub fn from_results(results: &ResultSet) -> Self {
        let total = results.len();
        let categories = Sentiment::ALL.map(|sentiment| {
            let count = results.count(sentiment);
            let percentage = if total == 0 {
                0.0
            } else {
                count as f64 * 100.0 / total as f64
            };
            CategoryStat {
                sentiment,
                count,
                percentage,
            }
        });
        Self { total, categories }
    }

    pub fn stat(&self, sentiment: Sentiment) -> CategoryStat {
        self.categories
            .iter()
            .copied()
            .find(|stat| stat.sentiment == sentiment)
            .unwrap_or(CategoryStat {
                sentiment,
                count: 0,
                percentage: 0.0,
            })
    }

    /// `"1,234"`.
    pub fn total_label(&self) -> String {
        format_count(self.total)
    }
}

pub fn metric_caption(sentiment: Sentiment) -> &'static str {
    match sentiment {
        Sentiment::Positive => "POSITIVE SHARE",
        Sentiment::Neutral => "NEUTRAL/UNCERTAIN",
        Sentiment::Negative => "CRITICAL NEGATIVE RISK",
    }
}

/// Format an integer with comma thousands separators.
pub fn format_count(value: usize) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
