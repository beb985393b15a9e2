//! Evaluation metrics for classification models.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Confusion matrix for a `K`-class classifier.
pub struct ConfusionMatrix {
    pub n_classes: usize,
    /// Row-major `KxK` counts (`truth * K + predicted`).
    pub counts: Vec<u32>,
}

impl ConfusionMatrix {
    pub fn new(n_classes: usize) -> Self {
        Self {
            n_classes,
            counts: vec![0; n_classes * n_classes],
        }
    }

    /// Build from paired truth/prediction indices.
    pub fn from_pairs(n_classes: usize, truth: &[usize], predicted: &[usize]) -> Self {
        let mut cm = Self::new(n_classes);
        for (&t, &p) in truth.iter().zip(predicted) {
            cm.add(t, p);
        }
        cm
    }

    pub fn add(&mut self, truth: usize, predicted: usize) {
        if truth >= self.n_classes || predicted >= self.n_classes {
            return;
        }
        let idx = truth * self.n_classes + predicted;
        self.counts[idx] = self.counts[idx].saturating_add(1);
    }

    pub fn get(&self, truth: usize, predicted: usize) -> u32 {
        self.counts[truth * self.n_classes + predicted]
    }

    pub fn total(&self) -> u32 {
        self.counts.iter().sum()
    }

    /// Plain-text grid with class names on both axes (rows = truth).
    pub fn render(&self, classes: &[String]) -> String {
        let width = classes
            .iter()
            .map(String::len)
            .chain(std::iter::once(6))
            .max()
            .unwrap_or(6)
            + 2;
        let mut out = format!("{:>width$}", "");
        for name in classes.iter().take(self.n_classes) {
            out.push_str(&format!("{name:>width$}"));
        }
        out.push('\n');
        for truth in 0..self.n_classes {
            let name = classes.get(truth).map(String::as_str).unwrap_or("?");
            out.push_str(&format!("{name:>width$}"));
            for predicted in 0..self.n_classes {
                out.push_str(&format!("{:>width$}", self.get(truth, predicted)));
            }
            out.push('\n');
        }
        out
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
/// Precision/recall statistics for a single class.
pub struct PerClassStats {
    /// `TP / (TP + FP)`.
    pub precision: f32,
    /// `TP / (TP + FN)`.
    pub recall: f32,
    pub f1: f32,
    /// Total number of true examples for the class.
    pub support: u32,
}

/// Compute per-class precision, recall and f1 from a confusion matrix.
pub fn precision_recall_by_class(cm: &ConfusionMatrix) -> Vec<PerClassStats> {
    let k = cm.n_classes;
    let mut stats = Vec::with_capacity(k);
    for class_idx in 0..k {
        let tp = cm.get(class_idx, class_idx) as f32;
        let mut fp = 0f32;
        let mut fn_ = 0f32;
        let mut support = 0u32;
        for j in 0..k {
            let v = cm.get(class_idx, j);
            support = support.saturating_add(v);
            if j != class_idx {
                fn_ += v as f32;
            }
        }
        for i in 0..k {
            if i != class_idx {
                fp += cm.get(i, class_idx) as f32;
            }
        }
        let precision = if tp + fp == 0.0 { 0.0 } else { tp / (tp + fp) };
        let recall = if tp + fn_ == 0.0 { 0.0 } else { tp / (tp + fn_) };
        let f1 = if precision + recall == 0.0 {
            0.0
        } else {
            2.0 * precision * recall / (precision + recall)
        };
        stats.push(PerClassStats {
            precision,
            recall,
            f1,
            support,
        });
    }
    stats
}

/// Compute overall accuracy from a confusion matrix.
pub fn accuracy(cm: &ConfusionMatrix) -> f32 {
    let total = cm.total();
    if total == 0 {
        return 0.0;
    }
    let correct: u32 = (0..cm.n_classes).map(|c| cm.get(c, c)).sum();
    correct as f32 / total as f32
}

/// Per-class metrics plus accuracy and macro/weighted averages.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationReport {
    pub classes: Vec<String>,
    pub per_class: Vec<PerClassStats>,
    pub accuracy: f32,
    pub macro_avg: PerClassStats,
    pub weighted_avg: PerClassStats,
}

impl ClassificationReport {
    pub fn from_confusion(cm: &ConfusionMatrix, classes: &[String]) -> Self {
        let per_class = precision_recall_by_class(cm);
        let total: u32 = per_class.iter().map(|s| s.support).sum();
        let k = per_class.len().max(1) as f32;
        let macro_avg = PerClassStats {
            precision: per_class.iter().map(|s| s.precision).sum::<f32>() / k,
            recall: per_class.iter().map(|s| s.recall).sum::<f32>() / k,
            f1: per_class.iter().map(|s| s.f1).sum::<f32>() / k,
            support: total,
        };
        let weighted = |pick: fn(&PerClassStats) -> f32| {
            if total == 0 {
                0.0
            } else {
                per_class
                    .iter()
                    .map(|s| pick(s) * s.support as f32)
                    .sum::<f32>()
                    / total as f32
            }
        };
        let weighted_avg = PerClassStats {
            precision: weighted(|s: &PerClassStats| s.precision),
            recall: weighted(|s: &PerClassStats| s.recall),
            f1: weighted(|s: &PerClassStats| s.f1),
            support: total,
        };
        Self {
            classes: classes.to_vec(),
            per_class,
            accuracy: accuracy(cm),
            macro_avg,
            weighted_avg,
        }
    }
}

impl fmt::Display for ClassificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .classes
            .iter()
            .map(String::len)
            .chain(std::iter::once("weighted avg".len()))
            .max()
            .unwrap_or(12);
        writeln!(
            f,
            "{:>width$} {:>9} {:>9} {:>9} {:>9}",
            "", "precision", "recall", "f1-score", "support"
        )?;
        writeln!(f)?;
        for (name, stats) in self.classes.iter().zip(&self.per_class) {
            write_row(f, name, stats, width)?;
        }
        writeln!(f)?;
        writeln!(
            f,
            "{:>width$} {:>9} {:>9} {:>9.2} {:>9}",
            "accuracy", "", "", self.accuracy, self.macro_avg.support
        )?;
        write_row(f, "macro avg", &self.macro_avg, width)?;
        write_row(f, "weighted avg", &self.weighted_avg, width)
    }
}

fn write_row(
    f: &mut fmt::Formatter<'_>,
    name: &str,
    stats: &PerClassStats,
    width: usize,
) -> fmt::Result {
    writeln!(
        f,
        "{name:>width$} {:>9.2} {:>9.2} {:>9.2} {:>9}",
        stats.precision, stats.recall, stats.f1, stats.support
    )
}
