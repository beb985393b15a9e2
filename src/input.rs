//! Review collection from uploaded CSV tables or manual text entry.

use std::fmt;
use std::io::Read;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Case-insensitive substring that marks the review column of an upload.
pub const REVIEW_COLUMN_MARKER: &str = "review";

/// Errors raised while collecting reviews.
#[derive(Debug, Error)]
pub enum InputError {
    /// No header contains the review marker.
    #[error("No 'review' column found (columns: {})", .columns.join(", "))]
    NoReviewColumn { columns: Vec<String> },
    /// The upload had no header row at all.
    #[error("Error reading CSV: the file is empty")]
    EmptyTable,
    /// The table could not be parsed.
    #[error("Error reading CSV: {0}")]
    Malformed(#[from] csv::Error),
    /// A data row has more fields than the header.
    #[error("Error reading CSV: line {line} has {found} fields, expected {expected}")]
    RowTooLong {
        line: u64,
        expected: usize,
        found: usize,
    },
    /// The upload could not be opened.
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Where a batch of reviews came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewSource {
    Upload { file_name: String, column: String },
    Manual,
}

impl fmt::Display for ReviewSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReviewSource::Upload { file_name, column } => write!(f, "{column} in {file_name}"),
            ReviewSource::Manual => f.write_str("manual entry"),
        }
    }
}

/// Reviews collected from one source, ready for analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewBatch {
    pub source: ReviewSource,
    pub reviews: Vec<String>,
}

impl ReviewBatch {
    pub fn len(&self) -> usize {
        self.reviews.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reviews.is_empty()
    }
}

/// Reviews pulled out of a CSV table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvReviews {
    /// Header of the column the reviews were read from.
    pub column: String,
    pub reviews: Vec<String>,
}

/// Return the first header containing [`REVIEW_COLUMN_MARKER`], ignoring case.
pub fn find_review_column<'a, I>(headers: I) -> Option<(usize, &'a str)>
where
    I: IntoIterator<Item = &'a str>,
{
    headers
        .into_iter()
        .enumerate()
        .find(|(_, name)| name.to_lowercase().contains(REVIEW_COLUMN_MARKER))
}

/// Parse a CSV table and collect the trimmed, non-empty cells of its review column.
///
/// Short rows are padded with missing cells, so a row that ends before the review column
/// contributes nothing. Rows longer than the header are rejected.
pub fn reviews_from_csv<R: Read>(reader: R) -> Result<CsvReviews, InputError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);
    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|name| name.trim_start_matches('\u{feff}').to_string())
        .collect();
    if headers.is_empty() || headers.iter().all(|name| name.trim().is_empty()) {
        return Err(InputError::EmptyTable);
    }
    let Some((index, column)) = find_review_column(headers.iter().map(String::as_str)) else {
        return Err(InputError::NoReviewColumn { columns: headers });
    };
    let column = column.to_string();

    let mut reviews = Vec::new();
    for record in reader.records() {
        let record = record?;
        if record.len() > headers.len() {
            return Err(InputError::RowTooLong {
                line: record.position().map_or(0, |pos| pos.line()),
                expected: headers.len(),
                found: record.len(),
            });
        }
        if let Some(review) = record.get(index).and_then(clean_review) {
            reviews.push(review);
        }
    }
    tracing::debug!(column = %column, count = reviews.len(), "Collected reviews from CSV");
    Ok(CsvReviews { column, reviews })
}

/// Open `path` and collect reviews from it as a CSV upload.
pub fn reviews_from_csv_path(path: &Path) -> Result<ReviewBatch, InputError> {
    let file = std::fs::File::open(path).map_err(|source| InputError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let parsed = reviews_from_csv(std::io::BufReader::new(file))?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok(ReviewBatch {
        source: ReviewSource::Upload {
            file_name,
            column: parsed.column,
        },
        reviews: parsed.reviews,
    })
}

/// Split a free-form text block into one review per non-blank line.
pub fn reviews_from_text(text: &str) -> Vec<String> {
    text.lines().filter_map(clean_review).collect()
}

/// Manual entry as a batch.
pub fn manual_batch(text: &str) -> ReviewBatch {
    ReviewBatch {
        source: ReviewSource::Manual,
        reviews: reviews_from_text(text),
    }
}

fn clean_review(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
