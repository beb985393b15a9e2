//! CSV serialization of a result set (`Review,Sentiment`).

use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::sentiment::{ClassificationResult, ResultSet};

/// Header row of every export.
pub const EXPORT_HEADERS: [&str; 2] = ["Review", "Sentiment"];

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to encode CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Unexpected CSV header {found:?} (expected Review,Sentiment)")]
    Header { found: Vec<String> },
}

/// Write `results` as CSV to any writer.
pub fn write_csv_to<W: Write>(results: &ResultSet, writer: W) -> Result<(), ExportError> {
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record(EXPORT_HEADERS)?;
    for item in results.iter() {
        writer.write_record([item.review.as_str(), item.sentiment.as_str()])?;
    }
    writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Encode `results` as UTF-8 CSV bytes.
pub fn to_csv_bytes(results: &ResultSet) -> Result<Vec<u8>, ExportError> {
    let mut buffer = Vec::new();
    write_csv_to(results, &mut buffer)?;
    Ok(buffer)
}

/// Write `results` to `path`, replacing any existing file.
pub fn write_csv(results: &ResultSet, path: &Path) -> Result<(), ExportError> {
    let bytes = to_csv_bytes(results)?;
    std::fs::write(path, bytes).map_err(|source| ExportError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(rows = results.len(), "Exported results to {}", path.display());
    Ok(())
}

/// Read an export back into a result set.
pub fn parse_csv<R: Read>(reader: R) -> Result<ResultSet, ExportError> {
    let mut reader = csv::Reader::from_reader(reader);
    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    if headers != EXPORT_HEADERS {
        return Err(ExportError::Header { found: headers });
    }
    let items = reader
        .deserialize::<ClassificationResult>()
        .collect::<Result<Vec<_>, _>>()?;
    Ok(ResultSet::from_results(items))
}
