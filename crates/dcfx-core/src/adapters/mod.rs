//! Tabular source adapters.
//!
//! Reading a spreadsheet export is kept outside the valuation core. Each
//! adapter yields a [`FinancialTable`] and nothing else; header offsets and
//! file formats are adapter concerns.

mod csv_source;
mod json_source;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{FinancialTable, SourceError};

pub use csv_source::CsvSource;
pub use json_source::JsonSource;

/// Anything that can produce a statement table.
pub trait TabularSource {
    /// Human-readable origin, used in logs and envelope metadata.
    fn name(&self) -> &str;

    fn read_table(&self) -> Result<FinancialTable, SourceError>;
}

/// Layout of a delimited export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceOptions {
    /// Leading records to drop before the header (report titles, notes).
    pub skip_rows: usize,
    /// Treat the first record after `skip_rows` as period headers.
    pub has_header: bool,
}

impl Default for SourceOptions {
    fn default() -> Self {
        Self {
            skip_rows: 0,
            has_header: true,
        }
    }
}

/// Picks an adapter by file extension.
pub fn open_source(
    path: impl AsRef<Path>,
    options: SourceOptions,
) -> Result<Box<dyn TabularSource>, SourceError> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("csv") => Ok(Box::new(CsvSource::new(path, options))),
        Some("json") => Ok(Box::new(JsonSource::new(path))),
        _ => Err(SourceError::UnsupportedFormat {
            path: path.display().to_string(),
        }),
    }
}
