use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord};
use tracing::debug;

use crate::{Cell, FinancialTable, SourceError, TableRow};

use super::{SourceOptions, TabularSource};

/// Statement exported from a spreadsheet as CSV.
///
/// The first column holds row labels, every further column one period.
#[derive(Debug, Clone)]
pub struct CsvSource {
    path: PathBuf,
    name: String,
    options: SourceOptions,
}

impl CsvSource {
    pub fn new(path: impl AsRef<Path>, options: SourceOptions) -> Self {
        let path = path.as_ref().to_path_buf();
        Self {
            name: path.display().to_string(),
            path,
            options,
        }
    }

    fn csv_error(&self, source: csv::Error) -> SourceError {
        SourceError::Csv {
            path: self.name.clone(),
            source,
        }
    }
}

impl TabularSource for CsvSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn read_table(&self) -> Result<FinancialTable, SourceError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_path(&self.path)
            .map_err(|source| self.csv_error(source))?;

        let records = reader
            .records()
            .skip(self.options.skip_rows)
            .collect::<Result<Vec<StringRecord>, _>>()
            .map_err(|source| self.csv_error(source))?;

        let mut records = records.into_iter();
        let header = if self.options.has_header {
            Some(records.next().ok_or_else(|| SourceError::MissingHeader {
                path: self.name.clone(),
                skip_rows: self.options.skip_rows,
            })?)
        } else {
            None
        };

        let body: Vec<(String, Vec<Cell>)> = records
            .map(|record| {
                let label = record.get(0).unwrap_or_default().to_owned();
                let cells = record.iter().skip(1).map(Cell::from_text).collect();
                (label, cells)
            })
            .collect();

        let header_periods: Vec<String> = header
            .as_ref()
            .map(|record| record.iter().skip(1).map(str::to_owned).collect())
            .unwrap_or_default();

        let width = body
            .iter()
            .map(|(_, cells)| used_width(cells))
            .chain(std::iter::once(
                header_periods
                    .iter()
                    .rposition(|period| !period.is_empty())
                    .map_or(0, |index| index + 1),
            ))
            .max()
            .unwrap_or(0);

        let periods = if header.is_some() {
            let mut periods = header_periods;
            periods.resize(width, String::new());
            periods
        } else {
            Vec::new()
        };

        let rows = body
            .into_iter()
            .map(|(label, mut cells)| {
                cells.resize(width, Cell::Empty);
                TableRow::new(label, cells)
            })
            .collect::<Vec<_>>();

        debug!(source = %self.name, rows = rows.len(), periods = width, "read csv table");
        FinancialTable::new(periods, rows)
    }
}

fn used_width(cells: &[Cell]) -> usize {
    cells
        .iter()
        .rposition(|cell| !cell.is_empty())
        .map_or(0, |index| index + 1)
}
