use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::SourceError;

/// Raw spreadsheet cell as handed over by a tabular source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Number(f64),
    Text(String),
    Empty,
}

impl Cell {
    /// Builds a cell from exported text; blank text is [`Cell::Empty`].
    pub fn from_text(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            Self::Empty
        } else {
            Self::Text(trimmed.to_owned())
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Coerces the cell to a finite number.
    ///
    /// Accepts thousands separators, a leading currency sign and accounting
    /// negatives such as `(1,234.5)`. Dash placeholders and blanks are rejected.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) => value.is_finite().then_some(*value),
            Self::Text(text) => coerce_numeric(text),
            Self::Empty => None,
        }
    }
}

impl Display for Cell {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Text(text) => f.write_str(text),
            Self::Empty => f.write_str("<empty>"),
        }
    }
}

fn coerce_numeric(raw: &str) -> Option<f64> {
    let mut text = raw.trim();
    let mut negative = false;

    if let Some(inner) = text.strip_prefix('(').and_then(|rest| rest.strip_suffix(')')) {
        negative = true;
        text = inner.trim();
    }

    if let Some(rest) = text.strip_prefix('-') {
        if negative {
            return None;
        }
        negative = true;
        text = rest.trim_start();
    }

    for symbol in ['$', '€', '£'] {
        if let Some(rest) = text.strip_prefix(symbol) {
            text = rest.trim_start();
            break;
        }
    }

    let cleaned: String = text.chars().filter(|ch| *ch != ',' && *ch != '_').collect();
    if cleaned.is_empty() || !cleaned.chars().any(|ch| ch.is_ascii_digit()) {
        return None;
    }
    if negative && cleaned.starts_with(['-', '+']) {
        return None;
    }

    let value = cleaned.parse::<f64>().ok()?;
    if !value.is_finite() {
        return None;
    }

    Some(if negative { -value } else { value })
}

/// A labelled row of period cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    /// `None` for spacer rows whose label cell was blank.
    pub label: Option<String>,
    pub cells: Vec<Cell>,
}

impl TableRow {
    pub fn new(label: impl AsRef<str>, cells: Vec<Cell>) -> Self {
        let label = label.as_ref().trim();
        Self {
            label: (!label.is_empty()).then(|| label.to_owned()),
            cells,
        }
    }

    pub fn numbers(label: impl AsRef<str>, values: &[f64]) -> Self {
        Self::new(label, values.iter().copied().map(Cell::Number).collect())
    }
}

#[derive(Deserialize)]
struct TableRepr {
    #[serde(default)]
    periods: Vec<String>,
    rows: Vec<TableRow>,
}

/// Rectangular statement table: ordered rows, each with one cell per period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TableRepr")]
pub struct FinancialTable {
    /// Period headers (e.g. fiscal years), oldest first. May be empty.
    pub periods: Vec<String>,
    pub rows: Vec<TableRow>,
}

impl FinancialTable {
    pub fn new(periods: Vec<String>, rows: Vec<TableRow>) -> Result<Self, SourceError> {
        let width = if periods.is_empty() {
            rows.first().map_or(0, |row| row.cells.len())
        } else {
            periods.len()
        };

        for (index, row) in rows.iter().enumerate() {
            if row.cells.len() != width {
                return Err(SourceError::RaggedRow {
                    row: index,
                    expected: width,
                    found: row.cells.len(),
                });
            }
        }

        Ok(Self { periods, rows })
    }

    /// Number of period columns.
    pub fn width(&self) -> usize {
        if self.periods.is_empty() {
            self.rows.first().map_or(0, |row| row.cells.len())
        } else {
            self.periods.len()
        }
    }

    /// Distinct non-empty labels in table order.
    pub fn labels(&self) -> Vec<String> {
        let mut labels: Vec<String> = Vec::new();
        let non_blank = self
            .rows
            .iter()
            .filter_map(|row| row.label.as_deref())
            .map(str::trim)
            .filter(|label| !label.is_empty());
        for label in non_blank {
            if !labels.iter().any(|existing| existing == label) {
                labels.push(label.to_owned());
            }
        }
        labels
    }
}

impl TryFrom<TableRepr> for FinancialTable {
    type Error = SourceError;

    fn try_from(repr: TableRepr) -> Result<Self, Self::Error> {
        let rows = repr
            .rows
            .into_iter()
            .map(|row| TableRow::new(row.label.unwrap_or_default(), row.cells))
            .collect();
        Self::new(repr.periods, rows)
    }
}
