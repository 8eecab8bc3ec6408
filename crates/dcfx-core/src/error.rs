use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::LineItemKind;

/// Validation and contract errors exposed by `dcfx-core`.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    #[error("field '{field}' must be finite")]
    NonFiniteValue { field: &'static str },
    #[error("field '{field}' must be greater than -1.0, got {value}")]
    RateOutOfRange { field: &'static str, value: f64 },
    #[error("projection_years must be at most {max}, got {value}")]
    ProjectionYearsOutOfRange { value: u32, max: u32 },

    #[error("label mapping for '{item}' must contain at least one non-empty pattern")]
    EmptyMappingPatterns { item: LineItemKind },

    #[error("request_id must be at least 8 characters")]
    InvalidRequestId,
    #[error("schema_version must match vMAJOR.MINOR.PATCH: '{value}'")]
    InvalidSchemaVersion { value: String },

    #[error("error code cannot be empty")]
    EmptyErrorCode,
    #[error("error message cannot be empty")]
    EmptyErrorMessage,
}

/// Pipeline stage a [`DcfError`] originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Validation,
    Extraction,
    Metrics,
    Projection,
    Valuation,
}

impl Stage {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Extraction => "extraction",
            Self::Metrics => "metrics",
            Self::Projection => "projection",
            Self::Valuation => "valuation",
        }
    }
}

impl Display for Stage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failures of the valuation pipeline itself.
///
/// None of these are retryable: the pipeline is deterministic, so the same
/// tables and assumptions reproduce the same failure.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DcfError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(#[from] ValidationError),

    #[error("label '{label}' not found; available labels: [{}]", available.join(", "))]
    LabelNotFound {
        label: String,
        available: Vec<String>,
    },

    #[error("row '{label}' has non-numeric value '{value}' in column {column}")]
    NonNumericValue {
        label: String,
        column: usize,
        value: String,
    },

    #[error("row '{label}' has no historical periods")]
    NoHistoricalPeriods { label: String },

    #[error("{item} reports {found} periods but {expected} were expected")]
    MisalignedPeriods {
        item: LineItemKind,
        expected: usize,
        found: usize,
    },

    #[error("division by zero: {context}")]
    DivisionByZero { context: &'static str },

    #[error(
        "terminal value undefined: discount rate {discount_rate} equals terminal growth rate {terminal_growth_rate}"
    )]
    InvalidTerminalAssumption {
        discount_rate: f64,
        terminal_growth_rate: f64,
    },

    #[error("cannot compute a terminal value over an empty cash-flow series")]
    EmptySeries,
}

impl DcfError {
    pub const fn stage(&self) -> Stage {
        match self {
            Self::InvalidConfig(_) => Stage::Validation,
            Self::LabelNotFound { .. }
            | Self::NonNumericValue { .. }
            | Self::NoHistoricalPeriods { .. } => Stage::Extraction,
            Self::MisalignedPeriods { .. } => Stage::Metrics,
            Self::DivisionByZero { .. } => Stage::Projection,
            Self::InvalidTerminalAssumption { .. } | Self::EmptySeries => Stage::Valuation,
        }
    }

    /// Stable machine-readable identifier.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidConfig(_) => "invalid_config",
            Self::LabelNotFound { .. } => "label_not_found",
            Self::NonNumericValue { .. } => "non_numeric_value",
            Self::NoHistoricalPeriods { .. } => "no_historical_periods",
            Self::MisalignedPeriods { .. } => "misaligned_periods",
            Self::DivisionByZero { .. } => "division_by_zero",
            Self::InvalidTerminalAssumption { .. } => "invalid_terminal_assumption",
            Self::EmptySeries => "empty_series",
        }
    }
}

/// Failures while turning a document into a [`crate::FinancialTable`].
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("csv error in '{path}': {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },

    #[error("json error in '{path}': {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("unsupported table format for '{path}', expected .csv or .json")]
    UnsupportedFormat { path: String },

    #[error("'{path}' has no header row after skipping {skip_rows} rows")]
    MissingHeader { path: String, skip_rows: usize },

    #[error("row {row} has {found} values but the table has {expected} periods")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_not_found_lists_available_labels() {
        let err = DcfError::LabelNotFound {
            label: "sales".to_owned(),
            available: vec!["Cost of Goods Sold".to_owned(), "EBIT".to_owned()],
        };

        let message = err.to_string();
        assert!(message.contains("'sales'"));
        assert!(message.contains("Cost of Goods Sold, EBIT"));
        assert_eq!(err.stage(), Stage::Extraction);
        assert_eq!(err.code(), "label_not_found");
    }

    #[test]
    fn terminal_assumption_belongs_to_valuation_stage() {
        let err = DcfError::InvalidTerminalAssumption {
            discount_rate: 0.05,
            terminal_growth_rate: 0.05,
        };
        assert_eq!(err.stage(), Stage::Valuation);
        assert_eq!(err.stage().to_string(), "valuation");
    }
}
