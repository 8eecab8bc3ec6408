//! Core contracts for dcfx.
//!
//! This crate contains:
//! - Statement tables and the tabular source adapters that produce them
//! - Label-based line item extraction and the label mapping
//! - Historical metrics, constant-growth projection and DCF valuation
//! - Response envelope and structured errors
//!
//! Data flows one way: table → line items → historical metrics → projected
//! free cash flow → discounted valuation.

pub mod adapters;
pub mod assumptions;
pub mod config;
pub mod domain;
pub mod envelope;
pub mod error;
pub mod extract;
pub mod mapping;
pub mod metrics;
pub mod pipeline;
pub mod projection;
pub mod valuation;

pub use adapters::{open_source, CsvSource, JsonSource, SourceOptions, TabularSource};
pub use assumptions::{ProjectionAssumptions, MAX_PROJECTION_YEARS};
pub use config::DcfConfig;
pub use domain::{Cell, FinancialTable, LineItem, LineItemKind, StatementKind, TableRow};
pub use envelope::{Envelope, EnvelopeError, EnvelopeMeta};
pub use error::{DcfError, SourceError, Stage, ValidationError};
pub use extract::LineItemExtractor;
pub use mapping::{LabelMapping, MappingRule};
pub use metrics::{HistoricalMetrics, HistoricalMetricsBuilder, LatestValues, PeriodAlignment};
pub use pipeline::{run_valuation, HistoricalSummary, Statements, ValuationReport};
pub use projection::{ProjectedFcfSeries, ProjectedPeriod, ProjectionEngine};
pub use valuation::{DiscountedPeriod, Valuation, ValuationEngine, ValuationResult};

/// Schema version stamped on every envelope.
pub const SCHEMA_VERSION: &str = "v1.0.0";
