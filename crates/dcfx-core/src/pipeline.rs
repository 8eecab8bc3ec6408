//! One valuation run: tables in, report out.
//!
//! The run is a pure function of its tables and configuration. Loading files
//! and rendering the report belong to the caller.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::{
    DcfConfig, DcfError, DiscountedPeriod, FinancialTable, HistoricalMetrics,
    HistoricalMetricsBuilder, LatestValues, LineItemKind, ProjectedPeriod, ProjectionAssumptions,
    ProjectionEngine, ValuationEngine, ValuationResult,
};

/// The three statements of one company, as loaded by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statements {
    pub balance_sheet: FinancialTable,
    pub cash_flow: FinancialTable,
    pub income_statement: FinancialTable,
}

/// What the projection was based on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalSummary {
    pub periods: usize,
    /// Row label each line item resolved to.
    pub labels: BTreeMap<LineItemKind, String>,
    pub latest: LatestValues,
    pub ebit_margin: f64,
}

impl HistoricalSummary {
    fn from_metrics(metrics: &HistoricalMetrics) -> Self {
        Self {
            periods: metrics.periods(),
            labels: LineItemKind::ALL
                .into_iter()
                .map(|kind| (kind, metrics.item(kind).label.clone()))
                .collect(),
            latest: metrics.latest,
            ebit_margin: metrics.latest.ebit / metrics.latest.revenue,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationReport {
    pub assumptions: ProjectionAssumptions,
    pub historical: HistoricalSummary,
    pub projections: Vec<ProjectedPeriod>,
    pub discounted: Vec<DiscountedPeriod>,
    pub result: ValuationResult,
}

/// Validates the configuration, then runs extraction, projection and
/// valuation. Any failure aborts the run.
pub fn run_valuation(statements: &Statements, config: &DcfConfig) -> Result<ValuationReport, DcfError> {
    config.validate()?;

    let assumptions = config.assumptions;
    for advisory in assumptions.advisories() {
        warn!(%advisory, "questionable assumption");
    }

    let metrics = HistoricalMetricsBuilder::new(&config.mapping, config.alignment).build(
        &statements.balance_sheet,
        &statements.cash_flow,
        &statements.income_statement,
    )?;

    let series = ProjectionEngine::project(&metrics, &assumptions)?;
    let valuation = ValuationEngine::value(
        &series,
        assumptions.discount_rate,
        assumptions.terminal_growth_rate,
    )?;

    info!(
        periods = metrics.periods(),
        projection_years = assumptions.projection_years,
        enterprise_value = valuation.result.enterprise_value,
        "valuation complete"
    );

    Ok(ValuationReport {
        assumptions,
        historical: HistoricalSummary::from_metrics(&metrics),
        projections: series.periods().to_vec(),
        discounted: valuation.discounted,
        result: valuation.result,
    })
}
