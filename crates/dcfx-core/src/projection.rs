//! Constant-growth extrapolation of free cash flow.
//!
//! Every component grows from its most recent historical value at the same
//! rate, and the last observed EBIT margin is held for the whole horizon.
//! There is no mean reversion and no margin compression.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::assumptions::horizon_exponent;
use crate::{DcfError, HistoricalMetrics, LatestValues, ProjectionAssumptions};

/// Breakdown of one forward period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectedPeriod {
    /// 1-based forward period.
    pub period: u32,
    pub revenue: f64,
    pub ebit: f64,
    pub nopat: f64,
    pub depreciation: f64,
    pub capital_expenditure: f64,
    pub working_capital_change: f64,
    pub free_cash_flow: f64,
}

/// Projected free cash flow, one entry per forward period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectedFcfSeries {
    periods: Vec<ProjectedPeriod>,
}

impl ProjectedFcfSeries {
    pub fn from_periods(periods: Vec<ProjectedPeriod>) -> Self {
        Self { periods }
    }

    /// Series from bare FCF values, numbered from period 1.
    pub fn from_values(values: &[f64]) -> Self {
        Self {
            periods: values
                .iter()
                .zip(1u32..)
                .map(|(&free_cash_flow, period)| ProjectedPeriod {
                    period,
                    revenue: 0.0,
                    ebit: 0.0,
                    nopat: 0.0,
                    depreciation: 0.0,
                    capital_expenditure: 0.0,
                    working_capital_change: 0.0,
                    free_cash_flow,
                })
                .collect(),
        }
    }

    pub fn periods(&self) -> &[ProjectedPeriod] {
        &self.periods
    }

    pub fn values(&self) -> Vec<f64> {
        self.periods.iter().map(|period| period.free_cash_flow).collect()
    }

    pub fn len(&self) -> usize {
        self.periods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }

    pub fn last(&self) -> Option<f64> {
        self.periods.last().map(|period| period.free_cash_flow)
    }
}

pub struct ProjectionEngine;

impl ProjectionEngine {
    pub fn project(
        metrics: &HistoricalMetrics,
        assumptions: &ProjectionAssumptions,
    ) -> Result<ProjectedFcfSeries, DcfError> {
        Self::project_latest(&metrics.latest, assumptions)
    }

    /// Projects from the most recent values alone.
    pub fn project_latest(
        latest: &LatestValues,
        assumptions: &ProjectionAssumptions,
    ) -> Result<ProjectedFcfSeries, DcfError> {
        assumptions.validate()?;
        let horizon = horizon_exponent(assumptions.projection_years)?;

        if latest.revenue == 0.0 {
            return Err(DcfError::DivisionByZero {
                context: "EBIT margin with zero base revenue",
            });
        }
        let ebit_margin = latest.ebit / latest.revenue;

        let periods: Vec<ProjectedPeriod> = (1..=horizon)
            .map(|exponent| {
                let growth = (1.0 + assumptions.growth_rate).powi(exponent);
                let revenue = latest.revenue * growth;
                let ebit = revenue * ebit_margin;
                let nopat = ebit * (1.0 - assumptions.tax_rate);
                let depreciation = latest.depreciation * growth;
                let capital_expenditure = latest.capital_expenditure * growth;
                let working_capital_change = latest.working_capital * growth;

                ProjectedPeriod {
                    period: exponent.unsigned_abs(),
                    revenue,
                    ebit,
                    nopat,
                    depreciation,
                    capital_expenditure,
                    working_capital_change,
                    free_cash_flow: nopat + depreciation
                        - capital_expenditure
                        - working_capital_change,
                }
            })
            .collect();

        debug!(
            periods = periods.len(),
            ebit_margin,
            growth_rate = assumptions.growth_rate,
            "projected free cash flow"
        );
        Ok(ProjectedFcfSeries::from_periods(periods))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ValidationError;

    fn latest() -> LatestValues {
        LatestValues {
            revenue: 1000.0,
            ebit: 150.0,
            depreciation: 50.0,
            capital_expenditure: 60.0,
            working_capital: 40.0,
        }
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= 1e-9 * expected.abs().max(1.0),
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn first_period_matches_hand_computation() {
        let assumptions = ProjectionAssumptions {
            growth_rate: 0.05,
            tax_rate: 0.20,
            projection_years: 2,
            ..ProjectionAssumptions::default()
        };
        let series = ProjectionEngine::project_latest(&latest(), &assumptions).expect("must project");
        let first = series.periods()[0];

        assert_eq!(first.period, 1);
        assert_close(first.revenue, 1050.0);
        assert_close(first.ebit, 157.5);
        assert_close(first.nopat, 126.0);
        assert_close(first.depreciation, 52.5);
        assert_close(first.capital_expenditure, 63.0);
        assert_close(first.working_capital_change, 42.0);
        assert_close(first.free_cash_flow, 73.5);
        assert_close(series.periods()[1].free_cash_flow, 77.175);
    }

    #[test]
    fn zero_growth_repeats_the_base_cash_flow() {
        let assumptions = ProjectionAssumptions {
            growth_rate: 0.0,
            tax_rate: 0.25,
            projection_years: 4,
            ..ProjectionAssumptions::default()
        };
        let series = ProjectionEngine::project_latest(&latest(), &assumptions).expect("must project");
        let base = 150.0 * 0.75 + 50.0 - 60.0 - 40.0;

        assert_eq!(series.len(), 4);
        for value in series.values() {
            assert_close(value, base);
        }
    }

    #[test]
    fn zero_revenue_is_a_division_by_zero() {
        let latest = LatestValues {
            revenue: 0.0,
            ..latest()
        };
        let err = ProjectionEngine::project_latest(&latest, &ProjectionAssumptions::default())
            .expect_err("must fail");
        assert!(matches!(err, DcfError::DivisionByZero { .. }));
    }

    #[test]
    fn rejects_invalid_assumptions_before_projecting() {
        let assumptions = ProjectionAssumptions {
            growth_rate: f64::NAN,
            ..ProjectionAssumptions::default()
        };
        let err = ProjectionEngine::project_latest(&latest(), &assumptions).expect_err("must fail");
        assert_eq!(
            err,
            DcfError::InvalidConfig(ValidationError::NonFiniteValue {
                field: "growth_rate"
            })
        );

        let assumptions = ProjectionAssumptions {
            projection_years: u32::MAX,
            ..ProjectionAssumptions::default()
        };
        let err = ProjectionEngine::project_latest(&latest(), &assumptions).expect_err("must fail");
        assert!(matches!(
            err,
            DcfError::InvalidConfig(ValidationError::ProjectionYearsOutOfRange { .. })
        ));
    }

    #[test]
    fn zero_years_is_an_empty_series() {
        let assumptions = ProjectionAssumptions {
            projection_years: 0,
            ..ProjectionAssumptions::default()
        };
        let series = ProjectionEngine::project_latest(&latest(), &assumptions).expect("must project");
        assert!(series.is_empty());
        assert_eq!(series.last(), None);
    }
}
