//! Present value of projected free cash flow plus a Gordon-growth terminal value.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::assumptions::{horizon_exponent, validate_above_minus_one, validate_finite};
use crate::{DcfError, ProjectedFcfSeries};

/// Present value of a single forward period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiscountedPeriod {
    pub period: u32,
    pub free_cash_flow: f64,
    /// `(1 + discount_rate)^-period`
    pub discount_factor: f64,
    pub present_value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValuationResult {
    pub discounted_fcf_sum: f64,
    pub terminal_value: f64,
    pub discounted_terminal_value: f64,
    pub enterprise_value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Valuation {
    pub discounted: Vec<DiscountedPeriod>,
    pub result: ValuationResult,
}

pub struct ValuationEngine;

impl ValuationEngine {
    pub fn value(
        series: &ProjectedFcfSeries,
        discount_rate: f64,
        terminal_growth_rate: f64,
    ) -> Result<Valuation, DcfError> {
        validate_finite("discount_rate", discount_rate)?;
        validate_finite("terminal_growth_rate", terminal_growth_rate)?;
        validate_above_minus_one("discount_rate", discount_rate)?;

        if discount_rate == terminal_growth_rate {
            return Err(DcfError::InvalidTerminalAssumption {
                discount_rate,
                terminal_growth_rate,
            });
        }

        let discounted = Self::discount(series, discount_rate)?;
        let discounted_fcf_sum: f64 = discounted.iter().map(|period| period.present_value).sum();

        let (last_fcf, horizon_factor) = discounted
            .last()
            .map(|period| (period.free_cash_flow, period.discount_factor))
            .ok_or(DcfError::EmptySeries)?;
        let terminal_value =
            last_fcf * (1.0 + terminal_growth_rate) / (discount_rate - terminal_growth_rate);
        let discounted_terminal_value = terminal_value * horizon_factor;

        let result = ValuationResult {
            discounted_fcf_sum,
            terminal_value,
            discounted_terminal_value,
            enterprise_value: discounted_fcf_sum + discounted_terminal_value,
        };

        debug!(
            discounted_fcf_sum,
            terminal_value,
            enterprise_value = result.enterprise_value,
            "valued projected cash flows"
        );
        Ok(Valuation { discounted, result })
    }

    /// Present value of every projected period; empty for an empty series.
    pub fn discount(
        series: &ProjectedFcfSeries,
        discount_rate: f64,
    ) -> Result<Vec<DiscountedPeriod>, DcfError> {
        let horizon = horizon_exponent(u32::try_from(series.len()).unwrap_or(u32::MAX))?;

        Ok(series
            .periods()
            .iter()
            .zip(1..=horizon)
            .map(|(projected, exponent)| {
                let discount_factor = (1.0 + discount_rate).powi(-exponent);
                DiscountedPeriod {
                    period: projected.period,
                    free_cash_flow: projected.free_cash_flow,
                    discount_factor,
                    present_value: projected.free_cash_flow * discount_factor,
                }
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ValidationError;

    fn assert_rel(actual: f64, expected: f64) {
        assert!(
            ((actual - expected) / expected).abs() <= 1e-6,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn values_two_period_series() {
        let series = ProjectedFcfSeries::from_values(&[73.5, 77.175]);
        let valuation = ValuationEngine::value(&series, 0.10, 0.03).expect("must value");

        assert_rel(valuation.result.terminal_value, 77.175 * 1.03 / 0.07);
        assert_rel(valuation.result.terminal_value, 1135.575);
        assert_rel(valuation.result.discounted_terminal_value, 1135.575 / 1.21);
        assert_rel(valuation.result.discounted_fcf_sum, 73.5 / 1.1 + 77.175 / 1.21);
        assert_rel(valuation.result.enterprise_value, 1069.090_909_09);
        assert_eq!(valuation.discounted.len(), 2);
        assert_rel(valuation.discounted[1].discount_factor, 1.0 / 1.21);
    }

    #[test]
    fn equal_rates_are_rejected_before_dividing() {
        let series = ProjectedFcfSeries::from_values(&[10.0, 11.0, 12.0]);
        let err = ValuationEngine::value(&series, 0.04, 0.04).expect_err("must fail");
        assert_eq!(
            err,
            DcfError::InvalidTerminalAssumption {
                discount_rate: 0.04,
                terminal_growth_rate: 0.04,
            }
        );
    }

    #[test]
    fn rejects_rates_that_cannot_discount() {
        let series = ProjectedFcfSeries::from_values(&[73.5, 77.175]);

        let err = ValuationEngine::value(&series, -1.0, 0.03).expect_err("must fail");
        assert_eq!(
            err,
            DcfError::InvalidConfig(ValidationError::RateOutOfRange {
                field: "discount_rate",
                value: -1.0,
            })
        );

        let err = ValuationEngine::value(&series, f64::NAN, 0.03).expect_err("must fail");
        assert_eq!(err.code(), "invalid_config");

        let err = ValuationEngine::value(&series, 0.10, f64::INFINITY).expect_err("must fail");
        assert!(matches!(
            err,
            DcfError::InvalidConfig(ValidationError::NonFiniteValue {
                field: "terminal_growth_rate"
            })
        ));
    }

    #[test]
    fn empty_series_discounts_to_zero_but_has_no_terminal_value() {
        let series = ProjectedFcfSeries::from_values(&[]);
        assert!(ValuationEngine::discount(&series, 0.1)
            .expect("empty series discounts")
            .is_empty());

        let err = ValuationEngine::value(&series, 0.10, 0.03).expect_err("must fail");
        assert_eq!(err, DcfError::EmptySeries);
    }
}
