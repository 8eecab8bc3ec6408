use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Longest explicit forecast horizon a run accepts.
pub const MAX_PROJECTION_YEARS: u32 = 100;

/// Constant-growth assumptions held for every forward period of one run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionAssumptions {
    pub growth_rate: f64,
    pub tax_rate: f64,
    /// Discount rate (WACC).
    pub discount_rate: f64,
    pub terminal_growth_rate: f64,
    pub projection_years: u32,
}

impl Default for ProjectionAssumptions {
    fn default() -> Self {
        Self {
            growth_rate: 0.05,
            tax_rate: 0.21,
            discount_rate: 0.10,
            terminal_growth_rate: 0.03,
            projection_years: 5,
        }
    }
}

impl ProjectionAssumptions {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_finite("growth_rate", self.growth_rate)?;
        validate_finite("tax_rate", self.tax_rate)?;
        validate_finite("discount_rate", self.discount_rate)?;
        validate_finite("terminal_growth_rate", self.terminal_growth_rate)?;

        validate_above_minus_one("growth_rate", self.growth_rate)?;
        validate_above_minus_one("discount_rate", self.discount_rate)?;

        if self.projection_years > MAX_PROJECTION_YEARS {
            return Err(ValidationError::ProjectionYearsOutOfRange {
                value: self.projection_years,
                max: MAX_PROJECTION_YEARS,
            });
        }
        Ok(())
    }

    /// Conditions that are computable but economically suspect.
    pub fn advisories(&self) -> Vec<String> {
        let mut advisories = Vec::new();

        if self.discount_rate < self.terminal_growth_rate {
            advisories.push(format!(
                "discount rate {} is below terminal growth rate {}; terminal value will be negative",
                self.discount_rate, self.terminal_growth_rate
            ));
        }

        if self.growth_rate >= self.discount_rate {
            advisories.push(format!(
                "growth rate {} is not below discount rate {}; projected cash flows do not shrink in present value",
                self.growth_rate, self.discount_rate
            ));
        }

        if !(0.0..1.0).contains(&self.tax_rate) {
            advisories.push(format!("tax rate {} is outside [0, 1)", self.tax_rate));
        }

        advisories
    }
}

/// Exponent of the last forward period, bounded by [`MAX_PROJECTION_YEARS`].
pub(crate) fn horizon_exponent(years: u32) -> Result<i32, ValidationError> {
    let out_of_range = ValidationError::ProjectionYearsOutOfRange {
        value: years,
        max: MAX_PROJECTION_YEARS,
    };
    if years > MAX_PROJECTION_YEARS {
        return Err(out_of_range);
    }
    i32::try_from(years).map_err(|_| out_of_range)
}

pub(crate) fn validate_finite(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::NonFiniteValue { field })
    }
}

pub(crate) fn validate_above_minus_one(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if value > -1.0 {
        Ok(())
    } else {
        Err(ValidationError::RateOutOfRange { field, value })
    }
}
