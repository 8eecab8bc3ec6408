//! Behavior-driven tests for failure reporting.
//!
//! Every failure aborts the run, names the stage it came from and carries
//! the offending label or value so the user can fix the input.

use dcfx_core::{
    run_valuation, Cell, DcfConfig, DcfError, FinancialTable, LabelMapping, LineItemKind,
    MappingRule, PeriodAlignment, ProjectedFcfSeries, Stage, StatementKind, Statements, TableRow,
    ValidationError, ValuationEngine, MAX_PROJECTION_YEARS,
};

fn table(rows: Vec<TableRow>) -> FinancialTable {
    FinancialTable::new(Vec::new(), rows).expect("valid table")
}

fn statements() -> Statements {
    Statements {
        balance_sheet: table(vec![
            TableRow::numbers("Total Current Assets", &[300.0, 340.0]),
            TableRow::numbers("Total Current Liabilities", &[270.0, 300.0]),
        ]),
        cash_flow: table(vec![TableRow::numbers("Capital Expenditures", &[55.0, 60.0])]),
        income_statement: table(vec![
            TableRow::numbers("Sales", &[950.0, 1000.0]),
            TableRow::numbers("EBIT", &[140.0, 150.0]),
            TableRow::numbers("Depreciation", &[48.0, 50.0]),
        ]),
    }
}

// =============================================================================
// Configuration failures
// =============================================================================

#[test]
fn when_rates_cannot_discount_no_result_is_returned() {
    // Given: a discount rate of -100% and one that is not a number
    for discount_rate in [-1.0, -2.5, f64::NAN, f64::INFINITY] {
        let mut config = DcfConfig::default();
        config.assumptions.discount_rate = discount_rate;

        // When: a library caller runs the valuation directly
        let err = run_valuation(&statements(), &config).expect_err("must fail");

        // Then: the run is rejected before any arithmetic
        assert_eq!(err.stage(), Stage::Validation);
        assert_eq!(err.code(), "invalid_config");
        assert!(matches!(
            err,
            DcfError::InvalidConfig(
                ValidationError::RateOutOfRange { field: "discount_rate", .. }
                    | ValidationError::NonFiniteValue { field: "discount_rate" }
            )
        ));
    }
}

#[test]
fn when_growth_is_not_finite_no_result_is_returned() {
    let mut config = DcfConfig::default();
    config.assumptions.growth_rate = f64::NAN;

    let err = run_valuation(&statements(), &config).expect_err("must fail");
    assert_eq!(
        err,
        DcfError::InvalidConfig(ValidationError::NonFiniteValue {
            field: "growth_rate"
        })
    );
}

#[test]
fn when_horizon_is_unbounded_run_is_rejected() {
    let mut config = DcfConfig::default();
    config.assumptions.projection_years = 4_000_000_000;

    let err = run_valuation(&statements(), &config).expect_err("must fail");
    assert_eq!(
        err,
        DcfError::InvalidConfig(ValidationError::ProjectionYearsOutOfRange {
            value: 4_000_000_000,
            max: MAX_PROJECTION_YEARS,
        })
    );

    config.assumptions.projection_years = MAX_PROJECTION_YEARS;
    let report = run_valuation(&statements(), &config).expect("longest horizon must value");
    assert!(report.result.enterprise_value.is_finite());
}

#[test]
fn when_a_mapping_rule_has_no_patterns_run_is_rejected() {
    let config = DcfConfig {
        mapping: LabelMapping::default().with_rule(
            LineItemKind::Revenue,
            MappingRule::new(StatementKind::IncomeStatement, [""]),
        ),
        ..DcfConfig::default()
    };

    let err = run_valuation(&statements(), &config).expect_err("must fail");
    assert_eq!(
        err,
        DcfError::InvalidConfig(ValidationError::EmptyMappingPatterns {
            item: LineItemKind::Revenue
        })
    );
}

// =============================================================================
// Extraction failures
// =============================================================================

#[test]
fn when_a_label_is_missing_user_sees_what_labels_exist() {
    // Given: a cash-flow statement without a capital expenditure row
    let mut statements = statements();
    statements.cash_flow = table(vec![TableRow::numbers("Purchase of PP&E", &[55.0, 60.0])]);

    // When: the valuation runs
    let err = run_valuation(&statements, &DcfConfig::default()).expect_err("must fail");

    // Then: the error names the pattern and lists the available labels
    assert_eq!(err.stage(), Stage::Extraction);
    assert_eq!(
        err,
        DcfError::LabelNotFound {
            label: "capital expenditure".to_owned(),
            available: vec!["Purchase of PP&E".to_owned()],
        }
    );
}

#[test]
fn when_the_mapping_is_corrected_the_same_statements_value() {
    let mut statements = statements();
    statements.cash_flow = table(vec![TableRow::numbers("Purchase of PP&E", &[55.0, 60.0])]);

    let config = DcfConfig {
        mapping: LabelMapping::default().with_rule(
            LineItemKind::CapitalExpenditure,
            MappingRule::new(StatementKind::CashFlow, ["capital expenditure", "purchase of pp&e"]),
        ),
        ..DcfConfig::default()
    };

    let report = run_valuation(&statements, &config).expect("corrected mapping must value");
    assert_eq!(
        report.historical.labels[&LineItemKind::CapitalExpenditure],
        "Purchase of PP&E"
    );
}

#[test]
fn when_a_cell_is_not_numeric_user_sees_row_and_column() {
    let mut statements = statements();
    statements.income_statement = table(vec![
        TableRow::numbers("Sales", &[950.0, 1000.0]),
        TableRow::new("EBIT", vec![Cell::from_text("n/a"), Cell::Number(150.0)]),
        TableRow::numbers("Depreciation", &[48.0, 50.0]),
    ]);

    let err = run_valuation(&statements, &DcfConfig::default()).expect_err("must fail");
    assert_eq!(
        err,
        DcfError::NonNumericValue {
            label: "EBIT".to_owned(),
            column: 0,
            value: "n/a".to_owned(),
        }
    );
}

// =============================================================================
// Metrics failures
// =============================================================================

#[test]
fn when_statements_cover_different_periods_run_is_rejected() {
    let mut statements = statements();
    statements.cash_flow = table(vec![TableRow::numbers(
        "Capital Expenditures",
        &[50.0, 55.0, 60.0],
    )]);

    let err = run_valuation(&statements, &DcfConfig::default()).expect_err("must fail");
    assert_eq!(err.stage(), Stage::Metrics);
    assert_eq!(
        err,
        DcfError::MisalignedPeriods {
            item: LineItemKind::CapitalExpenditure,
            expected: 2,
            found: 3,
        }
    );

    let lenient = DcfConfig {
        alignment: PeriodAlignment::TrailingCommon,
        ..DcfConfig::default()
    };
    let report = run_valuation(&statements, &lenient).expect("trailing alignment must value");
    assert_eq!(report.historical.latest.capital_expenditure, 60.0);
}

// =============================================================================
// Projection and valuation failures
// =============================================================================

#[test]
fn when_latest_revenue_is_zero_margin_is_undefined() {
    let mut statements = statements();
    statements.income_statement = table(vec![
        TableRow::numbers("Sales", &[950.0, 0.0]),
        TableRow::numbers("EBIT", &[140.0, 150.0]),
        TableRow::numbers("Depreciation", &[48.0, 50.0]),
    ]);

    let err = run_valuation(&statements, &DcfConfig::default()).expect_err("must fail");
    assert_eq!(err.stage(), Stage::Projection);
    assert!(matches!(err, DcfError::DivisionByZero { .. }));
}

#[test]
fn when_discount_rate_equals_terminal_growth_no_result_is_returned() {
    let mut config = DcfConfig::default();
    config.assumptions.discount_rate = 0.03;
    config.assumptions.terminal_growth_rate = 0.03;

    let err = run_valuation(&statements(), &config).expect_err("must fail");
    assert_eq!(err.code(), "invalid_terminal_assumption");
    assert_eq!(err.stage(), Stage::Valuation);
}

#[test]
fn equal_rates_fail_for_any_non_empty_series() {
    for values in [vec![1.0], vec![-5.0, 10.0], vec![0.0, 0.0, 0.0, 0.0]] {
        let series = ProjectedFcfSeries::from_values(&values);
        let err = ValuationEngine::value(&series, 0.08, 0.08).expect_err("must fail");
        assert!(matches!(err, DcfError::InvalidTerminalAssumption { .. }));
    }
}

#[test]
fn when_no_years_are_projected_terminal_value_is_undefined() {
    let mut config = DcfConfig::default();
    config.assumptions.projection_years = 0;

    let err = run_valuation(&statements(), &config).expect_err("must fail");
    assert_eq!(err, DcfError::EmptySeries);
}
