//! Label-based row lookup over loosely structured statement tables.

use tracing::debug;

use crate::{DcfError, FinancialTable, LineItem, TableRow};

/// Resolves a label substring to one row of numeric values.
pub struct LineItemExtractor;

impl LineItemExtractor {
    /// Finds the first row whose label contains `label`, ignoring case.
    ///
    /// Rows without a label never match. When several rows match, the first
    /// one in table order wins.
    pub fn find(table: &FinancialTable, label: &str) -> Result<LineItem, DcfError> {
        match Self::first_match(table, label) {
            Some(row) => Self::coerce_row(row),
            None => Err(DcfError::LabelNotFound {
                label: label.to_owned(),
                available: table.labels(),
            }),
        }
    }

    /// Tries each pattern in order and returns the first one that matches.
    pub fn find_any<S: AsRef<str>>(
        table: &FinancialTable,
        patterns: &[S],
    ) -> Result<LineItem, DcfError> {
        for pattern in patterns {
            if let Some(row) = Self::first_match(table, pattern.as_ref()) {
                return Self::coerce_row(row);
            }
        }

        Err(DcfError::LabelNotFound {
            label: patterns
                .iter()
                .map(|pattern| pattern.as_ref())
                .collect::<Vec<_>>()
                .join(" | "),
            available: table.labels(),
        })
    }

    fn first_match<'a>(table: &'a FinancialTable, label: &str) -> Option<&'a TableRow> {
        let needle = label.trim().to_lowercase();
        if needle.is_empty() {
            return None;
        }

        table.rows.iter().find(|row| {
            row.label
                .as_deref()
                .map(str::trim)
                .filter(|candidate| !candidate.is_empty())
                .is_some_and(|candidate| candidate.to_lowercase().contains(&needle))
        })
    }

    fn coerce_row(row: &TableRow) -> Result<LineItem, DcfError> {
        let label = row.label.clone().unwrap_or_default();
        if row.cells.is_empty() {
            return Err(DcfError::NoHistoricalPeriods { label });
        }

        let values = row
            .cells
            .iter()
            .enumerate()
            .map(|(column, cell)| {
                cell.as_number().ok_or_else(|| DcfError::NonNumericValue {
                    label: label.clone(),
                    column,
                    value: cell.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        debug!(label = %label, periods = values.len(), "resolved line item");
        Ok(LineItem::new(label, values))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Cell;

    fn income_statement() -> FinancialTable {
        FinancialTable::new(
            vec!["2022".to_owned(), "2023".to_owned()],
            vec![
                TableRow::new("", vec![Cell::Empty, Cell::Empty]),
                TableRow::numbers("Sales/Revenue", &[900.0, 1000.0]),
                TableRow::numbers("Cost of Goods Sold", &[600.0, 650.0]),
                TableRow::numbers("EBIT", &[120.0, 150.0]),
                TableRow::numbers("EBITDA", &[170.0, 200.0]),
                TableRow::new("Depreciation", vec![Cell::from_text("45"), Cell::from_text("-")]),
            ],
        )
        .expect("valid table")
    }

    #[test]
    fn matches_case_insensitive_substring() {
        let item = LineItemExtractor::find(&income_statement(), "sales").expect("must match");
        assert_eq!(item.label, "Sales/Revenue");
        assert_eq!(item.values, vec![900.0, 1000.0]);
    }

    #[test]
    fn first_row_wins_on_ambiguity() {
        let item = LineItemExtractor::find(&income_statement(), "ebit").expect("must match");
        assert_eq!(item.label, "EBIT");
        assert_eq!(item.values, vec![120.0, 150.0]);
    }

    #[test]
    fn missing_label_reports_available_labels() {
        let err = LineItemExtractor::find(&income_statement(), "net income").expect_err("must fail");
        match err {
            DcfError::LabelNotFound { label, available } => {
                assert_eq!(label, "net income");
                assert_eq!(available.len(), 5);
                assert!(available.contains(&"EBITDA".to_owned()));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn non_numeric_cell_cites_row_and_column() {
        let err =
            LineItemExtractor::find(&income_statement(), "depreciation").expect_err("must fail");
        assert_eq!(
            err,
            DcfError::NonNumericValue {
                label: "Depreciation".to_owned(),
                column: 1,
                value: "-".to_owned(),
            }
        );
    }

    #[test]
    fn find_any_falls_through_patterns_in_order() {
        let item = LineItemExtractor::find_any(&income_statement(), &["turnover", "revenue"])
            .expect("second pattern must match");
        assert_eq!(item.label, "Sales/Revenue");

        let err = LineItemExtractor::find_any(&income_statement(), &["turnover", "receipts"])
            .expect_err("must fail");
        assert!(matches!(err, DcfError::LabelNotFound { ref label, .. } if label == "turnover | receipts"));
    }

    #[test]
    fn blank_query_never_matches() {
        let err = LineItemExtractor::find(&income_statement(), "  ").expect_err("must fail");
        assert!(matches!(err, DcfError::LabelNotFound { .. }));
    }

    #[test]
    fn zero_width_table_has_no_periods() {
        let table = FinancialTable::new(Vec::new(), vec![TableRow::new("Sales", Vec::new())])
            .expect("valid table");
        let err = LineItemExtractor::find(&table, "sales").expect_err("must fail");
        assert_eq!(
            err,
            DcfError::NoHistoricalPeriods {
                label: "Sales".to_owned()
            }
        );
    }
}
