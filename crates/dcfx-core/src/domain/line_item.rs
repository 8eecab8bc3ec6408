use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Financial statement a table was exported from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatementKind {
    BalanceSheet,
    CashFlow,
    IncomeStatement,
}

impl StatementKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BalanceSheet => "balance_sheet",
            Self::CashFlow => "cash_flow",
            Self::IncomeStatement => "income_statement",
        }
    }
}

impl Display for StatementKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Semantic line items a valuation reads from the statements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineItemKind {
    Revenue,
    Ebit,
    Depreciation,
    CapitalExpenditure,
    CurrentAssets,
    CurrentLiabilities,
}

impl LineItemKind {
    pub const ALL: [Self; 6] = [
        Self::Revenue,
        Self::Ebit,
        Self::Depreciation,
        Self::CapitalExpenditure,
        Self::CurrentAssets,
        Self::CurrentLiabilities,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Revenue => "revenue",
            Self::Ebit => "ebit",
            Self::Depreciation => "depreciation",
            Self::CapitalExpenditure => "capital_expenditure",
            Self::CurrentAssets => "current_assets",
            Self::CurrentLiabilities => "current_liabilities",
        }
    }
}

impl Display for LineItemKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One extracted row: the matched label and its numeric values, oldest period first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub label: String,
    pub values: Vec<f64>,
}

impl LineItem {
    pub fn new(label: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            label: label.into(),
            values,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Most recent period.
    pub fn last(&self) -> Option<f64> {
        self.values.last().copied()
    }

    /// Keeps only the most recent `len` periods.
    pub fn trailing(&self, len: usize) -> Self {
        let start = self.values.len().saturating_sub(len);
        Self {
            label: self.label.clone(),
            values: self.values[start..].to_vec(),
        }
    }
}
