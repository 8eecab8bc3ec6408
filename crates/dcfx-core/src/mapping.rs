//! Reviewable mapping from semantic line items to statement labels.
//!
//! Statement exports word the same concept differently from one data vendor
//! to the next, so the labels are configuration rather than code. Items left
//! out of a configured mapping fall back to [`LabelMapping::default_rule`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    DcfError, FinancialTable, LineItem, LineItemExtractor, LineItemKind, StatementKind,
    ValidationError,
};

/// Where to look for one line item and which label substrings are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingRule {
    pub statement: StatementKind,
    /// Case-insensitive substrings, tried in order.
    pub patterns: Vec<String>,
}

impl MappingRule {
    pub fn new<I, S>(statement: StatementKind, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            statement,
            patterns: patterns.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LabelMapping {
    rules: BTreeMap<LineItemKind, MappingRule>,
}

impl Default for LabelMapping {
    fn default() -> Self {
        Self {
            rules: LineItemKind::ALL
                .into_iter()
                .map(|kind| (kind, Self::default_rule(kind)))
                .collect(),
        }
    }
}

impl LabelMapping {
    pub fn default_rule(kind: LineItemKind) -> MappingRule {
        match kind {
            LineItemKind::Revenue => {
                MappingRule::new(StatementKind::IncomeStatement, ["sales", "revenue"])
            }
            LineItemKind::Ebit => {
                MappingRule::new(StatementKind::IncomeStatement, ["ebit", "operating income"])
            }
            LineItemKind::Depreciation => {
                MappingRule::new(StatementKind::IncomeStatement, ["depreciation"])
            }
            LineItemKind::CapitalExpenditure => {
                MappingRule::new(StatementKind::CashFlow, ["capital expenditure"])
            }
            LineItemKind::CurrentAssets => {
                MappingRule::new(StatementKind::BalanceSheet, ["total current assets"])
            }
            LineItemKind::CurrentLiabilities => {
                MappingRule::new(StatementKind::BalanceSheet, ["total current liabilities"])
            }
        }
    }

    pub fn with_rule(mut self, kind: LineItemKind, rule: MappingRule) -> Self {
        self.rules.insert(kind, rule);
        self
    }

    /// Configured rule for `kind`, or the default one.
    pub fn rule(&self, kind: LineItemKind) -> MappingRule {
        self.rules
            .get(&kind)
            .cloned()
            .unwrap_or_else(|| Self::default_rule(kind))
    }

    /// Every item with its effective rule, in [`LineItemKind::ALL`] order.
    pub fn effective(&self) -> Self {
        Self {
            rules: LineItemKind::ALL
                .into_iter()
                .map(|kind| (kind, self.rule(kind)))
                .collect(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        for (kind, rule) in &self.rules {
            if !rule.patterns.iter().any(|pattern| !pattern.trim().is_empty()) {
                return Err(ValidationError::EmptyMappingPatterns { item: *kind });
            }
        }
        Ok(())
    }

    /// Resolves `kind` against the table of the statement its rule names.
    pub fn resolve<'a, F>(&self, kind: LineItemKind, statement: F) -> Result<LineItem, DcfError>
    where
        F: Fn(StatementKind) -> &'a FinancialTable,
    {
        let rule = self.rule(kind);
        debug!(item = %kind, statement = %rule.statement, patterns = ?rule.patterns, "resolving line item");
        LineItemExtractor::find_any(statement(rule.statement), &rule.patterns)
    }
}
