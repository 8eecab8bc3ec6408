//! Historical quantities a valuation needs, assembled from the three statements.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{DcfError, FinancialTable, LabelMapping, LineItem, LineItemKind, StatementKind};

/// How to treat items that report different numbers of periods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodAlignment {
    /// Fail with [`DcfError::MisalignedPeriods`].
    #[default]
    Strict,
    /// Keep the most recent periods every item has in common.
    TrailingCommon,
}

/// Most recent value of every projected quantity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatestValues {
    pub revenue: f64,
    pub ebit: f64,
    pub depreciation: f64,
    pub capital_expenditure: f64,
    pub working_capital: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalMetrics {
    pub revenue: LineItem,
    pub ebit: LineItem,
    pub depreciation: LineItem,
    pub capital_expenditure: LineItem,
    pub current_assets: LineItem,
    pub current_liabilities: LineItem,
    /// Current assets minus current liabilities, position-wise.
    pub working_capital: Vec<f64>,
    pub latest: LatestValues,
}

impl HistoricalMetrics {
    pub fn periods(&self) -> usize {
        self.working_capital.len()
    }

    pub fn item(&self, kind: LineItemKind) -> &LineItem {
        match kind {
            LineItemKind::Revenue => &self.revenue,
            LineItemKind::Ebit => &self.ebit,
            LineItemKind::Depreciation => &self.depreciation,
            LineItemKind::CapitalExpenditure => &self.capital_expenditure,
            LineItemKind::CurrentAssets => &self.current_assets,
            LineItemKind::CurrentLiabilities => &self.current_liabilities,
        }
    }
}

/// Extracts the valuation inputs through a [`LabelMapping`].
#[derive(Debug, Clone)]
pub struct HistoricalMetricsBuilder<'a> {
    mapping: &'a LabelMapping,
    alignment: PeriodAlignment,
}

impl<'a> HistoricalMetricsBuilder<'a> {
    pub fn new(mapping: &'a LabelMapping, alignment: PeriodAlignment) -> Self {
        Self { mapping, alignment }
    }

    /// Pure: reads the tables, never mutates them.
    pub fn build(
        &self,
        balance_sheet: &FinancialTable,
        cash_flow: &FinancialTable,
        income_statement: &FinancialTable,
    ) -> Result<HistoricalMetrics, DcfError> {
        let statement = |kind: StatementKind| match kind {
            StatementKind::BalanceSheet => balance_sheet,
            StatementKind::CashFlow => cash_flow,
            StatementKind::IncomeStatement => income_statement,
        };

        let mut items = Vec::with_capacity(LineItemKind::ALL.len());
        for kind in LineItemKind::ALL {
            let item = self.mapping.resolve(kind, statement)?;
            debug!(item = %kind, label = %item.label, periods = item.len(), "extracted");
            items.push((kind, item));
        }

        let items = self.align(items)?;
        let [revenue, ebit, depreciation, capital_expenditure, current_assets, current_liabilities] =
            items;

        let working_capital: Vec<f64> = current_assets
            .values
            .iter()
            .zip(&current_liabilities.values)
            .map(|(assets, liabilities)| assets - liabilities)
            .collect();

        let last = |item: &LineItem| {
            item.last().ok_or_else(|| DcfError::NoHistoricalPeriods {
                label: item.label.clone(),
            })
        };
        let latest = LatestValues {
            revenue: last(&revenue)?,
            ebit: last(&ebit)?,
            depreciation: last(&depreciation)?,
            capital_expenditure: last(&capital_expenditure)?,
            working_capital: working_capital.last().copied().ok_or_else(|| {
                DcfError::NoHistoricalPeriods {
                    label: current_assets.label.clone(),
                }
            })?,
        };

        Ok(HistoricalMetrics {
            revenue,
            ebit,
            depreciation,
            capital_expenditure,
            current_assets,
            current_liabilities,
            working_capital,
            latest,
        })
    }

    fn align(&self, items: Vec<(LineItemKind, LineItem)>) -> Result<[LineItem; 6], DcfError> {
        let expected = items.first().map_or(0, |(_, item)| item.len());
        let shortest = items.iter().map(|(_, item)| item.len()).min().unwrap_or(0);

        let aligned: Vec<LineItem> = match self.alignment {
            PeriodAlignment::Strict => {
                if let Some((kind, item)) = items.iter().find(|(_, item)| item.len() != expected) {
                    return Err(DcfError::MisalignedPeriods {
                        item: *kind,
                        expected,
                        found: item.len(),
                    });
                }
                items.into_iter().map(|(_, item)| item).collect()
            }
            PeriodAlignment::TrailingCommon => {
                if items.iter().any(|(_, item)| item.len() != shortest) {
                    warn!(
                        periods = shortest,
                        "statements report different period counts; keeping the most recent common periods"
                    );
                }
                items
                    .into_iter()
                    .map(|(_, item)| item.trailing(shortest))
                    .collect()
            }
        };

        aligned
            .try_into()
            .map_err(|_: Vec<LineItem>| DcfError::NoHistoricalPeriods {
                label: String::from("<missing line item>"),
            })
    }
}
