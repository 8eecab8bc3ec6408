//! # Domain Models
//!
//! Statement tables as delivered by a [`crate::TabularSource`] and the line
//! items a valuation extracts from them.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`FinancialTable`] | Ordered labelled rows, one cell per historical period |
//! | [`TableRow`] | A single labelled row |
//! | [`Cell`] | Raw cell: number, text or empty |
//! | [`LineItem`] | Extracted numeric series for one row |
//! | [`LineItemKind`] | Semantic line item (revenue, EBIT, ...) |
//! | [`StatementKind`] | Balance sheet, cash flow or income statement |

mod line_item;
mod table;

pub use line_item::{LineItem, LineItemKind, StatementKind};
pub use table::{Cell, FinancialTable, TableRow};
