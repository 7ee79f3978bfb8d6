//! netprofit-ingest: settlement CSV and sales/expense spreadsheet loaders.

pub mod types;
pub mod parsers;

pub use types::{RawAmount, RawExpenseRow, SalesRecord, SettlementRow};
pub use parsers::expense_xlsx::load_expense_xlsx;
pub use parsers::sales_xlsx::load_sales_xlsx;
pub use parsers::settlement_csv::{load_settlement_files, parse_settlement_csv};
