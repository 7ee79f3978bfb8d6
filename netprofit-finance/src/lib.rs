//! netprofit-finance: period filter, money reconciler, expense classifier and report assembler

pub mod expense_rules;
pub mod period_filter;
pub mod pipeline;
pub mod reconcile;
pub mod report;

pub use expense_rules::{ClassifiedExpenses, classify, classify_expenses};
pub use period_filter::filter_by_period;
pub use pipeline::{RunInputs, SETTLEMENT_FILE_COUNT, compute, run};
pub use reconcile::{Reconciliation, SettlementTotals, transaction_total};
pub use report::{
    ExpenseDetailRow, PAYMENT_GAP_NOTE, REVENUE_BASIS_NOTE, ReportAssembler, SalesSummaryRow, SummaryReport,
};
