//! One calculation run: load → filter → reconcile → classify → assemble.
//!
//! Every input is loaded and validated before anything is computed, so a run
//! either yields a complete report or an error and nothing else.

use netprofit_core::{CostItemLists, NetProfitError, Period, Result};
use netprofit_ingest::{
    RawExpenseRow, SalesRecord, SettlementRow, load_expense_xlsx, load_sales_xlsx, load_settlement_files,
};
use std::path::{Path, PathBuf};

use crate::expense_rules::classify_expenses;
use crate::period_filter::filter_by_period;
use crate::reconcile::{Reconciliation, SettlementTotals, transaction_total};
use crate::report::{ReportAssembler, SummaryReport};

/// Number of settlement exports that together cover one month of purchases
pub const SETTLEMENT_FILE_COUNT: usize = 4;

/// Operator inputs for a run
#[derive(Debug, Clone)]
pub struct RunInputs {
    pub period: Period,
    /// Platform-reported payment amount, typed in by the operator
    pub manual_payment: f64,
    pub settlement_files: Vec<PathBuf>,
    pub sales_file: Option<PathBuf>,
    pub expense_file: Option<PathBuf>,
}

impl RunInputs {
    /// Check that every file is present; returns the sales and expense paths.
    pub fn validate(&self) -> Result<(&Path, &Path)> {
        let mut missing = Vec::new();

        if self.settlement_files.len() != SETTLEMENT_FILE_COUNT {
            missing.push(format!(
                "{} settlement files expected ({}), got {}",
                SETTLEMENT_FILE_COUNT,
                self.period.settlement_rounds().join(", "),
                self.settlement_files.len()
            ));
        }
        if self.sales_file.is_none() {
            missing.push(format!("sales statistics file ({}월)", self.period.month));
        }
        if self.expense_file.is_none() {
            missing.push(format!("expense file ({}월)", self.period.month));
        }

        match (&self.sales_file, &self.expense_file) {
            (Some(sales), Some(expense)) if missing.is_empty() => Ok((sales.as_path(), expense.as_path())),
            _ => Err(NetProfitError::MissingInput(missing.join("; "))),
        }
    }
}

/// Load every input file and compute the report.
pub fn run(inputs: &RunInputs, lists: &CostItemLists) -> Result<SummaryReport> {
    let (sales_path, expense_path) = inputs.validate()?;

    let settlement_rows = load_settlement_files(&inputs.settlement_files)?;
    let sales = load_sales_xlsx(sales_path)?;
    let raw_expenses = load_expense_xlsx(expense_path)?;

    tracing::info!(
        settlement_rows = settlement_rows.len(),
        sales_records = sales.len(),
        expense_rows = raw_expenses.len(),
        "inputs loaded"
    );

    Ok(compute(
        inputs.period,
        inputs.manual_payment,
        &settlement_rows,
        &sales,
        &raw_expenses,
        lists,
    ))
}

/// The pure calculation over already-loaded tables.
pub fn compute(
    period: Period,
    manual_payment: f64,
    settlement_rows: &[SettlementRow],
    sales: &[SalesRecord],
    raw_expenses: &[RawExpenseRow],
    lists: &CostItemLists,
) -> SummaryReport {
    let in_period = filter_by_period(settlement_rows, period);
    let totals = SettlementTotals::from_rows(in_period);
    let reconciliation = Reconciliation::new(transaction_total(sales), manual_payment, totals);

    let expenses = classify_expenses(raw_expenses, &reconciliation.derived_expenses(), lists);
    ReportAssembler::assemble(period, &reconciliation, &expenses)
}
