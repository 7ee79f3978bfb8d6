//! Deterministic expense classification.
//!
//! Rule order: forced variable items > fixed-cost list > variable-cost list >
//! other expense.

use netprofit_core::{
    CostItemLists, ExpenseClass, ExpenseEntry, clean_amount, is_forced_variable, normalize_item_name,
};
use netprofit_ingest::{RawAmount, RawExpenseRow};
use serde::Serialize;

/// Classify a whitespace-normalized item name.
pub fn classify(name: &str, lists: &CostItemLists) -> ExpenseClass {
    // Platform fee, payment fee and seller-funded promotion scale with sales
    // no matter how the lists are configured.
    if is_forced_variable(name) {
        return ExpenseClass::VariableCost;
    }

    if lists.is_fixed(name) {
        return ExpenseClass::FixedCost;
    }

    if lists.is_variable(name) {
        return ExpenseClass::VariableCost;
    }

    ExpenseClass::OtherExpense
}

/// The full expense table with per-class subtotals
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassifiedExpenses {
    /// Sheet rows in sheet order, followed by the derived rows
    pub entries: Vec<ExpenseEntry>,
    pub fixed_total: f64,
    pub variable_total: f64,
    pub other_total: f64,
}

impl ClassifiedExpenses {
    pub fn from_entries(entries: Vec<ExpenseEntry>) -> Self {
        let sum = |class: ExpenseClass| -> f64 {
            entries
                .iter()
                .filter(|e| e.class == class)
                .map(|e| e.amount)
                .sum()
        };
        let fixed_total = sum(ExpenseClass::FixedCost);
        let variable_total = sum(ExpenseClass::VariableCost);
        let other_total = sum(ExpenseClass::OtherExpense);

        Self {
            entries,
            fixed_total,
            variable_total,
            other_total,
        }
    }

    pub fn total(&self) -> f64 {
        self.fixed_total + self.variable_total + self.other_total
    }
}

fn raw_amount(amount: &RawAmount) -> f64 {
    match amount {
        RawAmount::Number(n) if n.is_finite() => *n,
        RawAmount::Number(_) => 0.0,
        RawAmount::Text(s) => clean_amount(s),
    }
}

/// Clean the sheet rows, append the derived rows and classify everything.
pub fn classify_expenses(
    raw: &[RawExpenseRow],
    derived: &[(&str, f64)],
    lists: &CostItemLists,
) -> ClassifiedExpenses {
    let sheet_rows = raw
        .iter()
        .map(|row| (normalize_item_name(&row.name), raw_amount(&row.amount)));
    let derived_rows = derived
        .iter()
        .map(|(name, amount)| (normalize_item_name(name), *amount));

    let entries: Vec<ExpenseEntry> = sheet_rows
        .chain(derived_rows)
        .map(|(name, amount)| {
            let class = classify(&name, lists);
            ExpenseEntry::new(name, amount, class)
        })
        .collect();

    let classified = ClassifiedExpenses::from_entries(entries);
    tracing::debug!(
        rows = classified.entries.len(),
        fixed = classified.fixed_total,
        variable = classified.variable_total,
        other = classified.other_total,
        "classified expenses"
    );
    classified
}
