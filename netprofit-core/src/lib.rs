//! netprofit-core: Core types and utilities for the seller net-profit calculator

pub mod error;
pub mod expense;
pub mod money;
pub mod period;

pub use error::{NetProfitError, Result};
pub use expense::{
    CostItemLists, DEFAULT_FIXED_COST_ITEMS, DEFAULT_OTHER_EXPENSE_ITEMS, DEFAULT_VARIABLE_COST_ITEMS,
    ExpenseClass, ExpenseEntry, FORCED_VARIABLE_ITEMS, PAYMENT_FEE, PLATFORM_FEE, SELLER_FUNDED_PROMOTION,
    is_forced_variable,
};
pub use money::{clean_amount, format_percent, format_won, normalize_item_name, parse_lenient_number, percent_of};
pub use period::{Period, parse_payment_date};
