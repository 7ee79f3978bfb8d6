//! Expense entry types and the cost-item name lists used to classify them

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::money::normalize_item_name;

/// Platform commission row derived from the settlement files
pub const PLATFORM_FEE: &str = "플랫폼수수료";
/// Payment processor fee row derived from the settlement files
pub const PAYMENT_FEE: &str = "결제수수료";
/// Discount cost borne by the seller, derived by the reconciler
pub const SELLER_FUNDED_PROMOTION: &str = "판매자부담프로모션";

/// Rows that always resolve to [`ExpenseClass::VariableCost`], whatever the lists say.
pub const FORCED_VARIABLE_ITEMS: [&str; 3] = [PLATFORM_FEE, PAYMENT_FEE, SELLER_FUNDED_PROMOTION];

pub fn is_forced_variable(name: &str) -> bool {
    FORCED_VARIABLE_ITEMS.contains(&name)
}

/// Cost bucket of an expense row
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ExpenseClass {
    #[serde(rename = "fixed")]
    FixedCost,
    #[serde(rename = "variable")]
    VariableCost,
    #[serde(rename = "other")]
    OtherExpense,
}

impl ExpenseClass {
    /// Label shown in the expense detail table
    pub fn label(&self) -> &'static str {
        match self {
            ExpenseClass::FixedCost => "고정비",
            ExpenseClass::VariableCost => "변동비",
            ExpenseClass::OtherExpense => "기타지출",
        }
    }
}

impl std::fmt::Display for ExpenseClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A cleaned, classified expense line
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExpenseEntry {
    /// Category name with all whitespace removed
    pub name: String,
    /// Amount in won
    pub amount: f64,
    pub class: ExpenseClass,
}

impl ExpenseEntry {
    pub fn new(name: impl Into<String>, amount: f64, class: ExpenseClass) -> Self {
        Self {
            name: name.into(),
            amount,
            class,
        }
    }

    /// True for the platform fee, payment fee and seller-funded promotion rows
    pub fn is_forced_variable(&self) -> bool {
        is_forced_variable(&self.name)
    }
}

pub const DEFAULT_FIXED_COST_ITEMS: [&str; 7] = [
    "인건비",
    "소프트웨어구독료",
    "관리비",
    "통신비",
    "4대보험료",
    "보험료",
    "임대료",
];

pub const DEFAULT_VARIABLE_COST_ITEMS: [&str; 11] = [
    "사입비",
    "광고비",
    "배송비",
    "지급수수료",
    "기타여비교통비",
    "소모품비",
    "사무용품비",
    "기타복리후생비",
    "식대",
    "차량유지비",
    "잡비",
];

pub const DEFAULT_OTHER_EXPENSE_ITEMS: [&str; 4] = ["기타지출1", "기타지출2", "기타지출3", "기타지출4"];

/// Immutable name lists that drive classification.
///
/// Names are stored whitespace-normalized, the same way expense rows are, so a
/// list entry written as `"4대 보험료"` still matches a row named `4대보험료`.
/// Names on neither list fall into [`ExpenseClass::OtherExpense`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CostItemLists {
    fixed: BTreeSet<String>,
    variable: BTreeSet<String>,
}

impl CostItemLists {
    pub fn new<I, S>(fixed: I, variable: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        fn collect<I, S>(items: I) -> BTreeSet<String>
        where
            I: IntoIterator<Item = S>,
            S: AsRef<str>,
        {
            items
                .into_iter()
                .map(|s| normalize_item_name(s.as_ref()))
                .filter(|s| !s.is_empty())
                .collect()
        }

        Self {
            fixed: collect(fixed),
            variable: collect(variable),
        }
    }

    pub fn is_fixed(&self, name: &str) -> bool {
        self.fixed.contains(name)
    }

    pub fn is_variable(&self, name: &str) -> bool {
        self.variable.contains(name)
    }
}

impl Default for CostItemLists {
    fn default() -> Self {
        Self::new(
            DEFAULT_FIXED_COST_ITEMS.to_vec(),
            DEFAULT_VARIABLE_COST_ITEMS.to_vec(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_lists() {
        let lists = CostItemLists::default();
        assert!(lists.is_fixed("인건비"));
        assert!(lists.is_fixed("임대료"));
        assert!(lists.is_variable("광고비"));
        assert!(lists.is_variable("잡비"));
        assert!(!lists.is_fixed("광고비"));
        assert!(!lists.is_variable("기타지출1"));
        assert_eq!(lists.fixed.len(), 7);
        assert_eq!(lists.variable.len(), 11);
    }

    #[test]
    fn test_list_names_are_normalized() {
        let lists = CostItemLists::new(vec!["4대 보험료", "  "], vec!["광고\u{a0}비"]);
        assert!(lists.is_fixed("4대보험료"));
        assert!(lists.is_variable("광고비"));
        assert_eq!(lists.fixed.len(), 1);
    }

    #[test]
    fn test_forced_variable_names() {
        assert!(is_forced_variable("결제수수료"));
        assert!(is_forced_variable("플랫폼수수료"));
        assert!(is_forced_variable("판매자부담프로모션"));
        assert!(!is_forced_variable("지급수수료"));

        let entry = ExpenseEntry::new(PAYMENT_FEE, 10.0, ExpenseClass::VariableCost);
        assert!(entry.is_forced_variable());
    }

    #[test]
    fn test_class_labels_and_serde() {
        assert_eq!(ExpenseClass::FixedCost.to_string(), "고정비");
        assert_eq!(ExpenseClass::OtherExpense.label(), "기타지출");
        let json = serde_json::to_string(&ExpenseClass::VariableCost).unwrap();
        assert_eq!(json, "\"variable\"");
    }
}
