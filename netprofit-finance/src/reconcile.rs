//! Money reconciliation across the sales sheet, the settlement files and the
//! operator-entered platform payment figure.
//!
//! Two payment figures exist for the same month. The platform dashboard counts
//! a payment the moment the customer pays; the settlement files only count it
//! once the purchase is confirmed, which can slip into a later settlement
//! round. Their difference is money still in transit. Separately, the part of
//! the price discount that neither the customer paid nor the platform
//! subsidised is the seller's own promotion cost.

use netprofit_core::{PAYMENT_FEE, PLATFORM_FEE, SELLER_FUNDED_PROMOTION};
use netprofit_ingest::{SalesRecord, SettlementRow};
use serde::Serialize;

/// Column sums over the period-filtered settlement rows
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SettlementTotals {
    /// Settlement-basis payment sum (`결제 금액`)
    pub payment_amount: f64,
    pub settlement_amount: f64,
    pub promotion_subsidy: f64,
    pub platform_fee: f64,
    /// 0 when no file carries the column
    pub payment_fee: f64,
    /// 0 when no file carries the column
    pub shipping_fee: f64,
}

impl SettlementTotals {
    pub fn from_rows<'a>(rows: impl IntoIterator<Item = &'a SettlementRow>) -> Self {
        rows.into_iter().fold(Self::default(), |mut acc, row| {
            acc.payment_amount += row.payment_amount;
            acc.settlement_amount += row.settlement_amount;
            acc.promotion_subsidy += row.promotion_subsidy;
            acc.platform_fee += row.platform_fee;
            acc.payment_fee += row.payment_fee.unwrap_or(0.0);
            acc.shipping_fee += row.shipping_fee.unwrap_or(0.0);
            acc
        })
    }
}

/// Sum of `거래액` over the sales sheet
pub fn transaction_total(sales: &[SalesRecord]) -> f64 {
    sales.iter().map(|r| r.transaction_amount).sum()
}

/// All money figures for one month
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Reconciliation {
    /// Revenue basis (`거래액` total)
    pub transaction_total: f64,
    /// Platform-reported payment amount, entered by hand
    pub manual_payment: f64,
    pub settlement: SettlementTotals,
}

impl Reconciliation {
    pub fn new(transaction_total: f64, manual_payment: f64, settlement: SettlementTotals) -> Self {
        Self {
            transaction_total,
            manual_payment,
            settlement,
        }
    }

    /// Manual payment minus settlement-basis payment; negative when the
    /// settlement files already include more than the dashboard figure.
    pub fn payment_discrepancy(&self) -> f64 {
        self.manual_payment - self.settlement.payment_amount
    }

    /// Transaction total minus manual payment minus platform promotion subsidy
    pub fn seller_funded_promotion(&self) -> f64 {
        self.transaction_total - self.manual_payment - self.settlement.promotion_subsidy
    }

    /// Expense rows computed here, in the order they join the expense table.
    pub fn derived_expenses(&self) -> [(&'static str, f64); 3] {
        [
            (PLATFORM_FEE, self.settlement.platform_fee),
            (PAYMENT_FEE, self.settlement.payment_fee),
            (SELLER_FUNDED_PROMOTION, self.seller_funded_promotion()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(payment: f64, settle: f64, promo: f64, fee: Option<f64>, ship: Option<f64>) -> SettlementRow {
        SettlementRow {
            payment_date: "2025-01-10".to_string(),
            payment_amount: payment,
            settlement_amount: settle,
            promotion_subsidy: promo,
            platform_fee: payment * 0.1,
            payment_fee: fee,
            shipping_fee: ship,
        }
    }

    #[test]
    fn test_totals_sum_every_column() {
        let rows = vec![
            row(1000.0, 800.0, 50.0, Some(30.0), None),
            row(2000.0, 1700.0, 0.0, None, Some(3000.0)),
        ];
        let totals = SettlementTotals::from_rows(&rows);
        assert_eq!(totals.payment_amount, 3000.0);
        assert_eq!(totals.settlement_amount, 2500.0);
        assert_eq!(totals.promotion_subsidy, 50.0);
        assert_eq!(totals.platform_fee, 300.0);
        assert_eq!(totals.payment_fee, 30.0);
        assert_eq!(totals.shipping_fee, 3000.0);
    }

    #[test]
    fn test_totals_of_nothing_are_zero() {
        let totals = SettlementTotals::from_rows(std::iter::empty());
        assert_eq!(totals, SettlementTotals::default());
    }

    #[test]
    fn test_reconciliation_scenario() {
        let settlement = SettlementTotals {
            payment_amount: 880_000.0,
            promotion_subsidy: 50_000.0,
            ..Default::default()
        };
        let rec = Reconciliation::new(1_000_000.0, 900_000.0, settlement);
        assert_eq!(rec.payment_discrepancy(), 20_000.0);
        assert_eq!(rec.seller_funded_promotion(), 50_000.0);
    }

    #[test]
    fn test_discrepancy_can_be_negative() {
        let settlement = SettlementTotals {
            payment_amount: 950_000.0,
            ..Default::default()
        };
        let rec = Reconciliation::new(1_000_000.0, 900_000.0, settlement);
        assert_eq!(rec.payment_discrepancy(), -50_000.0);
    }

    #[test]
    fn test_derived_expense_order() {
        let settlement = SettlementTotals {
            platform_fee: 30_000.0,
            payment_fee: 10_000.0,
            ..Default::default()
        };
        let rec = Reconciliation::new(100_000.0, 50_000.0, settlement);
        assert_eq!(
            rec.derived_expenses(),
            [
                ("플랫폼수수료", 30_000.0),
                ("결제수수료", 10_000.0),
                ("판매자부담프로모션", 50_000.0),
            ]
        );
    }

    #[test]
    fn test_transaction_total() {
        let sales = [
            SalesRecord { transaction_amount: 600_000.0 },
            SalesRecord { transaction_amount: 400_000.0 },
        ];
        assert_eq!(transaction_total(&sales), 1_000_000.0);
        assert_eq!(transaction_total(&[]), 0.0);
    }
}
