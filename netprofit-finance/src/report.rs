//! Report assembler: turns the reconciliation and the classified expenses into
//! the sales summary table, the expense detail table and the net-profit figures.

use netprofit_core::{ExpenseClass, Period, format_percent, format_won, percent_of};
use serde::Serialize;

use crate::expense_rules::ClassifiedExpenses;
use crate::reconcile::Reconciliation;

/// One line of the sales summary, with its static tooltip
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalesSummaryRow {
    pub label: &'static str,
    pub amount: f64,
    /// Thousands-separated integer
    pub formatted: String,
    pub tooltip: &'static str,
}

/// One line of the expense detail table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpenseDetailRow {
    pub name: String,
    pub amount: f64,
    pub formatted: String,
    /// Share of the transaction total, rounded to 2 decimals
    pub ratio_pct: f64,
    /// `ratio_pct` with a `%` suffix
    pub ratio: String,
    pub class: ExpenseClass,
}

/// Everything one run produces. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryReport {
    pub period: Period,
    pub transaction_total: f64,
    pub sales_summary: Vec<SalesSummaryRow>,
    pub expense_detail: Vec<ExpenseDetailRow>,
    pub fixed_total: f64,
    pub variable_total: f64,
    pub other_total: f64,
    pub total_expense: f64,
    pub net_profit: f64,
    /// Net profit as a percentage of the transaction total (0 when there were no sales)
    pub profit_ratio: f64,
}

impl SummaryReport {
    /// e.g. `2025년 1월 매출 : 1,000,000원`
    pub fn headline(&self) -> String {
        format!("{} 매출 : {}원", self.period, format_won(self.transaction_total))
    }

    /// e.g. `110,000원`
    pub fn net_profit_display(&self) -> String {
        format!("{}원", format_won(self.net_profit))
    }

    /// e.g. `11.00%`
    pub fn profit_ratio_display(&self) -> String {
        format_percent(self.profit_ratio)
    }
}

const TOOLTIP_TRANSACTION: &str = "할인된 판매가 기준으로 실제 거래된 금액입니다.";
const TOOLTIP_MANUAL_PAYMENT: &str = "판매자센터에 표시되는 결제금액입니다.";
const TOOLTIP_SETTLEMENT_PAYMENT: &str = "정산 파일에 잡힌 해당 월 결제금액입니다.";
const TOOLTIP_DISCREPANCY: &str = "정산하는 달 말일 기준으로 아직 정산되지 않은 금액입니다.";
const TOOLTIP_SHIPPING: &str = "고객이 직접 부담한 반품/교환 배송비입니다.";
const TOOLTIP_PROMOTION: &str = "플랫폼이 제공한 할인 지원금입니다.";
const TOOLTIP_PLATFORM_FEE: &str = "플랫폼이 부과하는 기본 수수료입니다.";
const TOOLTIP_PAYMENT_FEE: &str = "결제사가 부과하는 수수료입니다.";
const TOOLTIP_SETTLEMENT: &str = "판매자가 실제로 입금받는 금액입니다.";

/// Why revenue is measured on transaction amount rather than payment amount
pub const REVENUE_BASIS_NOTE: &str = "\
왜 매출은 거래액 기준인가요?

한 주문에는 쿠폰, 적립금, 프로모션 같은 할인이 여러 겹 들어가기 때문에
고객이 실제로 낸 결제금액은 판매가와 달라집니다. 판매자는 실제 판매가,
즉 거래된 금액을 기준으로 광고비, 수수료, 인건비 등 비용 대비 수익률을
봐야 정확하게 판단할 수 있습니다.

  상품 정가 (표시용)            100,000원
  할인 판매가 (= 거래액)          50,000원
  쿠폰/적립금 사용 후 결제금액    45,000원

이 경우 매출은 거래액인 50,000원으로 봅니다. 쿠폰/적립금 차감분은 플랫폼
또는 판매자 부담이고, 판매가 자체가 이미 할인된 가격이기 때문입니다.";

/// Why the two payment figures differ
pub const PAYMENT_GAP_NOTE: &str = "\
결제금액은 왜 두 개이고, 왜 서로 다른가요?

1. 판매자센터 결제금액은 고객이 결제하는 즉시 잡히며 구매확정 시점과
   무관합니다.
2. 정산 파일의 결제금액은 구매확정이 늦어지면 다음 정산 회차로 넘어갑니다.

예를 들어 1월에 결제된 주문이 4월에 구매확정되면 1월 정산이 아니라 4월
정산에 포함됩니다. 그래서 두 결제금액 사이에 차액이 생기며, 이 차액은
정산하는 달 말일 기준으로 아직 정산되지 않은 금액입니다.";

pub struct ReportAssembler;

impl ReportAssembler {
    pub fn assemble(
        period: Period,
        reconciliation: &Reconciliation,
        expenses: &ClassifiedExpenses,
    ) -> SummaryReport {
        let transaction_total = reconciliation.transaction_total;
        let total_expense = expenses.total();
        let net_profit = reconciliation.settlement.settlement_amount - total_expense;
        let profit_ratio = if transaction_total != 0.0 {
            net_profit / transaction_total * 100.0
        } else {
            0.0
        };

        tracing::info!(
            %period,
            transaction_total,
            total_expense,
            net_profit,
            "assembled report"
        );

        SummaryReport {
            period,
            transaction_total,
            sales_summary: Self::sales_summary(reconciliation),
            expense_detail: Self::expense_detail(expenses, transaction_total),
            fixed_total: expenses.fixed_total,
            variable_total: expenses.variable_total,
            other_total: expenses.other_total,
            total_expense,
            net_profit,
            profit_ratio,
        }
    }

    fn sales_summary(rec: &Reconciliation) -> Vec<SalesSummaryRow> {
        let s = &rec.settlement;
        [
            ("거래액", rec.transaction_total, TOOLTIP_TRANSACTION),
            ("결제금액(에이블리 기준)", rec.manual_payment, TOOLTIP_MANUAL_PAYMENT),
            ("결제금액(정산기준)", s.payment_amount, TOOLTIP_SETTLEMENT_PAYMENT),
            ("결제금액 차액", rec.payment_discrepancy(), TOOLTIP_DISCREPANCY),
            ("배송비(고객부담배송비)", s.shipping_fee, TOOLTIP_SHIPPING),
            ("프로모션 지원금", s.promotion_subsidy, TOOLTIP_PROMOTION),
            ("플랫폼 수수료", s.platform_fee, TOOLTIP_PLATFORM_FEE),
            ("결제 수수료", s.payment_fee, TOOLTIP_PAYMENT_FEE),
            ("정산금", s.settlement_amount, TOOLTIP_SETTLEMENT),
        ]
        .into_iter()
        .map(|(label, amount, tooltip)| SalesSummaryRow {
            label,
            amount,
            formatted: format_won(amount),
            tooltip,
        })
        .collect()
    }

    /// Forced-variable rows first, then everything else, each group in table order.
    fn expense_detail(expenses: &ClassifiedExpenses, transaction_total: f64) -> Vec<ExpenseDetailRow> {
        let (forced, rest): (Vec<_>, Vec<_>) = expenses
            .entries
            .iter()
            .partition(|e| e.is_forced_variable());

        forced
            .into_iter()
            .chain(rest)
            .map(|e| {
                let ratio_pct = percent_of(e.amount, transaction_total);
                ExpenseDetailRow {
                    name: e.name.clone(),
                    amount: e.amount,
                    formatted: format_won(e.amount),
                    ratio_pct,
                    ratio: format_percent(ratio_pct),
                    class: e.class,
                }
            })
            .collect()
    }
}
