use serde::{Deserialize, Serialize};

/// One row of a settlement export, normalized across the four period files
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettlementRow {
    /// Raw `결제 완료일` text; parsed by the period filter
    pub payment_date: String,
    /// `결제 금액`
    pub payment_amount: f64,
    /// `정산금`
    pub settlement_amount: f64,
    /// `프로모션 지원금`
    pub promotion_subsidy: f64,
    /// `플랫폼 수수료`
    pub platform_fee: f64,
    /// `결제 수수료`; `None` when the file has no such column
    pub payment_fee: Option<f64>,
    /// `배송비` (customer-paid return/exchange shipping); `None` when absent
    pub shipping_fee: Option<f64>,
}

/// One product line of the monthly sales statistics sheet
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SalesRecord {
    /// `거래액`
    pub transaction_amount: f64,
}

/// Amount cell of the expense sheet before cleaning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RawAmount {
    /// Numeric spreadsheet cell
    Number(f64),
    /// Anything typed as text, e.g. `"1,234원"`
    Text(String),
}

/// Name/amount pair read from columns B and C of the expense sheet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawExpenseRow {
    pub name: String,
    pub amount: RawAmount,
}
