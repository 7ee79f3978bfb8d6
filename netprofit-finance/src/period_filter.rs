//! Restrict settlement rows to the target month by payment-completion date.

use netprofit_core::{Period, parse_payment_date};
use netprofit_ingest::SettlementRow;

/// Rows whose `결제 완료일` falls inside `period`.
///
/// Rows with an unparseable or empty date are excluded rather than failing
/// the run. An empty result is fine; every sum is then zero.
pub fn filter_by_period(rows: &[SettlementRow], period: Period) -> Vec<&SettlementRow> {
    let mut undated = 0usize;

    let kept: Vec<&SettlementRow> = rows
        .iter()
        .filter(|row| match parse_payment_date(&row.payment_date) {
            Some(date) => period.contains(date),
            None => {
                undated += 1;
                false
            }
        })
        .collect();

    if undated > 0 {
        tracing::warn!(rows = undated, "settlement rows without a valid payment date were skipped");
    }
    tracing::debug!(%period, total = rows.len(), kept = kept.len(), "filtered settlement rows");
    kept
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(date: &str, payment: f64) -> SettlementRow {
        SettlementRow {
            payment_date: date.to_string(),
            payment_amount: payment,
            settlement_amount: 0.0,
            promotion_subsidy: 0.0,
            platform_fee: 0.0,
            payment_fee: None,
            shipping_fee: None,
        }
    }

    #[test]
    fn test_row_included_only_in_its_month() {
        let rows = vec![row("2025-01-15", 100.0)];
        let jan = Period::new(2025, 1).unwrap();
        let feb = Period::new(2025, 2).unwrap();
        assert_eq!(filter_by_period(&rows, jan).len(), 1);
        assert!(filter_by_period(&rows, feb).is_empty());
    }

    #[test]
    fn test_invalid_dates_are_excluded() {
        let rows = vec![
            row("2025-01-03 11:00:00", 1.0),
            row("", 2.0),
            row("구매확정 대기", 3.0),
            row("2025-01-31", 4.0),
            row("2024-01-10", 5.0),
        ];
        let kept = filter_by_period(&rows, Period::new(2025, 1).unwrap());
        let amounts: Vec<f64> = kept.iter().map(|r| r.payment_amount).collect();
        assert_eq!(amounts, vec![1.0, 4.0]);
    }

    #[test]
    fn test_no_matches_is_not_an_error() {
        let rows = vec![row("2025-03-01", 1.0)];
        assert!(filter_by_period(&rows, Period::new(2025, 1).unwrap()).is_empty());
        assert!(filter_by_period(&[], Period::new(2025, 1).unwrap()).is_empty());
    }
}
