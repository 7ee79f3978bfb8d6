//! Product sales statistics sheet (`상품별 판매 통계`)
//!
//! The first row is the header. Only the `거래액` column is used; every other
//! column (product name, option, quantity, ...) is ignored.

use calamine::{Data, Range};
use netprofit_core::{NetProfitError, Result, parse_lenient_number};
use std::path::Path;

use super::workbook::{cell_number, cell_text, first_sheet};
use crate::types::SalesRecord;

pub const TRANSACTION_AMOUNT_COLUMN: &str = "거래액";

/// Load the sales workbook and return one record per non-empty `거래액` cell.
pub fn load_sales_xlsx(path: impl AsRef<Path>) -> Result<Vec<SalesRecord>> {
    let path = path.as_ref();
    let range = first_sheet(path)?;
    sales_from_range(&range, &path.display().to_string())
}

/// Extract sales records from an already-loaded worksheet.
///
/// `source` only labels errors and log lines.
pub fn sales_from_range(range: &Range<Data>, source: &str) -> Result<Vec<SalesRecord>> {
    let mut rows = range.rows();

    let col = rows
        .next()
        .and_then(|header| {
            header
                .iter()
                .position(|cell| cell_text(cell).trim() == TRANSACTION_AMOUNT_COLUMN)
        })
        .ok_or_else(|| NetProfitError::missing_column(source, TRANSACTION_AMOUNT_COLUMN))?;

    let mut out = Vec::new();
    let mut skipped = 0usize;

    for row in rows {
        let Some(cell) = row.get(col) else { continue };

        let amount = match cell {
            Data::Empty => continue,
            Data::String(s) if s.trim().is_empty() => continue,
            Data::String(s) => parse_lenient_number(s),
            other => cell_number(other),
        };

        match amount {
            Some(transaction_amount) => out.push(SalesRecord { transaction_amount }),
            None => {
                skipped += 1;
                tracing::warn!(file = %source, value = %cell, "non-numeric 거래액 cell ignored");
            }
        }
    }

    tracing::debug!(file = %source, records = out.len(), skipped, "parsed sales sheet");
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet(cells: &[&[Data]]) -> Range<Data> {
        let height = cells.len() as u32;
        let width = cells.iter().map(|r| r.len()).max().unwrap_or(1) as u32;
        let mut range = Range::new((0, 0), (height - 1, width - 1));
        for (r, row) in cells.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                range.set_value((r as u32, c as u32), cell.clone());
            }
        }
        range
    }

    fn s(v: &str) -> Data {
        Data::String(v.to_string())
    }

    #[test]
    fn test_sums_transaction_column() {
        let range = sheet(&[
            &[s("상품명"), s("판매수량"), s(" 거래액 ")],
            &[s("니트"), Data::Int(3), Data::Float(120000.0)],
            &[s("셔츠"), Data::Int(1), Data::Int(35000)],
            &[s("원피스"), Data::Int(2), s("45,000")],
            &[s("합계없음"), Data::Empty, Data::Empty],
        ]);

        let records = sales_from_range(&range, "sales.xlsx").unwrap();
        assert_eq!(records.len(), 3);
        let total: f64 = records.iter().map(|r| r.transaction_amount).sum();
        assert_eq!(total, 200000.0);
    }

    #[test]
    fn test_missing_transaction_column() {
        let range = sheet(&[&[s("상품명"), s("결제금액")], &[s("니트"), Data::Int(1000)]]);
        let err = sales_from_range(&range, "sales.xlsx").unwrap_err();
        match err {
            NetProfitError::MissingColumn { file, column } => {
                assert_eq!(file, "sales.xlsx");
                assert_eq!(column, "거래액");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_empty_sheet_is_missing_column() {
        let range: Range<Data> = Range::empty();
        let err = sales_from_range(&range, "sales.xlsx").unwrap_err();
        assert!(matches!(err, NetProfitError::MissingColumn { .. }));
    }

    #[test]
    fn test_non_numeric_cells_are_ignored() {
        let range = sheet(&[&[s("거래액")], &[s("n/a")], &[Data::Float(10.0)]]);
        let records = sales_from_range(&range, "sales.xlsx").unwrap();
        assert_eq!(records, vec![SalesRecord { transaction_amount: 10.0 }]);
    }
}
