//! Monthly expense sheet (`지출 내역`)
//!
//! The sheet has no header row. Item names sit in column B and amounts in
//! column C; column A is free-form (dates, row numbers) and ignored. Rows with
//! an empty name or an empty amount are dropped.

use calamine::{Data, Range};
use netprofit_core::Result;
use std::path::Path;

use super::workbook::{cell_number, cell_text, first_sheet};
use crate::types::{RawAmount, RawExpenseRow};

const NAME_COL: u32 = 1;
const AMOUNT_COL: u32 = 2;

/// Load the expense workbook. Any open/read failure is a `FileParse` error.
pub fn load_expense_xlsx(path: impl AsRef<Path>) -> Result<Vec<RawExpenseRow>> {
    let path = path.as_ref();
    let range = first_sheet(path)?;
    let rows = expense_rows_from_range(&range);
    tracing::debug!(file = %path.display(), rows = rows.len(), "parsed expense sheet");
    Ok(rows)
}

/// Read the name/amount pairs out of a worksheet.
///
/// Column positions are absolute sheet columns, so a sheet whose used area
/// starts at column B still reads B/C.
pub fn expense_rows_from_range(range: &Range<Data>) -> Vec<RawExpenseRow> {
    let (Some((first_row, _)), Some((last_row, _))) = (range.start(), range.end()) else {
        return Vec::new();
    };

    (first_row..=last_row)
        .filter_map(|row| {
            let name = present(range.get_value((row, NAME_COL)))?;
            let amount = present(range.get_value((row, AMOUNT_COL)))?;

            let amount = match cell_number(amount) {
                Some(n) => RawAmount::Number(n),
                None => RawAmount::Text(cell_text(amount)),
            };

            Some(RawExpenseRow {
                name: cell_text(name),
                amount,
            })
        })
        .collect()
}

fn present(cell: Option<&Data>) -> Option<&Data> {
    cell.filter(|c| !matches!(c, Data::Empty))
}
