//! Shared spreadsheet plumbing: open the first worksheet, stringify cells.

use calamine::{Data, Range, Reader, open_workbook_auto};
use netprofit_core::{NetProfitError, Result};
use std::path::Path;

/// Open a workbook (xlsx/xls/ods) and return its first worksheet.
pub fn first_sheet(path: &Path) -> Result<Range<Data>> {
    let file = path.display().to_string();

    let mut workbook = open_workbook_auto(path).map_err(|e| NetProfitError::file_parse(&file, e))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| NetProfitError::file_parse(&file, "workbook has no worksheets"))?
        .map_err(|e| NetProfitError::file_parse(&file, e))?;

    tracing::debug!(file = %file, rows = range.height(), cols = range.width(), "loaded worksheet");
    Ok(range)
}

/// Text of a cell the way a person reading the sheet would see it.
///
/// Whole floats drop their `.0` so a numeric item code stays `"101"`.
pub fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        other => other.to_string(),
    }
}

/// Numeric value of a cell, if it holds a number.
pub fn cell_number(cell: &Data) -> Option<f64> {
    match cell {
        Data::Float(f) => Some(*f),
        Data::Int(i) => Some(*i as f64),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_text() {
        assert_eq!(cell_text(&Data::Empty), "");
        assert_eq!(cell_text(&Data::String("광고비".into())), "광고비");
        assert_eq!(cell_text(&Data::Float(101.0)), "101");
        assert_eq!(cell_text(&Data::Float(2.5)), "2.5");
        assert_eq!(cell_text(&Data::Int(-7)), "-7");
    }

    #[test]
    fn test_cell_number() {
        assert_eq!(cell_number(&Data::Float(1.5)), Some(1.5));
        assert_eq!(cell_number(&Data::Int(3)), Some(3.0));
        assert_eq!(cell_number(&Data::String("3".into())), None);
        assert_eq!(cell_number(&Data::Empty), None);
    }

    #[test]
    fn test_missing_workbook_is_parse_error() {
        let err = first_sheet(Path::new("/nonexistent/netprofit/expense.xlsx")).unwrap_err();
        assert!(matches!(err, NetProfitError::FileParse { .. }), "got {err:?}");
    }
}
