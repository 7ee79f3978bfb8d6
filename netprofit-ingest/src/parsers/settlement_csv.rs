//! Settlement detail CSV exports (`정산 세부내역`)
//!
//! The platform settles twice a month, so a calendar month of purchases is
//! spread over four files (this month's 1st/2nd round, next month's 1st/2nd
//! round). Each file has a header row; columns are located by name:
//!
//!   결제 완료일, 결제 금액, 정산금, 프로모션 지원금, 플랫폼 수수료,
//!   결제 수수료 (optional), 배송비 (optional)
//!
//! Exports are UTF-8 (often with a BOM); older ones come out as EUC-KR.

use csv::StringRecord;
use netprofit_core::{NetProfitError, Result, parse_lenient_number};
use std::path::Path;

use crate::types::SettlementRow;

pub const PAYMENT_DATE: &str = "결제 완료일";
pub const PAYMENT_AMOUNT: &str = "결제 금액";
pub const SETTLEMENT_AMOUNT: &str = "정산금";
pub const PROMOTION_SUBSIDY: &str = "프로모션 지원금";
pub const PLATFORM_FEE: &str = "플랫폼 수수료";
pub const PAYMENT_FEE: &str = "결제 수수료";
pub const SHIPPING_FEE: &str = "배송비";

/// Columns every settlement export is expected to carry. A file lacking one
/// contributes 0 (or an undated row) for it; only a column absent from every
/// file in the set is fatal.
pub const REQUIRED_COLUMNS: [&str; 5] = [
    PAYMENT_DATE,
    PAYMENT_AMOUNT,
    SETTLEMENT_AMOUNT,
    PROMOTION_SUBSIDY,
    PLATFORM_FEE,
];

struct Columns {
    payment_date: Option<usize>,
    payment_amount: Option<usize>,
    settlement_amount: Option<usize>,
    promotion_subsidy: Option<usize>,
    platform_fee: Option<usize>,
    payment_fee: Option<usize>,
    shipping_fee: Option<usize>,
}

impl Columns {
    fn locate(headers: &StringRecord) -> Self {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim_start_matches('\u{feff}').trim() == name)
        };

        Self {
            payment_date: find(PAYMENT_DATE),
            payment_amount: find(PAYMENT_AMOUNT),
            settlement_amount: find(SETTLEMENT_AMOUNT),
            promotion_subsidy: find(PROMOTION_SUBSIDY),
            platform_fee: find(PLATFORM_FEE),
            payment_fee: find(PAYMENT_FEE),
            shipping_fee: find(SHIPPING_FEE),
        }
    }

    fn missing_required(&self) -> Vec<&'static str> {
        [
            self.payment_date,
            self.payment_amount,
            self.settlement_amount,
            self.promotion_subsidy,
            self.platform_fee,
        ]
        .into_iter()
        .zip(REQUIRED_COLUMNS)
        .filter(|(idx, _)| idx.is_none())
        .map(|(_, name)| name)
        .collect()
    }
}

/// Rows of one file plus the required headers it lacked.
struct ParsedFile {
    rows: Vec<SettlementRow>,
    missing: Vec<&'static str>,
}

/// Decode raw file bytes: UTF-8 (BOM stripped) first, EUC-KR as fallback.
fn decode_text(bytes: &[u8], source: &str) -> String {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => {
            let (text, had_errors) = encoding_rs::EUC_KR.decode_without_bom_handling(bytes);
            if had_errors {
                tracing::warn!(file = %source, "settlement file is neither UTF-8 nor EUC-KR; some characters were replaced");
            } else {
                tracing::debug!(file = %source, "decoded settlement file as EUC-KR");
            }
            text.into_owned()
        }
    }
}

fn read_file(path: &Path, source: &str) -> Result<ParsedFile> {
    let bytes = std::fs::read(path).map_err(|e| NetProfitError::file_parse(source, e))?;
    parse_file_text(&decode_text(&bytes, source), source)
}

fn parse_file_text(text: &str, source: &str) -> Result<ParsedFile> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = rdr
        .headers()
        .map_err(|e| NetProfitError::file_parse(source, e))?
        .clone();
    let cols = Columns::locate(&headers);

    let mut rows = Vec::new();
    let mut coerced = 0usize;

    for result in rdr.records() {
        let record = result.map_err(|e| NetProfitError::file_parse(source, e))?;
        if record.iter().all(|f| f.trim().is_empty()) {
            continue;
        }

        let mut number = |idx: usize| -> f64 {
            let raw = record.get(idx).unwrap_or("");
            match parse_lenient_number(raw) {
                Some(v) => v,
                None => {
                    if !raw.trim().is_empty() {
                        coerced += 1;
                    }
                    0.0
                }
            }
        };

        let payment_amount = cols.payment_amount.map_or(0.0, &mut number);
        let settlement_amount = cols.settlement_amount.map_or(0.0, &mut number);
        let promotion_subsidy = cols.promotion_subsidy.map_or(0.0, &mut number);
        let platform_fee = cols.platform_fee.map_or(0.0, &mut number);
        let payment_fee = cols.payment_fee.map(&mut number);
        let shipping_fee = cols.shipping_fee.map(&mut number);

        let payment_date = cols
            .payment_date
            .and_then(|idx| record.get(idx))
            .unwrap_or("")
            .trim()
            .to_string();

        rows.push(SettlementRow {
            payment_date,
            payment_amount,
            settlement_amount,
            promotion_subsidy,
            platform_fee,
            payment_fee,
            shipping_fee,
        });
    }

    if coerced > 0 {
        tracing::warn!(file = %source, cells = coerced, "non-numeric settlement amounts counted as 0");
    }
    tracing::debug!(file = %source, rows = rows.len(), "parsed settlement file");
    Ok(ParsedFile {
        rows,
        missing: cols.missing_required(),
    })
}

/// Parse one settlement CSV file on its own; every required column must be present.
pub fn parse_settlement_csv(path: impl AsRef<Path>) -> Result<Vec<SettlementRow>> {
    let path = path.as_ref();
    let source = path.display().to_string();
    into_complete(read_file(path, &source)?, &source)
}

/// Parse settlement CSV text. `source` labels errors and log lines.
pub fn parse_settlement_text(text: &str, source: &str) -> Result<Vec<SettlementRow>> {
    into_complete(parse_file_text(text, source)?, source)
}

fn into_complete(parsed: ParsedFile, source: &str) -> Result<Vec<SettlementRow>> {
    match parsed.missing.first() {
        Some(column) => Err(NetProfitError::missing_column(source, *column)),
        None => Ok(parsed.rows),
    }
}

/// Parse and concatenate several settlement files in the order given.
///
/// Rows are not deduplicated: an order that appears in two files is counted
/// twice. A required column missing from some files counts as 0 in those
/// files; it is a [`NetProfitError::MissingColumn`] only when no file has it.
pub fn load_settlement_files<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<SettlementRow>> {
    let mut rows = Vec::new();
    let mut sources = Vec::with_capacity(paths.len());
    let mut absent_everywhere: Option<Vec<&'static str>> = None;

    for path in paths {
        let path = path.as_ref();
        let source = path.display().to_string();
        let parsed = read_file(path, &source)?;

        if !parsed.missing.is_empty() {
            tracing::warn!(file = %source, columns = ?parsed.missing, "settlement file lacks columns; counted as 0");
        }
        absent_everywhere = Some(match absent_everywhere {
            None => parsed.missing,
            Some(prev) => prev
                .into_iter()
                .filter(|c| parsed.missing.contains(c))
                .collect(),
        });

        rows.extend(parsed.rows);
        sources.push(source);
    }

    if let Some(column) = absent_everywhere.unwrap_or_default().first() {
        return Err(NetProfitError::missing_column(sources.join(", "), *column));
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
주문번호,결제 완료일,결제 금액,정산금,프로모션 지원금,플랫폼 수수료,결제 수수료,배송비
A-1,2025-01-15 10:11:12,\"30,000\",25000,1000,3000,900,0
A-2,2025-01-31,20000,17000,0,2000,600,3000
A-3,,15000,12000,0,1500,450,
";

    #[test]
    fn test_parse_basic() {
        let rows = parse_settlement_text(SAMPLE, "1월 1차.csv").unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].payment_date, "2025-01-15 10:11:12");
        assert_eq!(rows[0].payment_amount, 30000.0);
        assert_eq!(rows[0].settlement_amount, 25000.0);
        assert_eq!(rows[0].promotion_subsidy, 1000.0);
        assert_eq!(rows[0].platform_fee, 3000.0);
        assert_eq!(rows[0].payment_fee, Some(900.0));
        assert_eq!(rows[1].shipping_fee, Some(3000.0));
        assert_eq!(rows[2].payment_date, "");
        assert_eq!(rows[2].shipping_fee, Some(0.0));
    }

    #[test]
    fn test_optional_columns_absent() {
        let text = "결제 완료일,결제 금액,정산금,프로모션 지원금,플랫폼 수수료\n2025-01-02,100,90,0,10\n";
        let rows = parse_settlement_text(text, "old.csv").unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].payment_fee, None);
        assert_eq!(rows[0].shipping_fee, None);
    }

    #[test]
    fn test_missing_required_column() {
        let text = "결제 완료일,결제 금액,정산금,플랫폼 수수료\n2025-01-02,100,90,10\n";
        let err = parse_settlement_text(text, "broken.csv").unwrap_err();
        assert_eq!(
            err.to_string(),
            "broken.csv: missing required column '프로모션 지원금'"
        );
    }

    #[test]
    fn test_bom_and_padded_headers() {
        let text = "\u{feff}결제 완료일 , 결제 금액,정산금,프로모션 지원금,플랫폼 수수료\n2025-01-02,100,90,0,10\n";
        let rows = parse_settlement_text(text, "bom.csv").unwrap();
        assert_eq!(rows[0].payment_amount, 100.0);
    }

    #[test]
    fn test_garbage_amounts_become_zero_and_blank_lines_skip() {
        let text = "결제 완료일,결제 금액,정산금,프로모션 지원금,플랫폼 수수료\n2025-01-02,abc,90,-,10\n,,,,\n";
        let rows = parse_settlement_text(text, "x.csv").unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].payment_amount, 0.0);
        assert_eq!(rows[0].promotion_subsidy, 0.0);
        assert_eq!(rows[0].settlement_amount, 90.0);
    }

    #[test]
    fn test_decode_euc_kr_fallback() {
        let (bytes, _, _) = encoding_rs::EUC_KR.encode("결제 완료일,정산금\n");
        assert!(std::str::from_utf8(&bytes).is_err());
        assert_eq!(decode_text(&bytes, "legacy.csv"), "결제 완료일,정산금\n");
        assert_eq!(decode_text(b"\xEF\xBB\xBFabc", "bom.csv"), "abc");
    }

    #[test]
    fn test_load_files_concatenates_and_keeps_duplicates() {
        let dir = std::env::temp_dir().join(format!("netprofit-settle-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let a = dir.join("a.csv");
        let b = dir.join("b.csv");
        std::fs::write(&a, SAMPLE).unwrap();
        std::fs::write(&b, SAMPLE).unwrap();

        let rows = load_settlement_files(&[&a, &b]).unwrap();
        assert_eq!(rows.len(), 6);
        assert_eq!(rows[0], rows[3]);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_column_missing_from_one_round_counts_as_zero() {
        let dir = std::env::temp_dir().join(format!("netprofit-partial-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let full = dir.join("1차.csv");
        let partial = dir.join("2차.csv");
        std::fs::write(&full, SAMPLE).unwrap();
        std::fs::write(
            &partial,
            "결제 완료일,결제 금액,정산금,플랫폼 수수료\n2025-01-20,5000,4500,500\n",
        )
        .unwrap();

        let rows = load_settlement_files(&[&full, &partial]).unwrap();
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[3].promotion_subsidy, 0.0);
        assert_eq!(rows[3].settlement_amount, 4500.0);
        let subsidy: f64 = rows.iter().map(|r| r.promotion_subsidy).sum();
        assert_eq!(subsidy, 1000.0);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_column_missing_from_every_round_is_error() {
        let dir = std::env::temp_dir().join(format!("netprofit-absent-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let text = "결제 완료일,결제 금액,정산금,플랫폼 수수료\n2025-01-20,5000,4500,500\n";
        let a = dir.join("a.csv");
        let b = dir.join("b.csv");
        std::fs::write(&a, text).unwrap();
        std::fs::write(&b, text).unwrap();

        let err = load_settlement_files(&[&a, &b]).unwrap_err();
        match err {
            NetProfitError::MissingColumn { file, column } => {
                assert_eq!(column, PROMOTION_SUBSIDY);
                assert!(file.contains("a.csv") && file.contains("b.csv"));
            }
            other => panic!("unexpected error: {other:?}"),
        }

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_missing_file_is_parse_error() {
        let err = parse_settlement_csv("/nonexistent/netprofit/1차.csv").unwrap_err();
        assert!(matches!(err, NetProfitError::FileParse { .. }));
    }
}
