//! Settlement period (year-month) and payment-date parsing.

use chrono::{Datelike, NaiveDate, NaiveTime};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

// 2025-01-15, 2025/1/5, 2025.01.15 14:03:22, 2025-01-15T14:03
static PAYMENT_DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^\s*(?P<y>\d{4})[-./](?P<m>\d{1,2})[-./](?P<d>\d{1,2})\.?",
        r"(?:[ T]+(?P<hh>\d{1,2}):(?P<mm>\d{2})(?::(?P<ss>\d{2})(?:\.\d+)?)?)?\s*$"
    ))
    .expect("payment date pattern is valid")
});

/// Parse a payment-completion date as it appears in settlement exports.
///
/// Returns `None` for anything that is not a real calendar date (or carries
/// an impossible time of day); such rows are dropped by the period filter.
pub fn parse_payment_date(raw: &str) -> Option<NaiveDate> {
    let caps = PAYMENT_DATE_RE.captures(raw)?;

    let y: i32 = caps["y"].parse().ok()?;
    let m: u32 = caps["m"].parse().ok()?;
    let d: u32 = caps["d"].parse().ok()?;
    let date = NaiveDate::from_ymd_opt(y, m, d)?;

    if let (Some(hh), Some(mm)) = (caps.name("hh"), caps.name("mm")) {
        let h: u32 = hh.as_str().parse().ok()?;
        let min: u32 = mm.as_str().parse().ok()?;
        let s: u32 = caps
            .name("ss")
            .map(|s| s.as_str().parse().ok())
            .unwrap_or(Some(0))?;
        NaiveTime::from_hms_opt(h, min, s)?;
    }

    Some(date)
}

/// Target settlement month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    pub year: i32,
    /// 1-12
    pub month: u32,
}

impl Period {
    /// `None` when `month` is outside 1-12
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// The following month, wrapping December into January of the next year
    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// The four half-month settlement rounds that cover purchases made in this
    /// month: this month's 1st/2nd and next month's 1st/2nd.
    pub fn settlement_rounds(&self) -> [String; 4] {
        let next = self.next();
        [
            format!("{}월 1차", self.month),
            format!("{}월 2차", self.month),
            format!("{}월 1차", next.month),
            format!("{}월 2차", next.month),
        ]
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}년 {}월", self.year, self.month)
    }
}
