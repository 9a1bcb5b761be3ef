use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use std::fmt;

use crate::models::ExpenseRecord;

const BOUND_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y"];

/// Optional inclusive calendar-day bounds on the transaction date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct DateRange {
    pub(crate) start: Option<NaiveDate>,
    pub(crate) end: Option<NaiveDate>,
}

impl DateRange {
    pub(crate) fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    pub(crate) fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// True when both bounds are set and no day can satisfy them.
    pub(crate) fn is_inverted(&self) -> bool {
        matches!((self.start, self.end), (Some(s), Some(e)) if s > e)
    }

    /// Whether a transaction at `at` falls inside the range.
    ///
    /// `at` is truncated to the start of its day; the start bound counts from 00:00:00.000
    /// and the end bound runs through 23:59:59.999, so both boundary days are included.
    pub(crate) fn contains(&self, at: NaiveDateTime) -> bool {
        let day = start_of_day(at.date());
        let after_start = self.start.map_or(true, |s| day >= start_of_day(s));
        let before_end = self.end.map_or(true, |e| day <= end_of_day(e));
        after_start && before_end
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let day = |d: NaiveDate| d.format("%m/%d/%Y").to_string();
        match (self.start, self.end) {
            (None, None) => write!(f, "all dates"),
            (Some(s), Some(e)) => write!(f, "{} .. {}", day(s), day(e)),
            (Some(s), None) => write!(f, "from {}", day(s)),
            (None, Some(e)) => write!(f, "through {}", day(e)),
        }
    }
}

fn start_of_day(day: NaiveDate) -> NaiveDateTime {
    day.and_time(NaiveTime::MIN)
}

fn end_of_day(day: NaiveDate) -> NaiveDateTime {
    day.succ_opt()
        .map(start_of_day)
        .and_then(|next| next.checked_sub_signed(Duration::milliseconds(1)))
        .unwrap_or(NaiveDateTime::MAX)
}

/// Records whose transaction date falls within `[start, end]`, in held order.
///
/// With neither bound set every record passes through unchanged.
pub(crate) fn filter(
    records: &[ExpenseRecord],
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Vec<&ExpenseRecord> {
    let range = DateRange::new(start, end);
    if range.is_unbounded() {
        return records.iter().collect();
    }
    records
        .iter()
        .filter(|r| range.contains(r.transaction_date))
        .collect()
}

/// Parse a user-entered date bound. Accepts `today`, `YYYY-MM-DD` and `MM/DD/YYYY`.
pub(crate) fn parse_bound(input: &str, today: NaiveDate) -> Option<NaiveDate> {
    let input = input.trim();
    if input.eq_ignore_ascii_case("today") {
        return Some(today);
    }
    BOUND_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(input, fmt).ok())
}
