use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::Deserialize;

/// Date-time layouts accepted for `TransactionDate`, tried after RFC 3339.
const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Date-only layouts; the record lands at midnight of that day.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseRecord {
    pub id: i64,
    pub transaction_date: NaiveDateTime,
    pub description: String,
    pub amount: Decimal,
    pub expense_type: String,
    pub category: String,
}

/// Shape of one element of the `/expenses` response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawExpense {
    #[serde(rename = "ID")]
    id: i64,
    transaction_date: String,
    description: String,
    amount: f64,
    expense_type: String,
    category: String,
}

#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("{0}")]
    Shape(#[from] serde_json::Error),
    #[error("unparseable transaction date '{0}'")]
    Date(String),
    #[error("amount {0} cannot be represented")]
    Amount(f64),
}

impl ExpenseRecord {
    /// Decode one element of the response array.
    pub fn from_json(value: serde_json::Value) -> Result<Self, RecordError> {
        let raw: RawExpense = serde_json::from_value(value)?;
        let transaction_date = parse_transaction_date(&raw.transaction_date)
            .ok_or_else(|| RecordError::Date(raw.transaction_date.clone()))?;
        let amount = Decimal::from_f64(raw.amount).ok_or(RecordError::Amount(raw.amount))?;

        Ok(Self {
            id: raw.id,
            transaction_date,
            description: raw.description,
            amount,
            expense_type: raw.expense_type,
            category: raw.category,
        })
    }
}

/// Parse a `TransactionDate` into local wall-clock time.
///
/// Offsets (RFC 3339, including a trailing `Z`) are converted to the local zone; naive
/// values are taken as already local.
pub fn parse_transaction_date(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Local).naive_local());
    }
    for fmt in DATE_TIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .map(|d| d.and_time(NaiveTime::MIN))
}
