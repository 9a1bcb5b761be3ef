use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::models::ExpenseRecord;

/// Columns the expense table can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SortField {
    TransactionDate,
    Description,
    Amount,
    ExpenseType,
    Category,
}

impl SortField {
    /// Column order as displayed.
    pub(crate) fn all() -> &'static [SortField] {
        &[
            Self::TransactionDate,
            Self::Description,
            Self::Amount,
            Self::ExpenseType,
            Self::Category,
        ]
    }

    pub(crate) fn label(self) -> &'static str {
        match self {
            Self::TransactionDate => "Date",
            Self::Description => "Description",
            Self::Amount => "Amount",
            Self::ExpenseType => "ExpenseType",
            Self::Category => "Category",
        }
    }

    /// Three-way comparison on this field's natural ordering.
    pub(crate) fn compare(self, a: &ExpenseRecord, b: &ExpenseRecord) -> Ordering {
        match self {
            Self::TransactionDate => a.transaction_date.cmp(&b.transaction_date),
            Self::Description => a.description.cmp(&b.description),
            Self::Amount => a.amount.cmp(&b.amount),
            Self::ExpenseType => a.expense_type.cmp(&b.expense_type),
            Self::Category => a.category.cmp(&b.category),
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect::<String>()
            .to_lowercase();
        match normalized.as_str() {
            "date" | "transactiondate" => Ok(Self::TransactionDate),
            "description" => Ok(Self::Description),
            "amount" => Ok(Self::Amount),
            "type" | "expensetype" => Ok(Self::ExpenseType),
            "category" => Ok(Self::Category),
            _ => Err(format!(
                "unknown column '{s}' (expected date, description, amount, type or category)"
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub(crate) fn apply(self, ord: Ordering) -> Ordering {
        match self {
            Self::Ascending => ord,
            Self::Descending => ord.reverse(),
        }
    }

    pub(crate) fn arrow(self) -> &'static str {
        match self {
            Self::Ascending => "▲",
            Self::Descending => "▼",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ascending => write!(f, "asc"),
            Self::Descending => write!(f, "desc"),
        }
    }
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" | "ascending" => Ok(Self::Ascending),
            "desc" | "descending" => Ok(Self::Descending),
            _ => Err(format!("unknown direction '{s}' (expected asc or desc)")),
        }
    }
}

/// The active sort column and direction. No column is active until the first sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct SortState {
    pub(crate) field: Option<SortField>,
    pub(crate) direction: SortDirection,
}

impl SortState {
    /// Direction a click on `field` resolves to: repeat clicks on an ascending column flip
    /// it to descending, anything else starts ascending.
    pub(crate) fn resolve(&self, field: SortField) -> SortDirection {
        if self.field == Some(field) && self.direction == SortDirection::Ascending {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        }
    }

    /// Reorder `records` by `field` and make it the active sort.
    ///
    /// `requested` overrides the toggle rule when present. Returns the new collection and
    /// the direction that was applied.
    pub(crate) fn sort_by(
        &mut self,
        records: Vec<ExpenseRecord>,
        field: SortField,
        requested: Option<SortDirection>,
    ) -> (Vec<ExpenseRecord>, SortDirection) {
        let direction = requested.unwrap_or_else(|| self.resolve(field));
        self.field = Some(field);
        self.direction = direction;
        (sort(records, field, direction), direction)
    }
}

/// Order `records` by `field` in `direction`.
pub(crate) fn sort(
    mut records: Vec<ExpenseRecord>,
    field: SortField,
    direction: SortDirection,
) -> Vec<ExpenseRecord> {
    if records.len() > 1 {
        records.sort_by(|a, b| direction.apply(field.compare(a, b)));
    }
    records
}
