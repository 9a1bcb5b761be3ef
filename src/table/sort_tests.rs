#![allow(clippy::unwrap_used)]

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;
use crate::models::ExpenseRecord;

fn expense(id: i64, date: &str, description: &str, amount: Decimal) -> ExpenseRecord {
    ExpenseRecord {
        id,
        transaction_date: NaiveDateTime::parse_from_str(
            &format!("{date} 12:00:00"),
            "%Y-%m-%d %H:%M:%S",
        )
        .unwrap(),
        description: description.into(),
        amount,
        expense_type: format!("type-{}", 4 - id),
        category: format!("cat-{id}"),
    }
}

fn sample() -> Vec<ExpenseRecord> {
    vec![
        expense(1, "2024-01-05", "Coffee", dec!(12.50)),
        expense(2, "2024-01-10", "Bus", dec!(3.00)),
        expense(3, "2024-01-01", "Rent", dec!(900.00)),
    ]
}

fn ids(records: &[ExpenseRecord]) -> Vec<i64> {
    records.iter().map(|r| r.id).collect()
}

// ── sort ──────────────────────────────────────────────────────

#[test]
fn test_sort_amount_ascending() {
    let sorted = sort(sample(), SortField::Amount, SortDirection::Ascending);
    assert_eq!(ids(&sorted), vec![2, 1, 3]);
}

#[test]
fn test_sort_amount_descending() {
    let sorted = sort(sample(), SortField::Amount, SortDirection::Descending);
    assert_eq!(ids(&sorted), vec![3, 1, 2]);
}

#[test]
fn test_sort_amount_is_numeric_not_lexicographic() {
    let records = vec![
        expense(1, "2024-01-01", "a", dec!(100)),
        expense(2, "2024-01-01", "b", dec!(9)),
        expense(3, "2024-01-01", "c", dec!(-20)),
    ];
    let sorted = sort(records, SortField::Amount, SortDirection::Ascending);
    assert_eq!(ids(&sorted), vec![3, 2, 1]);
}

#[test]
fn test_sort_date_is_chronological() {
    let sorted = sort(sample(), SortField::TransactionDate, SortDirection::Ascending);
    assert_eq!(ids(&sorted), vec![3, 1, 2]);
}

#[test]
fn test_sort_description_lexicographic() {
    let sorted = sort(sample(), SortField::Description, SortDirection::Ascending);
    assert_eq!(ids(&sorted), vec![2, 1, 3]);
}

#[test]
fn test_sort_expense_type_and_category() {
    let by_type = sort(sample(), SortField::ExpenseType, SortDirection::Ascending);
    assert_eq!(ids(&by_type), vec![3, 2, 1]);
    let by_category = sort(sample(), SortField::Category, SortDirection::Descending);
    assert_eq!(ids(&by_category), vec![3, 2, 1]);
}

#[test]
fn test_sort_empty_and_single() {
    assert!(sort(Vec::new(), SortField::Amount, SortDirection::Ascending).is_empty());
    let one = vec![expense(1, "2024-01-05", "Coffee", dec!(1))];
    assert_eq!(
        sort(one.clone(), SortField::Amount, SortDirection::Descending),
        one
    );
}

#[test]
fn test_sort_preserves_elements() {
    let original = sample();
    let mut sorted = sort(original.clone(), SortField::Description, SortDirection::Descending);
    sorted.sort_by_key(|r| r.id);
    assert_eq!(sorted, original);
}

#[test]
fn test_sort_is_idempotent() {
    for &field in SortField::all() {
        for direction in [SortDirection::Ascending, SortDirection::Descending] {
            let once = sort(sample(), field, direction);
            let twice = sort(once.clone(), field, direction);
            assert_eq!(once, twice, "{field} {direction}");
        }
    }
}

// ── SortState toggle rule ─────────────────────────────────────

#[test]
fn test_first_sort_is_ascending() {
    let state = SortState::default();
    assert_eq!(state.field, None);
    assert_eq!(state.resolve(SortField::Amount), SortDirection::Ascending);
}

#[test]
fn test_same_field_toggles() {
    let mut state = SortState::default();
    let (records, dir) = state.sort_by(sample(), SortField::Amount, None);
    assert_eq!(dir, SortDirection::Ascending);
    let (records, dir) = state.sort_by(records, SortField::Amount, None);
    assert_eq!(dir, SortDirection::Descending);
    assert_eq!(ids(&records), vec![3, 1, 2]);
    let (_, dir) = state.sort_by(records, SortField::Amount, None);
    assert_eq!(dir, SortDirection::Ascending);
}

#[test]
fn test_new_field_resets_to_ascending() {
    let mut state = SortState {
        field: Some(SortField::Amount),
        direction: SortDirection::Descending,
    };
    assert_eq!(state.resolve(SortField::Category), SortDirection::Ascending);

    // Category was descending before Amount became active; that history is not kept.
    let (records, _) = state.sort_by(sample(), SortField::Category, None);
    let (records, _) = state.sort_by(records, SortField::Category, None);
    assert_eq!(state.direction, SortDirection::Descending);
    let (_, dir) = state.sort_by(records, SortField::Amount, None);
    assert_eq!(dir, SortDirection::Ascending);
}

#[test]
fn test_same_field_descending_goes_back_to_ascending() {
    let state = SortState {
        field: Some(SortField::Amount),
        direction: SortDirection::Descending,
    };
    assert_eq!(state.resolve(SortField::Amount), SortDirection::Ascending);
}

#[test]
fn test_requested_direction_overrides_toggle() {
    let mut state = SortState::default();
    let (records, dir) =
        state.sort_by(sample(), SortField::Amount, Some(SortDirection::Descending));
    assert_eq!(dir, SortDirection::Descending);
    assert_eq!(ids(&records), vec![3, 1, 2]);
    assert_eq!(state.field, Some(SortField::Amount));
    assert_eq!(state.direction, SortDirection::Descending);
}

#[test]
fn test_sort_by_on_empty_records_still_records_state() {
    let mut state = SortState::default();
    let (records, dir) = state.sort_by(Vec::new(), SortField::Description, None);
    assert!(records.is_empty());
    assert_eq!(dir, SortDirection::Ascending);
    assert_eq!(state.field, Some(SortField::Description));
}

// ── parsing ───────────────────────────────────────────────────

#[test]
fn test_sort_field_parse() {
    assert_eq!("date".parse(), Ok(SortField::TransactionDate));
    assert_eq!("TransactionDate".parse(), Ok(SortField::TransactionDate));
    assert_eq!("transaction-date".parse(), Ok(SortField::TransactionDate));
    assert_eq!("Description".parse(), Ok(SortField::Description));
    assert_eq!("AMOUNT".parse(), Ok(SortField::Amount));
    assert_eq!("type".parse(), Ok(SortField::ExpenseType));
    assert_eq!("expense_type".parse(), Ok(SortField::ExpenseType));
    assert_eq!("category".parse(), Ok(SortField::Category));
    assert!("id".parse::<SortField>().is_err());
    assert!("".parse::<SortField>().is_err());
}

#[test]
fn test_sort_direction_parse() {
    assert_eq!("asc".parse(), Ok(SortDirection::Ascending));
    assert_eq!("DESC".parse(), Ok(SortDirection::Descending));
    assert_eq!("descending".parse(), Ok(SortDirection::Descending));
    assert!("up".parse::<SortDirection>().is_err());
}
