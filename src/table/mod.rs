mod filter;
mod sort;

pub(crate) use filter::{filter, parse_bound, DateRange};
pub(crate) use sort::{sort, SortDirection, SortField, SortState};

#[cfg(test)]
#[path = "sort_tests.rs"]
mod sort_tests;
