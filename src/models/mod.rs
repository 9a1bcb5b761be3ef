mod expense;

pub use expense::ExpenseRecord;
