pub(crate) mod expenses;
