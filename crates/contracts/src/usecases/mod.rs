pub mod common;
pub mod u501_import_transactions_csv;
