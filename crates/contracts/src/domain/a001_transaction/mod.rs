pub mod aggregate;

pub use aggregate::{Transaction, TransactionId, TransactionType};
