use serde::{de::DeserializeOwned, Serialize};
use std::fmt::Debug;
use std::hash::Hash;

/// Strongly typed identifier of an aggregate.
///
/// Ids travel as plain strings over the API and in table keys, so every
/// implementation must round-trip through [`AggregateId::as_string`].
pub trait AggregateId:
    Clone + Copy + PartialEq + Eq + Hash + Serialize + DeserializeOwned + Debug
{
    fn as_string(&self) -> String;

    fn from_string(s: &str) -> Result<Self, String>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_transaction::TransactionId;

    #[test]
    fn test_transaction_id_round_trip() {
        let id = TransactionId::new_v4();
        let parsed = TransactionId::from_string(&id.as_string()).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_rejects_garbage() {
        let err = TransactionId::from_string("not-a-uuid").unwrap_err();
        assert!(err.starts_with("Invalid UUID"));
    }
}
