use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::a002_asset::AssetSummary;
use crate::domain::common::AggregateId;

// ============================================================================
// ID Type
// ============================================================================

/// Уникальный идентификатор транзакции
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(pub Uuid);

impl TransactionId {
    pub fn new(value: Uuid) -> Self {
        Self(value)
    }

    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl AggregateId for TransactionId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(TransactionId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Transaction type
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    Buy,
    Sell,
    Dividend,
    Fee,
    Split,
}

impl TransactionType {
    pub const ALL: [TransactionType; 5] = [
        TransactionType::Buy,
        TransactionType::Sell,
        TransactionType::Dividend,
        TransactionType::Fee,
        TransactionType::Split,
    ];

    /// Wire/CSV code, same as the serde representation
    pub fn code(&self) -> &'static str {
        match self {
            TransactionType::Buy => "buy",
            TransactionType::Sell => "sell",
            TransactionType::Dividend => "dividend",
            TransactionType::Fee => "fee",
            TransactionType::Split => "split",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            TransactionType::Buy => "Buy",
            TransactionType::Sell => "Sell",
            TransactionType::Dividend => "Dividend",
            TransactionType::Fee => "Fee",
            TransactionType::Split => "Split",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.code().eq_ignore_ascii_case(code.trim()))
    }
}

// ============================================================================
// Aggregate
// ============================================================================

/// A recorded buy/sell/dividend/fee/split event against a portfolio asset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    pub portfolio_id: String,
    pub date: NaiveDate,
    pub symbol: String,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub quantity: f64,
    pub price: f64,
    #[serde(default)]
    pub fees: f64,
    pub currency: String,
    /// Only meaningful for splits, e.g. "4:1"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub split_ratio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset: Option<AssetSummary>,
}

impl Transaction {
    /// Gross amount of the transaction including fees.
    ///
    /// Splits carry no cash flow and always return 0.
    pub fn total_amount(&self) -> f64 {
        match self.transaction_type {
            TransactionType::Split => 0.0,
            TransactionType::Buy | TransactionType::Fee => self.quantity * self.price + self.fees,
            TransactionType::Sell | TransactionType::Dividend => {
                self.quantity * self.price - self.fees
            }
        }
    }

    pub fn asset_name(&self) -> Option<&str> {
        self.asset.as_ref().map(|a| a.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(kind: TransactionType) -> Transaction {
        Transaction {
            id: TransactionId::new_v4(),
            portfolio_id: "p1".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            symbol: "AAPL".to_string(),
            transaction_type: kind,
            quantity: 10.0,
            price: 150.0,
            fees: 5.0,
            currency: "USD".to_string(),
            split_ratio: None,
            notes: None,
            asset: None,
        }
    }

    #[test]
    fn test_type_codes_round_trip() {
        for t in TransactionType::ALL {
            assert_eq!(TransactionType::from_code(t.code()), Some(t));
        }
        assert_eq!(TransactionType::from_code(" BUY "), Some(TransactionType::Buy));
        assert_eq!(TransactionType::from_code("transfer"), None);
    }

    #[test]
    fn test_total_amount() {
        assert_eq!(sample(TransactionType::Buy).total_amount(), 1505.0);
        assert_eq!(sample(TransactionType::Sell).total_amount(), 1495.0);
        assert_eq!(sample(TransactionType::Split).total_amount(), 0.0);
    }

    #[test]
    fn test_deserialize_from_backend_json() {
        let json = r#"{
            "id": "6f1c2d3e-4b5a-4c7d-8e9f-0a1b2c3d4e5f",
            "portfolio_id": "main",
            "date": "2024-01-02",
            "symbol": "MSFT",
            "type": "dividend",
            "quantity": 4,
            "price": 0.75,
            "currency": "USD",
            "asset": {"symbol": "MSFT", "name": "Microsoft", "metadata": {"logo_url": "https://cdn/msft.png"}}
        }"#;
        let tx: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(tx.transaction_type, TransactionType::Dividend);
        assert_eq!(tx.fees, 0.0);
        assert_eq!(tx.asset_name(), Some("Microsoft"));
        assert!(tx.notes.is_none());
    }
}
