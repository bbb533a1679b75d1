use chrono::NaiveDate;
use contracts::domain::a001_transaction::{Transaction, TransactionType};
use contracts::domain::a002_asset::AssetMetadata;
use contracts::domain::common::AggregateId;
use std::cmp::Ordering;

use crate::shared::export::CsvExportable;
use crate::shared::list_utils::{cmp_f64, contains_ci, filter_list, sort_list, Searchable, Sortable};

/// Строка таблицы транзакций
#[derive(Clone, Debug, PartialEq)]
pub struct TransactionRow {
    pub id: String,
    pub date: NaiveDate,
    pub symbol: String,
    pub asset_name: String,
    pub metadata: Option<AssetMetadata>,
    pub transaction_type: TransactionType,
    pub quantity: f64,
    pub price: f64,
    pub fees: f64,
    pub total: f64,
    pub currency: String,
    pub split_ratio: String,
    pub notes: String,
}

impl From<Transaction> for TransactionRow {
    fn from(t: Transaction) -> Self {
        let total = t.total_amount();
        let (asset_name, metadata) = match t.asset {
            Some(asset) => (asset.name, asset.metadata),
            None => (String::new(), None),
        };
        Self {
            id: t.id.as_string(),
            date: t.date,
            symbol: t.symbol,
            asset_name,
            metadata,
            transaction_type: t.transaction_type,
            quantity: t.quantity,
            price: t.price,
            fees: t.fees,
            total,
            currency: t.currency,
            split_ratio: t.split_ratio.unwrap_or_default(),
            notes: t.notes.unwrap_or_default(),
        }
    }
}

impl Searchable for TransactionRow {
    fn matches_filter(&self, filter_lower: &str) -> bool {
        contains_ci(&self.symbol, filter_lower)
            || contains_ci(&self.asset_name, filter_lower)
            || contains_ci(&self.notes, filter_lower)
            || contains_ci(self.transaction_type.display_name(), filter_lower)
    }
}

impl Sortable for TransactionRow {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "date" => self.date.cmp(&other.date),
            "symbol" => self.symbol.to_lowercase().cmp(&other.symbol.to_lowercase()),
            "type" => self
                .transaction_type
                .display_name()
                .cmp(other.transaction_type.display_name()),
            "quantity" => cmp_f64(self.quantity, other.quantity),
            "price" => cmp_f64(self.price, other.price),
            "fees" => cmp_f64(self.fees, other.fees),
            "total" => cmp_f64(self.total, other.total),
            _ => Ordering::Equal,
        }
    }
}

impl CsvExportable for TransactionRow {
    fn headers() -> Vec<&'static str> {
        vec![
            "date",
            "symbol",
            "type",
            "quantity",
            "price",
            "fees",
            "currency",
            "split_ratio",
            "notes",
        ]
    }

    fn to_csv_row(&self) -> Vec<String> {
        vec![
            self.date.format("%Y-%m-%d").to_string(),
            self.symbol.clone(),
            self.transaction_type.code().to_string(),
            self.quantity.to_string(),
            self.price.to_string(),
            self.fees.to_string(),
            self.currency.clone(),
            self.split_ratio.clone(),
            self.notes.clone(),
        ]
    }
}

/// Rows currently shown: type filter, then search, then sort
pub fn visible_rows(
    rows: &[TransactionRow],
    type_filter: Option<TransactionType>,
    search: &str,
    sort_field: &str,
    ascending: bool,
) -> Vec<TransactionRow> {
    let by_type: Vec<TransactionRow> = rows
        .iter()
        .filter(|r| type_filter.map_or(true, |t| r.transaction_type == t))
        .cloned()
        .collect();
    let mut found = filter_list(by_type, search);
    sort_list(&mut found, sort_field, ascending);
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::export::build_csv;
    use contracts::domain::a001_transaction::TransactionId;
    use contracts::domain::a002_asset::AssetSummary;

    fn tx(date: (i32, u32, u32), symbol: &str, kind: TransactionType, qty: f64, price: f64) -> TransactionRow {
        Transaction {
            id: TransactionId::new_v4(),
            portfolio_id: "main".to_string(),
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            symbol: symbol.to_string(),
            transaction_type: kind,
            quantity: qty,
            price,
            fees: 1.0,
            currency: "USD".to_string(),
            split_ratio: None,
            notes: None,
            asset: Some(AssetSummary {
                symbol: symbol.to_string(),
                name: format!("{} Inc", symbol),
                metadata: None,
            }),
        }
        .into()
    }

    fn rows() -> Vec<TransactionRow> {
        vec![
            tx((2024, 3, 1), "MSFT", TransactionType::Buy, 5.0, 400.0),
            tx((2024, 1, 15), "aapl", TransactionType::Buy, 10.0, 180.0),
            tx((2024, 2, 10), "AAPL", TransactionType::Dividend, 10.0, 0.24),
            tx((2024, 4, 2), "TSLA", TransactionType::Sell, 2.0, 170.0),
        ]
    }

    fn symbols(rows: &[TransactionRow]) -> Vec<&str> {
        rows.iter().map(|r| r.symbol.as_str()).collect()
    }

    #[test]
    fn test_sort_by_date_desc() {
        let visible = visible_rows(&rows(), None, "", "date", false);
        assert_eq!(symbols(&visible), vec!["TSLA", "MSFT", "AAPL", "aapl"]);
    }

    #[test]
    fn test_search_matches_symbol_and_name() {
        let visible = visible_rows(&rows(), None, "aapl", "date", true);
        assert_eq!(symbols(&visible), vec!["aapl", "AAPL"]);

        let visible = visible_rows(&rows(), None, "msft inc", "date", true);
        assert_eq!(symbols(&visible), vec!["MSFT"]);
    }

    #[test]
    fn test_search_matches_type_name() {
        let visible = visible_rows(&rows(), None, "divid", "date", true);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].transaction_type, TransactionType::Dividend);
    }

    #[test]
    fn test_type_filter_sorted_by_total() {
        let visible = visible_rows(&rows(), Some(TransactionType::Buy), "", "total", false);
        assert_eq!(symbols(&visible), vec!["MSFT", "aapl"]);

        let visible = visible_rows(&rows(), Some(TransactionType::Buy), "aap", "date", true);
        assert_eq!(symbols(&visible), vec!["aapl"]);
    }

    #[test]
    fn test_total_includes_fees() {
        let visible = visible_rows(&rows(), Some(TransactionType::Sell), "", "date", true);
        assert_eq!(visible[0].total, 339.0);
    }

    #[test]
    fn test_csv_export_columns() {
        let mut row = tx((2024, 5, 6), "VOO", TransactionType::Split, 3.0, 0.0);
        row.split_ratio = "2:1".to_string();
        row.notes = "broker \"A\", acct 2".to_string();
        let csv = build_csv(&[row]);
        assert_eq!(
            csv,
            "date,symbol,type,quantity,price,fees,currency,split_ratio,notes\n\
             2024-05-06,VOO,split,3,0,1,USD,2:1,\"broker \"\"A\"\", acct 2\"\n"
        );
    }
}
