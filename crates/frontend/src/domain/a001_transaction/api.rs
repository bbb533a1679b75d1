use contracts::domain::a001_transaction::Transaction;
use gloo_net::http::Request;

use crate::shared::api_utils::api_base;
use crate::system::auth::storage;

/// Все транзакции портфеля
pub async fn fetch_transactions(portfolio_id: &str) -> Result<Vec<Transaction>, String> {
    let url = format!(
        "{}/api/transactions?portfolio_id={}",
        api_base(),
        urlencoding::encode(portfolio_id)
    );

    let mut request = Request::get(&url).header("Accept", "application/json");
    if let Some(token) = storage::get_access_token() {
        request = request.header("Authorization", &format!("Bearer {}", token));
    }

    let response = request
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(format!("HTTP {}", response.status()));
    }

    response
        .json::<Vec<Transaction>>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}
