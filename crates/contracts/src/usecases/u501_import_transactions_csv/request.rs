use serde::{Deserialize, Serialize};

/// Streaming CSV import endpoint; `portfolio_id` is appended as a query parameter
pub const DEFAULT_IMPORT_PATH: &str = "/api/portfolios/import/csv/stream";

/// Параметры одного запуска импорта
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportRequest {
    pub portfolio_id: String,

    /// Caller-specified endpoint path, used verbatim instead of the default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
}

impl ImportRequest {
    pub fn new(portfolio_id: impl Into<String>) -> Self {
        Self {
            portfolio_id: portfolio_id.into(),
            endpoint: None,
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Path (with query) the file is POSTed to
    pub fn path(&self) -> String {
        match &self.endpoint {
            Some(endpoint) if !endpoint.trim().is_empty() => endpoint.clone(),
            _ => format!(
                "{}?portfolio_id={}",
                DEFAULT_IMPORT_PATH,
                urlencoding::encode(&self.portfolio_id)
            ),
        }
    }
}
