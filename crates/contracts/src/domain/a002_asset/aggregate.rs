use serde::{Deserialize, Serialize};

/// Краткое описание актива, встроенное в транзакции и элементы списка наблюдения
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetSummary {
    pub symbol: String,
    #[serde(default)]
    pub name: String,
    /// Only the `metadata` key is accepted; `meta_data` is not part of the contract.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<AssetMetadata>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssetMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}
