//! Ordered logo sources for an asset.
//!
//! The image element walks the list on every load error and falls back to an initials
//! badge when nothing is left.

use contracts::domain::a002_asset::AssetMetadata;

const FAVICON_SERVICE: &str = "https://www.google.com/s2/favicons?sz=64&domain=";

/// Candidate URLs, best first, without duplicates.
///
/// `api_base` is prefixed to the backend logo endpoint, which is always last.
pub fn logo_sources(symbol: &str, metadata: Option<&AssetMetadata>, api_base: &str) -> Vec<String> {
    let mut sources: Vec<String> = Vec::new();

    if let Some(meta) = metadata {
        if let Some(url) = meta.logo_url.as_deref().map(str::trim).filter(|u| !u.is_empty()) {
            sources.push(url.to_string());
        }
        if let Some(host) = meta.website.as_deref().and_then(website_host) {
            sources.push(format!("{}{}", FAVICON_SERVICE, host));
        }
    }

    let symbol = symbol.trim();
    if !symbol.is_empty() {
        sources.push(format!(
            "{}/api/assets/{}/logo",
            api_base,
            urlencoding::encode(symbol)
        ));
    }

    let mut seen = std::collections::HashSet::new();
    sources.retain(|s| seen.insert(s.clone()));
    sources
}

/// "https://www.apple.com/investor" -> "www.apple.com"
pub fn website_host(website: &str) -> Option<String> {
    let trimmed = website.trim();
    let without_scheme = trimmed
        .split_once("://")
        .map(|(_, rest)| rest)
        .unwrap_or(trimmed);
    let host = without_scheme
        .split(['/', '?', '#'])
        .next()
        .unwrap_or_default()
        .rsplit('@')
        .next()
        .unwrap_or_default()
        .split(':')
        .next()
        .unwrap_or_default()
        .to_lowercase();

    if host.is_empty() || !host.contains('.') {
        None
    } else {
        Some(host)
    }
}

/// Badge text when no image loads: first two alphanumerics of the symbol, upper-cased
pub fn initials(symbol: &str) -> String {
    let text: String = symbol
        .chars()
        .filter(|c| c.is_alphanumeric())
        .take(2)
        .collect::<String>()
        .to_uppercase();
    if text.is_empty() {
        "?".to_string()
    } else {
        text
    }
}
