use web_sys::window;

const ACCESS_TOKEN_KEY: &str = "auth_access_token";
const ACTIVE_PORTFOLIO_KEY: &str = "active_portfolio_id";

pub const DEFAULT_PORTFOLIO_ID: &str = "default";

fn get_local_storage() -> Option<web_sys::Storage> {
    window()?.local_storage().ok()?
}

/// Bearer token written by the login page
pub fn get_access_token() -> Option<String> {
    get_local_storage()?
        .get_item(ACCESS_TOKEN_KEY)
        .ok()?
        .filter(|t| !t.trim().is_empty())
}

/// Portfolio selected in the header; falls back to the default portfolio
pub fn get_active_portfolio_id() -> String {
    get_local_storage()
        .and_then(|s| s.get_item(ACTIVE_PORTFOLIO_KEY).ok().flatten())
        .filter(|id| !id.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_PORTFOLIO_ID.to_string())
}

pub fn save_active_portfolio_id(id: &str) {
    if let Some(storage) = get_local_storage() {
        let _ = storage.set_item(ACTIVE_PORTFOLIO_KEY, id);
    }
}
