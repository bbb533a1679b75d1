//! API utilities for frontend-backend communication
//!
//! The backend always listens on port 3000 of the host the app was served from.

pub const BACKEND_PORT: u16 = 3000;

/// Get the base URL for API requests, e.g. "http://localhost:3000".
///
/// Empty string if window is not available.
pub fn api_base() -> String {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    base_url(&protocol, &hostname)
}

fn base_url(protocol: &str, hostname: &str) -> String {
    format!("{}//{}:{}", protocol, hostname, BACKEND_PORT)
}

/// Build a full API URL from a path ("/api/..."). Absolute URLs pass through unchanged.
pub fn api_url(path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }
    format!("{}{}", api_base(), path)
}
