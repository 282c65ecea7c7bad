//! Route modules for the API server
//!
//! - dashboard: Dashboard page, refresh, notice dismissal
//! - transactions: Add-transaction form and JSON endpoints
//! - range: Date filter control
//! - reports: Summary and chart data

pub mod dashboard;
pub mod range;
pub mod reports;
pub mod transactions;

use std::collections::HashMap;

/// Decode an `application/x-www-form-urlencoded` body
pub(crate) fn form_params(body: &str) -> HashMap<String, String> {
    let mut params = HashMap::new();
    for pair in body.split('&').filter(|p| !p.is_empty()) {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        params.insert(decode_component(key), decode_component(value));
    }
    params
}

fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    match urlencoding::decode(&spaced) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => spaced,
    }
}
