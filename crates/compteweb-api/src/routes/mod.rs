//! Route modules for the API server
//!
//! - accounts: Account list page, filter, creation, deletion, JSON API
//! - transactions: Account detail page and transaction manager
//!
//! Each module follows a consistent structure:
//! - mod.rs: Module declaration and exports
//! - api.rs: JSON API and HTMX endpoints
//! - page.rs: HTMX page rendering

pub mod accounts;
pub mod transactions;

use std::collections::HashMap;

/// Decode an `application/x-www-form-urlencoded` body
pub(crate) fn parse_form_body(body: &str) -> HashMap<String, String> {
    let mut params = HashMap::new();
    for pair in body.split('&').filter(|p| !p.is_empty()) {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        let key = decode_component(key);
        if !key.is_empty() {
            params.insert(key, decode_component(value));
        }
    }
    params
}

fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(|s| s.into_owned())
        .unwrap_or(spaced)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_form_body() {
        let params = parse_form_body("solde=100.5&dateCreation=2024-01-15&type=EPARGNE&note=a+b%26c&empty=");
        assert_eq!(params.get("solde").unwrap(), "100.5");
        assert_eq!(params.get("dateCreation").unwrap(), "2024-01-15");
        assert_eq!(params.get("note").unwrap(), "a b&c");
        assert_eq!(params.get("empty").unwrap(), "");
        assert!(parse_form_body("").is_empty());
    }
}
