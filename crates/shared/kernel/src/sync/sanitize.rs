//! Coercion of raw local input. Values reaching the store are always sanitized.

use crate::error::SyncError;
use revive_domain::constants::HOTBAR_KEYS;

/// Strict number parse for text fields.
pub fn parse_number(text: &str) -> Result<f64, SyncError> {
    let value: f64 = text.trim().replace(',', ".").parse().map_err(|_| SyncError::InvalidInput {
        message: format!("not a number: '{text}'").into(),
        context: None,
    })?;
    if value.is_finite() { Ok(value) } else { Err(SyncError::invalid_input("number out of range")) }
}

/// Lenient seconds: garbage and negatives become `0`.
pub fn seconds(text: &str) -> f64 {
    parse_number(text).map_or(0.0, non_negative)
}

pub fn non_negative(value: f64) -> f64 {
    if value.is_finite() { value.max(0.0) } else { 0.0 }
}

/// A hotbar key, or `None` for anything outside `1..9, 0`.
pub fn hotbar_key(key: &str) -> Option<String> {
    let key = key.trim();
    HOTBAR_KEYS.contains(&key).then(|| key.to_owned())
}

/// Trimmed identifier; empty stays empty.
pub fn ident(text: &str) -> String {
    text.trim().to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_are_coerced_not_forwarded() {
        assert_eq!(parse_number(" 1,5 ").unwrap(), 1.5);
        assert!(matches!(parse_number("abc"), Err(SyncError::InvalidInput { .. })));
        assert!(parse_number("inf").is_err());
        assert_eq!(seconds("-3"), 0.0);
        assert_eq!(seconds("x"), 0.0);
        assert_eq!(seconds("2.25"), 2.25);
    }

    #[test]
    fn hotbar_keys_only() {
        assert_eq!(hotbar_key(" 7 ").as_deref(), Some("7"));
        assert_eq!(hotbar_key("F1"), None);
        assert_eq!(hotbar_key(""), None);
    }
}
