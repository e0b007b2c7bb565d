//! Normative token endpoint response fields and their value conversions.
//!
//! See RFC 6749 §5.1 and OpenID Connect Core §3.1.3.3.

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::helpers::time::{expiration_from_seconds, expiration_from_whole_seconds};

pub const ACCESS_TOKEN: &str = "access_token";
pub const EXPIRES_IN: &str = "expires_in";
pub const TOKEN_TYPE: &str = "token_type";
pub const ID_TOKEN: &str = "id_token";
pub const REFRESH_TOKEN: &str = "refresh_token";
pub const SCOPE: &str = "scope";

pub const NORMATIVE_FIELDS: [&str; 6] = [
    ACCESS_TOKEN,
    EXPIRES_IN,
    TOKEN_TYPE,
    ID_TOKEN,
    REFRESH_TOKEN,
    SCOPE,
];

pub fn is_normative(key: &str) -> bool {
    NORMATIVE_FIELDS.contains(&key)
}

/// String-typed fields only accept JSON strings.
pub fn string_value(value: &Value) -> Option<String> {
    value.as_str().map(str::to_owned)
}

/// Convert a relative `expires_in` into an absolute expiration.
///
/// Integers, floats and decimal strings (`"3600"`) are accepted; everything
/// else, or an offset outside the representable range, yields `None`.
pub fn expiration_value(value: &Value, issued_at: DateTime<Utc>) -> Option<DateTime<Utc>> {
    match value {
        Value::Number(n) => match n.as_i64() {
            Some(secs) => expiration_from_whole_seconds(issued_at, secs),
            None => expiration_from_seconds(issued_at, n.as_f64()?),
        },
        Value::String(s) => {
            let s = s.trim();
            match s.parse::<i64>() {
                Ok(secs) => expiration_from_whole_seconds(issued_at, secs),
                Err(_) => expiration_from_seconds(issued_at, s.parse::<f64>().ok()?),
            }
        }
        _ => None,
    }
}
