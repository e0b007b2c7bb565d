//! # Token Response Library
//!
//! Value object for the response of an OAuth2 / OpenID Connect token
//! endpoint: typed normative fields, preserved extra fields and a
//! versioned archive encoding.
//!
//! Modules:
//! - `response` — `TokenResponse`, field extraction and archive encoding
//! - `request` — the `TokenRequest` a response answers
//! - `config` — YAML settings (refresh safety margin, logging)
//! - `helpers` — time arithmetic and credential redaction
//! - `utils` — logging initialization

pub mod config;
pub mod helpers;
pub mod request;
pub mod response;
pub mod utils;

#[cfg(test)]
mod tests;

pub use crate::config::settings::SettingsConfig;
pub use crate::request::token_request::TokenRequest;
pub use crate::response::{Parameters, TokenResponse};
