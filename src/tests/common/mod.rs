// tests/common/mod.rs
use std::sync::Arc;

pub use serde_json::json;

use crate::config::settings::{LogFormat, LoggingConfig};
use crate::request::token_request::{TokenRequest, GRANT_TYPE_AUTHORIZATION_CODE};
use crate::response::Parameters;
use crate::utils::logging::init_logging;

pub fn init_test_logging() {
    init_logging(&LoggingConfig::new("debug".to_owned(), LogFormat::Compact));
}

pub fn code_request() -> Arc<TokenRequest> {
    let mut request = TokenRequest::new(
        "https://idp.example.com/oauth2/v1/token".to_owned(),
        GRANT_TYPE_AUTHORIZATION_CODE.to_owned(),
        "0oa1example".to_owned(),
    );
    request.authorization_code = Some("SplxlOBeZQQYbYS6WxSbIA".to_owned());
    request.redirect_url = Some("com.example.app:/callback".to_owned());
    request.code_verifier = Some("dBjftJeZ4CVP-mB92K27uhbUJU1p1r_wW1gFWFOEjXk".to_owned());
    request.scope = Some("openid profile offline_access".to_owned());
    Arc::new(request)
}

/// Build `Parameters` from a `json!({...})` object literal.
pub fn params(value: serde_json::Value) -> Parameters {
    match value {
        serde_json::Value::Object(map) => map.into_iter().collect(),
        other => panic!("expected JSON object, got {}", other),
    }
}
