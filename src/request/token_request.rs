use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::helpers::redact::redact_opt;

pub const GRANT_TYPE_AUTHORIZATION_CODE: &str = "authorization_code";
pub const GRANT_TYPE_REFRESH_TOKEN: &str = "refresh_token";

/// The token request a [`TokenResponse`](crate::response::token_response::TokenResponse) answers.
///
/// Held by the response behind an `Arc` and never mutated by it. Encoding the
/// request into a form body and sending it is left to the caller.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRequest {
    pub token_endpoint: String,
    pub grant_type: String,
    pub client_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_secret: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authorization_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code_verifier: Option<String>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub additional_parameters: HashMap<String, String>,
}

impl TokenRequest {
    pub fn new(token_endpoint: String, grant_type: String, client_id: String) -> Self {
        Self {
            token_endpoint,
            grant_type,
            client_id,
            client_secret: None,
            authorization_code: None,
            redirect_url: None,
            scope: None,
            refresh_token: None,
            code_verifier: None,
            additional_parameters: HashMap::new(),
        }
    }
}

impl fmt::Debug for TokenRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut additional: Vec<&String> = self.additional_parameters.keys().collect();
        additional.sort();

        f.debug_struct("TokenRequest")
            .field("token_endpoint", &self.token_endpoint)
            .field("grant_type", &self.grant_type)
            .field("client_id", &self.client_id)
            .field("client_secret", &redact_opt(self.client_secret.as_deref()))
            .field("authorization_code", &redact_opt(self.authorization_code.as_deref()))
            .field("redirect_url", &self.redirect_url)
            .field("scope", &self.scope)
            .field("refresh_token", &redact_opt(self.refresh_token.as_deref()))
            .field("code_verifier", &redact_opt(self.code_verifier.as_deref()))
            .field("additional_parameters", &additional)
            .finish()
    }
}
