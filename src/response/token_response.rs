use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use anyhow::{bail, Result};
use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::settings::SettingsConfig;
use crate::helpers::redact::redact_opt;
use crate::helpers::time::{get_token_safety_margin_seconds, now};
use crate::request::token_request::TokenRequest;
use crate::response::fields::{self, expiration_value, string_value};

/// Decoded token endpoint response body, keyed by field name.
pub type Parameters = HashMap<String, Value>;

/// Response to a token request.
///
/// Known OAuth2 / OIDC fields are extracted into typed properties at
/// construction; every other entry is kept untouched in
/// [`additional_parameters`](TokenResponse::additional_parameters).
/// Each input key ends up in exactly one of the two places.
///
/// See RFC 6749 §3.2, §4.1.3 and §5.1.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TokenResponseRepr")]
pub struct TokenResponse {
    request: Arc<TokenRequest>,
    access_token: Option<String>,
    access_token_expiration_date: Option<DateTime<Utc>>,
    token_type: Option<String>,
    /// Encoded JWT. The signature is NOT verified here.
    id_token: Option<String>,
    refresh_token: Option<String>,
    scope: Option<String>,
    additional_parameters: Parameters,
}

/// Wire shape of [`TokenResponse`]; decoding goes through it so the key
/// partition is checked before a value exists.
#[derive(Deserialize)]
struct TokenResponseRepr {
    request: Arc<TokenRequest>,
    access_token: Option<String>,
    access_token_expiration_date: Option<DateTime<Utc>>,
    token_type: Option<String>,
    id_token: Option<String>,
    refresh_token: Option<String>,
    scope: Option<String>,
    #[serde(default)]
    additional_parameters: Parameters,
}

impl TryFrom<TokenResponseRepr> for TokenResponse {
    type Error = anyhow::Error;

    fn try_from(repr: TokenResponseRepr) -> Result<Self> {
        let response = Self {
            request: repr.request,
            access_token: repr.access_token,
            access_token_expiration_date: repr.access_token_expiration_date,
            token_type: repr.token_type,
            id_token: repr.id_token,
            refresh_token: repr.refresh_token,
            scope: repr.scope,
            additional_parameters: repr.additional_parameters,
        };
        for key in fields::NORMATIVE_FIELDS {
            if response.has_normative(key) && response.additional_parameters.contains_key(key) {
                bail!("token response has '{}' both as field and additional parameter", key);
            }
        }
        Ok(response)
    }
}

impl TokenResponse {
    /// Build a response from the decoded parameters returned by the token endpoint.
    pub fn new(request: Arc<TokenRequest>, parameters: Parameters) -> Self {
        Self::new_at(request, parameters, now())
    }

    /// Like [`TokenResponse::new`] with an explicit construction time, which
    /// `expires_in` is counted from.
    pub fn new_at(request: Arc<TokenRequest>, parameters: Parameters, issued_at: DateTime<Utc>) -> Self {
        let mut response = Self {
            request,
            access_token: None,
            access_token_expiration_date: None,
            token_type: None,
            id_token: None,
            refresh_token: None,
            scope: None,
            additional_parameters: HashMap::new(),
        };

        for (key, value) in parameters {
            let accepted = match key.as_str() {
                fields::ACCESS_TOKEN => assign(&mut response.access_token, string_value(&value)),
                fields::EXPIRES_IN => assign(
                    &mut response.access_token_expiration_date,
                    expiration_value(&value, issued_at),
                ),
                fields::TOKEN_TYPE => assign(&mut response.token_type, string_value(&value)),
                fields::ID_TOKEN => assign(&mut response.id_token, string_value(&value)),
                fields::REFRESH_TOKEN => assign(&mut response.refresh_token, string_value(&value)),
                fields::SCOPE => assign(&mut response.scope, string_value(&value)),
                _ => false,
            };

            if !accepted {
                if fields::is_normative(&key) {
                    // keep the raw value so nothing from the server is dropped
                    warn!(field = %key, "token response field has unexpected type, kept as additional parameter");
                }
                response.additional_parameters.insert(key, value);
            }
        }

        debug!(
            grant_type = %response.request.grant_type,
            has_access_token = response.access_token.is_some(),
            has_id_token = response.id_token.is_some(),
            has_refresh_token = response.refresh_token.is_some(),
            expires_at = ?response.access_token_expiration_date,
            additional = response.additional_parameters.len(),
            "token response parsed"
        );

        response
    }

    /// The request which was serviced.
    pub fn request(&self) -> &Arc<TokenRequest> {
        &self.request
    }

    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    /// Approximate expiration of the access token, derived from `expires_in`.
    pub fn access_token_expiration_date(&self) -> Option<DateTime<Utc>> {
        self.access_token_expiration_date
    }

    /// Typically `"Bearer"`.
    pub fn token_type(&self) -> Option<&str> {
        self.token_type.as_deref()
    }

    pub fn id_token(&self) -> Option<&str> {
        self.id_token.as_deref()
    }

    pub fn refresh_token(&self) -> Option<&str> {
        self.refresh_token.as_deref()
    }

    pub fn scope(&self) -> Option<&str> {
        self.scope.as_deref()
    }

    pub fn additional_parameters(&self) -> &Parameters {
        &self.additional_parameters
    }

    pub fn additional_parameter(&self, key: &str) -> Option<&Value> {
        self.additional_parameters.get(key)
    }

    /// Whether the typed field backing a normative key is populated.
    pub(crate) fn has_normative(&self, key: &str) -> bool {
        match key {
            fields::ACCESS_TOKEN => self.access_token.is_some(),
            fields::EXPIRES_IN => self.access_token_expiration_date.is_some(),
            fields::TOKEN_TYPE => self.token_type.is_some(),
            fields::ID_TOKEN => self.id_token.is_some(),
            fields::REFRESH_TOKEN => self.refresh_token.is_some(),
            fields::SCOPE => self.scope.is_some(),
            _ => false,
        }
    }

    /// Unknown expiration is never reported as expired.
    pub fn is_access_token_expired_at(&self, at: DateTime<Utc>) -> bool {
        self.access_token_expiration_date
            .map(|exp| at >= exp)
            .unwrap_or(false)
    }

    /// True once `at` is within `safety_margin_seconds` of the expiration.
    pub fn should_refresh_at(&self, at: DateTime<Utc>, safety_margin_seconds: u64) -> bool {
        let Some(exp) = self.access_token_expiration_date else {
            return false;
        };
        let margin = i64::try_from(safety_margin_seconds)
            .ok()
            .and_then(TimeDelta::try_seconds);
        match margin.and_then(|m| exp.checked_sub_signed(m)) {
            Some(refresh_at) => at >= refresh_at,
            // margin reaches past the representable range
            None => true,
        }
    }

    pub fn should_refresh(&self, settings: &SettingsConfig) -> bool {
        self.should_refresh_at(now(), get_token_safety_margin_seconds(Some(settings)))
    }
}

fn assign<T>(slot: &mut Option<T>, value: Option<T>) -> bool {
    match value {
        Some(v) => {
            *slot = Some(v);
            true
        }
        None => false,
    }
}

impl fmt::Debug for TokenResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut additional: Vec<&String> = self.additional_parameters.keys().collect();
        additional.sort();

        f.debug_struct("TokenResponse")
            .field("request", &self.request)
            .field("access_token", &redact_opt(self.access_token.as_deref()))
            .field("access_token_expiration_date", &self.access_token_expiration_date)
            .field("token_type", &self.token_type)
            .field("id_token", &redact_opt(self.id_token.as_deref()))
            .field("refresh_token", &redact_opt(self.refresh_token.as_deref()))
            .field("scope", &self.scope)
            .field("additional_parameters", &additional)
            .finish()
    }
}
