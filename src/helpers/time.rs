use chrono::{DateTime, TimeDelta, Utc};

use crate::config::settings::{SettingsConfig, SAFETY_MARGIN_SECONDS_DEFAULT};

pub fn get_token_safety_margin_seconds(settings: Option<&SettingsConfig>) -> u64 {
    settings
        .and_then(|s| s.safety_margin_seconds)
        .unwrap_or(SAFETY_MARGIN_SECONDS_DEFAULT)
}

pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Absolute expiration for a relative `expires_in` given in (possibly fractional) seconds.
///
/// Returns `None` when the offset does not fit into a `DateTime<Utc>`.
pub fn expiration_from_seconds(issued_at: DateTime<Utc>, expires_in: f64) -> Option<DateTime<Utc>> {
    if !expires_in.is_finite() {
        return None;
    }
    let millis = (expires_in * 1000.0).round();
    if millis.abs() >= i64::MAX as f64 {
        return None;
    }
    let delta = TimeDelta::try_milliseconds(millis as i64)?;
    issued_at.checked_add_signed(delta)
}

/// Same as [`expiration_from_seconds`] for whole seconds, without float rounding.
pub fn expiration_from_whole_seconds(issued_at: DateTime<Utc>, expires_in: i64) -> Option<DateTime<Utc>> {
    let delta = TimeDelta::try_seconds(expires_in)?;
    issued_at.checked_add_signed(delta)
}
