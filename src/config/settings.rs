use serde::Deserialize;

pub const SAFETY_MARGIN_SECONDS_DEFAULT: u64 = 60;

/// ================================
/// Token response settings
/// ================================
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct SettingsConfig {
    /// seconds before `expires_in` runs out at which a token is due for refresh
    pub safety_margin_seconds: Option<u64>,
    pub logging: Option<LoggingConfig>,
}

/// ================================
/// Logging
/// ================================
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct LoggingConfig {
    pub level: String, // allowed: trace, debug, info, warn, error
    pub format: LogFormat,
}

impl LoggingConfig {
    pub fn new(level: String, format: LogFormat) -> Self {
        Self { level, format }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self::new("info".to_owned(), LogFormat::Compact)
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Compact,
}
