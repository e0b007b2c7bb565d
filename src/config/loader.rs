use std::{fs, path::Path, sync::LazyLock};

use anyhow::{Context, Result};
use regex::Regex;
use tracing::{debug, error};

use crate::config::settings::{LoggingConfig, SettingsConfig, SAFETY_MARGIN_SECONDS_DEFAULT};

/// Load settings from a YAML file
pub fn file_to_settings(path: &Path) -> Result<SettingsConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("read settings file {}", path.display()))?;
    parse_settings(&content)
}

/// Parse settings from YAML text, expanding `${VAR}` / `${VAR:default}` first
pub fn parse_settings(content: &str) -> Result<SettingsConfig> {
    let expanded = expand_env_vars(content);
    let mut settings: SettingsConfig = serde_yaml::from_str(&expanded)
        .inspect_err(|e| error!("parse settings error: {}", e))?;

    // Apply defaults
    if settings.logging.is_none() {
        settings.logging = Some(LoggingConfig::default());
    }
    if settings.safety_margin_seconds.is_none() {
        settings.safety_margin_seconds = Some(SAFETY_MARGIN_SECONDS_DEFAULT);
    }
    debug!(
        safety_margin_seconds = ?settings.safety_margin_seconds,
        "settings loaded"
    );

    Ok(settings)
}

static ENV_PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{(\w+)(?::([^\}]+))?\}").expect("env placeholder pattern is valid")
});

fn expand_env_vars(input: &str) -> String {
    ENV_PLACEHOLDER
        .replace_all(input, |caps: &regex::Captures| {
            let var = &caps[1];
            let default = caps.get(2).map(|m| m.as_str()).unwrap_or("");
            std::env::var(var).unwrap_or_else(|_| default.to_string())
        })
        .to_string()
}
