use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::settings::{LogFormat, LoggingConfig, SettingsConfig};

/// Initialize tracing from loaded settings, falling back to `info` / compact.
pub fn init_from_settings(settings: &SettingsConfig) {
    let logging_config = settings.logging.clone().unwrap_or_default();
    init_logging(&logging_config);
}

/// `RUST_LOG` wins over the configured level when it is set and non-empty.
fn filter_directive(cfg: &LoggingConfig, rust_log: Option<String>) -> String {
    rust_log
        .filter(|directive| !directive.trim().is_empty())
        .unwrap_or_else(|| cfg.level.clone())
}

/// Initialize tracing with the desired config.
///
/// A subscriber that is already installed is left in place.
pub fn init_logging(cfg: &LoggingConfig) {
    let directive = filter_directive(cfg, std::env::var(EnvFilter::DEFAULT_ENV).ok());
    let env_filter = EnvFilter::try_new(&directive)
        .unwrap_or_else(|_| EnvFilter::new("info"));

    // Base layer: filter + writer
    let registry = tracing_subscriber::registry().with(env_filter);

    match cfg.format {
        LogFormat::Json => {
            let layer = fmt::layer()
                .json()
                .with_timer(UtcTime::rfc_3339())
                .flatten_event(true)
                .with_ansi(false);

            let _ = registry.with(layer).try_init();
        }
        LogFormat::Compact => {
            let layer = fmt::layer()
                .compact()
                .with_timer(UtcTime::rfc_3339())
                .with_ansi(true);

            let _ = registry.with(layer).try_init();
        }
    };
}

#[cfg(test)]
mod tests {
    use super::filter_directive;
    use crate::config::settings::{LogFormat, LoggingConfig};

    #[test]
    fn rust_log_overrides_configured_level() {
        let cfg = LoggingConfig::new("warn".to_owned(), LogFormat::Json);

        assert_eq!(filter_directive(&cfg, None), "warn");
        assert_eq!(filter_directive(&cfg, Some("  ".to_owned())), "warn");
        assert_eq!(
            filter_directive(&cfg, Some("token_response=trace".to_owned())),
            "token_response=trace"
        );
    }
}
