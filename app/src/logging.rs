//! Logging setup

use crate::AppConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global `tracing` subscriber.
///
/// `RUST_LOG` takes precedence over the configured filter. Calling this
/// more than once leaves the first subscriber in place.
pub fn init(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));

    let installed = tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(filter)
        .try_init();

    if installed.is_ok() {
        tracing::info!("Logging initialized");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_twice_is_harmless() {
        let config = AppConfig {
            log_filter: "packet_checklist=debug".to_string(),
            ..AppConfig::default()
        };
        init(&config);
        init(&config);
        tracing::debug!("still logging");
    }
}
