//! Tracing setup

use tracing_subscriber::EnvFilter;

use crate::config::Config;

/// Initialize JSON tracing output filtered by the configured log level
///
/// Invalid filter directives fall back to `info`. Returns `false` when a
/// global subscriber was already installed and this call changed nothing.
pub fn init_tracing(config: &Config) -> bool {
    let log_level = config.service.log_level.clone();

    let installed = tracing_subscriber::fmt()
        .json()
        .with_env_filter(
            EnvFilter::try_new(&log_level).unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .try_init()
        .is_ok();

    if installed {
        tracing::info!("Tracing initialized for service: {}", config.service.name);
    } else {
        tracing::debug!("Tracing subscriber already installed; keeping it");
    }

    installed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_tracing_twice() {
        let config = Config::default();
        init_tracing(&config);
        // Whatever the first call did, a subscriber is now in place
        assert!(!init_tracing(&config));
    }
}
