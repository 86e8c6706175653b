//! Logging setup for spidey.
//!
//! Logs go to stderr so that stdout stays free for the search box output.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize logging for spidey.
///
/// Uses `RUST_LOG` environment variable for filtering.
/// Default level: info
pub fn init() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive("info")));

    install(filter);
}

/// Initialize logging with a custom log level.
pub fn init_with_level(level: &str) {
    install(EnvFilter::new(default_directive(level)));
}

fn default_directive(level: &str) -> String {
    format!("spidey={level},spidey_state={level},spidey_core={level}")
}

fn install(filter: EnvFilter) {
    // `try_init` so tests and embedders that already set a subscriber are left alone.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_directive_covers_every_crate() {
        let directive = default_directive("debug");
        assert!(directive.contains("spidey=debug"));
        assert!(directive.contains("spidey_state=debug"));
        assert!(directive.contains("spidey_core=debug"));
    }

    #[test]
    fn init_twice_does_not_panic() {
        init_with_level("warn");
        init_with_level("info");
    }
}
