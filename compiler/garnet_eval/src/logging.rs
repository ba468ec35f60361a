//! Tracing subscriber setup for embedders and test binaries.

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Environment variable holding the `EnvFilter` directives.
pub const LOG_ENV: &str = "GARNET_LOG";

/// Install a hierarchical tracing subscriber.
///
/// Only initializes when `GARNET_LOG` is set (e.g.
/// `GARNET_LOG=garnet_eval=debug`); safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{prelude::*, EnvFilter};

        if std::env::var(LOG_ENV).is_ok() {
            let filter = EnvFilter::from_env(LOG_ENV);
            let tree = tracing_tree::HierarchicalLayer::new(2)
                .with_targets(true)
                .with_bracketed_fields(true)
                .with_writer(std::io::stderr);
            // A subscriber installed by the host wins.
            let _ = tracing_subscriber::registry()
                .with(filter)
                .with(tree)
                .try_init();
        }
    });
}
