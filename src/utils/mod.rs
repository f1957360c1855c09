pub mod build_info;

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Default filter directive applied on top of `RUST_LOG`.
pub const DEFAULT_LOG_DIRECTIVE: &str = "household_ledger=info";

/// Initializes the global tracing subscriber with sensible defaults.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let mut filter = EnvFilter::from_default_env();
        if let Ok(directive) = DEFAULT_LOG_DIRECTIVE.parse() {
            filter = filter.add_directive(directive);
        }

        // Another subscriber may already be installed by an embedding binary.
        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    });
}
