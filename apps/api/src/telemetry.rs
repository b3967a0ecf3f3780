//! Tracing subscriber setup.
//!
//! ## Log Levels
//! - `RUST_LOG=debug` - Show debug messages everywhere
//! - `RUST_LOG=invoice_db=debug` - Show repository queries
//! - Default: `invoice_api=debug,invoice_db=info,tower_http=info`
//!
//! Development environments (`ENV=dev` or `localhost`) get the pretty
//! formatter; everything else emits one JSON object per line.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_FILTER: &str = "invoice_api=debug,invoice_db=info,tower_http=info";

/// Installs the global subscriber. Call once, before anything logs.
pub fn init_tracing(pretty: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let registry = tracing_subscriber::registry().with(filter);

    if pretty {
        registry.with(fmt::layer().pretty().with_target(true)).init();
    } else {
        registry
            .with(fmt::layer().json().with_current_span(true))
            .init();
    }
}
