//! Diagnostic tracing on stderr, off unless asked for.
//!
//! Reads `RELEXEC_LOG` (an `EnvFilter` directive). Defaults to `warn`, which keeps normal
//! shebang runs silent. The variable is passed on to the interpreter like any other.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub const ENV_VAR: &str = "RELEXEC_LOG";

pub fn init() {
    let filter = EnvFilter::try_from_env(ENV_VAR).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}
