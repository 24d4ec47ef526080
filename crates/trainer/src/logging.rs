//! Tracing subscriber setup shared by the binaries.

use tracing::subscriber::SetGlobalDefaultError;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Install a stderr subscriber. `verbose` forces DEBUG, otherwise the level
/// comes from `RUST_LOG` and falls back to INFO.
pub fn init_logging(verbose: bool) -> Result<(), SetGlobalDefaultError> {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
}
