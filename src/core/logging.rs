//! Tracing setup for the terminal front end

use super::error::{CoreError, CoreResult};
use tracing_subscriber::EnvFilter;

/// Filter used when neither `--log` nor `RUST_LOG` is given
pub const DEFAULT_FILTER: &str = "info";

/// Install the global subscriber
///
/// `directive` (from `--log`) wins over `RUST_LOG`, which wins over
/// [`DEFAULT_FILTER`]. Logs go to stderr so they don't interleave with the
/// board on stdout.
pub fn init_tracing(directive: Option<&str>) -> CoreResult<()> {
    let filter = match directive {
        Some(directive) => EnvFilter::try_new(directive).map_err(|e| CoreError::LoggingInit {
            message: e.to_string(),
        })?,
        None => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| CoreError::LoggingInit {
            message: e.to_string(),
        })
}
