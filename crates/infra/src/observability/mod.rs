//! Tracing subscriber setup for hosts embedding the client
//!
//! The client only emits `tracing` events. Hosts that do not install their
//! own subscriber can call [`init_tracing`] once at startup.

use responsys_domain::{ResponsysError, Result};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "info,responsys_core=debug,responsys_infra=debug";

/// Output format of the installed subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Pretty,
    /// One JSON object per event
    Json,
}

/// Install a global subscriber honouring `RUST_LOG`.
///
/// # Errors
/// Returns `ResponsysError::Config` if `RUST_LOG` cannot be parsed or a
/// global subscriber is already installed.
pub fn init_tracing(format: LogFormat) -> Result<()> {
    let filter = match std::env::var(EnvFilter::DEFAULT_ENV) {
        Ok(directives) => EnvFilter::try_new(directives),
        Err(_) => EnvFilter::try_new(DEFAULT_FILTER),
    }
    .map_err(|e| ResponsysError::Config(format!("Invalid RUST_LOG directives: {e}")))?;

    let registry = tracing_subscriber::registry().with(filter);
    let installed = match format {
        LogFormat::Pretty => registry.with(fmt::layer().with_target(true)).try_init(),
        LogFormat::Json => {
            registry.with(fmt::layer().json().with_current_span(true)).try_init()
        }
    };

    installed.map_err(|e| ResponsysError::Config(format!("Failed to install subscriber: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_install_is_rejected() {
        let first = init_tracing(LogFormat::Json);
        let second = init_tracing(LogFormat::Pretty);

        assert!(first.is_ok() || second.is_err());
        assert!(matches!(second, Err(ResponsysError::Config(_))));
    }
}
