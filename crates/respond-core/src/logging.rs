#![forbid(unsafe_code)]

//! Logging shims.
//!
//! With the `tracing` feature the `trace!`, `debug!` and `warn!` macros are
//! the `tracing` ones. Without it they expand to nothing, so library crates
//! can log unconditionally and pay nothing when logging is off.
//!
//! The `tracing-json` feature adds [`init_json_subscriber`], which installs a
//! JSON formatter filtered by the `RESPOND_LOG` environment variable.

#[cfg(feature = "tracing")]
pub use tracing::{debug, trace, warn};

#[cfg(not(feature = "tracing"))]
mod noop_macros {
    /// No-op trace macro when tracing is disabled.
    #[macro_export]
    macro_rules! trace {
        ($($arg:tt)*) => {};
    }

    /// No-op debug macro when tracing is disabled.
    #[macro_export]
    macro_rules! debug {
        ($($arg:tt)*) => {};
    }

    /// No-op warn macro when tracing is disabled.
    #[macro_export]
    macro_rules! warn {
        ($($arg:tt)*) => {};
    }
}

/// Environment variable holding the `EnvFilter` directive.
pub const LOG_ENV_VAR: &str = "RESPOND_LOG";

/// Directive used when [`LOG_ENV_VAR`] is unset or unparsable.
pub const DEFAULT_DIRECTIVE: &str = "info";

/// Error returned when a global subscriber is already installed.
#[cfg(feature = "tracing-json")]
#[derive(Debug)]
pub struct SubscriberInstallError(String);

#[cfg(feature = "tracing-json")]
impl std::fmt::Display for SubscriberInstallError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "failed to install tracing subscriber: {}", self.0)
    }
}

#[cfg(feature = "tracing-json")]
impl std::error::Error for SubscriberInstallError {}

/// Install a global JSON subscriber filtered by `RESPOND_LOG`.
///
/// Never clobbers an existing subscriber: returns an error instead.
#[cfg(feature = "tracing-json")]
pub fn init_json_subscriber() -> Result<(), SubscriberInstallError> {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| SubscriberInstallError(e.to_string()))
}

#[cfg(all(test, feature = "tracing-json"))]
mod tests {
    use super::*;

    #[test]
    fn second_install_fails_instead_of_panicking() {
        let _ = init_json_subscriber();
        assert!(init_json_subscriber().is_err());
    }
}
