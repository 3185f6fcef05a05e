#![forbid(unsafe_code)]

//! Responsive classification public facade.
//!
//! Re-exports the common types from the internal crates and offers a small
//! prelude.
//!
//! ```
//! use respond::prelude::*;
//!
//! let store = ResponsiveStore::default();
//! store.dispatch(&ClassifyCommand::new(800.0, 600.0))?;
//! assert!(store.with_view(|v| v.is("large")));
//! # Ok::<(), respond::Error>(())
//! ```

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use respond_core::{Dimensions, Orientation, ValidationError, ValidationErrorKind};

// --- Layout re-exports -----------------------------------------------------

pub use respond_layout::{
    BreakpointTable, ClassificationState, NormalizedTable, Threshold, classify,
    classify_normalized, names,
};

// --- Runtime re-exports ----------------------------------------------------

#[cfg(feature = "runtime")]
pub use respond_runtime::{
    AppState, ClassifyCommand, ConfigError, DispatchOutcome, ErrorPolicy, RESPONSIVE_KEY,
    ResponsiveConfig, ResponsiveStore, ResponsiveView, StoreStats, Ticket, get_responsive,
    get_responsive_value, reduce,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type.
#[derive(Debug)]
pub enum Error {
    /// Invalid dimensions or breakpoint table.
    Validation(ValidationError),
    /// Configuration could not be parsed.
    #[cfg(feature = "runtime")]
    Config(ConfigError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            #[cfg(feature = "runtime")]
            Self::Config(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            #[cfg(feature = "runtime")]
            Self::Config(err) => Some(err),
        }
    }
}

impl From<ValidationError> for Error {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err)
    }
}

#[cfg(feature = "runtime")]
impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

/// Standard result type for respond APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        BreakpointTable, ClassificationState, Dimensions, Error, Orientation, Result, Threshold,
        ValidationError, classify,
    };

    #[cfg(feature = "runtime")]
    pub use crate::{ClassifyCommand, ResponsiveConfig, ResponsiveStore, get_responsive};

    pub use crate::{core, layout};
    #[cfg(feature = "runtime")]
    pub use crate::runtime;
}

pub use respond_core as core;
pub use respond_layout as layout;
#[cfg(feature = "runtime")]
pub use respond_runtime as runtime;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_converts() {
        let err: Error = ValidationError::EmptyTable.into();
        assert!(matches!(err, Error::Validation(ValidationError::EmptyTable)));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[cfg(feature = "runtime")]
    #[test]
    fn config_error_converts() {
        let err: Error = ResponsiveConfig::from_json_str("[]").unwrap_err().into();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains("invalid config document"));
    }

    #[test]
    fn prelude_classifies() {
        use crate::prelude::*;

        let state = classify(
            Dimensions::new(320.0, 500.0).unwrap(),
            &BreakpointTable::standard(),
        )
        .unwrap();
        assert!(state.is(names::EXTRA_SMALL));
    }
}
