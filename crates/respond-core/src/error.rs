#![forbid(unsafe_code)]

//! Validation errors raised by table normalization and classification.
//!
//! # Failure Modes
//!
//! | Variant | Raised at | Cause |
//! |---------|-----------|-------|
//! | `InvalidDimensions` | before classification | negative, NaN, or infinite axis |
//! | `EmptyTable` | normalization | no breakpoints at all |
//! | `InvalidThreshold` | normalization | negative, NaN, or infinite finite threshold |
//! | `AmbiguousThreshold` | normalization | two names share one finite threshold |
//! | `MultipleUnboundedBreakpoints` | normalization | more than one sentinel |
//! | `MissingUnboundedBreakpoint` | classification | width exceeds every threshold and no sentinel |
//!
//! None of these are transient. Callers decide whether to keep a previous
//! classification, fall back to a default table, or propagate.

use std::fmt;

/// Discriminant of a [`ValidationError`], for matching without payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationErrorKind {
    /// No sentinel and no finite threshold covers the width.
    MissingUnboundedBreakpoint,
    /// Two names share a finite threshold.
    AmbiguousThreshold,
    /// Negative or non-finite width/height.
    InvalidDimensions,
    /// The table has no entries.
    EmptyTable,
    /// More than one entry carries the sentinel.
    MultipleUnboundedBreakpoints,
    /// A finite threshold is negative or not a number.
    InvalidThreshold,
}

impl ValidationErrorKind {
    /// Returns true for errors caused by the breakpoint table rather than the
    /// measurement.
    #[must_use]
    pub const fn is_table_error(self) -> bool {
        !matches!(self, Self::InvalidDimensions)
    }
}

/// A configuration or input error. Never transient.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// The width exceeds every finite threshold and the table has no
    /// unbounded sentinel to catch it.
    MissingUnboundedBreakpoint {
        /// Width that found no breakpoint.
        width: f64,
    },
    /// Two breakpoint names share the same finite threshold; one of them
    /// could never be active.
    AmbiguousThreshold {
        /// First name (lexicographic).
        first: String,
        /// Second name (lexicographic).
        second: String,
        /// The shared threshold.
        threshold: f64,
    },
    /// Width or height is negative, NaN, or infinite.
    InvalidDimensions {
        /// Offending width.
        width: f64,
        /// Offending height.
        height: f64,
    },
    /// The table has no entries.
    EmptyTable,
    /// Two entries carry the unbounded sentinel.
    MultipleUnboundedBreakpoints {
        /// First name (lexicographic).
        first: String,
        /// Second name (lexicographic).
        second: String,
    },
    /// A finite threshold is negative, NaN, or infinite.
    InvalidThreshold {
        /// Breakpoint name.
        name: String,
        /// Offending value.
        value: f64,
    },
}

impl ValidationError {
    /// Payload-free discriminant.
    #[must_use]
    pub const fn kind(&self) -> ValidationErrorKind {
        match self {
            Self::MissingUnboundedBreakpoint { .. } => {
                ValidationErrorKind::MissingUnboundedBreakpoint
            }
            Self::AmbiguousThreshold { .. } => ValidationErrorKind::AmbiguousThreshold,
            Self::InvalidDimensions { .. } => ValidationErrorKind::InvalidDimensions,
            Self::EmptyTable => ValidationErrorKind::EmptyTable,
            Self::MultipleUnboundedBreakpoints { .. } => {
                ValidationErrorKind::MultipleUnboundedBreakpoints
            }
            Self::InvalidThreshold { .. } => ValidationErrorKind::InvalidThreshold,
        }
    }

    /// Stable error code for programmatic handling and logs.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self.kind() {
            ValidationErrorKind::MissingUnboundedBreakpoint => "missing_unbounded_breakpoint",
            ValidationErrorKind::AmbiguousThreshold => "ambiguous_threshold",
            ValidationErrorKind::InvalidDimensions => "invalid_dimensions",
            ValidationErrorKind::EmptyTable => "empty_table",
            ValidationErrorKind::MultipleUnboundedBreakpoints => "multiple_unbounded_breakpoints",
            ValidationErrorKind::InvalidThreshold => "invalid_threshold",
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingUnboundedBreakpoint { width } => write!(
                f,
                "no breakpoint covers width {width} and the table has no unbounded breakpoint"
            ),
            Self::AmbiguousThreshold {
                first,
                second,
                threshold,
            } => write!(
                f,
                "breakpoints `{first}` and `{second}` share threshold {threshold}"
            ),
            Self::InvalidDimensions { width, height } => write!(
                f,
                "invalid dimensions {width}x{height}: both axes must be finite and non-negative"
            ),
            Self::EmptyTable => f.write_str("breakpoint table is empty"),
            Self::MultipleUnboundedBreakpoints { first, second } => write!(
                f,
                "breakpoints `{first}` and `{second}` are both unbounded"
            ),
            Self::InvalidThreshold { name, value } => write!(
                f,
                "breakpoint `{name}` has invalid threshold {value}: must be finite and non-negative"
            ),
        }
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_stable() {
        assert_eq!(
            ValidationError::MissingUnboundedBreakpoint { width: 5000.0 }.code(),
            "missing_unbounded_breakpoint"
        );
        assert_eq!(ValidationError::EmptyTable.code(), "empty_table");
    }

    #[test]
    fn ambiguous_threshold_names_both_breakpoints() {
        let err = ValidationError::AmbiguousThreshold {
            first: "medium".into(),
            second: "tablet".into(),
            threshold: 768.0,
        };
        let msg = err.to_string();
        assert!(msg.contains("medium"), "{msg}");
        assert!(msg.contains("tablet"), "{msg}");
        assert!(msg.contains("768"), "{msg}");
        assert_eq!(err.kind(), ValidationErrorKind::AmbiguousThreshold);
    }

    #[test]
    fn only_dimension_errors_are_not_table_errors() {
        assert!(!ValidationErrorKind::InvalidDimensions.is_table_error());
        assert!(ValidationErrorKind::MissingUnboundedBreakpoint.is_table_error());
        assert!(ValidationErrorKind::AmbiguousThreshold.is_table_error());
        assert!(ValidationErrorKind::EmptyTable.is_table_error());
    }
}
