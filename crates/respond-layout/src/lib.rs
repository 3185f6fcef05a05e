#![forbid(unsafe_code)]

//! Breakpoint tables and responsive classification.
//!
//! - [`BreakpointTable`] - named thresholds supplied by the host
//! - [`NormalizedTable`] - validated, ascending view of a table
//! - [`classify`] - measurement + table => [`ClassificationState`]
//!
//! ```
//! use respond_layout::{BreakpointTable, Dimensions, classify};
//!
//! let dims = Dimensions::new(800.0, 600.0)?;
//! let state = classify(dims, &BreakpointTable::standard())?;
//! assert_eq!(state.media_type(), "large");
//! assert!(state.greater_than("medium"));
//! assert!(state.is_landscape());
//! # Ok::<(), respond_layout::ValidationError>(())
//! ```

pub mod breakpoint;
pub mod classify;

pub use breakpoint::{BreakpointTable, NormalizedTable, Threshold, names};
pub use classify::{ClassificationState, classify, classify_normalized};
pub use respond_core::{Dimensions, Orientation, ValidationError, ValidationErrorKind};
