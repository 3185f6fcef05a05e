#![forbid(unsafe_code)]

//! Core: viewport dimensions, orientation, and the validation error taxonomy.
//!
//! Everything here is a plain value type. Classification itself lives in
//! `respond-layout`; dispatch and storage live in `respond-runtime`.

pub mod error;
pub mod geometry;
pub mod logging;

pub use error::{ValidationError, ValidationErrorKind};
pub use geometry::{Dimensions, Orientation};

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, trace, warn};
