#![forbid(unsafe_code)]

//! Viewport measurements.

use std::fmt;

use crate::error::ValidationError;

/// One viewport measurement.
///
/// Both axes are non-negative finite reals. Construct through
/// [`Dimensions::new`] to have that checked; the fields are public so hosts
/// can pattern-match, and the classifier re-validates before use.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dimensions {
    /// Viewport width.
    pub width: f64,
    /// Viewport height.
    pub height: f64,
}

impl Dimensions {
    /// Create validated dimensions.
    ///
    /// Fails with [`ValidationError::InvalidDimensions`] when either axis is
    /// negative, NaN, or infinite.
    pub fn new(width: f64, height: f64) -> Result<Self, ValidationError> {
        let dims = Self { width, height };
        dims.validate()?;
        Ok(dims)
    }

    /// Check the non-negative finite invariant.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if is_valid_axis(self.width) && is_valid_axis(self.height) {
            Ok(())
        } else {
            Err(ValidationError::InvalidDimensions {
                width: self.width,
                height: self.height,
            })
        }
    }

    /// Orientation of this measurement. Ties resolve to portrait.
    #[inline]
    pub fn orientation(&self) -> Orientation {
        Orientation::of(self.width, self.height)
    }
}

#[inline]
fn is_valid_axis(v: f64) -> bool {
    v.is_finite() && v >= 0.0
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Screen orientation derived from width and height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Orientation {
    /// Width does not exceed height.
    Portrait,
    /// Width strictly exceeds height.
    Landscape,
}

impl Orientation {
    /// `Landscape` iff `width > height`.
    #[inline]
    pub fn of(width: f64, height: f64) -> Self {
        if width > height {
            Self::Landscape
        } else {
            Self::Portrait
        }
    }

    /// Lowercase label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Portrait => "portrait",
            Self::Landscape => "landscape",
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
