#![forbid(unsafe_code)]

//! The classification engine.
//!
//! [`classify`] maps a measurement and a breakpoint table to a
//! [`ClassificationState`]. It is pure: no state, no I/O, safe to call from
//! any thread.
//!
//! # Algorithm
//!
//! 1. Orientation: landscape iff `width > height`.
//! 2. For every breakpoint, `greater_than = width > threshold` and
//!    `less_than = width < threshold`. Both are false at equality.
//! 3. Active breakpoint: the first, in ascending order, with
//!    `width <= threshold`. Equality selects that breakpoint, not the next.
//!
//! # Invariants
//!
//! - Exactly one entry of `is` is true, and it names `media_type`.
//! - For a fixed table the active threshold is monotone in width.
//! - Identical inputs produce equal outputs.

use std::collections::BTreeMap;

use respond_core::{Dimensions, Orientation, ValidationError};

use crate::breakpoint::{BreakpointTable, NormalizedTable, Threshold};

/// Result of one classification. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(rename_all = "camelCase")
)]
pub struct ClassificationState {
    breakpoints: BreakpointTable,
    dimensions: Dimensions,
    orientation: Orientation,
    greater_than: BTreeMap<String, bool>,
    less_than: BTreeMap<String, bool>,
    is: BTreeMap<String, bool>,
    media_type: String,
}

impl ClassificationState {
    /// The table used, exactly as supplied.
    pub fn breakpoints(&self) -> &BreakpointTable {
        &self.breakpoints
    }

    /// The measurement used.
    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// Portrait or landscape.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Shorthand for `orientation() == Landscape`.
    pub fn is_landscape(&self) -> bool {
        self.orientation == Orientation::Landscape
    }

    /// Shorthand for `orientation() == Portrait`.
    pub fn is_portrait(&self) -> bool {
        self.orientation == Orientation::Portrait
    }

    /// Name of the active breakpoint.
    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    /// Threshold of the active breakpoint.
    pub fn active_threshold(&self) -> Option<Threshold> {
        self.breakpoints.get(&self.media_type)
    }

    /// Returns true if `name` is the active breakpoint.
    pub fn is(&self, name: &str) -> bool {
        self.is.get(name).copied().unwrap_or(false)
    }

    /// Returns true if the width is strictly greater than `name`'s threshold.
    /// Unknown names are false.
    pub fn greater_than(&self, name: &str) -> bool {
        self.greater_than.get(name).copied().unwrap_or(false)
    }

    /// Returns true if the width is strictly less than `name`'s threshold.
    /// Unknown names are false.
    pub fn less_than(&self, name: &str) -> bool {
        self.less_than.get(name).copied().unwrap_or(false)
    }

    /// Full `is` map, one entry per breakpoint.
    pub fn is_map(&self) -> &BTreeMap<String, bool> {
        &self.is
    }

    /// Full `greater_than` map.
    pub fn greater_than_map(&self) -> &BTreeMap<String, bool> {
        &self.greater_than
    }

    /// Full `less_than` map.
    pub fn less_than_map(&self) -> &BTreeMap<String, bool> {
        &self.less_than
    }
}

/// Validate `table`, then classify `dimensions` against it.
///
/// # Errors
///
/// - [`ValidationError::InvalidDimensions`] for negative or non-finite axes.
/// - Any normalization error from [`BreakpointTable::normalize`].
/// - [`ValidationError::MissingUnboundedBreakpoint`] when the width exceeds
///   every threshold and the table has no sentinel.
pub fn classify(
    dimensions: Dimensions,
    table: &BreakpointTable,
) -> Result<ClassificationState, ValidationError> {
    dimensions.validate()?;
    let normalized = table.normalize()?;
    classify_normalized(dimensions, &normalized)
}

/// Classify against a table that has already been normalized.
///
/// Use this when the same table classifies many measurements.
pub fn classify_normalized(
    dimensions: Dimensions,
    table: &NormalizedTable,
) -> Result<ClassificationState, ValidationError> {
    dimensions.validate()?;
    let width = dimensions.width;

    let mut greater_than = BTreeMap::new();
    let mut less_than = BTreeMap::new();
    let mut is = BTreeMap::new();
    let mut selected: Option<&str> = None;

    for (name, threshold) in table.iter() {
        greater_than.insert(name.to_owned(), threshold.is_exceeded_by(width));
        less_than.insert(name.to_owned(), threshold.exceeds(width));
        let active = selected.is_none() && threshold.covers(width);
        if active {
            selected = Some(name);
        }
        is.insert(name.to_owned(), active);
    }

    let Some(media_type) = selected else {
        respond_core::debug!(width, "no breakpoint covers width");
        return Err(ValidationError::MissingUnboundedBreakpoint { width });
    };

    let orientation = dimensions.orientation();
    respond_core::trace!(
        width,
        height = dimensions.height,
        media_type,
        orientation = orientation.label(),
        "classified viewport"
    );

    Ok(ClassificationState {
        breakpoints: table.source().clone(),
        dimensions,
        orientation,
        greater_than,
        less_than,
        is,
        media_type: media_type.to_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::breakpoint::names::*;
    use respond_core::ValidationErrorKind;

    fn run(width: f64, height: f64) -> ClassificationState {
        classify(
            Dimensions::new(width, height).unwrap(),
            &BreakpointTable::standard(),
        )
        .unwrap()
    }

    fn active_count(state: &ClassificationState) -> usize {
        state.is_map().values().filter(|v| **v).count()
    }

    #[test]
    fn landscape_tablet_is_large() {
        let state = run(800.0, 600.0);
        assert_eq!(state.orientation(), Orientation::Landscape);
        assert_eq!(state.media_type(), LARGE);
        assert!(state.is(LARGE));
        assert_eq!(active_count(&state), 1);

        for name in [EXTRA_SMALL, SMALL, MEDIUM] {
            assert!(state.greater_than(name), "{name}");
            assert!(!state.less_than(name), "{name}");
        }
        for name in [LARGE, EXTRA_LARGE, INFINITY] {
            assert!(!state.greater_than(name), "{name}");
            assert!(state.less_than(name), "{name}");
        }
    }

    #[test]
    fn square_at_extra_large_boundary() {
        let state = run(1300.0, 1300.0);
        assert_eq!(state.orientation(), Orientation::Portrait);
        assert!(state.is(EXTRA_LARGE));
        assert!(state.greater_than(LARGE));
        assert!(!state.greater_than(EXTRA_LARGE));
        assert!(!state.less_than(EXTRA_LARGE));
        assert!(state.less_than(INFINITY));
    }

    #[test]
    fn beyond_every_finite_breakpoint_is_infinity() {
        let state = run(5000.0, 2000.0);
        assert!(state.is_landscape());
        assert_eq!(state.media_type(), INFINITY);
        assert_eq!(state.active_threshold(), Some(Threshold::Unbounded));
        for name in [EXTRA_SMALL, SMALL, MEDIUM, LARGE, EXTRA_LARGE] {
            assert!(state.greater_than(name), "{name}");
            assert!(!state.less_than(name), "{name}");
        }
        assert!(!state.greater_than(INFINITY));
        assert!(state.less_than(INFINITY));
    }

    #[test]
    fn equality_selects_inclusive_boundary() {
        let state = run(320.0, 500.0);
        assert!(state.is_portrait());
        assert!(state.is(EXTRA_SMALL));
        assert!(!state.is(SMALL));
        assert!(!state.greater_than(EXTRA_SMALL));
        assert!(!state.less_than(EXTRA_SMALL));
    }

    #[test]
    fn zero_width_is_smallest() {
        let state = run(0.0, 0.0);
        assert!(state.is(EXTRA_SMALL));
        assert!(state.is_portrait());
    }

    #[test]
    fn missing_sentinel_fails_only_when_uncovered() {
        let table = BreakpointTable::new().with("narrow", 400).with("wide", 900);
        let err = classify(Dimensions::new(5000.0, 100.0).unwrap(), &table).unwrap_err();
        assert_eq!(err.kind(), ValidationErrorKind::MissingUnboundedBreakpoint);

        let state = classify(Dimensions::new(900.0, 100.0).unwrap(), &table).unwrap();
        assert_eq!(state.media_type(), "wide");
    }

    #[test]
    fn ambiguous_table_fails_before_classification() {
        let table = BreakpointTable::standard().with("phablet", 667);
        let err = classify(Dimensions::new(100.0, 100.0).unwrap(), &table).unwrap_err();
        assert_eq!(err.kind(), ValidationErrorKind::AmbiguousThreshold);
    }

    #[test]
    fn invalid_dimensions_rejected() {
        let dims = Dimensions {
            width: -10.0,
            height: 5.0,
        };
        let err = classify(dims, &BreakpointTable::standard()).unwrap_err();
        assert_eq!(err.kind(), ValidationErrorKind::InvalidDimensions);
    }

    #[test]
    fn state_keeps_inputs_verbatim() {
        let table = BreakpointTable::standard();
        let dims = Dimensions::new(640.0, 480.0).unwrap();
        let state = classify(dims, &table).unwrap();
        assert_eq!(state.breakpoints(), &table);
        assert_eq!(state.dimensions(), dims);
        assert_eq!(state.media_type(), SMALL);
    }

    #[test]
    fn unknown_names_are_false() {
        let state = run(800.0, 600.0);
        assert!(!state.is("desktop"));
        assert!(!state.greater_than("desktop"));
        assert!(!state.less_than("desktop"));
    }

    #[test]
    fn normalized_and_direct_agree() {
        let table = BreakpointTable::standard();
        let normalized = table.normalize().unwrap();
        for width in [0.0, 320.0, 321.0, 768.0, 1023.9, 1300.0, 99_999.0] {
            let dims = Dimensions::new(width, 700.0).unwrap();
            assert_eq!(
                classify(dims, &table).unwrap(),
                classify_normalized(dims, &normalized).unwrap(),
                "width {width}"
            );
        }
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serializes_camel_case_shape() {
        let json = serde_json::to_value(run(800.0, 600.0)).unwrap();
        assert_eq!(json["mediaType"], "large");
        assert_eq!(json["orientation"], "landscape");
        assert_eq!(json["is"]["large"], true);
        assert_eq!(json["greaterThan"]["medium"], true);
        assert_eq!(json["lessThan"]["infinity"], true);
        assert_eq!(json["dimensions"]["width"], 800.0);
        assert_eq!(json["breakpoints"]["infinity"], "Infinity");
    }
}
