#![forbid(unsafe_code)]

//! Breakpoint thresholds and tables.
//!
//! A [`BreakpointTable`] maps names to [`Threshold`]s. Before classification
//! it is normalized into a [`NormalizedTable`]: validated and sorted ascending,
//! with the unbounded sentinel last.
//!
//! # Invariants (after normalization)
//!
//! - The table is non-empty.
//! - Every finite threshold is finite and `>= 0`.
//! - No two finite thresholds are equal.
//! - At most one entry is [`Threshold::Unbounded`], and it sorts last.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::collections::btree_map;
use std::fmt;

use respond_core::ValidationError;

/// Names of the entries in [`BreakpointTable::standard`].
pub mod names {
    /// Up to 320.
    pub const EXTRA_SMALL: &str = "extraSmall";
    /// Up to 667 (portrait height of a small phone).
    pub const SMALL: &str = "small";
    /// Up to 768 (average tablet width).
    pub const MEDIUM: &str = "medium";
    /// Up to 1024 (average tablet height).
    pub const LARGE: &str = "large";
    /// Up to 1300.
    pub const EXTRA_LARGE: &str = "extraLarge";
    /// Anything wider than every other breakpoint.
    pub const INFINITY: &str = "infinity";
}

/// Upper bound of a breakpoint.
///
/// A breakpoint is active for widths up to and including its threshold.
/// `Unbounded` compares greater than every finite value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Threshold {
    /// A finite, non-negative bound.
    Finite(f64),
    /// Catch-all for widths beyond every finite breakpoint.
    Unbounded,
}

impl Threshold {
    /// Total order: finite values by `f64::total_cmp`, `Unbounded` last.
    pub fn total_cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Finite(a), Self::Finite(b)) => a.total_cmp(b),
            (Self::Finite(_), Self::Unbounded) => Ordering::Less,
            (Self::Unbounded, Self::Finite(_)) => Ordering::Greater,
            (Self::Unbounded, Self::Unbounded) => Ordering::Equal,
        }
    }

    /// `width <= threshold`: the breakpoint can hold this width.
    #[inline]
    pub fn covers(self, width: f64) -> bool {
        match self {
            Self::Finite(t) => width <= t,
            Self::Unbounded => true,
        }
    }

    /// `width > threshold`.
    #[inline]
    pub fn is_exceeded_by(self, width: f64) -> bool {
        match self {
            Self::Finite(t) => width > t,
            Self::Unbounded => false,
        }
    }

    /// `width < threshold`.
    #[inline]
    pub fn exceeds(self, width: f64) -> bool {
        match self {
            Self::Finite(t) => width < t,
            Self::Unbounded => true,
        }
    }

    /// The bound, if finite.
    #[must_use]
    pub const fn as_finite(self) -> Option<f64> {
        match self {
            Self::Finite(t) => Some(t),
            Self::Unbounded => None,
        }
    }

    /// Returns true for the sentinel.
    #[must_use]
    pub const fn is_unbounded(self) -> bool {
        matches!(self, Self::Unbounded)
    }

    fn is_valid(self) -> bool {
        match self {
            Self::Finite(t) => t.is_finite() && t >= 0.0,
            Self::Unbounded => true,
        }
    }
}

impl From<f64> for Threshold {
    /// `f64::INFINITY` maps to the sentinel; everything else is finite.
    fn from(value: f64) -> Self {
        if value == f64::INFINITY {
            Self::Unbounded
        } else {
            Self::Finite(value)
        }
    }
}

impl From<u32> for Threshold {
    fn from(value: u32) -> Self {
        Self::Finite(f64::from(value))
    }
}

impl fmt::Display for Threshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Finite(t) => write!(f, "{t}"),
            Self::Unbounded => f.write_str("Infinity"),
        }
    }
}

/// Named breakpoint thresholds, as supplied by a host.
///
/// Names are unique by construction; inserting an existing name replaces its
/// threshold. Nothing is validated until [`BreakpointTable::normalize`].
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct BreakpointTable {
    entries: BTreeMap<String, Threshold>,
}

impl BreakpointTable {
    /// An empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The default table: extraSmall 320, small 667, medium 768, large 1024,
    /// extraLarge 1300, infinity unbounded.
    #[must_use]
    pub fn standard() -> Self {
        Self::new()
            .with(names::EXTRA_SMALL, 320)
            .with(names::SMALL, 667)
            .with(names::MEDIUM, 768)
            .with(names::LARGE, 1024)
            .with(names::EXTRA_LARGE, 1300)
            .with(names::INFINITY, Threshold::Unbounded)
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, threshold: impl Into<Threshold>) -> Self {
        self.insert(name, threshold);
        self
    }

    /// Insert or replace a breakpoint, returning the previous threshold.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        threshold: impl Into<Threshold>,
    ) -> Option<Threshold> {
        self.entries.insert(name.into(), threshold.into())
    }

    /// Threshold for `name`.
    pub fn get(&self, name: &str) -> Option<Threshold> {
        self.entries.get(name).copied()
    }

    /// Returns true if `name` is a breakpoint in this table.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Number of breakpoints.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the table has no breakpoints.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in name order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, Threshold> {
        self.entries.iter()
    }

    /// Validate and sort ascending by threshold.
    pub fn normalize(&self) -> Result<NormalizedTable, ValidationError> {
        NormalizedTable::new(self.clone())
    }
}

impl<K: Into<String>, T: Into<Threshold>> FromIterator<(K, T)> for BreakpointTable {
    fn from_iter<I: IntoIterator<Item = (K, T)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (name, threshold) in iter {
            table.insert(name, threshold);
        }
        table
    }
}

impl<'a> IntoIterator for &'a BreakpointTable {
    type Item = (&'a String, &'a Threshold);
    type IntoIter = btree_map::Iter<'a, String, Threshold>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A validated table, sorted ascending by threshold.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedTable {
    source: BreakpointTable,
    ordered: Vec<(String, Threshold)>,
}

impl NormalizedTable {
    fn new(source: BreakpointTable) -> Result<Self, ValidationError> {
        if source.is_empty() {
            return Err(ValidationError::EmptyTable);
        }

        if let Some((name, threshold)) = source.iter().find(|(_, t)| !t.is_valid()) {
            return Err(ValidationError::InvalidThreshold {
                name: name.clone(),
                value: threshold.as_finite().unwrap_or(f64::NAN),
            });
        }

        let mut ordered: Vec<(String, Threshold)> = source
            .iter()
            .map(|(name, threshold)| (name.clone(), *threshold))
            .collect();
        // Stable sort: equal thresholds stay in name order.
        ordered.sort_by(|a, b| a.1.total_cmp(&b.1));

        for pair in ordered.windows(2) {
            let (first, a) = &pair[0];
            let (second, b) = &pair[1];
            match (a, b) {
                (Threshold::Unbounded, Threshold::Unbounded) => {
                    return Err(ValidationError::MultipleUnboundedBreakpoints {
                        first: first.clone(),
                        second: second.clone(),
                    });
                }
                (Threshold::Finite(x), Threshold::Finite(y)) if x == y => {
                    return Err(ValidationError::AmbiguousThreshold {
                        first: first.clone(),
                        second: second.clone(),
                        threshold: *x,
                    });
                }
                _ => {}
            }
        }

        Ok(Self { source, ordered })
    }

    /// The table this was built from.
    pub fn source(&self) -> &BreakpointTable {
        &self.source
    }

    /// Entries ascending by threshold.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Threshold)> + '_ {
        self.ordered.iter().map(|(name, t)| (name.as_str(), *t))
    }

    /// Number of breakpoints.
    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    /// Always false; normalization rejects empty tables.
    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    /// Returns true if the table carries the unbounded sentinel.
    pub fn has_unbounded(&self) -> bool {
        self.ordered
            .last()
            .is_some_and(|(_, t)| t.is_unbounded())
    }

    /// The first breakpoint, in ascending order, that covers `width`.
    pub fn select(&self, width: f64) -> Option<(&str, Threshold)> {
        self.iter().find(|(_, t)| t.covers(width))
    }
}

#[cfg(feature = "serde")]
mod serde_impls {
    use std::fmt;

    use serde::de::{self, Visitor};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::Threshold;

    const UNBOUNDED_LABELS: [&str; 4] = ["Infinity", "infinity", "unbounded", "inf"];

    impl Serialize for Threshold {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            match self {
                Self::Finite(t) => serializer.serialize_f64(*t),
                Self::Unbounded => serializer.serialize_str("Infinity"),
            }
        }
    }

    struct ThresholdVisitor;

    impl<'de> Visitor<'de> for ThresholdVisitor {
        type Value = Threshold;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a number, null, or \"Infinity\"")
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<Threshold, E> {
            Ok(Threshold::from(v))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Threshold, E> {
            Ok(Threshold::Finite(v as f64))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Threshold, E> {
            Ok(Threshold::Finite(v as f64))
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Threshold, E> {
            if UNBOUNDED_LABELS.contains(&v) {
                Ok(Threshold::Unbounded)
            } else {
                Err(E::invalid_value(de::Unexpected::Str(v), &self))
            }
        }

        fn visit_unit<E: de::Error>(self) -> Result<Threshold, E> {
            Ok(Threshold::Unbounded)
        }

        fn visit_none<E: de::Error>(self) -> Result<Threshold, E> {
            Ok(Threshold::Unbounded)
        }
    }

    impl<'de> Deserialize<'de> for Threshold {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            deserializer.deserialize_any(ThresholdVisitor)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use respond_core::ValidationErrorKind;

    #[test]
    fn standard_table_normalizes_ascending() {
        let normalized = BreakpointTable::standard().normalize().unwrap();
        let order: Vec<&str> = normalized.iter().map(|(name, _)| name).collect();
        assert_eq!(
            order,
            [
                names::EXTRA_SMALL,
                names::SMALL,
                names::MEDIUM,
                names::LARGE,
                names::EXTRA_LARGE,
                names::INFINITY,
            ]
        );
        assert!(normalized.has_unbounded());
        assert_eq!(normalized.source(), &BreakpointTable::standard());
    }

    #[test]
    fn unbounded_sorts_after_everything() {
        assert_eq!(
            Threshold::Unbounded.total_cmp(&Threshold::Finite(f64::MAX)),
            Ordering::Greater
        );
        assert_eq!(
            Threshold::Finite(1.0).total_cmp(&Threshold::Finite(2.0)),
            Ordering::Less
        );
    }

    #[test]
    fn infinity_float_becomes_sentinel() {
        assert_eq!(Threshold::from(f64::INFINITY), Threshold::Unbounded);
        assert_eq!(Threshold::from(320.0), Threshold::Finite(320.0));
    }

    #[test]
    fn comparisons_at_boundary() {
        let t = Threshold::Finite(320.0);
        assert!(t.covers(320.0));
        assert!(!t.is_exceeded_by(320.0));
        assert!(!t.exceeds(320.0));
        assert!(t.is_exceeded_by(320.5));
        assert!(t.exceeds(319.5));

        let u = Threshold::Unbounded;
        assert!(u.covers(1.0e12));
        assert!(!u.is_exceeded_by(1.0e12));
        assert!(u.exceeds(1.0e12));
    }

    #[test]
    fn empty_table_rejected() {
        let err = BreakpointTable::new().normalize().unwrap_err();
        assert_eq!(err, ValidationError::EmptyTable);
    }

    #[test]
    fn duplicate_finite_thresholds_rejected_naming_both() {
        let table = BreakpointTable::standard().with("tablet", 768);
        let err = table.normalize().unwrap_err();
        assert_eq!(
            err,
            ValidationError::AmbiguousThreshold {
                first: names::MEDIUM.into(),
                second: "tablet".into(),
                threshold: 768.0,
            }
        );
    }

    #[test]
    fn two_sentinels_rejected() {
        let table = BreakpointTable::standard().with("huge", Threshold::Unbounded);
        let err = table.normalize().unwrap_err();
        assert_eq!(err.kind(), ValidationErrorKind::MultipleUnboundedBreakpoints);
    }

    #[test]
    fn negative_or_nan_threshold_rejected() {
        for bad in [-1.0, f64::NAN, f64::NEG_INFINITY] {
            let table = BreakpointTable::new()
                .with("bad", Threshold::Finite(bad))
                .with("rest", Threshold::Unbounded);
            let err = table.normalize().unwrap_err();
            assert_eq!(err.kind(), ValidationErrorKind::InvalidThreshold, "{bad}");
        }
    }

    #[test]
    fn table_without_sentinel_normalizes() {
        let normalized = BreakpointTable::new()
            .with("narrow", 400)
            .with("wide", 900)
            .normalize()
            .unwrap();
        assert!(!normalized.has_unbounded());
        assert_eq!(normalized.select(900.0).map(|(n, _)| n), Some("wide"));
        assert_eq!(normalized.select(901.0), None);
    }

    #[test]
    fn insert_replaces_existing_name() {
        let mut table = BreakpointTable::standard();
        let previous = table.insert(names::SMALL, 600);
        assert_eq!(previous, Some(Threshold::Finite(667.0)));
        assert_eq!(table.get(names::SMALL), Some(Threshold::Finite(600.0)));
        assert_eq!(table.len(), 6);
    }

    #[test]
    fn collects_from_pairs() {
        let table: BreakpointTable = [("a", 10.0), ("b", f64::INFINITY)].into_iter().collect();
        assert_eq!(table.get("b"), Some(Threshold::Unbounded));
        assert!(table.contains("a"));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn threshold_json_forms() {
        let table: BreakpointTable =
            serde_json::from_str(r#"{"a": 10, "b": 20.5, "c": "Infinity"}"#).unwrap();
        assert_eq!(table.get("a"), Some(Threshold::Finite(10.0)));
        assert_eq!(table.get("c"), Some(Threshold::Unbounded));

        let table: BreakpointTable = serde_json::from_str(r#"{"c": null}"#).unwrap();
        assert_eq!(table.get("c"), Some(Threshold::Unbounded));

        assert!(serde_json::from_str::<BreakpointTable>(r#"{"c": "huge"}"#).is_err());

        let json = serde_json::to_string(&BreakpointTable::new().with("x", Threshold::Unbounded))
            .unwrap();
        assert_eq!(json, r#"{"x":"Infinity"}"#);
    }
}
