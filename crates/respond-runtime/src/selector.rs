#![forbid(unsafe_code)]

//! Read access to the stored classification.
//!
//! Selectors never fail. Before the first classification they return an
//! empty view, which serializes as `{}` and answers every query with
//! `false` or `None`.

use respond_core::Orientation;
use respond_layout::ClassificationState;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};

use crate::state::{AppState, RESPONSIVE_KEY};

/// Borrowed view of the responsive slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResponsiveView<'a> {
    /// A classification has been stored.
    Classified(&'a ClassificationState),
    /// Nothing stored yet.
    Empty,
}

impl<'a> ResponsiveView<'a> {
    /// Returns true before the first classification.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// The stored classification.
    pub fn state(&self) -> Option<&'a ClassificationState> {
        match *self {
            Self::Classified(state) => Some(state),
            Self::Empty => None,
        }
    }

    /// Active breakpoint name.
    pub fn media_type(&self) -> Option<&'a str> {
        self.state().map(ClassificationState::media_type)
    }

    /// Orientation, if classified.
    pub fn orientation(&self) -> Option<Orientation> {
        self.state().map(ClassificationState::orientation)
    }

    /// See [`ClassificationState::is`]. False when empty.
    pub fn is(&self, name: &str) -> bool {
        self.state().is_some_and(|s| s.is(name))
    }

    /// See [`ClassificationState::greater_than`]. False when empty.
    pub fn greater_than(&self, name: &str) -> bool {
        self.state().is_some_and(|s| s.greater_than(name))
    }

    /// See [`ClassificationState::less_than`]. False when empty.
    pub fn less_than(&self, name: &str) -> bool {
        self.state().is_some_and(|s| s.less_than(name))
    }
}

impl Serialize for ResponsiveView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Classified(state) => state.serialize(serializer),
            Self::Empty => serializer.serialize_map(Some(0))?.end(),
        }
    }
}

/// The stored classification, or an empty view.
pub fn get_responsive(state: &AppState) -> ResponsiveView<'_> {
    match state.responsive() {
        Some(classification) => ResponsiveView::Classified(classification),
        None => ResponsiveView::Empty,
    }
}

/// Same contract over an untyped JSON state tree: the value under
/// [`RESPONSIVE_KEY`], or `{}` when it is missing or null.
pub fn get_responsive_value(tree: &Value) -> Value {
    tree.get(RESPONSIVE_KEY)
        .filter(|v| !v.is_null())
        .cloned()
        .unwrap_or_else(|| Value::Object(Map::new()))
}
