#![forbid(unsafe_code)]

//! Application state tree and the reducer.
//!
//! The classification lives in one slot of a larger state tree, under
//! [`RESPONSIVE_KEY`]. [`reduce`] replaces that slot and nothing else.

use respond_core::ValidationError;
use respond_layout::{BreakpointTable, ClassificationState, classify};
use serde_json::{Map, Value};

use crate::command::ClassifyCommand;

/// Key of the classification slot in the serialized state tree.
pub const RESPONSIVE_KEY: &str = "responsive";

/// Application state: the responsive slot plus opaque sibling slices.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    responsive: Option<ClassificationState>,
    slices: Map<String, Value>,
}

impl AppState {
    /// State before any classification has run.
    #[must_use]
    pub fn initial() -> Self {
        Self::default()
    }

    /// The stored classification, if one has been computed.
    pub fn responsive(&self) -> Option<&ClassificationState> {
        self.responsive.as_ref()
    }

    /// A sibling slice owned by another part of the application.
    pub fn slice(&self, key: &str) -> Option<&Value> {
        self.slices.get(key)
    }

    /// Set a sibling slice. [`RESPONSIVE_KEY`] is reserved and ignored,
    /// returning `false`.
    pub fn set_slice(&mut self, key: impl Into<String>, value: Value) -> bool {
        let key = key.into();
        if key == RESPONSIVE_KEY {
            tracing::warn!(key = %key, "refusing to overwrite responsive slot with a raw slice");
            return false;
        }
        self.slices.insert(key, value);
        true
    }

    /// Copy of this state with the responsive slot replaced.
    #[must_use]
    pub fn with_responsive(&self, state: ClassificationState) -> Self {
        Self {
            responsive: Some(state),
            slices: self.slices.clone(),
        }
    }

    /// Serialize as one JSON object, the classification under
    /// [`RESPONSIVE_KEY`].
    pub fn to_json(&self) -> Result<Value, serde_json::Error> {
        let mut tree = self.slices.clone();
        if let Some(state) = &self.responsive {
            tree.insert(RESPONSIVE_KEY.to_owned(), serde_json::to_value(state)?);
        }
        Ok(Value::Object(tree))
    }
}

/// Pure reducer: classify `command` and store the result in a copy of
/// `previous`.
///
/// An absent or empty table in the command falls back to `default_table`.
/// On error `previous` is left as it was; the caller decides what to do.
pub fn reduce(
    previous: &AppState,
    command: &ClassifyCommand,
    default_table: &BreakpointTable,
) -> Result<AppState, ValidationError> {
    let table = command.table_or(default_table);
    let state = classify(command.dimensions(), table)?;
    Ok(previous.with_responsive(state))
}
