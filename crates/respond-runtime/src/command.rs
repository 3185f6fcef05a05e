#![forbid(unsafe_code)]

//! The classification command.

use respond_core::Dimensions;
use respond_layout::BreakpointTable;
use serde::{Deserialize, Serialize};

/// Request to reclassify the viewport.
///
/// Built by the host whenever it observes a new measurement. Absent or empty
/// `breakpoints` mean "use the configured default table".
///
/// ```
/// use respond_runtime::ClassifyCommand;
///
/// let cmd: ClassifyCommand = serde_json::from_str(r#"{"width": 800, "height": 600}"#)?;
/// assert_eq!(cmd, ClassifyCommand::new(800.0, 600.0));
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifyCommand {
    /// Viewport width.
    pub width: f64,
    /// Viewport height.
    pub height: f64,
    /// Optional table overriding the default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breakpoints: Option<BreakpointTable>,
}

impl ClassifyCommand {
    /// Command using the default table.
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            breakpoints: None,
        }
    }

    /// Attach a custom table.
    #[must_use]
    pub fn with_breakpoints(mut self, table: BreakpointTable) -> Self {
        self.breakpoints = Some(table);
        self
    }

    /// The measurement carried by this command (not yet validated).
    pub fn dimensions(&self) -> Dimensions {
        Dimensions {
            width: self.width,
            height: self.height,
        }
    }

    /// Returns true if the command carries a non-empty table of its own.
    pub fn has_custom_table(&self) -> bool {
        self.breakpoints.as_ref().is_some_and(|t| !t.is_empty())
    }

    /// The table to classify against: the command's own unless absent or
    /// empty, otherwise `default`.
    pub fn table_or<'a>(&'a self, default: &'a BreakpointTable) -> &'a BreakpointTable {
        match &self.breakpoints {
            Some(table) if !table.is_empty() => table,
            _ => default,
        }
    }
}
