#![forbid(unsafe_code)]

//! Runtime configuration.
//!
//! # Env Var Contract
//!
//! - `RESPOND_BREAKPOINTS` - JSON object of name to threshold, used whenever a
//!   command carries no breakpoints. The sentinel is written `"Infinity"` or
//!   `null`.
//! - `RESPOND_ERROR_POLICY` - `propagate` (default), `keep-previous`, or
//!   `fallback`.
//!
//! # Invariants
//!
//! - `from_env` never fails: unparsable or invalid values are logged and the
//!   defaults are kept.
//! - `from_json_str` is strict and reports every problem as a [`ConfigError`].
//! - The default table of a constructed config always normalizes.

use std::fmt;

use respond_core::ValidationError;
use respond_layout::BreakpointTable;
use serde::Deserialize;
use serde::de::{Error as _, Unexpected};
use serde_json::Value;

/// Environment variable for the default breakpoint table.
pub const BREAKPOINTS_ENV_VAR: &str = "RESPOND_BREAKPOINTS";

/// Environment variable for the error policy.
pub const ERROR_POLICY_ENV_VAR: &str = "RESPOND_ERROR_POLICY";

/// What the store does when a classification fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorPolicy {
    /// Leave the stored state untouched and return the error.
    #[default]
    Propagate,
    /// Leave the stored state untouched and report the error in the outcome.
    KeepPrevious,
    /// Retry table errors with the default table. Dimension errors still
    /// propagate.
    #[serde(alias = "fallback-to-default")]
    Fallback,
}

impl ErrorPolicy {
    /// Parse the env var spelling.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "propagate" => Some(Self::Propagate),
            "keep-previous" | "keep_previous" => Some(Self::KeepPrevious),
            "fallback" | "fallback-to-default" => Some(Self::Fallback),
            _ => None,
        }
    }

    /// Kebab-case label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Propagate => "propagate",
            Self::KeepPrevious => "keep-previous",
            Self::Fallback => "fallback",
        }
    }
}

/// Errors from strict configuration parsing.
#[derive(Debug)]
pub enum ConfigError {
    /// The document is not valid JSON or has the wrong shape.
    Json(serde_json::Error),
    /// The breakpoint table failed validation.
    Validation(ValidationError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json(e) => write!(f, "invalid config document: {e}"),
            Self::Validation(e) => write!(f, "invalid breakpoint table: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Json(e) => Some(e),
            Self::Validation(e) => Some(e),
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

impl From<ValidationError> for ConfigError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

/// Store configuration.
///
/// Fields are only reachable through the builders, which keep the default
/// table normalizable.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponsiveConfig {
    breakpoints: BreakpointTable,
    error_policy: ErrorPolicy,
}

impl Default for ResponsiveConfig {
    fn default() -> Self {
        Self {
            breakpoints: BreakpointTable::standard(),
            error_policy: ErrorPolicy::default(),
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct ConfigDocument {
    #[serde(default)]
    breakpoints: Option<BreakpointTable>,
    #[serde(default)]
    error_policy: Option<ErrorPolicy>,
}

impl ResponsiveConfig {
    /// Table used when a command carries no breakpoints.
    #[must_use]
    pub fn breakpoints(&self) -> &BreakpointTable {
        &self.breakpoints
    }

    /// Failure handling.
    #[must_use]
    pub const fn error_policy(&self) -> ErrorPolicy {
        self.error_policy
    }

    /// Replace the default table.
    ///
    /// Fails if the table does not normalize; an empty table is rejected too,
    /// since the default is what empty commands fall back to.
    pub fn with_breakpoints(mut self, table: BreakpointTable) -> Result<Self, ValidationError> {
        table.normalize()?;
        self.breakpoints = table;
        Ok(self)
    }

    /// Replace the error policy.
    #[must_use]
    pub fn with_error_policy(mut self, policy: ErrorPolicy) -> Self {
        self.error_policy = policy;
        self
    }

    /// Read the process environment. See the module docs for the contract.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; `from_env` uses `std::env::var`.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(BREAKPOINTS_ENV_VAR) {
            match parse_table(&raw) {
                Ok(table) => config.breakpoints = table,
                Err(error) => tracing::warn!(
                    var = BREAKPOINTS_ENV_VAR,
                    %error,
                    "ignoring breakpoint override, using standard table"
                ),
            }
        }

        if let Some(raw) = lookup(ERROR_POLICY_ENV_VAR) {
            match ErrorPolicy::parse(&raw) {
                Some(policy) => config.error_policy = policy,
                None => tracing::warn!(
                    var = ERROR_POLICY_ENV_VAR,
                    value = %raw,
                    "unknown error policy, using propagate"
                ),
            }
        }

        tracing::debug!(
            breakpoints = config.breakpoints.len(),
            error_policy = config.error_policy.label(),
            "resolved responsive config"
        );
        config
    }

    /// Parse `{ "breakpoints": {...}, "errorPolicy": "..." }`. Both keys are
    /// optional; unknown keys are rejected, and so is any top-level value
    /// other than an object.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let value: Value = serde_json::from_str(json)?;
        if !value.is_object() {
            return Err(ConfigError::Json(serde_json::Error::invalid_type(
                unexpected(&value),
                &"a config object",
            )));
        }
        let doc: ConfigDocument = serde_json::from_value(value)?;
        let mut config = Self::default();
        if let Some(table) = doc.breakpoints {
            config = config.with_breakpoints(table)?;
        }
        if let Some(policy) = doc.error_policy {
            config.error_policy = policy;
        }
        Ok(config)
    }
}

fn unexpected(value: &Value) -> Unexpected<'_> {
    match value {
        Value::Null => Unexpected::Unit,
        Value::Bool(b) => Unexpected::Bool(*b),
        Value::Number(_) => Unexpected::Other("number"),
        Value::String(s) => Unexpected::Str(s),
        Value::Array(_) => Unexpected::Seq,
        Value::Object(_) => Unexpected::Map,
    }
}

fn parse_table(raw: &str) -> Result<BreakpointTable, ConfigError> {
    let table: BreakpointTable = serde_json::from_str(raw)?;
    table.normalize()?;
    Ok(table)
}
