#![forbid(unsafe_code)]

//! Responsive runtime.
//!
//! Ties the classification engine to an application state tree.
//!
//! # Key Components
//!
//! - [`ClassifyCommand`] - `{width, height, breakpoints?}` request
//! - [`reduce`] - pure `(previous, command) -> next` state transition
//! - [`ResponsiveStore`] - thread-safe container with latest-wins sequencing
//! - [`get_responsive`] - selector returning the stored classification or an
//!   empty view
//! - [`ResponsiveConfig`] - default table and error policy, from env or JSON
//!
//! # How it fits
//!
//! The host observes the viewport and decides *when* to dispatch. This crate
//! decides nothing about timing; it only guarantees that a stale result never
//! replaces a newer one.

pub mod command;
pub mod config;
pub mod selector;
pub mod state;
pub mod store;

pub use command::ClassifyCommand;
pub use config::{ConfigError, ErrorPolicy, ResponsiveConfig};
pub use selector::{ResponsiveView, get_responsive, get_responsive_value};
pub use state::{AppState, RESPONSIVE_KEY, reduce};
pub use store::{DispatchOutcome, ResponsiveStore, StoreStats, Ticket};
