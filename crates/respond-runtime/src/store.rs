#![forbid(unsafe_code)]

//! Sequenced, thread-safe state container.
//!
//! Hosts may observe resizes on several threads, or compute commands out of
//! order. Every dispatch therefore takes a [`Ticket`] first; the store only
//! applies a result whose ticket is newer than the last one applied.
//!
//! # Invariants
//!
//! - **Latest-wins**: a stale ticket never overwrites a newer classification.
//! - **Serialized apply**: the staleness check, the reduction and the store
//!   happen under one write lock.
//! - **Failure isolation**: a failed classification never changes the state,
//!   whatever the [`ErrorPolicy`].
//!
//! # Failure Modes
//!
//! | Condition | Policy | Behavior |
//! |-----------|--------|----------|
//! | Validation error | `Propagate` | `Err`, state untouched |
//! | Validation error | `KeepPrevious` | `Ok(Rejected)`, state untouched |
//! | Table error | `Fallback` | Retry with default table, `Ok(FellBack)` |
//! | Dimension error | `Fallback` | `Err`, state untouched |
//! | Poisoned lock | any | Recovered; state is only ever replaced whole |

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock, RwLockWriteGuard};

use respond_core::ValidationError;
use respond_layout::ClassificationState;

use crate::command::ClassifyCommand;
use crate::config::{ErrorPolicy, ResponsiveConfig};
use crate::selector::{ResponsiveView, get_responsive};
use crate::state::{AppState, reduce};

/// Dispatch order token. Later tickets compare greater.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

impl Ticket {
    /// Sequence number.
    #[must_use]
    pub const fn seq(self) -> u64 {
        self.0
    }
}

/// Result of a dispatch that did not return `Err`.
#[derive(Debug, Clone, PartialEq)]
pub enum DispatchOutcome {
    /// The classification was stored.
    Applied {
        /// Ticket of this dispatch.
        ticket: Ticket,
        /// Active breakpoint.
        media_type: String,
    },
    /// A newer ticket had already been applied; nothing was stored.
    Stale {
        /// Ticket of this dispatch.
        ticket: Ticket,
        /// Newest applied ticket.
        latest: Ticket,
    },
    /// Classification failed and the previous state was kept.
    Rejected {
        /// Ticket of this dispatch.
        ticket: Ticket,
        /// Why.
        error: ValidationError,
    },
    /// The command's table failed; the default table was used instead.
    FellBack {
        /// Ticket of this dispatch.
        ticket: Ticket,
        /// Active breakpoint under the default table.
        media_type: String,
        /// Error from the command's own table.
        error: ValidationError,
    },
}

impl DispatchOutcome {
    /// Returns true if the stored classification changed.
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied { .. } | Self::FellBack { .. })
    }
}

/// Dispatch counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StoreStats {
    /// Classifications stored (including fallbacks).
    pub applied: u64,
    /// Dispatches discarded as stale.
    pub stale: u64,
    /// Dispatches that failed validation.
    pub rejected: u64,
    /// Dispatches stored using the default table after a table error.
    pub fallbacks: u64,
}

#[derive(Debug, Default)]
struct StoreInner {
    app: AppState,
    latest: Option<Ticket>,
    stats: StoreStats,
}

/// Holds the application state and applies classification commands.
#[derive(Debug)]
pub struct ResponsiveStore {
    config: ResponsiveConfig,
    next_ticket: AtomicU64,
    inner: RwLock<StoreInner>,
}

impl Default for ResponsiveStore {
    fn default() -> Self {
        Self::new(ResponsiveConfig::default())
    }
}

impl ResponsiveStore {
    /// Empty store.
    pub fn new(config: ResponsiveConfig) -> Self {
        Self::with_state(config, AppState::initial())
    }

    /// Store seeded with existing application state.
    pub fn with_state(config: ResponsiveConfig, app: AppState) -> Self {
        Self {
            config,
            next_ticket: AtomicU64::new(0),
            inner: RwLock::new(StoreInner {
                app,
                ..StoreInner::default()
            }),
        }
    }

    /// The configuration in effect.
    pub fn config(&self) -> &ResponsiveConfig {
        &self.config
    }

    /// Reserve the next dispatch slot. Take it when the measurement is
    /// observed, then [`apply`](Self::apply) it once the command is ready.
    pub fn ticket(&self) -> Ticket {
        Ticket(self.next_ticket.fetch_add(1, Ordering::Relaxed))
    }

    /// Take a ticket and apply immediately.
    pub fn dispatch(&self, command: &ClassifyCommand) -> Result<DispatchOutcome, ValidationError> {
        let ticket = self.ticket();
        self.apply(ticket, command)
    }

    /// Apply `command` under `ticket`, unless a newer ticket already applied.
    pub fn apply(
        &self,
        ticket: Ticket,
        command: &ClassifyCommand,
    ) -> Result<DispatchOutcome, ValidationError> {
        let mut inner = self.write();

        if let Some(latest) = inner.latest.filter(|latest| *latest >= ticket) {
            inner.stats.stale += 1;
            tracing::debug!(
                ticket = ticket.seq(),
                latest = latest.seq(),
                "discarding stale classification"
            );
            return Ok(DispatchOutcome::Stale { ticket, latest });
        }

        let error = match reduce(&inner.app, command, self.config.breakpoints()) {
            Ok(next) => {
                let media_type = store(&mut inner, ticket, next);
                tracing::debug!(
                    ticket = ticket.seq(),
                    width = command.width,
                    height = command.height,
                    media_type = %media_type,
                    "applied classification"
                );
                return Ok(DispatchOutcome::Applied { ticket, media_type });
            }
            Err(error) => error,
        };

        let fallback_allowed = self.config.error_policy() == ErrorPolicy::Fallback
            && error.kind().is_table_error()
            && command.has_custom_table();
        if fallback_allowed {
            let retry = ClassifyCommand::new(command.width, command.height);
            if let Ok(next) = reduce(&inner.app, &retry, self.config.breakpoints()) {
                let media_type = store(&mut inner, ticket, next);
                inner.stats.fallbacks += 1;
                tracing::warn!(
                    ticket = ticket.seq(),
                    code = error.code(),
                    %error,
                    media_type = %media_type,
                    "command table rejected, classified with default table"
                );
                return Ok(DispatchOutcome::FellBack {
                    ticket,
                    media_type,
                    error,
                });
            }
        }

        inner.stats.rejected += 1;
        tracing::warn!(
            ticket = ticket.seq(),
            code = error.code(),
            %error,
            policy = self.config.error_policy().label(),
            "classification rejected"
        );
        match self.config.error_policy() {
            ErrorPolicy::KeepPrevious => Ok(DispatchOutcome::Rejected { ticket, error }),
            ErrorPolicy::Propagate | ErrorPolicy::Fallback => Err(error),
        }
    }

    /// Clone of the whole application state.
    pub fn snapshot(&self) -> AppState {
        self.read(|app| app.clone())
    }

    /// Clone of the stored classification.
    pub fn responsive(&self) -> Option<ClassificationState> {
        self.read(|app| app.responsive().cloned())
    }

    /// Run `f` against the responsive view without cloning.
    pub fn with_view<R>(&self, f: impl FnOnce(ResponsiveView<'_>) -> R) -> R {
        self.read(|app| f(get_responsive(app)))
    }

    /// Newest applied ticket.
    pub fn latest(&self) -> Option<Ticket> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .latest
    }

    /// Dispatch counters.
    pub fn stats(&self) -> StoreStats {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .stats
    }

    fn read<R>(&self, f: impl FnOnce(&AppState) -> R) -> R {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        f(&inner.app)
    }

    fn write(&self) -> RwLockWriteGuard<'_, StoreInner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

fn store(inner: &mut StoreInner, ticket: Ticket, next: AppState) -> String {
    let media_type = next
        .responsive()
        .map(|s| s.media_type().to_owned())
        .unwrap_or_default();
    inner.app = next;
    inner.latest = Some(ticket);
    inner.stats.applied += 1;
    media_type
}
