//! # Leveled event bus.
//!
//! [`EventBus`] keeps one channel per [`Severity`]; each channel is an ordered set
//! of named [`Handler`]s. A single process-wide threshold gates dispatch.
//!
//! ## Architecture
//! ```text
//!   register(level, key, handler)          fire(level, msg)
//!            │                                   │
//!            ▼                                   ▼
//! ┌──────────────────────────────┐   no handlers? ──► Err(EventError::NoHandlers)
//! │ Mutex<BusState>              │   level < threshold? ──► Dispatch::Filtered
//! │  threshold: Severity         │          │
//! │  channels: {                 │          ▼ snapshot handlers, release lock
//! │    DEBUG → [k1, k2, ...]     │   handler 1 ─► handler 2 ─► ... ─► handler N
//! │    INFO  → [...]             │      │ Err/panic
//! │    ...                       │      └─► stderr: "Event Error: ..." and continue
//! │  }                           │
//! └──────────────────────────────┘
//! ```
//!
//! ## Rules
//! - Handler keys are unique per channel; invocation order is insertion order.
//! - Re-registering a key replaces its handler **in place** (position kept).
//! - Unregistering a missing key is a no-op.
//! - Firing a channel with no handlers is a usage error, checked **before** the threshold.
//! - A failing handler never stops delivery to the next one and never escapes `fire`.
//! - Handlers run on the caller's thread, sequentially, outside the lock, so a
//!   handler may use the bus itself.
//!
//! ## Lifecycle
//! Channels are created lazily on first registration and live until [`EventBus::reset`],
//! which also restores the threshold to [`Severity::Debug`].

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

use once_cell::sync::Lazy;

use crate::error::{EventError, Fault};
use crate::events::event::Event;
use crate::events::handler::Handler;
use crate::severity::Severity;

static GLOBAL_BUS: Lazy<EventBus> = Lazy::new(EventBus::new);

/// Handlers of one severity level, in registration order.
#[derive(Debug, Default)]
struct Channel {
    handlers: Vec<(String, Handler)>,
}

impl Channel {
    /// Inserts or replaces in place. Returns `true` if `key` was already present.
    fn upsert(&mut self, key: String, handler: Handler) -> bool {
        match self.handlers.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => {
                slot.1 = handler;
                true
            }
            None => {
                self.handlers.push((key, handler));
                false
            }
        }
    }

    fn remove(&mut self, key: &str) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|(k, _)| k != key);
        self.handlers.len() != before
    }
}

#[derive(Debug, Default)]
struct BusState {
    channels: BTreeMap<Severity, Channel>,
    threshold: Severity,
}

/// One handler invocation that failed during [`EventBus::fire`].
///
/// Renders as the diagnostic line written to stderr:
/// `Event Error: <LEVEL> unable to run <handler> - <Kind>: <message>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerFailure {
    /// Channel that was fired.
    pub level: Severity,
    /// Handler identifier (explicit name or registration key).
    pub handler: String,
    /// What went wrong.
    pub fault: Fault,
}

impl fmt::Display for HandlerFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Event Error: {} unable to run {} - {}",
            self.level, self.handler, self.fault
        )
    }
}

/// Outcome of a successful [`EventBus::fire`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// The level was below the bus threshold; no handler ran.
    Filtered {
        /// Channel that was fired.
        level: Severity,
        /// Bus threshold at the time of the call.
        threshold: Severity,
    },
    /// Every handler of the channel was invoked.
    Delivered {
        /// Channel that was fired.
        level: Severity,
        /// Number of handlers invoked (including failed ones).
        invoked: usize,
        /// Handlers that returned an error or panicked.
        failures: Vec<HandlerFailure>,
    },
}

impl Dispatch {
    /// Returns `true` if handlers were invoked.
    pub fn is_delivered(&self) -> bool {
        matches!(self, Dispatch::Delivered { .. })
    }

    /// Number of handlers invoked (0 when filtered).
    pub fn invoked(&self) -> usize {
        match self {
            Dispatch::Filtered { .. } => 0,
            Dispatch::Delivered { invoked, .. } => *invoked,
        }
    }

    /// Failed invocations (empty when filtered).
    pub fn failures(&self) -> &[HandlerFailure] {
        match self {
            Dispatch::Filtered { .. } => &[],
            Dispatch::Delivered { failures, .. } => failures,
        }
    }
}

/// Severity-gated, multi-handler dispatch with fault isolation.
///
/// Usually accessed through [`EventBus::global`]; tests and embedded hosts can
/// create their own instance with [`EventBus::new`].
#[derive(Debug, Default)]
pub struct EventBus {
    state: Mutex<BusState>,
}

impl EventBus {
    /// Creates an empty bus with threshold [`Severity::Debug`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the process-wide bus.
    pub fn global() -> &'static EventBus {
        &GLOBAL_BUS
    }

    /// Returns a handle on the channel for `level`.
    pub fn event(&self, level: Severity) -> Event<'_> {
        Event::new(self, level)
    }

    fn state(&self) -> MutexGuard<'_, BusState> {
        // Handlers never run under the lock, so poisoning cannot leave the state half-updated.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Adds `handler` under `key`, replacing in place if `key` already exists.
    pub fn register(&self, level: Severity, key: impl Into<String>, handler: Handler) {
        let key = key.into();
        let replaced = {
            let mut state = self.state();
            state
                .channels
                .entry(level)
                .or_default()
                .upsert(key.clone(), handler)
        };
        tracing::debug!(level = %level, key = %key, replaced, "event handler registered");
    }

    /// Registers each `(key, handler)` pair in order.
    pub fn register_all<I, K>(&self, level: Severity, pairs: I)
    where
        I: IntoIterator<Item = (K, Handler)>,
        K: Into<String>,
    {
        for (key, handler) in pairs {
            self.register(level, key, handler);
        }
    }

    /// Removes the handler under `key`. Returns `false` (and does nothing) if absent.
    pub fn unregister(&self, level: Severity, key: &str) -> bool {
        let removed = self
            .state()
            .channels
            .get_mut(&level)
            .is_some_and(|channel| channel.remove(key));
        tracing::debug!(level = %level, key, removed, "event handler unregistered");
        removed
    }

    /// Sets the minimum level that reaches handlers, for every channel.
    pub fn set_threshold(&self, level: Severity) {
        let previous = std::mem::replace(&mut self.state().threshold, level);
        tracing::debug!(from = %previous, to = %level, "event threshold changed");
    }

    /// Returns the current threshold.
    pub fn threshold(&self) -> Severity {
        self.state().threshold
    }

    /// Returns the handler keys of `level`, in invocation order.
    pub fn handler_keys(&self, level: Severity) -> Vec<String> {
        self.state()
            .channels
            .get(&level)
            .map(|channel| channel.handlers.iter().map(|(k, _)| k.clone()).collect())
            .unwrap_or_default()
    }

    /// Returns `true` if at least one handler listens on `level`.
    pub fn has_handlers(&self, level: Severity) -> bool {
        self.state()
            .channels
            .get(&level)
            .is_some_and(|channel| !channel.handlers.is_empty())
    }

    /// Dispatches `message` to every handler of `level`.
    ///
    /// ### Errors
    /// [`EventError::NoHandlers`] if the channel is empty, whatever the threshold.
    ///
    /// ### Fault isolation
    /// Each failing handler produces one line on stderr and one
    /// [`HandlerFailure`] in the returned [`Dispatch`]; delivery continues.
    pub fn fire(&self, level: Severity, message: &str) -> Result<Dispatch, EventError> {
        let (snapshot, threshold) = {
            let state = self.state();
            let handlers = state
                .channels
                .get(&level)
                .map(|channel| channel.handlers.clone())
                .unwrap_or_default();
            (handlers, state.threshold)
        };

        if snapshot.is_empty() {
            return Err(EventError::NoHandlers { level });
        }
        if !level.passes(threshold) {
            tracing::trace!(level = %level, threshold = %threshold, "event filtered");
            return Ok(Dispatch::Filtered { level, threshold });
        }

        let mut failures = Vec::new();
        for (key, handler) in &snapshot {
            if let Err(fault) = handler.invoke(message) {
                let failure = HandlerFailure {
                    level,
                    handler: handler.identifier(key).to_string(),
                    fault,
                };
                eprintln!("{failure}");
                failures.push(failure);
            }
        }

        Ok(Dispatch::Delivered {
            level,
            invoked: snapshot.len(),
            failures,
        })
    }

    /// Clears every channel and restores the threshold to [`Severity::Debug`].
    ///
    /// A reinitialization point (test isolation), not for normal runtime use.
    pub fn reset(&self) {
        *self.state() = BusState::default();
        tracing::debug!("event bus reset");
    }
}
