//! # Observer hooks of the retry controller.
//!
//! Each of the three hook slots of a [`RetryPolicy`](crate::RetryPolicy) holds a [`Hook`]:
//!
//! - [`Hook::Absent`]     nothing happens (default);
//! - [`Hook::UseDefault`] the message is printed to stdout;
//! - [`Hook::Custom`]     the callable receives the message, and nothing else.
//!
//! `true` converts to `UseDefault` and `false` to `Absent`, so policies read
//! naturally: `.with_on_fatal_error(true)`.
//!
//! A panicking custom hook is isolated: the panic is caught and reported on
//! stderr as `Retry Error: unable to run <slot> hook - panic: <message>`.

use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use crate::error::Fault;

/// Callable signature of a custom hook.
pub type HookFn = dyn Fn(&str) + Send + Sync + 'static;

/// Hook slot of a retry policy.
#[derive(Clone, Default)]
pub enum Hook {
    /// No action.
    #[default]
    Absent,
    /// Built-in console logger (stdout).
    UseDefault,
    /// User callable.
    Custom(Arc<HookFn>),
}

/// Which transition a hook observes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookKind {
    /// A failed attempt that will be retried.
    RecoverableError,
    /// A success that follows at least one failure.
    ErrorResolved,
    /// The attempt budget is spent.
    FatalError,
}

impl HookKind {
    /// Name of the policy slot.
    pub fn as_str(&self) -> &'static str {
        match self {
            HookKind::RecoverableError => "on_recoverable_error",
            HookKind::ErrorResolved => "on_error_resolved",
            HookKind::FatalError => "on_fatal_error",
        }
    }
}

impl fmt::Display for HookKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Hook {
    /// Wraps a callable.
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        Hook::Custom(Arc::new(f))
    }

    /// Returns `true` for [`Hook::Absent`].
    pub fn is_absent(&self) -> bool {
        matches!(self, Hook::Absent)
    }

    /// Delivers `message` according to the slot configuration.
    pub(crate) fn emit(&self, kind: HookKind, message: &str) {
        match self {
            Hook::Absent => {}
            Hook::UseDefault => println!("{message}"),
            Hook::Custom(f) => {
                if let Err(payload) = catch_unwind(AssertUnwindSafe(|| f(message))) {
                    let fault = Fault::from_panic(payload);
                    eprintln!("Retry Error: unable to run {kind} hook - {fault}");
                }
            }
        }
    }
}

impl From<bool> for Hook {
    fn from(use_default: bool) -> Self {
        if use_default {
            Hook::UseDefault
        } else {
            Hook::Absent
        }
    }
}

impl fmt::Debug for Hook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Hook::Absent => f.write_str("Absent"),
            Hook::UseDefault => f.write_str("UseDefault"),
            Hook::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}
