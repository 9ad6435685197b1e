//! # Retry policy.
//!
//! [`RetryPolicy`] is immutable configuration for bounded re-invocation:
//! - [`RetryPolicy::max_attempts`] total attempts, the first one included (`>= 1`);
//! - [`RetryPolicy::delay`] fixed pause between two attempts;
//! - three [`Hook`] slots observing the transitions of one call.
//!
//! The policy holds no per-call state, so one policy can drive any number of
//! operations and calls. Malformed values are rejected at construction.
//!
//! # Example
//! ```rust
//! use std::time::Duration;
//! use ph_toolbox::{Hook, RetryPolicy};
//!
//! let policy = RetryPolicy::new(5, Duration::from_millis(10))?
//!     .with_on_recoverable_error(true)
//!     .with_on_fatal_error(Hook::custom(|msg| eprintln!("giving up: {msg}")));
//!
//! assert_eq!(policy.max_attempts(), 5);
//! assert!(policy.on_error_resolved().is_absent());
//! # Ok::<(), ph_toolbox::RetryError>(())
//! ```

use std::time::Duration;

use crate::error::RetryError;
use crate::retry::hook::Hook;

/// Bounded-retry configuration.
#[derive(Clone, Debug)]
pub struct RetryPolicy {
    max_attempts: u32,
    delay: Duration,
    on_recoverable_error: Hook,
    on_error_resolved: Hook,
    on_fatal_error: Hook,
}

impl RetryPolicy {
    /// Creates a policy with every hook [`Hook::Absent`].
    ///
    /// ### Errors
    /// [`RetryError::InvalidMaxAttempts`] if `max_attempts == 0`.
    pub fn new(max_attempts: u32, delay: Duration) -> Result<Self, RetryError> {
        if max_attempts == 0 {
            return Err(RetryError::InvalidMaxAttempts { got: max_attempts });
        }
        Ok(Self {
            max_attempts,
            delay,
            on_recoverable_error: Hook::Absent,
            on_error_resolved: Hook::Absent,
            on_fatal_error: Hook::Absent,
        })
    }

    /// Same as [`RetryPolicy::new`] with the delay given in (fractional) seconds.
    ///
    /// ### Errors
    /// [`RetryError::InvalidDelay`] for negative, NaN or overflowing delays.
    pub fn from_secs_f64(max_attempts: u32, delay_secs: f64) -> Result<Self, RetryError> {
        let delay = Duration::try_from_secs_f64(delay_secs)
            .map_err(|e| RetryError::InvalidDelay(format!("{delay_secs}: {e}")))?;
        Self::new(max_attempts, delay)
    }

    /// Sets the hook run after each failed attempt that will be retried.
    #[must_use]
    pub fn with_on_recoverable_error(mut self, hook: impl Into<Hook>) -> Self {
        self.on_recoverable_error = hook.into();
        self
    }

    /// Sets the hook run once when a call succeeds after failing.
    #[must_use]
    pub fn with_on_error_resolved(mut self, hook: impl Into<Hook>) -> Self {
        self.on_error_resolved = hook.into();
        self
    }

    /// Sets the hook run once when the attempt budget is exhausted.
    #[must_use]
    pub fn with_on_fatal_error(mut self, hook: impl Into<Hook>) -> Self {
        self.on_fatal_error = hook.into();
        self
    }

    /// Total attempts per call, the first one included.
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Pause between two attempts.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Hook run after a failed attempt that will be retried.
    pub fn on_recoverable_error(&self) -> &Hook {
        &self.on_recoverable_error
    }

    /// Hook run when a call succeeds after at least one failure.
    pub fn on_error_resolved(&self) -> &Hook {
        &self.on_error_resolved
    }

    /// Hook run when the last attempt fails.
    pub fn on_fatal_error(&self) -> &Hook {
        &self.on_fatal_error
    }
}
