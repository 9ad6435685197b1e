//! Error types used by the toolbox.
//!
//! This module defines the error enums surfaced to callers:
//!
//! - [`EventError`]: usage errors raised by the event bus.
//! - [`RetryError`]: malformed retry policy construction.
//! - [`ConfigError`]: lookups, formatting and tag errors of the config store.
//!
//! It also defines [`Fault`], the opaque failure that user callables (event
//! handlers and retried operations) hand back to the toolbox. A fault is never
//! propagated by the toolbox itself; it is only rendered into diagnostics.
//!
//! All enums provide `as_label` for logs and tests.

use std::any::Any;
use std::borrow::Cow;
use std::fmt;

use thiserror::Error;

use crate::severity::Severity;

/// # Errors produced by the event bus.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EventError {
    /// An event was fired on a channel nobody listens to.
    #[error("no handlers registered for {level}")]
    NoHandlers {
        /// Channel that was fired.
        level: Severity,
    },

    /// A severity name could not be parsed.
    #[error("invalid severity level: {0:?}")]
    InvalidSeverity(String),
}

impl EventError {
    /// Returns a short stable label (snake_case) for use in logs.
    ///
    /// # Example
    /// ```
    /// use ph_toolbox::{EventError, Severity};
    ///
    /// let err = EventError::NoHandlers { level: Severity::Debug };
    /// assert_eq!(err.as_label(), "event_no_handlers");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            EventError::NoHandlers { .. } => "event_no_handlers",
            EventError::InvalidSeverity(_) => "event_invalid_severity",
        }
    }
}

/// # Errors produced while building a retry policy.
///
/// Policies are validated when constructed, never at first invocation.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RetryError {
    /// `max_attempts` counts the first call too, so it must be at least 1.
    #[error("max_attempts must be >= 1 (got {got})")]
    InvalidMaxAttempts {
        /// The rejected value.
        got: u32,
    },

    /// Delay was negative, NaN or too large to represent.
    #[error("invalid retry delay: {0}")]
    InvalidDelay(String),
}

impl RetryError {
    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            RetryError::InvalidMaxAttempts { .. } => "retry_invalid_max_attempts",
            RetryError::InvalidDelay(_) => "retry_invalid_delay",
        }
    }
}

/// # Errors produced by the config store.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A required key has no value.
    #[error("missing required config value: {key}")]
    MissingValue {
        /// The requested key.
        key: String,
    },

    /// A tag was read or extended before being created.
    #[error("unknown config tag: {tag}")]
    UnknownTag {
        /// The requested tag.
        tag: String,
    },

    /// A tag referenced a key the store does not hold.
    #[error("tag {tag} references unknown config key: {key}")]
    UnknownKey {
        /// The tag being defined or extended.
        tag: String,
        /// The missing key.
        key: String,
    },

    /// A stored value could not be converted by the requested formatter.
    #[error("cannot format config value {key}={value:?}: {reason}")]
    Format {
        /// The requested key.
        key: String,
        /// The raw value, rendered.
        value: String,
        /// Why the conversion failed.
        reason: String,
    },

    /// The command line could not be applied to the store.
    #[error("invalid command line arguments: {0}")]
    InvalidArgs(String),
}

impl ConfigError {
    /// Returns a short stable label (snake_case) for use in logs.
    ///
    /// # Example
    /// ```
    /// use ph_toolbox::ConfigError;
    ///
    /// let err = ConfigError::UnknownTag { tag: "db".into() };
    /// assert_eq!(err.as_label(), "config_unknown_tag");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            ConfigError::MissingValue { .. } => "config_missing_value",
            ConfigError::UnknownTag { .. } => "config_unknown_tag",
            ConfigError::UnknownKey { .. } => "config_unknown_key",
            ConfigError::Format { .. } => "config_format",
            ConfigError::InvalidArgs(_) => "config_invalid_args",
        }
    }
}

/// # Failure reported by a user callable.
///
/// Carries the *kind* of the failure (the short type name of the source error,
/// or `panic` for a caught panic) and its message. Renders as `"<kind>: <message>"`.
///
/// Any [`std::error::Error`] converts into a `Fault`, so `?` works inside
/// handlers and retried operations:
///
/// ```
/// use ph_toolbox::Fault;
///
/// fn parse(raw: &str) -> Result<i64, Fault> {
///     Ok(raw.parse::<i64>()?)
/// }
///
/// let fault = parse("x").unwrap_err();
/// assert_eq!(fault.kind(), "ParseIntError");
/// ```
///
/// `Fault` deliberately does not implement [`std::error::Error`]; that keeps the
/// blanket conversion above coherent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fault {
    kind: Cow<'static, str>,
    message: String,
}

impl Fault {
    /// Creates a fault with an explicit kind.
    pub fn new(kind: impl Into<Cow<'static, str>>, message: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            message: message.into(),
        }
    }

    /// Creates a fault from a payload caught by `catch_unwind`.
    pub fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&'static str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "unknown panic payload".to_string()
        };
        Self::new("panic", message)
    }

    /// Returns the failure kind.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Returns the failure message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl<E> From<E> for Fault
where
    E: std::error::Error + 'static,
{
    fn from(err: E) -> Self {
        Self::new(short_type_name::<E>(), err.to_string())
    }
}

/// Returns the last path segment of a type name, without generic arguments.
///
/// `alloc::boxed::Box<dyn core::error::Error>` becomes `Box`,
/// `my_app::DemoAppError` becomes `DemoAppError`.
pub(crate) fn short_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Error)]
    #[error("Sorry, try again.")]
    struct DemoAppError;

    #[test]
    fn test_fault_from_error_uses_short_type_name() {
        let fault = Fault::from(DemoAppError);
        assert_eq!(fault.kind(), "DemoAppError");
        assert_eq!(fault.to_string(), "DemoAppError: Sorry, try again.");
    }

    #[test]
    fn test_fault_from_panic_payloads() {
        let fault = Fault::from_panic(Box::new("boom"));
        assert_eq!(fault.to_string(), "panic: boom");

        let fault = Fault::from_panic(Box::new(String::from("owned boom")));
        assert_eq!(fault.message(), "owned boom");

        let fault = Fault::from_panic(Box::new(42_u8));
        assert_eq!(fault.message(), "unknown panic payload");
    }

    #[test]
    fn test_short_type_name_strips_generics() {
        assert_eq!(short_type_name::<Box<dyn std::error::Error>>(), "Box");
        assert_eq!(short_type_name::<std::num::ParseIntError>(), "ParseIntError");
    }

    #[test]
    fn test_labels_are_stable() {
        assert_eq!(
            RetryError::InvalidMaxAttempts { got: 0 }.as_label(),
            "retry_invalid_max_attempts"
        );
        assert_eq!(
            ConfigError::MissingValue { key: "k".into() }.as_label(),
            "config_missing_value"
        );
        assert_eq!(
            EventError::InvalidSeverity("x".into()).as_label(),
            "event_invalid_severity"
        );
    }
}
