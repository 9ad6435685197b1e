//! # Severity scale shared by the event bus and the config store.
//!
//! [`Severity`] is totally ordered by declaration:
//! `Debug < Info < Warning < Error < Critical`.
//!
//! The event bus compares a fired level against its threshold with this order,
//! and the config store keeps its `log_level` setting as a `Severity` so both
//! stay consistent inside one host application.
//!
//! ## Example
//! ```rust
//! use ph_toolbox::Severity;
//!
//! assert!(Severity::Debug < Severity::Critical);
//! assert_eq!("warning".parse::<Severity>().unwrap(), Severity::Warning);
//! assert_eq!(Severity::Error.to_string(), "ERROR");
//! ```

use std::fmt;
use std::str::FromStr;

use crate::error::EventError;

/// Ordered severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Severity {
    /// Most permissive level; the initial bus threshold.
    #[default]
    Debug,
    /// Routine information.
    Info,
    /// Something unexpected that does not stop the program.
    Warning,
    /// An operation failed.
    Error,
    /// The program may not be able to continue.
    Critical,
}

impl Severity {
    /// Every level, lowest first.
    pub const ALL: [Severity; 5] = [
        Severity::Debug,
        Severity::Info,
        Severity::Warning,
        Severity::Error,
        Severity::Critical,
    ];

    /// Upper-case level name (`"DEBUG"` … `"CRITICAL"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Debug => "DEBUG",
            Severity::Info => "INFO",
            Severity::Warning => "WARNING",
            Severity::Error => "ERROR",
            Severity::Critical => "CRITICAL",
        }
    }

    /// Returns `true` if an event at this level passes the given threshold.
    #[inline]
    pub fn passes(&self, threshold: Severity) -> bool {
        *self >= threshold
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = EventError;

    /// Case-insensitive; accepts `WARN` as an alias of `WARNING`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "DEBUG" => Ok(Severity::Debug),
            "INFO" => Ok(Severity::Info),
            "WARNING" | "WARN" => Ok(Severity::Warning),
            "ERROR" => Ok(Severity::Error),
            "CRITICAL" => Ok(Severity::Critical),
            _ => Err(EventError::InvalidSeverity(s.to_string())),
        }
    }
}

impl From<Severity> for tracing::Level {
    /// `tracing` has no level above `ERROR`; `Critical` maps onto it.
    fn from(level: Severity) -> Self {
        match level {
            Severity::Debug => tracing::Level::DEBUG,
            Severity::Info => tracing::Level::INFO,
            Severity::Warning => tracing::Level::WARN,
            Severity::Error | Severity::Critical => tracing::Level::ERROR,
        }
    }
}
