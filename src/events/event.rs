//! # Per-level event handle.
//!
//! [`Event`] binds an [`EventBus`] to one [`Severity`], so call sites read like
//! `Event::global(Severity::Warning).fire("disk almost full")`.
//!
//! Its string form identifies the level uniquely:
//! ```rust
//! use ph_toolbox::{Event, EventBus, Severity};
//!
//! let bus = EventBus::new();
//! assert_eq!(bus.event(Severity::Debug).to_string(), "Event.DEBUG");
//! ```

use std::fmt;

use crate::error::EventError;
use crate::events::bus::{Dispatch, EventBus};
use crate::events::handler::Handler;
use crate::severity::Severity;

/// Handle on one severity channel of a bus.
#[derive(Clone, Copy)]
pub struct Event<'a> {
    bus: &'a EventBus,
    level: Severity,
}

impl Event<'static> {
    /// Handle on the process-wide bus.
    pub fn global(level: Severity) -> Self {
        EventBus::global().event(level)
    }
}

impl<'a> Event<'a> {
    pub(crate) fn new(bus: &'a EventBus, level: Severity) -> Self {
        Self { bus, level }
    }

    /// Level of this channel.
    pub fn level(&self) -> Severity {
        self.level
    }

    /// See [`EventBus::register`].
    pub fn register(&self, key: impl Into<String>, handler: Handler) -> &Self {
        self.bus.register(self.level, key, handler);
        self
    }

    /// See [`EventBus::register_all`].
    pub fn register_all<I, K>(&self, pairs: I) -> &Self
    where
        I: IntoIterator<Item = (K, Handler)>,
        K: Into<String>,
    {
        self.bus.register_all(self.level, pairs);
        self
    }

    /// See [`EventBus::unregister`].
    pub fn unregister(&self, key: &str) -> bool {
        self.bus.unregister(self.level, key)
    }

    /// See [`EventBus::fire`].
    pub fn fire(&self, message: &str) -> Result<Dispatch, EventError> {
        self.bus.fire(self.level, message)
    }

    /// Handler keys of this channel, in invocation order.
    pub fn handler_keys(&self) -> Vec<String> {
        self.bus.handler_keys(self.level)
    }
}

impl fmt::Display for Event<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Event.{}", self.level)
    }
}

impl fmt::Debug for Event<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Event").field(&self.level).finish()
    }
}

impl PartialEq for Event<'_> {
    /// Same bus instance and same level.
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.bus, other.bus) && self.level == other.level
    }
}

impl Eq for Event<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_level() {
        let bus = EventBus::new();
        assert_eq!(bus.event(Severity::Critical).to_string(), "Event.CRITICAL");
        assert_eq!(bus.event(Severity::Warning).to_string(), "Event.WARNING");
    }

    #[test]
    fn test_equality_is_per_bus_and_level() {
        let a = EventBus::new();
        let b = EventBus::new();
        assert_eq!(a.event(Severity::Info), a.event(Severity::Info));
        assert_ne!(a.event(Severity::Info), a.event(Severity::Error));
        assert_ne!(a.event(Severity::Info), b.event(Severity::Info));
    }

    #[test]
    fn test_handle_delegates_to_bus() {
        let bus = EventBus::new();
        let ev = bus.event(Severity::Info);
        ev.register("a", Handler::infallible(|_| {}))
            .register("b", Handler::infallible(|_| {}));
        assert_eq!(ev.handler_keys(), vec!["a", "b"]);
        assert!(ev.unregister("a"));
        assert_eq!(ev.fire("x").unwrap().invoked(), 1);
    }
}
