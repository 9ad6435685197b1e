//! # TracingForwarder: bridge bus messages into `tracing`
//!
//! Each message is re-emitted with the mapped `tracing` level
//! (`CRITICAL` → `ERROR`, with `critical = true`) and a `source` field.
//! The toolbox never installs a subscriber; the host decides where the events go.

use crate::events::{EventBus, Handler};
use crate::severity::Severity;

/// Forwards bus messages to `tracing` with a fixed `source` field.
#[derive(Debug, Clone, Copy)]
pub struct TracingForwarder {
    source: &'static str,
}

impl Default for TracingForwarder {
    fn default() -> Self {
        Self { source: "ph_toolbox::events" }
    }
}

impl TracingForwarder {
    /// Key used by [`TracingForwarder::install`].
    pub const KEY: &'static str = "tracing";

    /// Forwarder with the default `source` (`ph_toolbox::events`).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Value of the `source` field on forwarded events.
    #[must_use]
    pub fn source(&self) -> &'static str {
        self.source
    }

    /// Returns a handler forwarding messages of `level`.
    pub fn handler(&self, level: Severity) -> Handler {
        let source = self.source;
        Handler::named("TracingForwarder", move |msg: &str| {
            match level {
                Severity::Debug => tracing::debug!(source, "{msg}"),
                Severity::Info => tracing::info!(source, "{msg}"),
                Severity::Warning => tracing::warn!(source, "{msg}"),
                Severity::Error => tracing::error!(source, "{msg}"),
                Severity::Critical => tracing::error!(source, critical = true, "{msg}"),
            }
            Ok(())
        })
    }

    /// Registers a forwarder on every channel of `bus` under [`TracingForwarder::KEY`].
    pub fn install(&self, bus: &EventBus) {
        for level in Severity::ALL {
            bus.register(level, Self::KEY, self.handler(level));
        }
    }
}
