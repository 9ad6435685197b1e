//! # ConsoleWriter: simple event printer
//!
//! Prints fired messages in a human-readable form. Use it for tests or demos.
//!
//! ## Example output
//! ```text
//! [DEBUG] cache warmed
//! [INFO] user logged in
//! [WARNING] disk almost full
//! [ERROR] upload failed        (stderr)
//! [CRITICAL] database gone     (stderr)
//! ```

use crate::events::{EventBus, Handler};
use crate::severity::Severity;

/// Console printer for bus messages.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleWriter;

impl ConsoleWriter {
    /// Key used by [`ConsoleWriter::install`].
    pub const KEY: &'static str = "console";

    /// Construct a new [`ConsoleWriter`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Renders one line.
    pub fn format(level: Severity, message: &str) -> String {
        format!("[{level}] {message}")
    }

    /// Returns a handler printing messages of `level`.
    pub fn handler(&self, level: Severity) -> Handler {
        Handler::named("ConsoleWriter", move |msg: &str| {
            let line = Self::format(level, msg);
            if level >= Severity::Error {
                eprintln!("{line}");
            } else {
                println!("{line}");
            }
            Ok(())
        })
    }

    /// Registers a printer on every channel of `bus` under [`ConsoleWriter::KEY`].
    pub fn install(&self, bus: &EventBus) {
        for level in Severity::ALL {
            bus.register(level, Self::KEY, self.handler(level));
        }
    }
}
