//! # Built-in handlers
//!
//! Small, self-contained handlers for demos and for hosts that want the bus to
//! feed an existing logging setup.
//!
//! - [`ConsoleWriter`]: prints `[LEVEL] message` (stderr for ERROR and above).
//! - [`TracingForwarder`]: re-emits every message as a `tracing` event.

mod console;
mod forward;

pub use console::ConsoleWriter;
pub use forward::TracingForwarder;
