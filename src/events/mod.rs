//! Leveled event bus: channels, handlers and dispatch.
//!
//! ## Contents
//! - [`EventBus`] process-wide (or explicit) context: channels + threshold
//! - [`Event`]    handle on one severity channel (`Event.<LEVEL>`)
//! - [`Handler`]  named, shareable callable invoked on `fire`
//! - [`Dispatch`], [`HandlerFailure`] outcome of one `fire` call
//!
//! ## Quick reference
//! ```text
//! Event::global(Severity::Info).register("audit", handler)
//! Event::global(Severity::Info).fire("user logged in")?
//!   ├─ no handlers        ─► Err(EventError::NoHandlers)
//!   ├─ below threshold    ─► Ok(Dispatch::Filtered)
//!   └─ otherwise          ─► every handler, in order, fault-isolated
//! ```

mod bus;
mod event;
mod handler;

pub use bus::{Dispatch, EventBus, HandlerFailure};
pub use event::Event;
pub use handler::{Handler, HandlerFn};
