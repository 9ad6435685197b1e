//! # ph_toolbox
//!
//! **ph_toolbox** is a small process-wide utility toolbox:
//! a leveled event bus, a retry wrapper, a configuration registry and a slug normalizer.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!  ┌──────────────────────┐        ┌──────────────────────────────┐
//!  │ ConfigStore          │        │ Severity                     │
//!  │ defaults + CLI + set │──uses─►│ DEBUG<INFO<WARNING<ERROR<CRIT│
//!  │ tags                 │        └──────────────┬───────────────┘
//!  └──────────────────────┘                       │ threshold / channels
//!                                                 ▼
//!  ┌────────────────────────────────────────────────────────────────┐
//!  │ EventBus (Mutex)                                               │
//!  │  DEBUG → [h1, h2]   INFO → [h3]   ...   threshold: Severity    │
//!  └──────┬─────────────────────────────────────────────────────────┘
//!         │ fire(level, msg): handlers in order, each fault-isolated
//!         ▼
//!     handler 1 ──► handler 2 ──► ... (failures → stderr, delivery continues)
//!
//!  ┌────────────────────────────────────────────────────────────────┐
//!  │ RetryPolicy { max_attempts, delay, hooks }  +  Operation       │
//!  │   run(op, target) / RetryOnError::call(args)                   │
//!  │     ├─ Ok        ─► (resolved hook if it failed before) Some(v)│
//!  │     ├─ Err, left ─► recoverable hook, sleep(delay), again      │
//!  │     └─ Err, last ─► fatal hook, None                           │
//!  └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Features
//! | Area          | Description                                                   | Key types                                   |
//! |---------------|---------------------------------------------------------------|---------------------------------------------|
//! | **Events**    | Per-severity channels of named handlers, global threshold.    | [`EventBus`], [`Event`], [`Handler`]        |
//! | **Retry**     | Bounded re-invocation with fixed delay and observer hooks.    | [`RetryPolicy`], [`RetryOnError`], [`Hook`] |
//! | **Config**    | Defaults, command-line overlay, typed accessors, tags.        | [`ConfigStore`], [`ConfigValue`]            |
//! | **Errors**    | Typed errors for callers; [`Fault`] for user callables.       | [`EventError`], [`RetryError`], [`ConfigError`] |
//! | **Handlers**  | Built-in console and `tracing` handlers.                      | [`ConsoleWriter`], [`TracingForwarder`]     |
//! | **Slugs**     | URL-friendly slugs.                                           | [`slugify`]                                 |
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use ph_toolbox::{EventBus, Fault, Handler, Operation, RetryPolicy, Severity};
//!
//! let bus = EventBus::new();
//! bus.event(Severity::Warning)
//!     .register("stdout", Handler::infallible(|msg| println!("warning: {msg}")));
//!
//! let policy = RetryPolicy::new(3, Duration::from_millis(1))?
//!     .with_on_recoverable_error(true);
//!
//! let mut tries = 0;
//! let value = policy.run(&Operation::new("connect"), || {
//!     tries += 1;
//!     if tries < 2 { Err(Fault::new("Refused", "connection refused")) } else { Ok(tries) }
//! });
//!
//! if value.is_none() {
//!     bus.event(Severity::Warning).fire("connect gave up")?;
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
mod config;
mod error;
mod events;
mod handlers;
mod retry;
mod severity;
mod slug;

// ---- Public re-exports ----

pub use config::{config, keys, ConfigStore, ConfigValue};
pub use error::{ConfigError, EventError, Fault, RetryError};
pub use events::{Dispatch, Event, EventBus, Handler, HandlerFailure, HandlerFn};
pub use handlers::{ConsoleWriter, TracingForwarder};
pub use retry::{Hook, HookFn, HookKind, Operation, RetryOnError, RetryPolicy};
pub use severity::Severity;
pub use slug::slugify;
