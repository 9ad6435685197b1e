//! # Event handlers.
//!
//! A [`Handler`] is a shared callable `Fn(&str) -> Result<(), Fault>` plus an
//! optional identifier used in diagnostics. Handlers are cheap to clone
//! (`Arc`-backed), so the bus can snapshot a channel and invoke it without
//! holding its lock.
//!
//! ## Fault isolation
//! [`Handler::invoke`] never unwinds: an `Err` is returned as-is and a panic is
//! caught and turned into a [`Fault`] of kind `panic`.
//!
//! ## Example
//! ```rust
//! use ph_toolbox::{Fault, Handler};
//!
//! let quiet = Handler::infallible(|_msg: &str| {});
//! let picky = Handler::named("picky", |msg: &str| {
//!     if msg.is_empty() {
//!         return Err(Fault::new("EmptyMessage", "nothing to log"));
//!     }
//!     Ok(())
//! });
//!
//! assert_eq!(picky.name(), Some("picky"));
//! assert!(quiet.name().is_none());
//! ```

use std::borrow::Cow;
use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use crate::error::Fault;

/// Callable signature shared by all handlers.
pub type HandlerFn = dyn Fn(&str) -> Result<(), Fault> + Send + Sync + 'static;

/// Named, shareable event handler.
#[derive(Clone)]
pub struct Handler {
    name: Option<Cow<'static, str>>,
    f: Arc<HandlerFn>,
}

impl Handler {
    /// Creates an anonymous handler.
    ///
    /// Diagnostics identify it by the key it is registered under.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&str) -> Result<(), Fault> + Send + Sync + 'static,
    {
        Self {
            name: None,
            f: Arc::new(f),
        }
    }

    /// Creates a handler with an explicit diagnostic identifier.
    pub fn named<F>(name: impl Into<Cow<'static, str>>, f: F) -> Self
    where
        F: Fn(&str) -> Result<(), Fault> + Send + Sync + 'static,
    {
        Self {
            name: Some(name.into()),
            f: Arc::new(f),
        }
    }

    /// Wraps a callable that cannot report failure (it may still panic).
    pub fn infallible<F>(f: F) -> Self
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        Self::new(move |msg| {
            f(msg);
            Ok(())
        })
    }

    /// Returns the explicit identifier, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Identifier used in diagnostics: the explicit name, else `key`.
    pub(crate) fn identifier<'a>(&'a self, key: &'a str) -> &'a str {
        self.name.as_deref().unwrap_or(key)
    }

    /// Invokes the handler, converting a panic into a `panic` fault.
    pub fn invoke(&self, message: &str) -> Result<(), Fault> {
        match catch_unwind(AssertUnwindSafe(|| (self.f)(message))) {
            Ok(res) => res,
            Err(payload) => Err(Fault::from_panic(payload)),
        }
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handler")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
