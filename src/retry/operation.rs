//! # Operation metadata.
//!
//! Wrapping a callable must not hide what it is. [`Operation`] carries the
//! name, the owning context and the documentation of a retried operation
//! explicitly, and provides the identifier used in retry messages:
//! `"<Owner>.<name>"`, or just `"<name>"` without an owner.
//!
//! ## Example
//! ```rust
//! use ph_toolbox::Operation;
//!
//! struct DemoApp;
//!
//! let op = Operation::of::<DemoApp>("action_fail_n_times")
//!     .with_doc("This is the documentation of action_fail_n_times");
//!
//! assert_eq!(op.to_string(), "DemoApp.action_fail_n_times");
//! assert_eq!(op.doc(), Some("This is the documentation of action_fail_n_times"));
//! ```

use std::borrow::Cow;
use std::fmt;

use crate::error::short_type_name;

/// Introspectable description of a retried operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operation {
    name: Cow<'static, str>,
    owner: Option<Cow<'static, str>>,
    doc: Option<Cow<'static, str>>,
}

impl Operation {
    /// Operation without an owning context.
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            owner: None,
            doc: None,
        }
    }

    /// Operation owned by `T`; the owner is `T`'s short type name.
    pub fn of<T: ?Sized>(name: impl Into<Cow<'static, str>>) -> Self {
        Self::new(name).with_owner(short_type_name::<T>())
    }

    /// Sets the owning context.
    #[must_use]
    pub fn with_owner(mut self, owner: impl Into<Cow<'static, str>>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    /// Attaches documentation.
    #[must_use]
    pub fn with_doc(mut self, doc: impl Into<Cow<'static, str>>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// Name of the operation, as given at construction.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Owning context (usually a type name), if any.
    pub fn owner(&self) -> Option<&str> {
        self.owner.as_deref()
    }

    /// Documentation attached with [`Operation::with_doc`].
    pub fn doc(&self) -> Option<&str> {
        self.doc.as_deref()
    }

    /// `"<Owner>.<name>"` or `"<name>"`.
    pub fn qualified_name(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.owner {
            Some(owner) => write!(f, "{owner}.{}", self.name),
            None => f.write_str(&self.name),
        }
    }
}
