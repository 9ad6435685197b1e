//! # Retry wrapper (`RetryOnError`)
//!
//! [`RetryOnError`] composes a [`RetryPolicy`], an [`Operation`] description and a
//! target callable into one value that can be called like the original operation.
//! Arguments are passed as one value (use a tuple for several) and cloned for
//! every attempt.
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use ph_toolbox::{Fault, Operation, RetryOnError, RetryPolicy};
//!
//! let policy = RetryPolicy::new(3, Duration::ZERO)?;
//! let parse = RetryOnError::new(
//!     policy,
//!     Operation::new("parse_port").with_doc("Parses a TCP port."),
//!     |raw: &str| raw.parse::<u16>().map_err(Fault::from),
//! );
//!
//! assert_eq!(parse.call("8080"), Some(8080));
//! assert_eq!(parse.call("http"), None);
//! assert_eq!(parse.doc(), Some("Parses a TCP port."));
//! # Ok::<(), ph_toolbox::RetryError>(())
//! ```

use std::fmt;

use crate::error::Fault;
use crate::retry::operation::Operation;
use crate::retry::policy::RetryPolicy;

/// A target callable bound to a retry policy.
#[derive(Clone)]
pub struct RetryOnError<F> {
    policy: RetryPolicy,
    operation: Operation,
    target: F,
}

impl<F> RetryOnError<F> {
    /// Wraps `target`.
    pub fn new(policy: RetryPolicy, operation: Operation, target: F) -> Self {
        Self {
            policy,
            operation,
            target,
        }
    }

    /// Metadata of the wrapped operation.
    pub fn operation(&self) -> &Operation {
        &self.operation
    }

    /// Name of the wrapped operation.
    pub fn name(&self) -> &str {
        self.operation.name()
    }

    /// Documentation of the wrapped operation.
    pub fn doc(&self) -> Option<&str> {
        self.operation.doc()
    }

    /// Policy applied on every call.
    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Calls the target with retries. `None` means the budget was exhausted.
    pub fn call<A, T, E>(&self, args: A) -> Option<T>
    where
        F: Fn(A) -> Result<T, E>,
        A: Clone,
        E: Into<Fault>,
    {
        self.policy
            .run(&self.operation, || (self.target)(args.clone()))
    }

    /// Like [`RetryOnError::call`] for targets that mutate captured state.
    pub fn call_mut<A, T, E>(&mut self, args: A) -> Option<T>
    where
        F: FnMut(A) -> Result<T, E>,
        A: Clone,
        E: Into<Fault>,
    {
        let Self {
            policy,
            operation,
            target,
        } = self;
        policy.run(operation, || target(args.clone()))
    }
}

impl RetryPolicy {
    /// Binds this policy to `target`; see [`RetryOnError`].
    pub fn wrap<F>(&self, operation: Operation, target: F) -> RetryOnError<F> {
        RetryOnError::new(self.clone(), operation, target)
    }
}

impl<F> fmt::Debug for RetryOnError<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryOnError")
            .field("policy", &self.policy)
            .field("operation", &self.operation)
            .finish_non_exhaustive()
    }
}
