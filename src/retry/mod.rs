//! Retry controller.
//!
//! This module groups the pieces that wrap an operation with bounded retries.
//!
//! ## Contents
//! - [`RetryPolicy`]  max attempts, fixed delay and hook slots (immutable)
//! - [`Hook`]         absent / built-in console logger / custom callable
//! - [`Operation`]    name, owner and documentation of the wrapped operation
//! - [`RetryOnError`] a target bound to a policy, callable like the original
//!
//! ## Outcomes of one call
//! ```text
//! success on attempt 1           ─► no hook                              ─► Some(v)
//! k < max failures, then success ─► recoverable ×k, resolved ×1          ─► Some(v)
//! max failures                   ─► recoverable ×(max-1), fatal ×1       ─► None
//! ```

mod hook;
mod operation;
mod policy;
mod runner;
mod wrapper;

pub use hook::{Hook, HookFn, HookKind};
pub use operation::Operation;
pub use policy::RetryPolicy;
pub use wrapper::RetryOnError;
