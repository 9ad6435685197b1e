//! # Retry loop.
//!
//! Runs one call of an operation under a [`RetryPolicy`].
//!
//! ## Flow
//! ```text
//! attempt = 1, had_prior_failure = false
//! loop {
//!   ├─► invoke target
//!   │     ├─ Ok(v)  ─► had_prior_failure? ─► on_error_resolved
//!   │     │          └─► return Some(v)
//!   │     └─ Err(e) ─► attempt >= max_attempts?
//!   │                  ├─ yes ─► on_fatal_error ─► return None
//!   │                  └─ no  ─► on_recoverable_error
//!   │                           ├─► had_prior_failure = true
//!   │                           ├─► sleep(delay)
//!   │                           └─► attempt += 1
//! }
//! ```
//!
//! ## Rules
//! - Attempts run **sequentially** on the caller's thread (or task, for `run_async`).
//! - The delay sits **between** attempts only; never after the last one.
//! - Exhaustion is not an error: it is reported by `on_fatal_error` and a `None` return.
//! - The per-call state lives in [`Invocation`]; the policy stays untouched.

use std::future::Future;
use std::time::Duration;

use crate::error::Fault;
use crate::retry::hook::HookKind;
use crate::retry::operation::Operation;
use crate::retry::policy::RetryPolicy;

/// What to do after a failed attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Next {
    Retry(Duration),
    GiveUp,
}

/// Ephemeral state of one wrapped call.
struct Invocation<'a> {
    policy: &'a RetryPolicy,
    operation: &'a Operation,
    /// 1-based.
    attempt: u32,
    had_prior_failure: bool,
}

impl<'a> Invocation<'a> {
    fn new(policy: &'a RetryPolicy, operation: &'a Operation) -> Self {
        Self {
            policy,
            operation,
            attempt: 1,
            had_prior_failure: false,
        }
    }

    fn succeeded(&self) {
        if self.had_prior_failure {
            let msg = format!("Error resolved (#{} @ {})", self.attempt, self.operation);
            tracing::debug!(operation = %self.operation, attempt = self.attempt, "retried operation recovered");
            self.policy
                .on_error_resolved()
                .emit(HookKind::ErrorResolved, &msg);
        }
    }

    fn failed(&mut self, fault: Fault) -> Next {
        if self.attempt >= self.policy.max_attempts() {
            let msg = format!("Fatal error (#{} @ {}) {fault}", self.attempt, self.operation);
            tracing::debug!(operation = %self.operation, attempt = self.attempt, %fault, "retry budget exhausted");
            self.policy.on_fatal_error().emit(HookKind::FatalError, &msg);
            return Next::GiveUp;
        }

        let msg = format!("Recoverable error (#{} @ {}) {fault}", self.attempt, self.operation);
        tracing::debug!(operation = %self.operation, attempt = self.attempt, %fault, "attempt failed; retrying");
        self.policy
            .on_recoverable_error()
            .emit(HookKind::RecoverableError, &msg);

        self.had_prior_failure = true;
        self.attempt += 1;
        Next::Retry(self.policy.delay())
    }
}

impl RetryPolicy {
    /// Runs `target` until it succeeds or the attempt budget is spent.
    ///
    /// Returns `Some(value)` on success and `None` on exhaustion. The delay is a
    /// blocking pause on the calling thread.
    ///
    /// # Example
    /// ```rust
    /// use std::time::Duration;
    /// use ph_toolbox::{Fault, Operation, RetryPolicy};
    ///
    /// let policy = RetryPolicy::new(3, Duration::ZERO)?;
    /// let mut calls = 0;
    /// let out = policy.run(&Operation::new("flaky"), || {
    ///     calls += 1;
    ///     if calls < 3 { Err(Fault::new("Flaky", "not yet")) } else { Ok(calls) }
    /// });
    /// assert_eq!(out, Some(3));
    /// # Ok::<(), ph_toolbox::RetryError>(())
    /// ```
    pub fn run<T, E, F>(&self, operation: &Operation, mut target: F) -> Option<T>
    where
        F: FnMut() -> Result<T, E>,
        E: Into<Fault>,
    {
        let mut invocation = Invocation::new(self, operation);
        loop {
            match target() {
                Ok(value) => {
                    invocation.succeeded();
                    return Some(value);
                }
                Err(err) => match invocation.failed(err.into()) {
                    Next::Retry(delay) => {
                        if !delay.is_zero() {
                            std::thread::sleep(delay);
                        }
                    }
                    Next::GiveUp => return None,
                },
            }
        }
    }

    /// Async variant of [`RetryPolicy::run`].
    ///
    /// Same state machine and hooks; the delay is a `tokio::time::sleep` awaited
    /// inline, so attempts never overlap. Requires a Tokio runtime with the
    /// time driver enabled when the delay is non-zero.
    pub async fn run_async<T, E, F, Fut>(&self, operation: &Operation, mut target: F) -> Option<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Into<Fault>,
    {
        let mut invocation = Invocation::new(self, operation);
        loop {
            match target().await {
                Ok(value) => {
                    invocation.succeeded();
                    return Some(value);
                }
                Err(err) => match invocation.failed(err.into()) {
                    Next::Retry(delay) => {
                        if !delay.is_zero() {
                            tokio::time::sleep(delay).await;
                        }
                    }
                    Next::GiveUp => return None,
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::retry::hook::Hook;
    use std::sync::{Arc, Mutex};
    use std::time::Instant;

    #[derive(Default, Clone)]
    struct Recorder {
        lines: Arc<Mutex<Vec<(&'static str, String)>>>,
    }

    impl Recorder {
        fn hook(&self, tag: &'static str) -> Hook {
            let lines = Arc::clone(&self.lines);
            Hook::custom(move |msg| lines.lock().unwrap().push((tag, msg.to_string())))
        }

        fn count(&self, tag: &str) -> usize {
            self.lines.lock().unwrap().iter().filter(|(t, _)| *t == tag).count()
        }

        fn messages(&self) -> Vec<String> {
            self.lines.lock().unwrap().iter().map(|(_, m)| m.clone()).collect()
        }
    }

    fn policy(max: u32, rec: &Recorder) -> RetryPolicy {
        RetryPolicy::new(max, Duration::ZERO)
            .unwrap()
            .with_on_recoverable_error(rec.hook("recoverable"))
            .with_on_error_resolved(rec.hook("resolved"))
            .with_on_fatal_error(rec.hook("fatal"))
    }

    fn failing_n_times(n: u32) -> impl FnMut() -> Result<&'static str, Fault> {
        let mut left = n;
        move || {
            if left > 0 {
                left -= 1;
                Err(Fault::new("DemoAppError", "Sorry, try again."))
            } else {
                Ok("done")
            }
        }
    }

    #[test]
    fn test_first_attempt_success_fires_no_hook() {
        let rec = Recorder::default();
        let out = policy(5, &rec).run(&Operation::new("op"), failing_n_times(0));
        assert_eq!(out, Some("done"));
        assert!(rec.messages().is_empty());
    }

    #[test]
    fn test_exhaustion_counts() {
        let rec = Recorder::default();
        let out = policy(4, &rec).run(&Operation::new("op"), failing_n_times(100));
        assert_eq!(out, None);
        assert_eq!(rec.count("recoverable"), 3);
        assert_eq!(rec.count("resolved"), 0);
        assert_eq!(rec.count("fatal"), 1);
    }

    #[test]
    fn test_messages_carry_attempt_and_identifier() {
        let rec = Recorder::default();
        let op = Operation::new("sync").with_owner("Mirror");
        policy(2, &rec).run(&op, failing_n_times(5));
        assert_eq!(
            rec.messages(),
            vec![
                "Recoverable error (#1 @ Mirror.sync) DemoAppError: Sorry, try again.",
                "Fatal error (#2 @ Mirror.sync) DemoAppError: Sorry, try again.",
            ]
        );
    }

    #[test]
    fn test_single_attempt_policy_goes_straight_to_fatal() {
        let rec = Recorder::default();
        let out = policy(1, &rec).run(&Operation::new("op"), failing_n_times(1));
        assert_eq!(out, None);
        assert_eq!(rec.count("recoverable"), 0);
        assert_eq!(rec.count("fatal"), 1);
    }

    #[test]
    fn test_no_delay_after_last_attempt() {
        let policy = RetryPolicy::new(2, Duration::from_millis(200)).unwrap();
        let started = Instant::now();
        let out = policy.run(&Operation::new("op"), failing_n_times(10));
        let elapsed = started.elapsed();
        assert_eq!(out, None);
        assert!(elapsed >= Duration::from_millis(200), "one pause expected: {elapsed:?}");
        assert!(elapsed < Duration::from_millis(400), "no pause after the final attempt: {elapsed:?}");
    }

    #[test]
    fn test_policy_is_reusable_across_calls() {
        let rec = Recorder::default();
        let policy = policy(3, &rec);
        let op = Operation::new("op");

        assert_eq!(policy.run(&op, failing_n_times(1)), Some("done"));
        assert_eq!(policy.run(&op, failing_n_times(0)), Some("done"));
        // A fresh call never inherits the previous call's failure.
        assert_eq!(rec.count("resolved"), 1);
    }

    #[tokio::test]
    async fn test_async_variant_matches_sync_semantics() {
        let rec = Recorder::default();
        let policy = policy(5, &rec);
        let mut left = 3;
        let out = policy
            .run_async(&Operation::new("op"), || {
                let fail = left > 0;
                if fail {
                    left -= 1;
                }
                async move {
                    if fail {
                        Err(Fault::new("DemoAppError", "Sorry, try again."))
                    } else {
                        Ok(42)
                    }
                }
            })
            .await;

        assert_eq!(out, Some(42));
        assert_eq!(rec.count("recoverable"), 3);
        assert_eq!(rec.count("resolved"), 1);
        assert_eq!(rec.count("fatal"), 0);
    }
}
