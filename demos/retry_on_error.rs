//! # Example: retry_on_error
//!
//! Wraps a flaky operation with a [`RetryPolicy`]: fixed delay, bounded attempts,
//! default console hooks for recoverable errors and custom ones for the rest.
//!
//! ## Flow
//! ```text
//! RetryPolicy { max_attempts: 4, delay: 50ms }
//!   ├─► attempt #1 → Err → "Recoverable error (#1 @ Inventory.sync) ..."
//!   ├─► sleep(50ms)
//!   ├─► attempt #2 → Err → "Recoverable error (#2 @ Inventory.sync) ..."
//!   ├─► sleep(50ms)
//!   └─► attempt #3 → Ok  → "Error resolved (#3 @ Inventory.sync)" → Some(value)
//!
//! second run: every attempt fails → "Fatal error (#4 @ ...)" → None
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example retry_on_error
//! ```

use std::time::Duration;

use ph_toolbox::{Hook, Operation, RetryPolicy};

#[derive(Debug, thiserror::Error)]
#[error("upstream timed out after {0}ms")]
struct Timeout(u64);

struct Inventory {
    failures_left: u32,
}

impl Inventory {
    fn sync(&mut self, batch: &str) -> Result<usize, Timeout> {
        if self.failures_left > 0 {
            self.failures_left -= 1;
            return Err(Timeout(250));
        }
        Ok(batch.len())
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Policy: 4 attempts, 50ms apart
    let policy = RetryPolicy::new(4, Duration::from_millis(50))?
        .with_on_recoverable_error(true)
        .with_on_error_resolved(Hook::custom(|msg| println!("[resolved] {msg}")))
        .with_on_fatal_error(Hook::custom(|msg| eprintln!("[fatal] {msg}")));

    let op = Operation::of::<Inventory>("sync").with_doc("Pushes a batch to the warehouse.");

    // 2. Recovers on the third attempt
    let mut inventory = Inventory { failures_left: 2 };
    let synced = policy.run(&op, || inventory.sync("sku-1,sku-2"));
    println!("synced: {synced:?}");

    // 3. Never recovers
    let mut inventory = Inventory { failures_left: u32::MAX };
    let mut wrapped = policy.wrap(op, |batch: &'static str| inventory.sync(batch));
    let outcome = wrapped.call_mut("sku-3");
    println!("{} ({:?}) -> {outcome:?}", wrapped.name(), wrapped.doc());

    // 4. Same policy, async target
    let mut polls = 0;
    let ready = policy
        .run_async(&Operation::new("poll_ready"), || {
            polls += 1;
            let attempt = polls;
            async move {
                tokio::time::sleep(Duration::from_millis(5)).await;
                if attempt < 2 { Err(Timeout(5)) } else { Ok(attempt) }
            }
        })
        .await;
    println!("ready after {ready:?} polls");
    Ok(())
}
