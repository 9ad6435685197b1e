//! # Example: event_bus
//!
//! Registers console and `tracing` handlers on the process-wide bus. Then it
//! fires events across the threshold and shows a failing handler being isolated.
//!
//! ## Flow
//! ```text
//! ConsoleWriter::install(bus)        → every level prints "[LEVEL] msg"
//! bus.set_threshold(INFO)
//! Event.DEBUG.fire(..)               → Filtered
//! Event.WARNING.fire(..)             → Delivered { invoked: 1 }
//! Event.ERROR.register("flaky", ..)  → handler returns Err
//! Event.ERROR.fire(..)
//!   ├─► console handler runs
//!   ├─► flaky fails → "Event Error: ERROR unable to run flaky - ..."
//!   └─► Delivered { invoked: 2, failures: [flaky] }
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example event_bus
//! ```

use ph_toolbox::{ConsoleWriter, Event, EventBus, Fault, Handler, Severity};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let bus = EventBus::global();

    // 1. Print every level to the console
    ConsoleWriter::new().install(bus);

    // 2. Drop DEBUG noise
    bus.set_threshold(Severity::Info);

    let dispatch = Event::global(Severity::Debug).fire("cache warmed")?;
    println!("debug   -> {dispatch:?}");

    let dispatch = Event::global(Severity::Warning).fire("disk at 91%")?;
    println!("warning -> {dispatch:?}");

    // 3. A handler that always fails; delivery still continues
    Event::global(Severity::Error).register(
        "flaky",
        Handler::new(|_| Err(Fault::new("Unavailable", "pager service down"))),
    );
    let dispatch = Event::global(Severity::Error).fire("payment rejected")?;
    println!(
        "error   -> invoked={} failures={}",
        dispatch.invoked(),
        dispatch.failures().len()
    );

    // 4. Firing an empty channel is an error
    bus.reset();
    if let Err(err) = Event::global(Severity::Critical).fire("no one listens") {
        println!("critical -> {err} ({})", err.as_label());
    }
    Ok(())
}
