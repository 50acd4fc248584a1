//! # Example 02: Audit Trail
//!
//! Wires the JSONL event log into the engine, runs a few payrolls, then
//! replays the trail and prints a filtered view plus a summary.
//!
//! Run with: `cargo run -p paystream-demos --example 02_audit_trail`

use paystream_audit::{ActivitySummary, EventFilter, EventLog, EventReader};
use paystream_core::StreamEventKind;
use paystream_demos::participant;
use paystream_engine::{EngineConfig, StreamEngine};
use std::sync::Arc;

fn main() {
    tracing_subscriber::fmt::init();

    println!("=== Example 02: Audit Trail ===\n");

    let log = Arc::new(EventLog::new("data/events").expect("open event log"));
    let next_event = log.last_event_id().expect("scan event log") + 1;
    println!(
        "Event log at {} (resuming from EVT_{next_event:06})\n",
        log.base_path().display()
    );

    let owner = participant(1);
    let engine = StreamEngine::new(
        EngineConfig::new(owner)
            .with_sink(log.clone())
            .with_first_event_id(next_event),
    );

    let employer = participant(2);
    let alice = participant(10);
    let bob = participant(11);

    let s1 = engine
        .create_stream(employer.clone(), alice.clone(), 5000, 1000, 0)
        .unwrap();
    let s2 = engine
        .create_stream(employer.clone(), bob.clone(), 3000, 600, 0)
        .unwrap();

    engine.request_withdrawal(s1, &alice, 400).unwrap();
    engine.request_withdrawal(s2, &bob, 300).unwrap();
    engine.pause_stream(s2, &employer, 350).unwrap();
    log.flush().unwrap();

    // Replay the trail
    let reader = EventReader::new(log.base_path());
    let events = reader.read_all().unwrap();

    println!("Withdrawals on record:");
    let filter = EventFilter::new().kinds(vec![StreamEventKind::WithdrawalProcessed]);
    for event in filter.apply(events.clone()) {
        println!("  {event}");
    }

    println!("\n{}", ActivitySummary::generate(&events).summary());
}
