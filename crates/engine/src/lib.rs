//! # Paystream Engine
//!
//! The authoritative accounting engine behind the salary streaming product:
//! - `StreamLedger` - keyed store of streams plus the append-only
//!   withdrawal log, indexed by employer and employee
//! - withdrawal processing - all-or-nothing sweeps of the available balance
//! - lifecycle control - pause/resume with authorization and expiry rules
//! - `KeyRegistry` - FHE public key bookkeeping per participant
//! - `StreamEngine` - the facade wiring these together with per-stream
//!   locking, an optional encryption gateway, and an audit event sink
//!
//! Mutations on a given stream are serialized behind that stream's own
//! lock; operations on different streams never contend. All operations
//! complete or fail synchronously - there are no internal retries.

pub mod engine;
pub mod ledger;
pub mod lifecycle;
pub mod registry;
pub mod sink;
pub mod withdrawal;

pub use engine::{EngineConfig, StreamEngine};
pub use ledger::StreamLedger;
pub use registry::KeyRegistry;
pub use sink::{EventSink, MemorySink, NullSink};
