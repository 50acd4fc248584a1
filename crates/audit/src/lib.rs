//! # Paystream Audit
//!
//! Append-only JSONL audit trail for engine events. One file per day
//! (`data/events/2026-08-05.jsonl`), one event per line. The log
//! implements the engine's `EventSink`, so wiring it into an
//! `EngineConfig` mirrors every committed mutation to disk; `EventReader`
//! replays the trail for history display and reconciliation.

pub mod error;
pub mod log;
pub mod replay;

pub use error::{AuditError, AuditResult};
pub use log::EventLog;
pub use replay::{ActivitySummary, EventFilter, EventReader};
