//! # Stream Module
//!
//! The central entity: a single employer-to-employee salary commitment with
//! linear vesting over a fixed duration. Streams are created once, mutated
//! only through the engine (`total_withdrawn`, `active`), and never deleted.

use crate::address::Address;
use crate::gateway::CiphertextHandle;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique stream identifier. Monotonically allocated, first id is 1.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct StreamId(pub u64);

impl fmt::Display for StreamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Observable stream state at a given instant.
///
/// `Expired` is derived from the clock and outranks the stored pause flag;
/// it is terminal with respect to pause/resume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreamStatus {
    /// Accruing, withdrawals permitted
    Active,
    /// Accruing, withdrawals blocked
    Paused,
    /// Past end time; pause/resume no longer legal, settlement queries remain
    Expired,
}

impl StreamStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StreamStatus::Active => "active",
            StreamStatus::Paused => "paused",
            StreamStatus::Expired => "expired",
        }
    }
}

impl fmt::Display for StreamStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A salary stream.
///
/// Invariants upheld by the engine after every mutation:
/// - `duration > 0`
/// - `0 <= total_withdrawn <= total_amount`
/// - `employer != employee`, neither is the zero address
/// - `start_time` and `duration` never change after creation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stream {
    /// Unique id, assigned at creation
    pub id: StreamId,
    /// Participant funding the stream
    pub employer: Address,
    /// Participant earning from the stream
    pub employee: Address,
    /// Funded principal, in integer base units
    pub total_amount: u64,
    /// Opaque handle to the encrypted salary amount, if one was registered
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encrypted_amount: Option<CiphertextHandle>,
    /// Instant accrual begins (seconds)
    pub start_time: u64,
    /// Span over which `total_amount` vests linearly (seconds, > 0)
    pub duration: u64,
    /// Cumulative amount paid out so far
    pub total_withdrawn: u64,
    /// Pause flag; `false` blocks withdrawals, not accrual
    pub active: bool,
}

impl Stream {
    /// Instant accrual completes.
    pub fn end_time(&self) -> u64 {
        self.start_time.saturating_add(self.duration)
    }

    /// Whether the stream is past its end time at `now`.
    pub fn is_expired(&self, now: u64) -> bool {
        now >= self.end_time()
    }

    /// Observable status at `now`. Expiry wins over the pause flag.
    pub fn status(&self, now: u64) -> StreamStatus {
        if self.is_expired(now) {
            StreamStatus::Expired
        } else if self.active {
            StreamStatus::Active
        } else {
            StreamStatus::Paused
        }
    }
}

impl fmt::Display for Stream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Stream {} ({} -> {}, total: {}, withdrawn: {})",
            self.id,
            self.employer.short(),
            self.employee.short(),
            self.total_amount,
            self.total_withdrawn
        )
    }
}
