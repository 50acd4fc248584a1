//! # Withdrawal Module
//!
//! Immutable log entries recording each processed withdrawal. Records are
//! appended-only and owned by the ledger; they exist for audit, history
//! display, and replay checks, and are never mutated or deleted.

use crate::stream::StreamId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique withdrawal record identifier. Monotonic, first id is 1.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct WithdrawalId(pub u64);

impl fmt::Display for WithdrawalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One processed withdrawal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawalRecord {
    pub id: WithdrawalId,
    pub stream_id: StreamId,
    /// Amount paid out in this withdrawal
    pub amount: u64,
    /// Instant the withdrawal was processed (seconds)
    pub timestamp: u64,
    /// The stream's cumulative `total_withdrawn` after this payout
    pub resulting_total_withdrawn: u64,
}

impl WithdrawalRecord {
    pub fn new(
        id: WithdrawalId,
        stream_id: StreamId,
        amount: u64,
        timestamp: u64,
        resulting_total_withdrawn: u64,
    ) -> Self {
        Self {
            id,
            stream_id,
            amount,
            timestamp,
            resulting_total_withdrawn,
        }
    }
}

impl fmt::Display for WithdrawalRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Withdrawal {} (stream {}, amount {}, at {})",
            self.id, self.stream_id, self.amount, self.timestamp
        )
    }
}
