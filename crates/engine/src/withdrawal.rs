//! # Withdrawal Module
//!
//! Validates and applies withdrawal requests. The whole available balance
//! is swept in one operation; the availability check and the commit happen
//! under the same stream lock, so two concurrent requests can never both
//! observe the same balance. A replayed request after success finds
//! `available == 0` and fails with `NothingToWithdraw` rather than paying
//! twice.

use crate::ledger::StreamLedger;
use paystream_core::accrual;
use paystream_core::{Address, EngineError, EngineResult, StreamId, WithdrawalRecord};

/// Preconditions are checked in a fixed order, each with a distinct
/// failure kind: existence, authorization, pause state, then balance.
pub(crate) fn process(
    ledger: &StreamLedger,
    stream_id: StreamId,
    requester: &Address,
    now: u64,
) -> EngineResult<WithdrawalRecord> {
    let entry = ledger.entry(stream_id)?;
    let mut guard = entry.lock().unwrap();

    if &guard.stream.employee != requester {
        return Err(EngineError::NotAuthorized(
            "only the employee can withdraw".to_string(),
        ));
    }
    if !guard.stream.active {
        return Err(EngineError::StreamNotActive(stream_id));
    }

    let amount = accrual::available(&guard.stream, now);
    if amount == 0 {
        return Err(EngineError::NothingToWithdraw(stream_id));
    }

    Ok(ledger.commit_withdrawal(&mut guard, amount, now))
}
