//! # Lifecycle Module
//!
//! Pause/resume transitions. Only the employer may trigger either, and an
//! expired stream accepts neither - expiry is derived from the clock and
//! outranks the stored pause flag. Redundant transitions are rejected
//! (`AlreadyPaused` / `NotPaused`) rather than silently accepted, to
//! surface stale caller state.

use crate::ledger::StreamLedger;
use paystream_core::{Address, EngineError, EngineResult, StreamId};

pub(crate) fn pause(
    ledger: &StreamLedger,
    stream_id: StreamId,
    requester: &Address,
    now: u64,
) -> EngineResult<()> {
    let entry = ledger.entry(stream_id)?;
    let mut guard = entry.lock().unwrap();

    if &guard.stream.employer != requester {
        return Err(EngineError::NotAuthorized(
            "only the employer can pause".to_string(),
        ));
    }
    if guard.stream.is_expired(now) {
        return Err(EngineError::StreamExpired(stream_id));
    }
    if !guard.stream.active {
        return Err(EngineError::AlreadyPaused(stream_id));
    }

    guard.stream.active = false;
    Ok(())
}

pub(crate) fn resume(
    ledger: &StreamLedger,
    stream_id: StreamId,
    requester: &Address,
    now: u64,
) -> EngineResult<()> {
    let entry = ledger.entry(stream_id)?;
    let mut guard = entry.lock().unwrap();

    if &guard.stream.employer != requester {
        return Err(EngineError::NotAuthorized(
            "only the employer can resume".to_string(),
        ));
    }
    if guard.stream.is_expired(now) {
        return Err(EngineError::StreamExpired(stream_id));
    }
    if guard.stream.active {
        return Err(EngineError::NotPaused(stream_id));
    }

    guard.stream.active = true;
    Ok(())
}
