//! # Ledger Module
//!
//! The authoritative record of every stream and its withdrawal history.
//! Each stream lives behind its own mutex; the outer maps are only locked
//! briefly for insertion and lookup, so operations on different streams
//! proceed independently. Streams are never removed - the ledger is a
//! permanent historical record.

use paystream_core::{
    Address, CiphertextHandle, EngineError, EngineResult, Stream, StreamId, WithdrawalId,
    WithdrawalRecord,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock};

/// A stream together with its withdrawal history, guarded as one unit so
/// `total_withdrawn` and the log can never disagree.
#[derive(Debug)]
pub(crate) struct StreamEntry {
    pub stream: Stream,
    pub history: Vec<WithdrawalRecord>,
}

/// Keyed store of streams plus participant indexes.
pub struct StreamLedger {
    streams: RwLock<HashMap<StreamId, Arc<Mutex<StreamEntry>>>>,
    by_employer: RwLock<HashMap<Address, Vec<StreamId>>>,
    by_employee: RwLock<HashMap<Address, Vec<StreamId>>>,
    next_stream_id: AtomicU64,
    next_withdrawal_id: AtomicU64,
}

impl StreamLedger {
    pub fn new() -> Self {
        Self {
            streams: RwLock::new(HashMap::new()),
            by_employer: RwLock::new(HashMap::new()),
            by_employee: RwLock::new(HashMap::new()),
            next_stream_id: AtomicU64::new(1),
            next_withdrawal_id: AtomicU64::new(1),
        }
    }

    /// Create and index a new stream.
    ///
    /// Validation happens before an id is allocated, so a failed create
    /// never consumes one.
    pub fn create(
        &self,
        employer: Address,
        employee: Address,
        total_amount: u64,
        encrypted_amount: Option<CiphertextHandle>,
        duration: u64,
        start_time: u64,
    ) -> EngineResult<Stream> {
        if employer == employee {
            return Err(EngineError::InvalidParticipants(
                "employer and employee must be different".to_string(),
            ));
        }
        if employer.is_zero() || employee.is_zero() {
            return Err(EngineError::InvalidParticipants(
                "the zero address cannot participate in a stream".to_string(),
            ));
        }
        if duration == 0 {
            return Err(EngineError::InvalidDuration);
        }
        if total_amount == 0 {
            return Err(EngineError::InvalidAmount);
        }

        let id = StreamId(self.next_stream_id.fetch_add(1, Ordering::SeqCst));
        let stream = Stream {
            id,
            employer: employer.clone(),
            employee: employee.clone(),
            total_amount,
            encrypted_amount,
            start_time,
            duration,
            total_withdrawn: 0,
            active: true,
        };

        let entry = Arc::new(Mutex::new(StreamEntry {
            stream: stream.clone(),
            history: Vec::new(),
        }));

        self.streams.write().unwrap().insert(id, entry);
        self.by_employer
            .write()
            .unwrap()
            .entry(employer)
            .or_default()
            .push(id);
        self.by_employee
            .write()
            .unwrap()
            .entry(employee)
            .or_default()
            .push(id);

        Ok(stream)
    }

    /// Shared handle to a stream's entry, for serialized mutation.
    pub(crate) fn entry(&self, id: StreamId) -> EngineResult<Arc<Mutex<StreamEntry>>> {
        self.streams
            .read()
            .unwrap()
            .get(&id)
            .cloned()
            .ok_or(EngineError::NotFound(id))
    }

    /// Snapshot of a stream.
    pub fn get(&self, id: StreamId) -> EngineResult<Stream> {
        let entry = self.entry(id)?;
        let guard = entry.lock().unwrap();
        Ok(guard.stream.clone())
    }

    /// Streams funded by `employer`, in insertion order.
    pub fn list_by_employer(&self, employer: &Address) -> Vec<StreamId> {
        self.by_employer
            .read()
            .unwrap()
            .get(employer)
            .cloned()
            .unwrap_or_default()
    }

    /// Streams earning for `employee`, in insertion order.
    pub fn list_by_employee(&self, employee: &Address) -> Vec<StreamId> {
        self.by_employee
            .read()
            .unwrap()
            .get(employee)
            .cloned()
            .unwrap_or_default()
    }

    /// The stream's withdrawal history, oldest first.
    pub fn history(&self, id: StreamId) -> EngineResult<Vec<WithdrawalRecord>> {
        let entry = self.entry(id)?;
        let guard = entry.lock().unwrap();
        Ok(guard.history.clone())
    }

    /// Look up a single withdrawal record by its id.
    pub fn get_withdrawal(&self, id: WithdrawalId) -> Option<WithdrawalRecord> {
        let streams = self.streams.read().unwrap();
        for entry in streams.values() {
            let guard = entry.lock().unwrap();
            if let Some(record) = guard.history.iter().find(|r| r.id == id) {
                return Some(record.clone());
            }
        }
        None
    }

    /// Number of streams ever created.
    pub fn stream_count(&self) -> u64 {
        self.streams.read().unwrap().len() as u64
    }

    /// Funded principal not yet paid out, summed across all streams.
    pub fn total_balance(&self) -> u128 {
        let streams = self.streams.read().unwrap();
        streams
            .values()
            .map(|entry| {
                let guard = entry.lock().unwrap();
                (guard.stream.total_amount - guard.stream.total_withdrawn) as u128
            })
            .sum()
    }

    /// Apply a withdrawal: bump `total_withdrawn` and append the record in
    /// one step, under the stream lock the caller already holds.
    pub(crate) fn commit_withdrawal(
        &self,
        entry: &mut StreamEntry,
        amount: u64,
        now: u64,
    ) -> WithdrawalRecord {
        let id = WithdrawalId(self.next_withdrawal_id.fetch_add(1, Ordering::SeqCst));
        entry.stream.total_withdrawn += amount;
        let record = WithdrawalRecord::new(
            id,
            entry.stream.id,
            amount,
            now,
            entry.stream.total_withdrawn,
        );
        entry.history.push(record.clone());
        record
    }
}

impl Default for StreamLedger {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(n: u64) -> Address {
        Address::parse(&format!("0x{n:040x}")).unwrap()
    }

    #[test]
    fn test_create_assigns_monotonic_ids_from_one() {
        let ledger = StreamLedger::new();
        let first = ledger
            .create(addr(1), addr(2), 1000, None, 1000, 0)
            .unwrap();
        let second = ledger
            .create(addr(1), addr(3), 2000, None, 500, 0)
            .unwrap();
        assert_eq!(first.id, StreamId(1));
        assert_eq!(second.id, StreamId(2));
        assert_eq!(ledger.stream_count(), 2);
    }

    #[test]
    fn test_create_validation() {
        let ledger = StreamLedger::new();

        let err = ledger.create(addr(1), addr(1), 1000, None, 1000, 0).unwrap_err();
        assert!(matches!(err, EngineError::InvalidParticipants(_)));

        let err = ledger
            .create(Address::zero(), addr(2), 1000, None, 1000, 0)
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidParticipants(_)));

        let err = ledger.create(addr(1), addr(2), 1000, None, 0, 0).unwrap_err();
        assert_eq!(err, EngineError::InvalidDuration);

        let err = ledger.create(addr(1), addr(2), 0, None, 1000, 0).unwrap_err();
        assert_eq!(err, EngineError::InvalidAmount);
    }

    #[test]
    fn test_failed_create_does_not_consume_an_id() {
        let ledger = StreamLedger::new();
        let _ = ledger.create(addr(1), addr(1), 1000, None, 1000, 0);
        let stream = ledger
            .create(addr(1), addr(2), 1000, None, 1000, 0)
            .unwrap();
        assert_eq!(stream.id, StreamId(1));
    }

    #[test]
    fn test_participant_indexes_keep_insertion_order() {
        let ledger = StreamLedger::new();
        ledger.create(addr(1), addr(2), 100, None, 10, 0).unwrap();
        ledger.create(addr(1), addr(3), 100, None, 10, 0).unwrap();
        ledger.create(addr(4), addr(2), 100, None, 10, 0).unwrap();

        assert_eq!(ledger.list_by_employer(&addr(1)), vec![StreamId(1), StreamId(2)]);
        assert_eq!(ledger.list_by_employee(&addr(2)), vec![StreamId(1), StreamId(3)]);
        assert!(ledger.list_by_employer(&addr(9)).is_empty());
    }

    #[test]
    fn test_get_unknown_stream() {
        let ledger = StreamLedger::new();
        assert_eq!(ledger.get(StreamId(42)).unwrap_err(), EngineError::NotFound(StreamId(42)));
    }

    #[test]
    fn test_commit_withdrawal_updates_stream_and_history_together() {
        let ledger = StreamLedger::new();
        let stream = ledger.create(addr(1), addr(2), 1000, None, 1000, 0).unwrap();

        let entry = ledger.entry(stream.id).unwrap();
        let record = {
            let mut guard = entry.lock().unwrap();
            ledger.commit_withdrawal(&mut guard, 250, 250)
        };
        assert_eq!(record.id, WithdrawalId(1));
        assert_eq!(record.resulting_total_withdrawn, 250);

        let snapshot = ledger.get(stream.id).unwrap();
        assert_eq!(snapshot.total_withdrawn, 250);
        assert_eq!(ledger.history(stream.id).unwrap(), vec![record.clone()]);
        assert_eq!(ledger.get_withdrawal(WithdrawalId(1)), Some(record));
        assert_eq!(ledger.get_withdrawal(WithdrawalId(2)), None);
    }

    #[test]
    fn test_total_balance() {
        let ledger = StreamLedger::new();
        let s1 = ledger.create(addr(1), addr(2), 1000, None, 1000, 0).unwrap();
        ledger.create(addr(1), addr(3), 500, None, 1000, 0).unwrap();
        assert_eq!(ledger.total_balance(), 1500);

        let entry = ledger.entry(s1.id).unwrap();
        {
            let mut guard = entry.lock().unwrap();
            ledger.commit_withdrawal(&mut guard, 400, 400);
        }
        assert_eq!(ledger.total_balance(), 1100);
    }
}
