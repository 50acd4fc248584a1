//! # Engine Module
//!
//! `StreamEngine` is the function surface consumed by the orchestration
//! layer: stream creation, withdrawal, pause/resume, queries, the key
//! registry, and the owner-only emergency pause. Every committed mutation
//! is mirrored to the configured event sink after it commits.

use crate::ledger::StreamLedger;
use crate::registry::KeyRegistry;
use crate::sink::{EventSink, NullSink};
use crate::{lifecycle, withdrawal};
use paystream_core::accrual;
use paystream_core::{
    Address, CiphertextHandle, EncryptionGateway, EngineError, EngineResult, PublicKey, Stream,
    StreamEvent, StreamId, StreamStatus, WithdrawalId, WithdrawalRecord,
};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use tracing::info;

/// Construction-time wiring for a `StreamEngine`.
pub struct EngineConfig {
    owner: Address,
    gateway: Option<Arc<dyn EncryptionGateway>>,
    sink: Arc<dyn EventSink>,
    first_event_id: u64,
}

impl EngineConfig {
    pub fn new(owner: Address) -> Self {
        Self {
            owner,
            gateway: None,
            sink: Arc::new(NullSink),
            first_event_id: 1,
        }
    }

    pub fn with_gateway(mut self, gateway: Arc<dyn EncryptionGateway>) -> Self {
        self.gateway = Some(gateway);
        self
    }

    pub fn with_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Resume event numbering after a restart (e.g. from an existing
    /// audit trail's last id + 1).
    pub fn with_first_event_id(mut self, id: u64) -> Self {
        self.first_event_id = id;
        self
    }
}

/// The authoritative accounting engine.
pub struct StreamEngine {
    owner: Address,
    gateway: Option<Arc<dyn EncryptionGateway>>,
    sink: Arc<dyn EventSink>,
    ledger: StreamLedger,
    registry: KeyRegistry,
    paused: AtomicBool,
    next_event_id: AtomicU64,
}

impl StreamEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            owner: config.owner,
            gateway: config.gateway,
            sink: config.sink,
            ledger: StreamLedger::new(),
            registry: KeyRegistry::new(),
            paused: AtomicBool::new(false),
            next_event_id: AtomicU64::new(config.first_event_id),
        }
    }

    pub fn owner(&self) -> &Address {
        &self.owner
    }

    // === Stream creation ===

    /// Create a stream funded with `total_amount`, vesting linearly over
    /// `duration` seconds from `start_time`.
    pub fn create_stream(
        &self,
        employer: Address,
        employee: Address,
        total_amount: u64,
        duration: u64,
        start_time: u64,
    ) -> EngineResult<StreamId> {
        self.ensure_running()?;
        let stream = self
            .ledger
            .create(employer, employee, total_amount, None, duration, start_time)?;
        info!(stream = %stream.id, amount = total_amount, "stream created");
        self.emit(|id| StreamEvent::stream_created(id, &stream));
        Ok(stream.id)
    }

    /// As `create_stream`, additionally storing the ciphertext handle the
    /// gateway produces for `total_amount`.
    pub fn create_stream_encrypted(
        &self,
        employer: Address,
        employee: Address,
        total_amount: u64,
        duration: u64,
        start_time: u64,
    ) -> EngineResult<StreamId> {
        self.ensure_running()?;
        let handle = self.gateway()?.encrypt(total_amount)?;
        let stream = self.ledger.create(
            employer,
            employee,
            total_amount,
            Some(handle),
            duration,
            start_time,
        )?;
        info!(stream = %stream.id, amount = total_amount, "encrypted stream created");
        self.emit(|id| StreamEvent::stream_created(id, &stream));
        Ok(stream.id)
    }

    // === Withdrawal ===

    /// Sweep the full available balance to the employee. Returns the
    /// amount paid.
    pub fn request_withdrawal(
        &self,
        stream_id: StreamId,
        requester: &Address,
        now: u64,
    ) -> EngineResult<u64> {
        self.ensure_running()?;
        let record = withdrawal::process(&self.ledger, stream_id, requester, now)?;
        info!(stream = %stream_id, amount = record.amount, "withdrawal processed");
        self.emit(|id| StreamEvent::withdrawal_processed(id, &record, requester.clone()));
        Ok(record.amount)
    }

    // === Lifecycle ===

    pub fn pause_stream(
        &self,
        stream_id: StreamId,
        requester: &Address,
        now: u64,
    ) -> EngineResult<()> {
        lifecycle::pause(&self.ledger, stream_id, requester, now)?;
        info!(stream = %stream_id, "stream paused");
        self.emit(|id| StreamEvent::stream_paused(id, stream_id, requester.clone(), now));
        Ok(())
    }

    pub fn resume_stream(
        &self,
        stream_id: StreamId,
        requester: &Address,
        now: u64,
    ) -> EngineResult<()> {
        lifecycle::resume(&self.ledger, stream_id, requester, now)?;
        info!(stream = %stream_id, "stream resumed");
        self.emit(|id| StreamEvent::stream_resumed(id, stream_id, requester.clone(), now));
        Ok(())
    }

    // === Queries ===

    pub fn get_stream(&self, stream_id: StreamId) -> EngineResult<Stream> {
        self.ledger.get(stream_id)
    }

    pub fn list_by_employer(&self, employer: &Address) -> Vec<StreamId> {
        self.ledger.list_by_employer(employer)
    }

    pub fn list_by_employee(&self, employee: &Address) -> Vec<StreamId> {
        self.ledger.list_by_employee(employee)
    }

    pub fn withdrawal_history(&self, stream_id: StreamId) -> EngineResult<Vec<WithdrawalRecord>> {
        self.ledger.history(stream_id)
    }

    pub fn get_withdrawal(&self, id: WithdrawalId) -> Option<WithdrawalRecord> {
        self.ledger.get_withdrawal(id)
    }

    pub fn stream_count(&self) -> u64 {
        self.ledger.stream_count()
    }

    /// Funded principal not yet paid out, across all streams.
    pub fn total_balance(&self) -> u128 {
        self.ledger.total_balance()
    }

    /// Amount earned by the employee at `now`.
    pub fn earned(&self, stream_id: StreamId, now: u64) -> EngineResult<u64> {
        Ok(accrual::earned(&self.ledger.get(stream_id)?, now))
    }

    /// Earned but not yet withdrawn at `now`.
    pub fn available(&self, stream_id: StreamId, now: u64) -> EngineResult<u64> {
        Ok(accrual::available(&self.ledger.get(stream_id)?, now))
    }

    /// Not yet earned at `now`.
    pub fn remaining(&self, stream_id: StreamId, now: u64) -> EngineResult<u64> {
        Ok(accrual::remaining(&self.ledger.get(stream_id)?, now))
    }

    /// Accrual progress at `now`, as a whole percentage.
    pub fn progress_percent(&self, stream_id: StreamId, now: u64) -> EngineResult<u64> {
        Ok(accrual::progress_percent(&self.ledger.get(stream_id)?, now))
    }

    pub fn status(&self, stream_id: StreamId, now: u64) -> EngineResult<StreamStatus> {
        Ok(self.ledger.get(stream_id)?.status(now))
    }

    // === Key registry ===

    pub fn register_key(&self, participant: Address, key: PublicKey, now: u64) {
        self.registry.register(participant.clone(), key);
        info!(participant = %participant.short(), "FHE key registered");
        self.emit(|id| StreamEvent::key_registered(id, participant.clone(), now));
    }

    pub fn key_registered(&self, participant: &Address) -> bool {
        self.registry.is_registered(participant)
    }

    pub fn public_key_of(&self, participant: &Address) -> Option<PublicKey> {
        self.registry.public_key_of(participant)
    }

    // === Encrypted queries ===

    /// Earned amount at `now` as a fresh ciphertext handle. Only stream
    /// participants may ask; the plaintext never leaves this call.
    pub fn encrypted_earned_amount(
        &self,
        stream_id: StreamId,
        requester: &Address,
        now: u64,
    ) -> EngineResult<CiphertextHandle> {
        let mut stream = self.ledger.get(stream_id)?;
        if requester != &stream.employer && requester != &stream.employee {
            return Err(EngineError::NotAuthorized(
                "only stream participants can view earned amounts".to_string(),
            ));
        }

        let gateway = self.gateway()?;
        let handle = stream.encrypted_amount.clone().ok_or_else(|| {
            EngineError::EncryptionGateway("stream carries no encrypted amount".to_string())
        })?;

        // Accrual math runs on the decrypted value, not the stored plaintext
        stream.total_amount = gateway.decrypt(&handle)?;
        gateway.encrypt(accrual::earned(&stream, now))
    }

    // === Emergency controls ===

    /// Owner-only: block stream creation and withdrawals engine-wide.
    /// Per-stream pause/resume and all queries stay available.
    pub fn emergency_pause(&self, requester: &Address, now: u64) -> EngineResult<()> {
        self.require_owner(requester)?;
        self.paused.store(true, Ordering::SeqCst);
        info!("engine paused");
        self.emit(|id| StreamEvent::engine_paused(id, requester.clone(), now));
        Ok(())
    }

    /// Owner-only: lift the engine-wide pause.
    pub fn emergency_resume(&self, requester: &Address, now: u64) -> EngineResult<()> {
        self.require_owner(requester)?;
        self.paused.store(false, Ordering::SeqCst);
        info!("engine resumed");
        self.emit(|id| StreamEvent::engine_resumed(id, requester.clone(), now));
        Ok(())
    }

    pub fn is_paused(&self) -> bool {
        self.paused.load(Ordering::SeqCst)
    }

    // === Internals ===

    fn ensure_running(&self) -> EngineResult<()> {
        if self.is_paused() {
            return Err(EngineError::EnginePaused);
        }
        Ok(())
    }

    fn require_owner(&self, requester: &Address) -> EngineResult<()> {
        if requester != &self.owner {
            return Err(EngineError::NotAuthorized(
                "only the owner can pause or resume the engine".to_string(),
            ));
        }
        Ok(())
    }

    fn gateway(&self) -> EngineResult<&Arc<dyn EncryptionGateway>> {
        self.gateway.as_ref().ok_or_else(|| {
            EngineError::EncryptionGateway("no encryption gateway configured".to_string())
        })
    }

    fn emit(&self, build: impl FnOnce(String) -> StreamEvent) {
        let id = self.next_event_id.fetch_add(1, Ordering::SeqCst);
        let event = build(StreamEvent::format_id(id));
        self.sink.record(&event);
    }
}
