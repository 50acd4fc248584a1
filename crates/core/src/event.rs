//! # Event Module
//!
//! Audit events mirrored on every committed engine mutation. Events are
//! immutable, append-only, and serialized to JSONL by the audit trail.

use crate::address::Address;
use crate::stream::{Stream, StreamId};
use crate::withdrawal::{WithdrawalId, WithdrawalRecord};
use serde::{Deserialize, Serialize};
use std::fmt;

/// What happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreamEventKind {
    // === Stream lifecycle ===
    StreamCreated,
    StreamPaused,
    StreamResumed,

    // === Payouts ===
    WithdrawalProcessed,

    // === Key registry ===
    KeyRegistered,

    // === Engine-wide controls ===
    EnginePaused,
    EngineResumed,
}

impl StreamEventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StreamEventKind::StreamCreated => "stream_created",
            StreamEventKind::StreamPaused => "stream_paused",
            StreamEventKind::StreamResumed => "stream_resumed",
            StreamEventKind::WithdrawalProcessed => "withdrawal_processed",
            StreamEventKind::KeyRegistered => "key_registered",
            StreamEventKind::EnginePaused => "engine_paused",
            StreamEventKind::EngineResumed => "engine_resumed",
        }
    }
}

impl fmt::Display for StreamEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One committed mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamEvent {
    /// ID unique to this event (EVT_000001, EVT_000002, ...)
    pub event_id: String,
    /// Logical instant of the mutation (seconds)
    pub timestamp: u64,
    pub kind: StreamEventKind,
    /// Participant who triggered the mutation
    pub actor: Address,
    /// Stream involved, if any (engine-wide events carry none)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream_id: Option<StreamId>,
    /// Amount moved, for payout events
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<u64>,
    /// Withdrawal record produced, for payout events
    #[serde(skip_serializing_if = "Option::is_none")]
    pub withdrawal_id: Option<WithdrawalId>,
}

impl StreamEvent {
    fn new(event_id: String, timestamp: u64, kind: StreamEventKind, actor: Address) -> Self {
        Self {
            event_id,
            timestamp,
            kind,
            actor,
            stream_id: None,
            amount: None,
            withdrawal_id: None,
        }
    }

    // === Factory methods ===

    pub fn stream_created(event_id: String, stream: &Stream) -> Self {
        let mut event = Self::new(
            event_id,
            stream.start_time,
            StreamEventKind::StreamCreated,
            stream.employer.clone(),
        );
        event.stream_id = Some(stream.id);
        event.amount = Some(stream.total_amount);
        event
    }

    pub fn stream_paused(event_id: String, stream_id: StreamId, actor: Address, now: u64) -> Self {
        let mut event = Self::new(event_id, now, StreamEventKind::StreamPaused, actor);
        event.stream_id = Some(stream_id);
        event
    }

    pub fn stream_resumed(event_id: String, stream_id: StreamId, actor: Address, now: u64) -> Self {
        let mut event = Self::new(event_id, now, StreamEventKind::StreamResumed, actor);
        event.stream_id = Some(stream_id);
        event
    }

    pub fn withdrawal_processed(event_id: String, record: &WithdrawalRecord, actor: Address) -> Self {
        let mut event = Self::new(
            event_id,
            record.timestamp,
            StreamEventKind::WithdrawalProcessed,
            actor,
        );
        event.stream_id = Some(record.stream_id);
        event.amount = Some(record.amount);
        event.withdrawal_id = Some(record.id);
        event
    }

    pub fn key_registered(event_id: String, actor: Address, now: u64) -> Self {
        Self::new(event_id, now, StreamEventKind::KeyRegistered, actor)
    }

    pub fn engine_paused(event_id: String, actor: Address, now: u64) -> Self {
        Self::new(event_id, now, StreamEventKind::EnginePaused, actor)
    }

    pub fn engine_resumed(event_id: String, actor: Address, now: u64) -> Self {
        Self::new(event_id, now, StreamEventKind::EngineResumed, actor)
    }

    /// Format an event id from a counter value
    pub fn format_id(counter: u64) -> String {
        format!("EVT_{counter:06}")
    }

    /// Parse the counter back out of an event id
    pub fn parse_id(event_id: &str) -> Option<u64> {
        event_id.strip_prefix("EVT_")?.parse().ok()
    }

    /// Serialize to a single JSONL line
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl fmt::Display for StreamEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {} by {}", self.timestamp, self.kind, self.actor.short())?;
        if let Some(stream_id) = self.stream_id {
            write!(f, " on stream {stream_id}")?;
        }
        Ok(())
    }
}
