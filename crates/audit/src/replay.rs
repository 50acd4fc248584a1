//! # Event Replay - read events back from JSONL files
//!
//! Reads the trail for history display, reconciliation, and summaries.

use crate::error::{AuditError, AuditResult};
use chrono::NaiveDate;
use paystream_core::{Address, StreamEvent, StreamEventKind, StreamId};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

/// Reads events from a log directory.
pub struct EventReader {
    base_path: PathBuf,
}

impl EventReader {
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    /// All events in one file, in append order.
    pub fn read_file(&self, file_path: &Path) -> AuditResult<Vec<StreamEvent>> {
        let file = File::open(file_path)?;
        let reader = BufReader::new(file);
        let mut events = Vec::new();

        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            events.push(serde_json::from_str(&line)?);
        }

        Ok(events)
    }

    /// Events for one day (`YYYY-MM-DD`); empty if the file is absent.
    pub fn read_date(&self, date: &str) -> AuditResult<Vec<StreamEvent>> {
        let file_path = self.base_path.join(format!("{date}.jsonl"));
        if file_path.exists() {
            self.read_file(&file_path)
        } else {
            Ok(Vec::new())
        }
    }

    /// Events across an inclusive date range.
    pub fn read_range(&self, from: &str, to: &str) -> AuditResult<Vec<StreamEvent>> {
        let from_date = NaiveDate::parse_from_str(from, "%Y-%m-%d")
            .map_err(|e| AuditError::InvalidDate(format!("{from}: {e}")))?;
        let to_date = NaiveDate::parse_from_str(to, "%Y-%m-%d")
            .map_err(|e| AuditError::InvalidDate(format!("{to}: {e}")))?;

        let mut all_events = Vec::new();
        let mut current = from_date;
        while current <= to_date {
            all_events.extend(self.read_date(&current.format("%Y-%m-%d").to_string())?);
            current = match current.succ_opt() {
                Some(next) => next,
                None => break,
            };
        }

        Ok(all_events)
    }

    /// Every event in the trail, oldest file first.
    pub fn read_all(&self) -> AuditResult<Vec<StreamEvent>> {
        let mut all_events = Vec::new();

        if !self.base_path.exists() {
            return Ok(all_events);
        }

        let mut files: Vec<PathBuf> = std::fs::read_dir(&self.base_path)?
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.extension().map_or(false, |ext| ext == "jsonl"))
            .collect();
        files.sort();

        for file_path in files {
            all_events.extend(self.read_file(&file_path)?);
        }

        Ok(all_events)
    }
}

/// Filters replayed events.
#[derive(Default)]
pub struct EventFilter {
    pub stream_id: Option<StreamId>,
    pub actor: Option<Address>,
    pub kinds: Option<Vec<StreamEventKind>>,
    pub min_amount: Option<u64>,
}

impl EventFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stream(mut self, stream_id: StreamId) -> Self {
        self.stream_id = Some(stream_id);
        self
    }

    pub fn actor(mut self, actor: Address) -> Self {
        self.actor = Some(actor);
        self
    }

    pub fn kinds(mut self, kinds: Vec<StreamEventKind>) -> Self {
        self.kinds = Some(kinds);
        self
    }

    pub fn min_amount(mut self, min: u64) -> Self {
        self.min_amount = Some(min);
        self
    }

    pub fn matches(&self, event: &StreamEvent) -> bool {
        if let Some(stream_id) = self.stream_id {
            if event.stream_id != Some(stream_id) {
                return false;
            }
        }

        if let Some(ref actor) = self.actor {
            if &event.actor != actor {
                return false;
            }
        }

        if let Some(ref kinds) = self.kinds {
            if !kinds.contains(&event.kind) {
                return false;
            }
        }

        if let Some(min) = self.min_amount {
            match event.amount {
                Some(amount) if amount >= min => {}
                _ => return false,
            }
        }

        true
    }

    pub fn apply(&self, events: Vec<StreamEvent>) -> Vec<StreamEvent> {
        events.into_iter().filter(|e| self.matches(e)).collect()
    }
}

/// Aggregate view over a replayed trail.
pub struct ActivitySummary {
    pub total_events: usize,
    pub events_by_kind: HashMap<&'static str, usize>,
    pub total_withdrawn: u128,
    pub streams_created: usize,
}

impl ActivitySummary {
    pub fn generate(events: &[StreamEvent]) -> Self {
        let mut summary = Self {
            total_events: events.len(),
            events_by_kind: HashMap::new(),
            total_withdrawn: 0,
            streams_created: 0,
        };

        for event in events {
            *summary.events_by_kind.entry(event.kind.as_str()).or_insert(0) += 1;
            match event.kind {
                StreamEventKind::WithdrawalProcessed => {
                    summary.total_withdrawn += event.amount.unwrap_or(0) as u128;
                }
                StreamEventKind::StreamCreated => summary.streams_created += 1,
                _ => {}
            }
        }

        summary
    }

    pub fn summary(&self) -> String {
        format!(
            "Audit summary:\n\
             - Total events: {}\n\
             - Streams created: {}\n\
             - Total withdrawn: {}",
            self.total_events, self.streams_created, self.total_withdrawn
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log::EventLog;
    use paystream_core::{WithdrawalId, WithdrawalRecord};
    use tempfile::tempdir;

    fn addr(n: u64) -> Address {
        Address::parse(&format!("0x{n:040x}")).unwrap()
    }

    fn withdrawal_event(event_id: u64, stream: u64, amount: u64) -> StreamEvent {
        let record =
            WithdrawalRecord::new(WithdrawalId(event_id), StreamId(stream), amount, 100, amount);
        StreamEvent::withdrawal_processed(StreamEvent::format_id(event_id), &record, addr(2))
    }

    #[test]
    fn test_reader_round_trip() {
        let dir = tempdir().unwrap();
        let log = EventLog::new(dir.path()).unwrap();

        let first = StreamEvent::key_registered("EVT_000001".to_string(), addr(1), 10);
        let second = withdrawal_event(2, 1, 250);
        log.append(&first).unwrap();
        log.append(&second).unwrap();
        log.flush().unwrap();

        let reader = EventReader::new(dir.path());
        let events = reader.read_all().unwrap();
        assert_eq!(events, vec![first, second]);
    }

    #[test]
    fn test_read_missing_date_is_empty() {
        let dir = tempdir().unwrap();
        let reader = EventReader::new(dir.path());
        assert!(reader.read_date("1999-01-01").unwrap().is_empty());
    }

    #[test]
    fn test_read_range_rejects_bad_dates() {
        let dir = tempdir().unwrap();
        let reader = EventReader::new(dir.path());
        let err = reader.read_range("not-a-date", "2026-01-01").unwrap_err();
        assert!(matches!(err, AuditError::InvalidDate(_)));
    }

    #[test]
    fn test_filter() {
        let events = vec![
            StreamEvent::key_registered("EVT_000001".to_string(), addr(1), 10),
            withdrawal_event(2, 1, 250),
            withdrawal_event(3, 2, 900),
        ];

        let filter = EventFilter::new().stream(StreamId(1));
        assert_eq!(filter.apply(events.clone()).len(), 1);

        let filter = EventFilter::new().kinds(vec![StreamEventKind::WithdrawalProcessed]);
        assert_eq!(filter.apply(events.clone()).len(), 2);

        let filter = EventFilter::new().min_amount(500);
        let matched = filter.apply(events.clone());
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].amount, Some(900));

        let filter = EventFilter::new().actor(addr(1));
        assert_eq!(filter.apply(events).len(), 1);
    }

    #[test]
    fn test_activity_summary() {
        let events = vec![
            StreamEvent::key_registered("EVT_000001".to_string(), addr(1), 10),
            withdrawal_event(2, 1, 250),
            withdrawal_event(3, 1, 150),
        ];

        let summary = ActivitySummary::generate(&events);
        assert_eq!(summary.total_events, 3);
        assert_eq!(summary.total_withdrawn, 400);
        assert_eq!(summary.events_by_kind.get("withdrawal_processed"), Some(&2));
        assert!(summary.summary().contains("Total withdrawn: 400"));
    }
}
