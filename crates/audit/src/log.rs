//! # Event Log - append-only JSONL writer
//!
//! Files are organized by day: `data/events/2026-08-05.jsonl`. Each append
//! is flushed immediately so the trail survives a crash of the host
//! process. As an `EventSink` the log must never fail the mutation it
//! records, so sink-path write failures are reported through `tracing`
//! and the direct `append` API stays fallible for callers that care.

use crate::error::AuditResult;
use chrono::Utc;
use paystream_core::StreamEvent;
use paystream_engine::EventSink;
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

/// Append-only JSONL event log.
pub struct EventLog {
    base_path: PathBuf,
    current_writer: Mutex<Option<LogWriter>>,
}

struct LogWriter {
    date: String,
    writer: BufWriter<File>,
}

impl EventLog {
    /// Open (or create) a log rooted at `base_path`.
    pub fn new<P: AsRef<Path>>(base_path: P) -> AuditResult<Self> {
        let base_path = base_path.as_ref().to_path_buf();
        fs::create_dir_all(&base_path)?;

        Ok(Self {
            base_path,
            current_writer: Mutex::new(None),
        })
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Highest event counter present in the trail, for resuming event
    /// numbering across restarts. Zero for an empty trail.
    pub fn last_event_id(&self) -> AuditResult<u64> {
        let mut max_id = 0;
        for path in self.list_files()? {
            let content = fs::read_to_string(&path)?;
            for line in content.lines() {
                if let Ok(event) = serde_json::from_str::<StreamEvent>(line) {
                    if let Some(id) = StreamEvent::parse_id(&event.event_id) {
                        max_id = max_id.max(id);
                    }
                }
            }
        }
        Ok(max_id)
    }

    fn file_path(&self, date: &str) -> PathBuf {
        self.base_path.join(format!("{date}.jsonl"))
    }

    fn current_date() -> String {
        Utc::now().format("%Y-%m-%d").to_string()
    }

    /// Append one event to today's file.
    pub fn append(&self, event: &StreamEvent) -> AuditResult<()> {
        let date = Self::current_date();
        let json = event.to_json()?;

        let mut guard = self.current_writer.lock().unwrap();

        let needs_new_file = guard.as_ref().map_or(true, |w| w.date != date);
        if needs_new_file {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(self.file_path(&date))?;
            *guard = Some(LogWriter {
                date,
                writer: BufWriter::new(file),
            });
        }

        if let Some(ref mut w) = *guard {
            writeln!(w.writer, "{json}")?;
            w.writer.flush()?;
        }

        Ok(())
    }

    pub fn append_batch(&self, events: &[StreamEvent]) -> AuditResult<()> {
        for event in events {
            self.append(event)?;
        }
        Ok(())
    }

    /// All event files, oldest first.
    pub fn list_files(&self) -> AuditResult<Vec<PathBuf>> {
        let mut files = Vec::new();
        for entry in fs::read_dir(&self.base_path)? {
            let path = entry?.path();
            if path.extension().map_or(false, |ext| ext == "jsonl") {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }

    pub fn file_for_date(&self, date: &str) -> Option<PathBuf> {
        let path = self.file_path(date);
        path.exists().then_some(path)
    }

    pub fn flush(&self) -> AuditResult<()> {
        let mut guard = self.current_writer.lock().unwrap();
        if let Some(ref mut w) = *guard {
            w.writer.flush()?;
        }
        Ok(())
    }
}

impl Drop for EventLog {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}

impl EventSink for EventLog {
    fn record(&self, event: &StreamEvent) {
        if let Err(err) = self.append(event) {
            warn!(event_id = %event.event_id, %err, "failed to append audit event");
        }
    }
}
