//! Run audit trail
//!
//! Append-only event stream, one JSON object per line. Every run gets its
//! own `events.jsonl`; the in-memory record list is kept for inspection
//! and replay.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::debug;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventKind {
    RunStarted,
    PlanCreated,
    TaskStarted,
    TaskFinished,
    TriggersFired,
    RunComplete,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEvent {
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: EventKind,
    pub data: Value,
}

/// Append-only event sink for one run.
pub struct EventLog {
    path: Option<PathBuf>,
    records: Mutex<Vec<AuditEvent>>,
}

impl EventLog {
    /// Event log backed by a JSONL file.
    pub fn new(path: PathBuf) -> Self {
        Self {
            path: Some(path),
            records: Mutex::new(Vec::new()),
        }
    }

    /// Memory-only log, used in tests.
    pub fn in_memory() -> Self {
        Self {
            path: None,
            records: Mutex::new(Vec::new()),
        }
    }

    /// Append one event. The file write happens before the in-memory
    /// record, so the durable stream never lags the observable one.
    pub fn emit(&self, kind: EventKind, data: Value) -> crate::Result<()> {
        let event = AuditEvent {
            timestamp: Utc::now(),
            kind,
            data,
        };

        if let Some(path) = &self.path {
            let line = serde_json::to_string(&event)?;
            let mut file = OpenOptions::new().create(true).append(true).open(path)?;
            writeln!(file, "{}", line)?;
        }

        debug!(kind = ?event.kind, "Audit event emitted");

        let mut records = self
            .records
            .lock()
            .map_err(|_| crate::error::ResearchError::AuditError("event log poisoned".to_string()))?;
        records.push(event);

        Ok(())
    }

    pub fn records(&self) -> Vec<AuditEvent> {
        self.records
            .lock()
            .map(|records| records.clone())
            .unwrap_or_default()
    }
}
