use crate::audit::event::{compute_fingerprint, finalize_event, AuditEvent, ZERO_HASH_64};
use crate::determinism::ids::event_id_ulid;
use crate::error::CoreResult;
use serde_json::Value;

/// Outcome of a chain walk. A broken chain is data, not an error: verification
/// has to run against a known-bad log too.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationResult {
    pub is_valid: bool,
    pub broken_at_sequence_number: Option<u64>,
}

/// In-memory, append-only audit chain for a single contract session. One
/// writer at a time; `append` takes `&mut self`, so the borrow checker
/// enforces that without any locking. Entries are never updated, removed, or
/// reordered.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<AuditEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Wraps an externally sourced event sequence (e.g. a re-imported export)
    /// so it can be verified. No chain properties are assumed of the input.
    pub fn from_events(events: Vec<AuditEvent>) -> Self {
        Self { events }
    }

    pub fn append(&mut self, action: &str, payload: Value) -> CoreResult<AuditEvent> {
        let event = AuditEvent {
            id: event_id_ulid(),
            sequence_number: self.events.len() as u64 + 1,
            ts_utc: now_rfc3339_utc(),
            action: action.to_string(),
            payload,
            prev_fingerprint: self.last_fingerprint().to_string(),
            fingerprint: String::new(),
        };
        let event = finalize_event(event)?;
        self.events.push(event.clone());
        Ok(event)
    }

    /// Walks the chain first to last, checking sequence density, prev-link
    /// continuity, and that each stored fingerprint still matches a recompute
    /// from the stored fields. Reports the position of the first mismatch;
    /// never mutates the log.
    pub fn verify(&self) -> VerificationResult {
        let mut expected_prev = ZERO_HASH_64.to_string();
        for (i, event) in self.events.iter().enumerate() {
            let position = i as u64 + 1;
            let broken = VerificationResult {
                is_valid: false,
                broken_at_sequence_number: Some(position),
            };
            if event.sequence_number != position {
                return broken;
            }
            if event.prev_fingerprint != expected_prev {
                return broken;
            }
            match compute_fingerprint(event) {
                Ok(fp) if fp == event.fingerprint => {}
                _ => return broken,
            }
            expected_prev = event.fingerprint.clone();
        }
        VerificationResult {
            is_valid: true,
            broken_at_sequence_number: None,
        }
    }

    pub fn events(&self) -> &[AuditEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn last_fingerprint(&self) -> &str {
        self.events
            .last()
            .map_or(ZERO_HASH_64, |e| e.fingerprint.as_str())
    }

    /// Serializes the full log as one compact-JSON event per line, the shape
    /// the download/export surface ships to the user. Pure; no file I/O here.
    pub fn to_json_lines(&self) -> CoreResult<String> {
        let mut out = String::new();
        for event in &self.events {
            out.push_str(&serde_json::to_string(event)?);
            out.push('\n');
        }
        Ok(out)
    }

    pub fn from_json_lines(input: &str) -> CoreResult<Self> {
        let mut events = Vec::new();
        for line in input.lines() {
            if line.trim().is_empty() {
                continue;
            }
            events.push(serde_json::from_str(line)?);
        }
        Ok(Self { events })
    }
}

fn now_rfc3339_utc() -> String {
    time::OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap()
}
