//! Append-only event log with a SHA-256 chain digest.
//!
//! Every observable mutation appends one [`EventRecord`]. The running digest
//! commits to the full ordered history: two logs with the same digest saw
//! the same events in the same order, so an auditor can compare engines (or
//! a replay) by comparing 32 bytes.

use chrono::Utc;
use curio_types::{EventRecord, MarketEvent};
use sha2::{Digest, Sha256};

/// Ordered, append-only log of market events.
#[derive(Debug, Default)]
pub struct EventLog {
    records: Vec<EventRecord>,
    digest: [u8; 32],
}

impl EventLog {
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            digest: [0u8; 32],
        }
    }

    /// Append an event, advancing the chain digest.
    pub fn emit(&mut self, event: MarketEvent) -> &EventRecord {
        let seq = self.records.len() as u64;

        // Chain over (prev digest, seq, display form). Timestamps are
        // recorded but excluded from the digest so a replay chains
        // identically.
        let mut hasher = Sha256::new();
        hasher.update(b"curio:event:v1:");
        hasher.update(self.digest);
        hasher.update(seq.to_le_bytes());
        hasher.update(event.to_string().as_bytes());
        self.digest = hasher.finalize().into();

        self.records.push(EventRecord {
            seq,
            at: Utc::now(),
            event,
        });
        self.records.last().expect("just pushed")
    }

    /// All records in emission order.
    #[must_use]
    pub fn records(&self) -> &[EventRecord] {
        &self.records
    }

    /// The most recent record, if any.
    #[must_use]
    pub fn latest(&self) -> Option<&EventRecord> {
        self.records.last()
    }

    /// Records whose event carries the given tag, in order.
    #[must_use]
    pub fn with_tag(&self, tag: &str) -> Vec<&EventRecord> {
        self.records
            .iter()
            .filter(|record| record.event.tag() == tag)
            .collect()
    }

    /// Hex form of the running chain digest.
    #[must_use]
    pub fn digest_hex(&self) -> String {
        hex::encode(self.digest)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
