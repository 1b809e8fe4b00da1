//! In-memory session storage for accumulated summaries.
//!
//! A session is a caller-scoped, volatile list of [`SummaryRecord`]s keyed
//! by an opaque string id. The store is the only mutable shared state in
//! the crate, and it is always passed explicitly into the pipelines — no
//! ambient global — so tests and embedders control its lifetime.
//!
//! ## Consistency rules
//!
//! * Insertion order is preserved; it decides section order in every
//!   downstream document.
//! * `append` and `replace_all` are atomic with respect to each other:
//!   a condensation swap can never interleave with an append in a way that
//!   drops a record or mixes stale and condensed text.
//! * An empty session and an absent session are indistinguishable to
//!   readers. `clear` removes the session entirely and is idempotent.
//! * Sessions never expire; store lifetime = process lifetime. Nothing is
//!   persisted.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

/// The summarized output of one source document.
///
/// Immutable once created; condensation supersedes a record with a new one
/// under the same `source_name` rather than mutating it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRecord {
    /// Display name of the source document, e.g. `lecture1.pdf`.
    pub source_name: String,
    /// The Markdown summary text.
    pub summary: String,
}

impl SummaryRecord {
    pub fn new(source_name: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            source_name: source_name.into(),
            summary: summary.into(),
        }
    }
}

/// Mutex-guarded map from session id to its ordered records.
///
/// Wrap in an `Arc` to share across tasks. One mutex covers the whole map:
/// sessions are small and operations are a clone or a swap, so finer
/// locking buys nothing here.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: Mutex<HashMap<String, Vec<SummaryRecord>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record, creating the session if it does not exist yet.
    pub fn append(&self, session_id: &str, record: SummaryRecord) {
        let mut sessions = self.lock();
        sessions
            .entry(session_id.to_string())
            .or_default()
            .push(record);
    }

    /// Atomically swap a session's entire record list.
    ///
    /// Returns `false` without touching the store when the session does
    /// not exist. Condensation only ever runs after at least one append,
    /// so the no-op path is reachable only when another caller cleared the
    /// session mid-flight — in which case dropping the condensed set is
    /// exactly what `clear` asked for.
    pub fn replace_all(&self, session_id: &str, records: Vec<SummaryRecord>) -> bool {
        let mut sessions = self.lock();
        match sessions.get_mut(session_id) {
            Some(existing) => {
                *existing = records;
                true
            }
            None => false,
        }
    }

    /// All records of a session in insertion order; empty if absent.
    pub fn get(&self, session_id: &str) -> Vec<SummaryRecord> {
        self.lock().get(session_id).cloned().unwrap_or_default()
    }

    /// Number of records in a session; zero if absent.
    pub fn len(&self, session_id: &str) -> usize {
        self.lock().get(session_id).map_or(0, Vec::len)
    }

    /// Whether a session has no records (or does not exist — readers must
    /// not be able to tell the difference).
    pub fn is_empty(&self, session_id: &str) -> bool {
        self.len(session_id) == 0
    }

    /// Remove a session entirely. Idempotent.
    pub fn clear(&self, session_id: &str) {
        self.lock().remove(session_id);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Vec<SummaryRecord>>> {
        // A poisoned lock means a panic mid-clone or mid-swap; both leave
        // the map structurally intact, so recover the guard.
        self.sessions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
