//! Condensation pipeline: re-compress every summary in a session.
//!
//! Per-record LLM calls are independent, so they run concurrently with a
//! bounded `buffer_unordered` — the same pattern the rest of the crate's
//! corpus uses for fan-out API calls. Completion order is irrelevant
//! because results carry their record's position; the final `replace_all`
//! re-assembles them in the session's original order. Positions, not
//! source names, because a session may legitimately hold several records
//! for the same file.
//!
//! All-or-nothing: if any single call fails the session is left untouched.
//! A mix of condensed and stale records would silently skew the final
//! document toward whichever summaries happened to survive.

use crate::error::CramdownError;
use crate::pipeline::llm::Generator;
use crate::prompts;
use crate::session::{SessionStore, SummaryRecord};
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use tracing::{info, warn};

/// Condense every record of a session, swapping the record set in place.
///
/// Returns the number of condensed records. Fails with
/// [`CramdownError::EmptySession`] when the session has no records; the
/// check reads through [`SessionStore::get`], so an absent session is
/// never created as a side effect.
pub async fn condense_session(
    generator: &Arc<dyn Generator>,
    store: &SessionStore,
    session_id: &str,
    concurrency: usize,
) -> Result<usize, CramdownError> {
    let records = store.get(session_id);
    if records.is_empty() {
        return Err(CramdownError::EmptySession {
            session_id: session_id.to_string(),
        });
    }

    let count = records.len();
    info!(session = session_id, records = count, "condensing session");

    let results: Vec<Result<(usize, String), CramdownError>> =
        stream::iter(records.iter().enumerate().map(|(index, record)| {
            let generator = Arc::clone(generator);
            async move {
                let condensed = generator
                    .generate(prompts::condensation_prompt(), &record.summary)
                    .await?;
                Ok((index, condensed))
            }
        }))
        .buffer_unordered(concurrency.max(1))
        .collect()
        .await;

    // One failure fails the whole operation, before the store is touched.
    let mut condensed: Vec<(usize, String)> = Vec::with_capacity(count);
    for result in results {
        condensed.push(result?);
    }

    // Re-assemble in original session order: each record contributed
    // exactly one result, so sorting by position restores a 1:1 pairing.
    condensed.sort_unstable_by_key(|(index, _)| *index);
    let condensed_records: Vec<SummaryRecord> = records
        .iter()
        .zip(condensed)
        .map(|(record, (_, summary))| SummaryRecord::new(record.source_name.clone(), summary))
        .collect();

    if !store.replace_all(session_id, condensed_records) {
        // The session was cleared while condensation was in flight; the
        // cleared state wins and the condensed set is dropped.
        warn!(session = session_id, "session vanished during condensation");
        return Ok(0);
    }

    info!(session = session_id, records = count, "condensation complete");
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    /// Generator that shrinks every summary to a marker, failing on
    /// configured source texts.
    struct ShrinkGenerator {
        fail_on: Option<&'static str>,
    }

    #[async_trait]
    impl Generator for ShrinkGenerator {
        async fn generate(
            &self,
            _system_prompt: &str,
            user_message: &str,
        ) -> Result<String, CramdownError> {
            if self.fail_on == Some(user_message) {
                return Err(CramdownError::Generation {
                    detail: "injected failure".into(),
                });
            }
            Ok(format!("condensed:{user_message}"))
        }
    }

    fn generator(fail_on: Option<&'static str>) -> Arc<dyn Generator> {
        Arc::new(ShrinkGenerator { fail_on })
    }

    #[tokio::test]
    async fn empty_session_errors_without_creating_it() {
        let store = SessionStore::new();
        let err = condense_session(&generator(None), &store, "ghost", 4)
            .await
            .unwrap_err();
        assert!(matches!(err, CramdownError::EmptySession { .. }));
        assert!(store.get("ghost").is_empty());
    }

    #[tokio::test]
    async fn condenses_all_records_preserving_order() {
        let store = SessionStore::new();
        store.append("s1", SummaryRecord::new("a.pdf", "A"));
        store.append("s1", SummaryRecord::new("b.pdf", "B"));
        store.append("s1", SummaryRecord::new("c.pdf", "C"));

        let count = condense_session(&generator(None), &store, "s1", 2)
            .await
            .unwrap();
        assert_eq!(count, 3);

        let records = store.get("s1");
        let names: Vec<&str> = records.iter().map(|r| r.source_name.as_str()).collect();
        assert_eq!(names, vec!["a.pdf", "b.pdf", "c.pdf"]);
        assert_eq!(records[0].summary, "condensed:A");
        assert_eq!(records[2].summary, "condensed:C");
    }

    #[tokio::test]
    async fn duplicate_source_names_each_keep_their_own_condensed_text() {
        // Summarizing the same file twice is legal: append never dedupes.
        let store = SessionStore::new();
        store.append("s1", SummaryRecord::new("dup.pdf", "first half"));
        store.append("s1", SummaryRecord::new("dup.pdf", "second half"));

        let count = condense_session(&generator(None), &store, "s1", 2)
            .await
            .unwrap();
        assert_eq!(count, 2);

        let records = store.get("s1");
        assert_eq!(records[0].summary, "condensed:first half");
        assert_eq!(records[1].summary, "condensed:second half");
    }

    #[tokio::test]
    async fn one_failure_leaves_session_untouched() {
        let store = SessionStore::new();
        store.append("s1", SummaryRecord::new("a.pdf", "A"));
        store.append("s1", SummaryRecord::new("b.pdf", "B"));

        let err = condense_session(&generator(Some("B")), &store, "s1", 2)
            .await
            .unwrap_err();
        assert!(matches!(err, CramdownError::Generation { .. }));

        // Nothing replaced: both records still carry the original text.
        let records = store.get("s1");
        assert_eq!(records[0].summary, "A");
        assert_eq!(records[1].summary, "B");
    }

    #[tokio::test]
    async fn zero_concurrency_is_clamped_not_deadlocked() {
        let store = SessionStore::new();
        store.append("s1", SummaryRecord::new("a.pdf", "A"));
        let count = condense_session(&generator(None), &store, "s1", 0)
            .await
            .unwrap();
        assert_eq!(count, 1);
    }
}
