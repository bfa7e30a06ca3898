//! Transition journal value types.
//!
//! A committed transition produces a [`TransitionRecord`] domain event. The
//! engine itself keeps no history; hosts that want an audit trail collect
//! the records into a [`Journal`], an immutable ordered value.

use super::state::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use uuid::Uuid;

/// Record of one committed transition.
///
/// Produced by a successful `transition_to` call, after triggers ran and
/// the new state was written back to the record.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct TransitionRecord {
    /// Unique identifier of this event.
    pub id: Uuid,
    /// Identifier of the action that was applied.
    pub action: String,
    /// The state the record moved from.
    pub from: State,
    /// The state the record moved to.
    pub to: State,
    /// When the transition was committed.
    pub at: DateTime<Utc>,
}

/// Ordered, immutable collection of transition records.
///
/// `record` returns a new journal with the event appended; the original is
/// left untouched.
///
/// # Example
///
/// ```rust
/// use chrono::Utc;
/// use flowstate::{Journal, State, TransitionRecord};
/// use uuid::Uuid;
///
/// let journal = Journal::new();
/// let journal = journal.record(TransitionRecord {
///     id: Uuid::new_v4(),
///     action: "Submit".to_string(),
///     from: State::new("draft"),
///     to: State::new("submitted"),
///     at: Utc::now(),
/// });
///
/// let path = journal.path();
/// assert_eq!(path.len(), 2); // draft -> submitted
/// assert_eq!(path[0].identifier(), "draft");
/// assert_eq!(path[1].identifier(), "submitted");
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Journal {
    records: Vec<TransitionRecord>,
}

impl Journal {
    /// Create an empty journal.
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Append a record, returning a new journal.
    pub fn record(&self, record: TransitionRecord) -> Self {
        let mut records = self.records.clone();
        records.push(record);
        Self { records }
    }

    /// All recorded events, in order.
    pub fn records(&self) -> &[TransitionRecord] {
        &self.records
    }

    /// The sequence of states traversed: the first record's origin, then
    /// each record's target.
    pub fn path(&self) -> Vec<&State> {
        let mut path = Vec::new();
        if let Some(first) = self.records.first() {
            path.push(&first.from);
        }
        for record in &self.records {
            path.push(&record.to);
        }
        path
    }

    /// Elapsed time between the first and last record.
    ///
    /// Returns `None` when the journal is empty, and also when the last
    /// record's timestamp precedes the first's (records imported out of
    /// order, or a clock that moved backwards between commits).
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.records.first()?, self.records.last()?);
        last.at.signed_duration_since(first.at).to_std().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(action: &str, from: &str, to: &str) -> TransitionRecord {
        TransitionRecord {
            id: Uuid::new_v4(),
            action: action.to_string(),
            from: State::new(from),
            to: State::new(to),
            at: Utc::now(),
        }
    }

    #[test]
    fn new_journal_is_empty() {
        let journal = Journal::new();
        assert!(journal.records().is_empty());
        assert!(journal.path().is_empty());
        assert!(journal.duration().is_none());
    }

    #[test]
    fn record_leaves_original_untouched() {
        let journal = Journal::new();
        let appended = journal.record(record("Submit", "draft", "submitted"));

        assert!(journal.records().is_empty());
        assert_eq!(appended.records().len(), 1);
    }

    #[test]
    fn path_follows_recorded_order() {
        let journal = Journal::new()
            .record(record("Submit", "draft", "submitted"))
            .record(record("Publish", "submitted", "published"));

        let path = journal.path();
        assert_eq!(path.len(), 3);
        assert_eq!(path[0].identifier(), "draft");
        assert_eq!(path[1].identifier(), "submitted");
        assert_eq!(path[2].identifier(), "published");
    }

    #[test]
    fn duration_spans_first_to_last() {
        let earlier = Utc::now() - chrono::Duration::seconds(5);
        let mut first = record("Submit", "draft", "submitted");
        first.at = earlier;

        let journal = Journal::new()
            .record(first)
            .record(record("Publish", "submitted", "published"));

        let duration = journal.duration().unwrap();
        assert!(duration >= Duration::from_secs(5));
    }

    #[test]
    fn duration_is_none_for_out_of_order_timestamps() {
        let mut first = record("Submit", "draft", "submitted");
        first.at = Utc::now() + chrono::Duration::seconds(5);

        let journal = Journal::new()
            .record(first)
            .record(record("Publish", "submitted", "published"));

        assert!(journal.duration().is_none());
    }

    #[test]
    fn journal_round_trips_through_serde() {
        let journal = Journal::new().record(record("Submit", "draft", "submitted"));

        let json = serde_json::to_string(&journal).unwrap();
        let restored: Journal = serde_json::from_str(&json).unwrap();

        assert_eq!(restored.records(), journal.records());
    }
}
