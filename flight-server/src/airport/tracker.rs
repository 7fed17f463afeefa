//! Latest-input-wins tracking for overlapping lookups.
//!
//! Lookups triggered by typing can overlap, and an older one may finish
//! after a newer one. The lookup itself does not coordinate them; the
//! caller issues a ticket per call and only applies an answer whose ticket
//! is still the most recent.

use std::sync::atomic::{AtomicU64, Ordering};

/// Generation number of one issued lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

impl Ticket {
    pub fn generation(&self) -> u64 {
        self.0
    }
}

/// Issues tickets and decides whether an answer is still current.
#[derive(Debug, Default)]
pub struct SuggestionTracker {
    latest: AtomicU64,
}

impl SuggestionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a ticket for a new lookup; it supersedes all earlier tickets.
    pub fn issue(&self) -> Ticket {
        Ticket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Whether `ticket` is the most recently issued one.
    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }

    /// Pass `answer` through only if `ticket` is still current.
    pub fn accept<T>(&self, ticket: Ticket, answer: T) -> Option<T> {
        self.is_current(ticket).then_some(answer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use crate::airport::{
        AirportError, AirportLookup, AirportProvider, AirportRecord, GovernorConfig,
        LookupConfig, LookupState,
    };

    #[test]
    fn later_tickets_supersede_earlier() {
        let tracker = SuggestionTracker::new();
        let first = tracker.issue();
        assert!(tracker.is_current(first));

        let second = tracker.issue();
        assert!(!tracker.is_current(first));
        assert!(tracker.is_current(second));
        assert!(second > first);

        assert_eq!(tracker.accept(first, "stale"), None);
        assert_eq!(tracker.accept(second, "fresh"), Some("fresh"));
    }

    /// Provider whose reply time depends on the query.
    struct SlowProvider;

    impl AirportProvider for SlowProvider {
        async fn search_airports(&self, query: &str) -> Result<Vec<AirportRecord>, AirportError> {
            let delay = if query.starts_with("mad") { 300 } else { 10 };
            tokio::time::sleep(Duration::from_millis(delay)).await;
            Ok(vec![AirportRecord {
                code: query.to_uppercase(),
                name: query.to_string(),
                city: query.to_string(),
                country: "Test".to_string(),
                full_name: query.to_string(),
                provider_id: None,
            }])
        }
    }

    #[tokio::test(start_paused = true)]
    async fn stale_answer_from_slow_lookup_is_discarded() {
        let config = LookupConfig::default();
        let state = Arc::new(LookupState::new(
            &config,
            GovernorConfig::default().with_min_interval(Duration::ZERO),
        ));
        let lookup = Arc::new(AirportLookup::new(SlowProvider, state, config));
        let tracker = Arc::new(SuggestionTracker::new());
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();

        // The user types "mad", then quickly "mal"; the first lookup is slower.
        for query in ["mad", "mal"] {
            let ticket = tracker.issue();
            let lookup = lookup.clone();
            let tracker = tracker.clone();
            let tx = tx.clone();
            tokio::spawn(async move {
                let answer = lookup.search(query).await;
                tx.send((query, tracker.accept(ticket, answer))).unwrap();
            });
        }
        drop(tx);

        let mut applied = Vec::new();
        let mut finished = Vec::new();
        while let Some((query, accepted)) = rx.recv().await {
            finished.push(query);
            if let Some(answer) = accepted {
                applied.push(answer);
            }
        }

        // "mal" finished first and was applied; "mad" arrived late and was dropped.
        assert_eq!(finished, vec!["mal", "mad"]);
        assert_eq!(applied.len(), 1);
        assert_eq!(applied[0][0].code, "MAL");
    }
}
