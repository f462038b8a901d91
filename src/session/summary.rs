use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::session::deck::DeckSession;

/// Immutable snapshot taken when a study run completes, for the
/// completion screen and the in-memory session log. Nothing here is
/// persisted; the log lives only for the process lifetime.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StudySummary {
    pub deck_size: usize,
    pub known: usize,
    pub review: usize,
    pub review_mode: bool,
    pub category: Option<String>,
    /// Label of the deck studied: a topic name, or None for the full deck.
    pub topic: Option<String>,
    pub finished_at: DateTime<Utc>,
}

impl StudySummary {
    pub fn from_session(session: &DeckSession, topic: Option<&str>) -> Self {
        Self {
            deck_size: session.visible_len(),
            known: session.known_count(),
            review: session.review_count(),
            review_mode: session.filter().review_only,
            category: session.filter().category.clone(),
            topic: topic.map(|t| t.to_string()),
            finished_at: Utc::now(),
        }
    }

    /// Fraction of the studied view marked known, for the summary bar.
    pub fn known_ratio(&self) -> f64 {
        if self.deck_size == 0 {
            return 0.0;
        }
        (self.known as f64 / self.deck_size as f64).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Card;

    fn session_of(n: u32) -> DeckSession {
        DeckSession::new(
            (1..=n)
                .map(|id| Card {
                    id,
                    word: format!("w{id}"),
                    definition: "d".to_string(),
                    example: "e".to_string(),
                    pronunciation: None,
                    category_id: None,
                })
                .collect(),
        )
    }

    #[test]
    fn test_summary_counts() {
        let mut session = session_of(4);
        session.mark_known(1);
        session.mark_known(2);
        session.mark_unknown(3);
        let summary = StudySummary::from_session(&session, None);
        assert_eq!(summary.deck_size, 4);
        assert_eq!(summary.known, 2);
        assert_eq!(summary.review, 1);
        assert!((summary.known_ratio() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_summary_review_mode_counts_view_size() {
        let mut session = session_of(4);
        session.mark_unknown(2);
        session.mark_unknown(4);
        session.toggle_review_only();
        let summary = StudySummary::from_session(&session, Some("Core Vocabulary"));
        assert_eq!(summary.deck_size, 2);
        assert!(summary.review_mode);
        assert_eq!(summary.topic.as_deref(), Some("Core Vocabulary"));
    }

    #[test]
    fn test_known_ratio_empty_view() {
        let session = session_of(0);
        let summary = StudySummary::from_session(&session, None);
        assert_eq!(summary.known_ratio(), 0.0);
    }
}
