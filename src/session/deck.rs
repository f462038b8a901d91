use std::collections::BTreeSet;

use crate::catalog::{Card, CardId};

/// Active view restriction: a category filter and a review-only toggle,
/// applied in that order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DeckFilter {
    pub category: Option<String>,
    pub review_only: bool,
}

/// What the study screen should show for the current session state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeckStatus<'a> {
    Showing(&'a Card),
    /// The cursor has run past the end of a non-empty view.
    Complete,
    /// The active filter selects no cards. Distinct from Complete: there
    /// was nothing to traverse in the first place.
    NoMatches,
}

/// The review state machine for one study run over a fixed catalog slice.
///
/// The session owns its card list for its whole lifetime; it is created
/// when a study view opens and dropped when the view closes. The visible
/// view is always recomputed from `cards`, `filter` and `review` — it is
/// never cached, so it cannot go stale when the sets change.
#[derive(Clone, Debug)]
pub struct DeckSession {
    cards: Vec<Card>,
    known: BTreeSet<CardId>,
    review: BTreeSet<CardId>,
    filter: DeckFilter,
    /// Index into the visible (filtered) view, not the raw card list.
    cursor: usize,
    complete: bool,
}

impl DeckSession {
    pub fn new(cards: Vec<Card>) -> Self {
        Self {
            cards,
            known: BTreeSet::new(),
            review: BTreeSet::new(),
            filter: DeckFilter::default(),
            cursor: 0,
            complete: false,
        }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn filter(&self) -> &DeckFilter {
        &self.filter
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The filtered view: category equality first, then review membership,
    /// catalog order preserved. Pure with respect to the session state.
    pub fn visible_cards(&self) -> Vec<&Card> {
        self.cards
            .iter()
            .filter(|card| match self.filter.category {
                Some(ref wanted) => card.category_id.as_deref() == Some(wanted.as_str()),
                None => true,
            })
            .filter(|card| !self.filter.review_only || self.review.contains(&card.id))
            .collect()
    }

    pub fn visible_len(&self) -> usize {
        self.visible_cards().len()
    }

    /// Completion is a derived read: either an advance hit the end, or the
    /// view shrank underneath the cursor (e.g. the last review card was
    /// marked known while in review mode).
    pub fn is_complete(&self) -> bool {
        let len = self.visible_len();
        self.complete || (len > 0 && self.cursor >= len)
    }

    pub fn status(&self) -> DeckStatus<'_> {
        if self.is_complete() {
            return DeckStatus::Complete;
        }
        let visible = self.visible_cards();
        match visible.get(self.cursor) {
            Some(card) => DeckStatus::Showing(card),
            None => DeckStatus::NoMatches,
        }
    }

    /// Move to the next card, or complete when there is no next card.
    /// Advancing over an empty view completes immediately.
    pub fn advance(&mut self) {
        if self.cursor + 1 < self.visible_len() {
            self.cursor += 1;
        } else {
            self.complete = true;
        }
    }

    /// Move back one card; no-op at the start of the view.
    pub fn retreat(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
    }

    /// Mark a card as known. Removes it from the review set: the two sets
    /// are mutually exclusive after every transition. Ids not in the
    /// session's card list are absorbed as no-ops so stale references
    /// from the UI cannot poison the sets.
    pub fn mark_known(&mut self, id: CardId) {
        if !self.contains_card(id) {
            return;
        }
        self.known.insert(id);
        self.review.remove(&id);
    }

    /// Flag a card for review, removing it from the known set.
    pub fn mark_unknown(&mut self, id: CardId) {
        if !self.contains_card(id) {
            return;
        }
        self.review.insert(id);
        self.known.remove(&id);
    }

    fn contains_card(&self, id: CardId) -> bool {
        self.cards.iter().any(|c| c.id == id)
    }

    /// Replace the filter wholesale. The cursor always resets to 0 and the
    /// completion flag clears; an empty resulting view reads as NoMatches.
    pub fn set_filter(&mut self, filter: DeckFilter) {
        self.filter = filter;
        self.cursor = 0;
        self.complete = false;
    }

    pub fn set_category(&mut self, category: Option<String>) {
        let review_only = self.filter.review_only;
        self.set_filter(DeckFilter {
            category,
            review_only,
        });
    }

    pub fn toggle_review_only(&mut self) {
        let filter = DeckFilter {
            category: self.filter.category.clone(),
            review_only: !self.filter.review_only,
        };
        self.set_filter(filter);
    }

    /// Back to the start of the current view. Known/review progress is
    /// kept; only the position resets.
    pub fn reset(&mut self) {
        self.cursor = 0;
        self.complete = false;
    }

    pub fn progress_percent(&self) -> f64 {
        let len = self.visible_len();
        if len == 0 {
            return 0.0;
        }
        (self.cursor as f64 / len as f64 * 100.0).clamp(0.0, 100.0)
    }

    pub fn known_count(&self) -> usize {
        self.known.len()
    }

    pub fn review_count(&self) -> usize {
        self.review.len()
    }

    pub fn is_known(&self, id: CardId) -> bool {
        self.known.contains(&id)
    }

    pub fn is_flagged_for_review(&self, id: CardId) -> bool {
        self.review.contains(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(id: CardId, category: &str) -> Card {
        Card {
            id,
            word: format!("word{id}"),
            definition: format!("definition {id}"),
            example: format!("example {id}"),
            pronunciation: None,
            category_id: (!category.is_empty()).then(|| category.to_string()),
        }
    }

    fn three_card_session() -> DeckSession {
        DeckSession::new(vec![
            card(1, "vocabulary"),
            card(2, "vocabulary"),
            card(3, "academic"),
        ])
    }

    #[test]
    fn test_new_session_shows_first_card() {
        let session = three_card_session();
        assert_eq!(session.cursor(), 0);
        assert!(!session.is_complete());
        match session.status() {
            DeckStatus::Showing(c) => assert_eq!(c.id, 1),
            other => panic!("expected Showing, got {other:?}"),
        }
    }

    #[test]
    fn test_visible_cards_is_deterministic() {
        let mut session = three_card_session();
        session.mark_unknown(2);
        session.set_filter(DeckFilter {
            category: Some("vocabulary".to_string()),
            review_only: true,
        });
        let a: Vec<CardId> = session.visible_cards().iter().map(|c| c.id).collect();
        let b: Vec<CardId> = session.visible_cards().iter().map(|c| c.id).collect();
        assert_eq!(a, b);
        assert_eq!(a, vec![2]);
    }

    #[test]
    fn test_advance_through_deck_then_complete() {
        let mut session = three_card_session();
        session.advance();
        assert_eq!(session.cursor(), 1);
        session.advance();
        assert_eq!(session.cursor(), 2);
        assert!(!session.is_complete());
        session.advance();
        assert!(session.is_complete());
        assert_eq!(session.status(), DeckStatus::Complete);
        // No transition out of Complete via advance
        session.advance();
        assert!(session.is_complete());
    }

    #[test]
    fn test_retreat_clamps_at_zero() {
        let mut session = three_card_session();
        session.retreat();
        assert_eq!(session.cursor(), 0);
        session.advance();
        session.retreat();
        assert_eq!(session.cursor(), 0);
    }

    #[test]
    fn test_advance_then_retreat_restores_cursor() {
        let mut session = three_card_session();
        session.advance();
        let before = session.cursor();
        session.advance();
        session.retreat();
        assert_eq!(session.cursor(), before);
    }

    #[test]
    fn test_reset_returns_to_start_keeping_progress() {
        let mut session = three_card_session();
        session.mark_known(1);
        session.mark_unknown(2);
        session.advance();
        session.advance();
        session.advance();
        assert!(session.is_complete());
        session.reset();
        assert_eq!(session.cursor(), 0);
        assert!(!session.is_complete());
        assert_eq!(session.known_count(), 1);
        assert_eq!(session.review_count(), 1);
    }

    #[test]
    fn test_mark_known_removes_from_review() {
        let mut session = three_card_session();
        session.mark_unknown(1);
        assert!(session.is_flagged_for_review(1));
        session.mark_known(1);
        assert!(session.is_known(1));
        assert!(!session.is_flagged_for_review(1));
    }

    #[test]
    fn test_mark_unknown_removes_from_known() {
        // Symmetric mutual exclusion: the sets stay disjoint both ways.
        let mut session = three_card_session();
        session.mark_known(2);
        session.mark_unknown(2);
        assert!(session.is_flagged_for_review(2));
        assert!(!session.is_known(2));
    }

    #[test]
    fn test_marking_is_idempotent() {
        let mut session = three_card_session();
        session.mark_known(1);
        session.mark_known(1);
        session.mark_unknown(2);
        session.mark_unknown(2);
        assert_eq!(session.known_count(), 1);
        assert_eq!(session.review_count(), 1);
    }

    #[test]
    fn test_stale_ids_are_absorbed() {
        let mut session = three_card_session();
        session.mark_known(42);
        session.mark_unknown(42);
        assert_eq!(session.known_count(), 0);
        assert_eq!(session.review_count(), 0);
    }

    #[test]
    fn test_review_mode_filters_to_flagged_cards() {
        let mut session = three_card_session();
        session.advance();
        session.mark_unknown(2);
        session.toggle_review_only();
        assert_eq!(session.cursor(), 0);
        assert!(!session.is_complete());
        let ids: Vec<CardId> = session.visible_cards().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![2]);
    }

    #[test]
    fn test_review_mode_with_nothing_flagged_is_no_matches() {
        let mut session = three_card_session();
        session.toggle_review_only();
        assert_eq!(session.status(), DeckStatus::NoMatches);
        assert!(!session.is_complete());
    }

    #[test]
    fn test_advance_on_empty_view_reports_complete() {
        let mut session = three_card_session();
        session.toggle_review_only();
        session.advance();
        assert_eq!(session.status(), DeckStatus::Complete);
    }

    #[test]
    fn test_category_filter_preserves_order() {
        let mut session = DeckSession::new(vec![
            card(5, "academic"),
            card(2, "vocabulary"),
            card(9, "academic"),
        ]);
        session.set_category(Some("academic".to_string()));
        let ids: Vec<CardId> = session.visible_cards().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![5, 9]);
    }

    #[test]
    fn test_filter_change_resets_cursor_and_completion() {
        let mut session = three_card_session();
        session.advance();
        session.advance();
        session.advance();
        assert!(session.is_complete());
        session.set_category(Some("academic".to_string()));
        assert_eq!(session.cursor(), 0);
        assert!(!session.is_complete());
        match session.status() {
            DeckStatus::Showing(c) => assert_eq!(c.id, 3),
            other => panic!("expected Showing, got {other:?}"),
        }
    }

    #[test]
    fn test_category_with_no_cards_is_no_matches_not_complete() {
        let mut session = three_card_session();
        session.set_category(Some("business".to_string()));
        assert_eq!(session.status(), DeckStatus::NoMatches);
        assert_eq!(session.progress_percent(), 0.0);
    }

    #[test]
    fn test_uncategorized_card_excluded_by_category_filter() {
        let mut session = DeckSession::new(vec![card(1, ""), card(2, "vocabulary")]);
        session.set_category(Some("vocabulary".to_string()));
        let ids: Vec<CardId> = session.visible_cards().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![2]);
    }

    #[test]
    fn test_progress_percent_bounds() {
        let mut session = three_card_session();
        assert_eq!(session.progress_percent(), 0.0);
        session.advance();
        assert!((session.progress_percent() - 100.0 / 3.0).abs() < 1e-9);
        session.advance();
        session.advance();
        let p = session.progress_percent();
        assert!(p.is_finite());
        assert!((0.0..=100.0).contains(&p));
    }

    #[test]
    fn test_progress_percent_empty_view_is_zero() {
        let mut session = three_card_session();
        session.toggle_review_only();
        let p = session.progress_percent();
        assert_eq!(p, 0.0);
        assert!(!p.is_nan());
    }

    #[test]
    fn test_view_shrinking_under_cursor_completes() {
        // In review mode, marking the last flagged card known empties the
        // view while the cursor sits at 0; the session reads as complete.
        let mut session = three_card_session();
        session.mark_unknown(3);
        session.toggle_review_only();
        session.mark_known(3);
        session.advance();
        assert_eq!(session.status(), DeckStatus::Complete);
    }

    #[test]
    fn test_empty_catalog_session() {
        let mut session = DeckSession::new(Vec::new());
        assert_eq!(session.status(), DeckStatus::NoMatches);
        assert_eq!(session.progress_percent(), 0.0);
        session.advance();
        assert_eq!(session.status(), DeckStatus::Complete);
    }

    #[test]
    fn test_combined_category_and_review_filter() {
        let mut session = three_card_session();
        session.mark_unknown(1);
        session.mark_unknown(3);
        session.set_filter(DeckFilter {
            category: Some("vocabulary".to_string()),
            review_only: true,
        });
        let ids: Vec<CardId> = session.visible_cards().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1]);
    }
}
