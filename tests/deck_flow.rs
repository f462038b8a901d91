use std::fs;
use std::io::Write as _;
use std::path::PathBuf;

use tempfile::TempDir;

use wordflow::catalog::{CardDraft, Catalog, CatalogError};
use wordflow::session::{DeckFilter, DeckSession, DeckStatus, StudySummary};

fn write_deck(dir: &TempDir, name: &str, json: &str) -> PathBuf {
    let path = dir.path().join(name);
    let mut file = fs::File::create(&path).unwrap();
    file.write_all(json.as_bytes()).unwrap();
    path
}

const SMALL_DECK: &str = r##"{
  "cards": [
    {"id": 1, "word": "Serendipity", "definition": "A happy accident.", "example": "Pure serendipity.", "category_id": "vocabulary"},
    {"id": 2, "word": "Ubiquitous", "definition": "Found everywhere.", "example": "Phones are ubiquitous.", "category_id": "vocabulary"},
    {"id": 3, "word": "Paradigm", "definition": "A typical model.", "example": "A new paradigm.", "category_id": "academic"}
  ],
  "categories": [
    {"id": "vocabulary", "name": "Vocabulary", "color": "#3b82f6"},
    {"id": "academic", "name": "Academic", "color": "#22c55e"}
  ],
  "topics": [
    {"id": "core", "name": "Core", "description": "Everyday words", "category_ids": ["vocabulary"]}
  ]
}"##;

#[test]
fn loads_user_deck_from_file() {
    let dir = TempDir::new().unwrap();
    let path = write_deck(&dir, "deck.json", SMALL_DECK);
    let catalog = Catalog::from_file(&path).unwrap();
    assert_eq!(catalog.cards().len(), 3);
    assert_eq!(catalog.categories().len(), 2);
    assert_eq!(catalog.topics().len(), 1);
    assert_eq!(catalog.card(2).unwrap().word, "Ubiquitous");
}

#[test]
fn rejects_missing_file() {
    let err = Catalog::from_file(&PathBuf::from("/nonexistent/deck.json")).unwrap_err();
    assert!(matches!(err, CatalogError::Io(_)));
}

#[test]
fn rejects_invalid_json() {
    let dir = TempDir::new().unwrap();
    let path = write_deck(&dir, "deck.json", "{not json");
    let err = Catalog::from_file(&path).unwrap_err();
    assert!(matches!(err, CatalogError::Malformed(_)));
}

#[test]
fn rejects_empty_deck() {
    let dir = TempDir::new().unwrap();
    let path = write_deck(&dir, "deck.json", r#"{"cards": []}"#);
    let err = Catalog::from_file(&path).unwrap_err();
    assert!(matches!(err, CatalogError::Empty));
}

#[test]
fn rejects_duplicate_ids() {
    let dir = TempDir::new().unwrap();
    let json = r#"{"cards": [
        {"id": 1, "word": "a", "definition": "b", "example": "c"},
        {"id": 1, "word": "d", "definition": "e", "example": "f"}
    ]}"#;
    let path = write_deck(&dir, "deck.json", json);
    let err = Catalog::from_file(&path).unwrap_err();
    assert!(matches!(err, CatalogError::DuplicateId(1)));
}

#[test]
fn rejects_zero_id() {
    let dir = TempDir::new().unwrap();
    let json = r#"{"cards": [{"id": 0, "word": "a", "definition": "b", "example": "c"}]}"#;
    let path = write_deck(&dir, "deck.json", json);
    let err = Catalog::from_file(&path).unwrap_err();
    assert!(matches!(err, CatalogError::ZeroId));
}

#[test]
fn deck_without_metadata_is_valid() {
    let dir = TempDir::new().unwrap();
    let json = r#"{"cards": [{"id": 1, "word": "a", "definition": "b", "example": "c"}]}"#;
    let path = write_deck(&dir, "deck.json", json);
    let catalog = Catalog::from_file(&path).unwrap();
    assert!(catalog.categories().is_empty());
    assert!(catalog.topics().is_empty());
}

// A whole study run through the public API: flip through the deck marking
// cards, complete it, switch to review mode, clear the flagged card.
#[test]
fn full_study_run_with_review_pass() {
    let dir = TempDir::new().unwrap();
    let path = write_deck(&dir, "deck.json", SMALL_DECK);
    let catalog = Catalog::from_file(&path).unwrap();

    let mut session = DeckSession::new(catalog.cards().to_vec());

    // First pass: know 1 and 3, flag 2.
    session.mark_known(1);
    session.advance();
    session.mark_unknown(2);
    session.advance();
    session.mark_known(3);
    session.advance();
    assert!(session.is_complete());

    let summary = StudySummary::from_session(&session, None);
    assert_eq!(summary.deck_size, 3);
    assert_eq!(summary.known, 2);
    assert_eq!(summary.review, 1);

    // Review pass over the one flagged card.
    session.toggle_review_only();
    assert!(!session.is_complete());
    let visible: Vec<u32> = session.visible_cards().iter().map(|c| c.id).collect();
    assert_eq!(visible, vec![2]);
    match session.status() {
        DeckStatus::Showing(card) => assert_eq!(card.word, "Ubiquitous"),
        other => panic!("expected Showing, got {other:?}"),
    }

    // Knowing it empties the review view.
    session.mark_known(2);
    session.advance();
    assert!(session.is_complete());
    assert_eq!(session.known_count(), 3);
    assert_eq!(session.review_count(), 0);
}

#[test]
fn topic_study_sees_only_topic_cards() {
    let dir = TempDir::new().unwrap();
    let path = write_deck(&dir, "deck.json", SMALL_DECK);
    let catalog = Catalog::from_file(&path).unwrap();

    let topic = catalog.topic("core").unwrap();
    let cards = catalog.cards_for_topic(topic);
    let ids: Vec<u32> = cards.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![1, 2]);

    let mut session = DeckSession::new(cards);
    session.advance();
    session.advance();
    assert!(session.is_complete());

    let summary = StudySummary::from_session(&session, Some(topic.name.as_str()));
    assert_eq!(summary.topic.as_deref(), Some("Core"));
    assert_eq!(summary.deck_size, 2);
}

#[test]
fn catalog_edits_flow_into_new_sessions_only() {
    let dir = TempDir::new().unwrap();
    let path = write_deck(&dir, "deck.json", SMALL_DECK);
    let mut catalog = Catalog::from_file(&path).unwrap();

    let session = DeckSession::new(catalog.cards().to_vec());

    let id = catalog
        .add_card(CardDraft {
            word: "Sublime".to_string(),
            definition: "Of great excellence.".to_string(),
            example: "A sublime view.".to_string(),
            pronunciation: String::new(),
            category_id: Some("vocabulary".to_string()),
        })
        .unwrap();
    assert_eq!(id, 4);

    // The running session owns its snapshot; the edit lands in the next one.
    assert_eq!(session.cards().len(), 3);
    let next = DeckSession::new(catalog.cards().to_vec());
    assert_eq!(next.cards().len(), 4);
}

#[test]
fn combined_filters_over_file_deck() {
    let dir = TempDir::new().unwrap();
    let path = write_deck(&dir, "deck.json", SMALL_DECK);
    let catalog = Catalog::from_file(&path).unwrap();

    let mut session = DeckSession::new(catalog.cards().to_vec());
    session.mark_unknown(1);
    session.mark_unknown(3);
    session.set_filter(DeckFilter {
        category: Some("academic".to_string()),
        review_only: true,
    });
    let ids: Vec<u32> = session.visible_cards().iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![3]);
}
