pub mod card;

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use card::{Card, CardId, Category, Topic};

const BUNDLED_DECK: &str = include_str!("../../assets/cards-en.json");

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read deck file: {0}")]
    Io(#[from] std::io::Error),
    #[error("deck file is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("deck contains no cards")]
    Empty,
    #[error("duplicate card id {0}")]
    DuplicateId(CardId),
    #[error("card id 0 is reserved")]
    ZeroId,
}

/// On-disk / bundled deck layout. Categories and topics are optional so a
/// bare list of cards is a valid user deck.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
struct DeckFile {
    cards: Vec<Card>,
    #[serde(default)]
    categories: Vec<Category>,
    #[serde(default)]
    topics: Vec<Topic>,
}

/// The ordered card catalog plus its category and topic metadata.
///
/// Insertion order of `cards` is significant: it defines the default
/// traversal order of a study session. Manage operations mutate the
/// catalog in memory only; nothing is written back to disk.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    cards: Vec<Card>,
    categories: Vec<Category>,
    topics: Vec<Topic>,
}

impl Catalog {
    /// Load the bundled English deck. The embedded JSON is validated at
    /// build time by the test suite, so a parse failure here means a
    /// corrupted build and an empty catalog is the graceful fallback.
    pub fn bundled() -> Self {
        serde_json::from_str::<DeckFile>(BUNDLED_DECK)
            .map(Self::from_deck_unchecked)
            .unwrap_or_default()
    }

    pub fn from_file(path: &Path) -> Result<Self, CatalogError> {
        let content = fs::read_to_string(path)?;
        let deck: DeckFile = serde_json::from_str(&content)?;
        if deck.cards.is_empty() {
            return Err(CatalogError::Empty);
        }
        let mut seen = HashSet::new();
        for card in &deck.cards {
            if card.id == 0 {
                return Err(CatalogError::ZeroId);
            }
            if !seen.insert(card.id) {
                return Err(CatalogError::DuplicateId(card.id));
            }
        }
        Ok(Self::from_deck_unchecked(deck))
    }

    fn from_deck_unchecked(deck: DeckFile) -> Self {
        Self {
            cards: deck.cards,
            categories: deck.categories,
            topics: deck.topics,
        }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn topics(&self) -> &[Topic] {
        &self.topics
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.cards.iter().find(|c| c.id == id)
    }

    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// Display name for a card's category tag. A dangling category id
    /// yields None and the card renders without decoration.
    pub fn category_name(&self, id: &str) -> Option<&str> {
        self.category(id).map(|c| c.name.as_str())
    }

    pub fn topic(&self, id: &str) -> Option<&Topic> {
        self.topics.iter().find(|t| t.id == id)
    }

    /// Cards whose category belongs to the topic, in catalog order.
    /// Uncategorized cards never match a topic.
    pub fn cards_for_topic(&self, topic: &Topic) -> Vec<Card> {
        self.cards
            .iter()
            .filter(|card| {
                card.category_id
                    .as_deref()
                    .is_some_and(|cid| topic.category_ids.iter().any(|t| t == cid))
            })
            .cloned()
            .collect()
    }

    fn next_id(&self) -> CardId {
        self.cards.iter().map(|c| c.id).max().unwrap_or(0) + 1
    }

    /// Append a new card, assigning the next free id. Word, definition and
    /// example are required; the caller gets the assigned id back.
    pub fn add_card(&mut self, draft: CardDraft) -> Result<CardId, DraftError> {
        draft.validate()?;
        let id = self.next_id();
        self.cards.push(draft.into_card(id));
        Ok(id)
    }

    pub fn update_card(&mut self, id: CardId, draft: CardDraft) -> Result<(), DraftError> {
        draft.validate()?;
        if let Some(card) = self.cards.iter_mut().find(|c| c.id == id) {
            *card = draft.into_card(id);
            Ok(())
        } else {
            Err(DraftError::NoSuchCard(id))
        }
    }

    /// Remove a card by id. Unknown ids are absorbed; returns whether a
    /// card was actually removed.
    pub fn delete_card(&mut self, id: CardId) -> bool {
        let before = self.cards.len();
        self.cards.retain(|c| c.id != id);
        self.cards.len() != before
    }
}

/// Form input for creating or editing a card, before an id is assigned.
#[derive(Clone, Debug, Default)]
pub struct CardDraft {
    pub word: String,
    pub definition: String,
    pub example: String,
    pub pronunciation: String,
    pub category_id: Option<String>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DraftError {
    #[error("word, definition and example are required")]
    MissingRequired,
    #[error("no card with id {0}")]
    NoSuchCard(CardId),
}

impl CardDraft {
    pub fn from_card(card: &Card) -> Self {
        Self {
            word: card.word.clone(),
            definition: card.definition.clone(),
            example: card.example.clone(),
            pronunciation: card.pronunciation.clone().unwrap_or_default(),
            category_id: card.category_id.clone(),
        }
    }

    fn validate(&self) -> Result<(), DraftError> {
        if self.word.trim().is_empty()
            || self.definition.trim().is_empty()
            || self.example.trim().is_empty()
        {
            return Err(DraftError::MissingRequired);
        }
        Ok(())
    }

    fn into_card(self, id: CardId) -> Card {
        let pronunciation = self.pronunciation.trim();
        Card {
            id,
            word: self.word.trim().to_string(),
            definition: self.definition.trim().to_string(),
            example: self.example.trim().to_string(),
            pronunciation: (!pronunciation.is_empty()).then(|| pronunciation.to_string()),
            category_id: self.category_id,
        }
    }
}
