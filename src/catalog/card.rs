use serde::{Deserialize, Serialize};

pub type CardId = u32;

/// A single vocabulary flashcard. Immutable from the session's point of
/// view; the catalog owns the records and the manage screen edits them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub word: String,
    pub definition: String,
    pub example: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pronunciation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    /// Hex color used for the category tag, e.g. "#3b82f6".
    pub color: String,
}

/// A curated topic groups one or more categories into a study deck.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub category_ids: Vec<String>,
}

impl Topic {
    /// Case-insensitive match against name and description, used by the
    /// topic browser's search box.
    pub fn matches(&self, query: &str) -> bool {
        if query.is_empty() {
            return true;
        }
        let query = query.to_lowercase();
        self.name.to_lowercase().contains(&query)
            || self.description.to_lowercase().contains(&query)
    }
}
