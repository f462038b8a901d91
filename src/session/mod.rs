pub mod deck;
pub mod summary;

pub use deck::{DeckFilter, DeckSession, DeckStatus};
pub use summary::StudySummary;
