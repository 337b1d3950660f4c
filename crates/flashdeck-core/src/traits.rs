//! Storage trait consumed by the registry and the review session.
//!
//! Implemented by `flashdeck-store` (SQLite) and by
//! [`MemoryStore`](crate::memory::MemoryStore) for tests.

use crate::model::{Card, CardId, CardText, Category, CategoryId, GlobalStats, NewCard};

/// Persistence backend for categories, cards, and lifetime statistics.
///
/// Calls are synchronous round-trips. Deletes and score updates that
/// reference a missing id are no-ops, not errors.
pub trait CardStore: Send + Sync {
    /// All cards of a category. No ordering guarantee is required.
    fn get_cards_by_category(&self, category_id: CategoryId) -> anyhow::Result<Vec<Card>>;

    /// Increment the stored score by 1 when `is_correct`, otherwise reset it to 0.
    fn update_card_score(&self, card_id: CardId, is_correct: bool) -> anyhow::Result<()>;

    /// Remove a card. Idempotent.
    fn delete_card(&self, card_id: CardId) -> anyhow::Result<()>;

    /// Insert a card, returning its new id.
    fn add_card(&self, card: &NewCard) -> anyhow::Result<CardId>;

    /// Replace a card's question and answer, keeping its score.
    ///
    /// Returns `false` when no card has that id.
    fn update_card(&self, card_id: CardId, text: &CardText) -> anyhow::Result<bool>;

    /// All categories in storage order.
    fn get_all_categories(&self) -> anyhow::Result<Vec<Category>>;

    /// Insert a category if no category with that name exists.
    ///
    /// Returns `true` when a row was created.
    fn add_category(&self, name: &str) -> anyhow::Result<bool>;

    /// Lifetime totals.
    fn get_global_stats(&self) -> anyhow::Result<GlobalStats>;

    /// Add session deltas to the lifetime totals and count one more session.
    fn update_global_stats(&self, correct: u64, incorrect: u64, reviewed: u64)
        -> anyhow::Result<()>;
}
