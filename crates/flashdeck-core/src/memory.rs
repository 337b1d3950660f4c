//! In-memory store for tests and benchmarks.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::model::{Card, CardId, CardText, Category, CategoryId, GlobalStats, NewCard};
use crate::traits::CardStore;

#[derive(Debug, Default)]
struct Tables {
    categories: Vec<Category>,
    cards: Vec<Card>,
    stats: GlobalStats,
    next_category_id: CategoryId,
    next_card_id: CardId,
}

impl Tables {
    fn insert_card(
        &mut self,
        category_id: CategoryId,
        question: &str,
        answer: &str,
        review_score: u32,
    ) -> CardId {
        self.next_card_id += 1;
        let id = self.next_card_id;
        self.cards.push(Card {
            id,
            category_id,
            question: question.to_string(),
            answer: answer.to_string(),
            review_score,
        });
        id
    }
}

/// A `CardStore` that keeps everything in process memory.
///
/// Rows come back in insertion order. Reads and writes can be made to fail
/// on demand to exercise error paths.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    write_count: AtomicU32,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a card with a preset review score.
    pub fn seed_card(
        &self,
        category_id: CategoryId,
        question: &str,
        answer: &str,
        review_score: u32,
    ) -> CardId {
        self.tables()
            .insert_card(category_id, question, answer, review_score)
    }

    /// Current stored score of a card, if it exists.
    pub fn score_of(&self, card_id: CardId) -> Option<u32> {
        self.tables()
            .cards
            .iter()
            .find(|c| c.id == card_id)
            .map(|c| c.review_score)
    }

    /// Make every subsequent write return an error.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::Relaxed);
    }

    /// Make every subsequent card fetch return an error.
    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::Relaxed);
    }

    /// Number of write calls received, including failed ones.
    pub fn write_count(&self) -> u32 {
        self.write_count.load(Ordering::Relaxed)
    }

    fn tables(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn begin_write(&self, op: &str) -> anyhow::Result<MutexGuard<'_, Tables>> {
        self.write_count.fetch_add(1, Ordering::Relaxed);
        if self.fail_writes.load(Ordering::Relaxed) {
            anyhow::bail!("memory store: {op} rejected (writes disabled)");
        }
        Ok(self.tables())
    }
}

impl CardStore for MemoryStore {
    fn get_cards_by_category(&self, category_id: CategoryId) -> anyhow::Result<Vec<Card>> {
        if self.fail_reads.load(Ordering::Relaxed) {
            anyhow::bail!("memory store: get_cards_by_category rejected (reads disabled)");
        }
        Ok(self
            .tables()
            .cards
            .iter()
            .filter(|c| c.category_id == category_id)
            .cloned()
            .collect())
    }

    fn update_card_score(&self, card_id: CardId, is_correct: bool) -> anyhow::Result<()> {
        let mut tables = self.begin_write("update_card_score")?;
        if let Some(card) = tables.cards.iter_mut().find(|c| c.id == card_id) {
            card.review_score = if is_correct {
                card.review_score.saturating_add(1)
            } else {
                0
            };
        }
        Ok(())
    }

    fn delete_card(&self, card_id: CardId) -> anyhow::Result<()> {
        let mut tables = self.begin_write("delete_card")?;
        tables.cards.retain(|c| c.id != card_id);
        Ok(())
    }

    fn add_card(&self, card: &NewCard) -> anyhow::Result<CardId> {
        let mut tables = self.begin_write("add_card")?;
        if !tables.categories.iter().any(|c| c.id == card.category_id) {
            anyhow::bail!("memory store: category {} does not exist", card.category_id);
        }
        Ok(tables.insert_card(card.category_id, &card.question, &card.answer, 0))
    }

    fn update_card(&self, card_id: CardId, text: &CardText) -> anyhow::Result<bool> {
        let mut tables = self.begin_write("update_card")?;
        let Some(card) = tables.cards.iter_mut().find(|c| c.id == card_id) else {
            return Ok(false);
        };
        card.question = text.question.clone();
        card.answer = text.answer.clone();
        Ok(true)
    }

    fn get_all_categories(&self) -> anyhow::Result<Vec<Category>> {
        Ok(self.tables().categories.clone())
    }

    fn add_category(&self, name: &str) -> anyhow::Result<bool> {
        let mut tables = self.begin_write("add_category")?;
        if tables.categories.iter().any(|c| c.name == name) {
            return Ok(false);
        }
        tables.next_category_id += 1;
        let id = tables.next_category_id;
        tables.categories.push(Category {
            id,
            name: name.to_string(),
        });
        Ok(true)
    }

    fn get_global_stats(&self) -> anyhow::Result<GlobalStats> {
        Ok(self.tables().stats)
    }

    fn update_global_stats(
        &self,
        correct: u64,
        incorrect: u64,
        reviewed: u64,
    ) -> anyhow::Result<()> {
        let mut tables = self.begin_write("update_global_stats")?;
        let stats = &mut tables.stats;
        stats.total_sessions += 1;
        stats.total_correct += correct;
        stats.total_incorrect += incorrect;
        stats.total_reviewed += reviewed;
        Ok(())
    }
}
