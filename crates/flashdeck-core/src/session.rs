//! The review session state machine.
//!
//! A session holds the working set of one category's cards, ordered
//! lowest score first, and a cursor to the current card. A correct answer
//! retires the card for the rest of the session; an incorrect answer moves
//! the cursor on so the card comes back after one full lap.
//!
//! Every outcome is persisted before the in-memory state changes. When the
//! store rejects a write the error is returned and the working set, cursor,
//! and counters stay exactly as they were.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{Card, CategoryId, GlobalStats};
use crate::statistics::{SessionStats, SessionSummary};
use crate::traits::CardStore;

/// Where a session stands.
///
/// `Active` always holds a non-empty working set and `cursor < working_set.len()`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReviewState {
    #[default]
    Empty,
    Active {
        working_set: Vec<Card>,
        cursor: usize,
    },
}

impl ReviewState {
    /// Build a state from freshly fetched cards.
    ///
    /// Sorts by review score; the sort is stable so ties keep fetch order.
    pub fn from_cards(mut cards: Vec<Card>) -> Self {
        if cards.is_empty() {
            return ReviewState::Empty;
        }
        cards.sort_by_key(|c| c.review_score);
        ReviewState::Active {
            working_set: cards,
            cursor: 0,
        }
    }

    /// Card under the cursor.
    pub fn current(&self) -> Option<&Card> {
        match self {
            ReviewState::Empty => None,
            ReviewState::Active {
                working_set,
                cursor,
            } => working_set.get(*cursor),
        }
    }

    pub fn cursor(&self) -> Option<usize> {
        match self {
            ReviewState::Empty => None,
            ReviewState::Active { cursor, .. } => Some(*cursor),
        }
    }

    /// Cards left in the working set.
    pub fn len(&self) -> usize {
        match self {
            ReviewState::Empty => 0,
            ReviewState::Active { working_set, .. } => working_set.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, ReviewState::Empty)
    }

    /// Drop the current card. Wraps the cursor to 0 if it fell off the end.
    fn retire(self) -> (ReviewState, Option<Card>) {
        match self {
            ReviewState::Empty => (ReviewState::Empty, None),
            ReviewState::Active {
                mut working_set,
                cursor,
            } => {
                let card = working_set.remove(cursor);
                let next = if working_set.is_empty() {
                    ReviewState::Empty
                } else {
                    let cursor = if cursor >= working_set.len() { 0 } else { cursor };
                    ReviewState::Active {
                        working_set,
                        cursor,
                    }
                };
                (next, Some(card))
            }
        }
    }

    /// Move the cursor one step, wrapping at the end.
    fn advance(self) -> ReviewState {
        match self {
            ReviewState::Empty => ReviewState::Empty,
            ReviewState::Active {
                working_set,
                cursor,
            } => {
                let cursor = (cursor + 1) % working_set.len();
                ReviewState::Active {
                    working_set,
                    cursor,
                }
            }
        }
    }
}

/// What an answer did to the working set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewOutcome {
    /// Answered correctly and removed from the working set.
    Retired(Card),
    /// Answered incorrectly; stays in the set for the next lap.
    Requeued(Card),
    /// No card was loaded, so nothing happened.
    NothingToReview,
}

/// A review session over one category at a time.
///
/// Counters span the whole session, across category switches. They are
/// added to the lifetime totals once, by [`ReviewSession::finish`].
pub struct ReviewSession {
    store: Arc<dyn CardStore>,
    category_id: Option<CategoryId>,
    state: ReviewState,
    stats: SessionStats,
    started_at: DateTime<Utc>,
}

impl ReviewSession {
    pub fn new(store: Arc<dyn CardStore>) -> Self {
        Self {
            store,
            category_id: None,
            state: ReviewState::Empty,
            stats: SessionStats::new(),
            started_at: Utc::now(),
        }
    }

    /// Load the cards of `category_id` and restart the review clock.
    ///
    /// On a storage error the previous working set is kept.
    pub fn load(&mut self, category_id: CategoryId) -> anyhow::Result<()> {
        let cards = self.store.get_cards_by_category(category_id)?;
        self.state = ReviewState::from_cards(cards);
        self.category_id = Some(category_id);
        self.started_at = Utc::now();
        tracing::debug!(
            category_id,
            cards = self.state.len(),
            "loaded working set"
        );
        Ok(())
    }

    /// The card to show, without changing anything.
    pub fn current(&self) -> Option<&Card> {
        self.state.current()
    }

    /// Persist a score increment for the current card, then retire it.
    pub fn mark_correct(&mut self) -> anyhow::Result<ReviewOutcome> {
        let Some(card_id) = self.current().map(|c| c.id) else {
            return Ok(ReviewOutcome::NothingToReview);
        };
        self.store.update_card_score(card_id, true)?;

        let (next, retired) = std::mem::take(&mut self.state).retire();
        self.state = next;
        self.stats.record(true);
        tracing::debug!(card_id, remaining = self.state.len(), "card retired");

        Ok(retired.map_or(ReviewOutcome::NothingToReview, ReviewOutcome::Retired))
    }

    /// Persist a score reset for the current card, then move past it.
    pub fn mark_incorrect(&mut self) -> anyhow::Result<ReviewOutcome> {
        let Some(card) = self.current().cloned() else {
            return Ok(ReviewOutcome::NothingToReview);
        };
        self.store.update_card_score(card.id, false)?;

        self.state = std::mem::take(&mut self.state).advance();
        self.stats.record(false);
        tracing::debug!(
            card_id = card.id,
            cursor = self.state.cursor(),
            "card requeued"
        );

        Ok(ReviewOutcome::Requeued(card))
    }

    /// Delete the current card from storage and reload the category.
    ///
    /// Returns the deleted card, or `None` when nothing was loaded. If the
    /// delete succeeds but the reload fails, the card is dropped from the
    /// working set before the error is returned.
    pub fn delete_current(&mut self) -> anyhow::Result<Option<Card>> {
        let (Some(card), Some(category_id)) = (self.current().cloned(), self.category_id) else {
            return Ok(None);
        };
        self.store.delete_card(card.id)?;
        tracing::debug!(card_id = card.id, "card deleted");
        if let Err(e) = self.load(category_id) {
            let (next, _) = std::mem::take(&mut self.state).retire();
            self.state = next;
            tracing::warn!(card_id = card.id, error = %e, "reload after delete failed");
            return Err(e);
        }
        Ok(Some(card))
    }

    pub fn state(&self) -> &ReviewState {
        &self.state
    }

    pub fn category_id(&self) -> Option<CategoryId> {
        self.category_id
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    /// Cards left in the working set.
    pub fn remaining(&self) -> usize {
        self.state.len()
    }

    /// `true` once there is nothing left to review.
    pub fn is_complete(&self) -> bool {
        self.state.is_empty()
    }

    /// Counters and elapsed time since the last category was loaded.
    pub fn summary(&self) -> SessionSummary {
        SessionSummary::new(&self.stats, self.started_at, Utc::now())
    }

    /// Commit the counters to the lifetime totals and return the new totals.
    pub fn finish(self) -> anyhow::Result<GlobalStats> {
        self.stats.commit(self.store.as_ref())?;
        self.store.get_global_stats()
    }
}
