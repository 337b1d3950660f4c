//! Core data model types for flashdeck.
//!
//! Categories group cards; cards carry a review score that the review
//! session uses to order the working set.

use serde::{Deserialize, Serialize};

use crate::error::DeckError;

/// Storage-assigned category identifier.
pub type CategoryId = i64;

/// Storage-assigned card identifier.
pub type CardId = i64;

/// A named group of cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Storage-assigned identifier.
    pub id: CategoryId,
    /// Unique display name.
    pub name: String,
}

/// A question/answer flashcard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Storage-assigned identifier.
    pub id: CardId,
    /// Owning category.
    pub category_id: CategoryId,
    /// Prompt shown to the user.
    pub question: String,
    /// Answer revealed on demand.
    pub answer: String,
    /// Consecutive-correct streak; reset to 0 on an incorrect answer.
    #[serde(default)]
    pub review_score: u32,
}

/// Validated question/answer text, shared by card creation and editing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardText {
    pub question: String,
    pub answer: String,
}

impl CardText {
    /// Trim and validate a question/answer pair.
    pub fn new(question: &str, answer: &str) -> Result<Self, DeckError> {
        let question = question.trim();
        let answer = answer.trim();
        if question.is_empty() {
            return Err(DeckError::EmptyQuestion);
        }
        if answer.is_empty() {
            return Err(DeckError::EmptyAnswer);
        }
        Ok(Self {
            question: question.to_string(),
            answer: answer.to_string(),
        })
    }
}

/// Validated input for creating a card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCard {
    pub category_id: CategoryId,
    pub question: String,
    pub answer: String,
}

impl NewCard {
    pub fn new(
        category_id: CategoryId,
        question: &str,
        answer: &str,
    ) -> Result<Self, DeckError> {
        let CardText { question, answer } = CardText::new(question, answer)?;
        Ok(Self {
            category_id,
            question,
            answer,
        })
    }
}

/// Lifetime totals persisted across sessions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalStats {
    pub total_sessions: u64,
    pub total_correct: u64,
    pub total_incorrect: u64,
    pub total_reviewed: u64,
}

impl GlobalStats {
    /// Lifetime success rate as a percentage, 0.0 when nothing was reviewed.
    pub fn success_rate(&self) -> f64 {
        if self.total_reviewed == 0 {
            return 0.0;
        }
        self.total_correct as f64 / self.total_reviewed as f64 * 100.0
    }
}
