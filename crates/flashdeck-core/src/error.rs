//! Domain error types.
//!
//! Storage failures travel as `anyhow::Error`. These typed errors cover
//! invalid user input and lookups, so callers can `downcast_ref` them
//! without string matching.

use thiserror::Error;

/// Errors raised by flashdeck for invalid input or unknown references.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DeckError {
    /// A category name was empty after trimming.
    #[error("category name cannot be empty")]
    EmptyCategoryName,

    /// A card question was empty after trimming.
    #[error("card question cannot be empty")]
    EmptyQuestion,

    /// A card answer was empty after trimming.
    #[error("card answer cannot be empty")]
    EmptyAnswer,

    /// No category with the given name exists.
    #[error("unknown category: {0}")]
    UnknownCategory(String),
}
