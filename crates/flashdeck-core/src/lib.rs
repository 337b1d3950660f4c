//! flashdeck-core — Review session, category registry, and statistics.
//!
//! This crate defines the data model, the storage trait, and the review
//! state machine that the rest of flashdeck builds on.

pub mod error;
pub mod memory;
pub mod model;
pub mod registry;
pub mod session;
pub mod statistics;
pub mod traits;
