//! Session counters and their commit into lifetime totals.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::traits::CardStore;

/// Answers recorded during one session.
///
/// `reviewed` is derived, so `reviewed == correct + incorrect` always holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    pub correct: u64,
    pub incorrect: u64,
}

impl SessionStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one answered card.
    pub fn record(&mut self, correct: bool) {
        if correct {
            self.correct += 1;
        } else {
            self.incorrect += 1;
        }
    }

    /// Total answered cards.
    pub fn reviewed(&self) -> u64 {
        self.correct + self.incorrect
    }

    /// Percentage of correct answers, 0.0 when nothing was reviewed.
    pub fn success_rate(&self) -> f64 {
        let reviewed = self.reviewed();
        if reviewed == 0 {
            return 0.0;
        }
        self.correct as f64 / reviewed as f64 * 100.0
    }

    /// Add these counters to the persisted lifetime totals.
    ///
    /// Counts one session even when nothing was reviewed.
    pub fn commit(&self, store: &dyn CardStore) -> anyhow::Result<()> {
        store.update_global_stats(self.correct, self.incorrect, self.reviewed())?;
        tracing::info!(
            correct = self.correct,
            incorrect = self.incorrect,
            reviewed = self.reviewed(),
            "session statistics committed"
        );
        Ok(())
    }
}

/// Snapshot of a session for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSummary {
    pub started_at: DateTime<Utc>,
    pub elapsed_ms: i64,
    pub correct: u64,
    pub incorrect: u64,
    pub reviewed: u64,
    pub success_rate: f64,
}

impl SessionSummary {
    /// Build a summary of `stats` for a review that started at `started_at`.
    pub fn new(stats: &SessionStats, started_at: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        let elapsed = (now - started_at).max(Duration::zero());
        Self {
            started_at,
            elapsed_ms: elapsed.num_milliseconds(),
            correct: stats.correct,
            incorrect: stats.incorrect,
            reviewed: stats.reviewed(),
            success_rate: stats.success_rate(),
        }
    }

    /// Elapsed review time in minutes, rounded to two decimals.
    pub fn elapsed_minutes(&self) -> f64 {
        (self.elapsed_ms as f64 / 60_000.0 * 100.0).round() / 100.0
    }
}
