//! SQLite-backed [`CardStore`].
//!
//! A connection is opened for every operation and dropped when it returns.
//! Foreign keys are enforced on each connection.

use std::path::{Path, PathBuf};

use anyhow::Context;
use rusqlite::{params, Connection};

use flashdeck_core::model::{Card, CardId, CardText, Category, CategoryId, GlobalStats, NewCard};
use flashdeck_core::traits::CardStore;

const SCHEMA: &str = r#"
    CREATE TABLE IF NOT EXISTS categories (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE
    );
    CREATE TABLE IF NOT EXISTS flashcards (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        category_id INTEGER NOT NULL,
        question TEXT NOT NULL,
        answer TEXT NOT NULL,
        review_score INTEGER NOT NULL DEFAULT 0,
        FOREIGN KEY (category_id) REFERENCES categories(id)
    );
    CREATE INDEX IF NOT EXISTS idx_flashcards_category ON flashcards(category_id);
    CREATE TABLE IF NOT EXISTS global_stats (
        id INTEGER PRIMARY KEY,
        total_sessions INTEGER NOT NULL DEFAULT 0,
        total_correct INTEGER NOT NULL DEFAULT 0,
        total_incorrect INTEGER NOT NULL DEFAULT 0,
        total_reviewed INTEGER NOT NULL DEFAULT 0
    );
    INSERT OR IGNORE INTO global_stats
        (id, total_sessions, total_correct, total_incorrect, total_reviewed)
        VALUES (1, 0, 0, 0, 0);
"#;

fn conv_err(idx: usize, msg: String) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(
        idx,
        rusqlite::types::Type::Integer,
        Box::new(std::io::Error::new(std::io::ErrorKind::InvalidData, msg)),
    )
}

fn row_to_card(row: &rusqlite::Row<'_>) -> rusqlite::Result<Card> {
    let score: i64 = row.get(4)?;
    Ok(Card {
        id: row.get(0)?,
        category_id: row.get(1)?,
        question: row.get(2)?,
        answer: row.get(3)?,
        review_score: u32::try_from(score)
            .map_err(|_| conv_err(4, format!("invalid review_score: {score}")))?,
    })
}

fn get_count(row: &rusqlite::Row<'_>, idx: usize) -> rusqlite::Result<u64> {
    let n: i64 = row.get(idx)?;
    u64::try_from(n).map_err(|_| conv_err(idx, format!("negative counter: {n}")))
}

fn to_sql_count(n: u64) -> anyhow::Result<i64> {
    i64::try_from(n).with_context(|| format!("counter out of range: {n}"))
}

/// Flashcard storage in a single SQLite file.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    path: PathBuf,
}

impl SqliteStore {
    /// Open (creating if needed) the database at `path` and ensure the schema.
    pub fn open<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let store = Self {
            path: path.as_ref().to_path_buf(),
        };
        let conn = store.connect()?;
        conn.execute_batch(SCHEMA)
            .with_context(|| format!("failed to initialize schema: {}", store.path.display()))?;
        tracing::debug!(path = %store.path.display(), "database ready");
        Ok(store)
    }

    fn connect(&self) -> anyhow::Result<Connection> {
        let conn = Connection::open(&self.path)
            .with_context(|| format!("failed to open database: {}", self.path.display()))?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        Ok(conn)
    }
}

impl CardStore for SqliteStore {
    fn get_cards_by_category(&self, category_id: CategoryId) -> anyhow::Result<Vec<Card>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(
            "SELECT id, category_id, question, answer, review_score
             FROM flashcards WHERE category_id = ?1 ORDER BY id",
        )?;
        let cards = stmt
            .query_map(params![category_id], row_to_card)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(cards)
    }

    fn update_card_score(&self, card_id: CardId, is_correct: bool) -> anyhow::Result<()> {
        let conn = self.connect()?;
        let sql = if is_correct {
            "UPDATE flashcards SET review_score = review_score + 1 WHERE id = ?1"
        } else {
            "UPDATE flashcards SET review_score = 0 WHERE id = ?1"
        };
        let n = conn.execute(sql, params![card_id])?;
        if n == 0 {
            tracing::debug!(card_id, "score update matched no card");
        }
        Ok(())
    }

    fn delete_card(&self, card_id: CardId) -> anyhow::Result<()> {
        let conn = self.connect()?;
        conn.execute("DELETE FROM flashcards WHERE id = ?1", params![card_id])?;
        Ok(())
    }

    fn add_card(&self, card: &NewCard) -> anyhow::Result<CardId> {
        let conn = self.connect()?;
        conn.execute(
            "INSERT INTO flashcards (category_id, question, answer) VALUES (?1, ?2, ?3)",
            params![card.category_id, card.question, card.answer],
        )
        .with_context(|| format!("failed to add card to category {}", card.category_id))?;
        Ok(conn.last_insert_rowid())
    }

    fn update_card(&self, card_id: CardId, text: &CardText) -> anyhow::Result<bool> {
        let conn = self.connect()?;
        let n = conn.execute(
            "UPDATE flashcards SET question = ?1, answer = ?2 WHERE id = ?3",
            params![text.question, text.answer, card_id],
        )?;
        Ok(n > 0)
    }

    fn get_all_categories(&self) -> anyhow::Result<Vec<Category>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare("SELECT id, name FROM categories ORDER BY id")?;
        let categories = stmt
            .query_map([], |row| {
                Ok(Category {
                    id: row.get(0)?,
                    name: row.get(1)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(categories)
    }

    fn add_category(&self, name: &str) -> anyhow::Result<bool> {
        let conn = self.connect()?;
        let n = conn.execute(
            "INSERT OR IGNORE INTO categories (name) VALUES (?1)",
            params![name],
        )?;
        Ok(n > 0)
    }

    fn get_global_stats(&self) -> anyhow::Result<GlobalStats> {
        let conn = self.connect()?;
        let stats = conn.query_row(
            "SELECT total_sessions, total_correct, total_incorrect, total_reviewed
             FROM global_stats WHERE id = 1",
            [],
            |row| {
                Ok(GlobalStats {
                    total_sessions: get_count(row, 0)?,
                    total_correct: get_count(row, 1)?,
                    total_incorrect: get_count(row, 2)?,
                    total_reviewed: get_count(row, 3)?,
                })
            },
        )?;
        Ok(stats)
    }

    fn update_global_stats(
        &self,
        correct: u64,
        incorrect: u64,
        reviewed: u64,
    ) -> anyhow::Result<()> {
        let mut conn = self.connect()?;
        let tx = conn.transaction()?;
        tx.execute(
            "UPDATE global_stats SET
                total_sessions = total_sessions + 1,
                total_correct = total_correct + ?1,
                total_incorrect = total_incorrect + ?2,
                total_reviewed = total_reviewed + ?3
             WHERE id = 1",
            params![
                to_sql_count(correct)?,
                to_sql_count(incorrect)?,
                to_sql_count(reviewed)?
            ],
        )?;
        tx.commit()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> (tempfile::TempDir, SqliteStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = SqliteStore::open(dir.path().join("flashdeck.db")).unwrap();
        (dir, store)
    }

    #[test]
    fn open_is_idempotent() {
        let (dir, store) = temp_store();
        store.add_category("Math").unwrap();
        let reopened = SqliteStore::open(dir.path().join("flashdeck.db")).unwrap();
        assert_eq!(reopened.get_all_categories().unwrap().len(), 1);
        assert_eq!(reopened.get_global_stats().unwrap(), GlobalStats::default());
    }

    #[test]
    fn negative_score_is_rejected() {
        let (_dir, store) = temp_store();
        store.add_category("Math").unwrap();
        let cat = store.get_all_categories().unwrap()[0].id;
        let id = store.add_card(&NewCard::new(cat, "q", "a").unwrap()).unwrap();

        let conn = store.connect().unwrap();
        conn.execute(
            "UPDATE flashcards SET review_score = -1 WHERE id = ?1",
            params![id],
        )
        .unwrap();

        let err = store.get_cards_by_category(cat).unwrap_err();
        assert!(format!("{err:#}").contains("invalid review_score"));
    }

    #[test]
    fn update_card_replaces_text_only() {
        let (_dir, store) = temp_store();
        store.add_category("Spanish").unwrap();
        let cat = store.get_all_categories().unwrap()[0].id;
        let id = store.add_card(&NewCard::new(cat, "gato", "dog").unwrap()).unwrap();
        store.update_card_score(id, true).unwrap();

        let text = CardText::new("gato", "cat").unwrap();
        assert!(store.update_card(id, &text).unwrap());
        assert!(!store.update_card(id + 100, &text).unwrap());

        let cards = store.get_cards_by_category(cat).unwrap();
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].answer, "cat");
        assert_eq!(cards[0].review_score, 1);
    }

    #[test]
    fn foreign_keys_enforced() {
        let (_dir, store) = temp_store();
        let orphan = NewCard::new(999, "q", "a").unwrap();
        assert!(store.add_card(&orphan).is_err());
    }
}
