//! End-to-end review scenarios against the in-memory store.

use std::sync::Arc;

use flashdeck_core::memory::MemoryStore;
use flashdeck_core::model::{GlobalStats, NewCard};
use flashdeck_core::registry::CategoryRegistry;
use flashdeck_core::session::{ReviewOutcome, ReviewSession, ReviewState};
use flashdeck_core::traits::CardStore;

struct Deck {
    store: Arc<MemoryStore>,
    registry: CategoryRegistry,
}

impl Deck {
    fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        let registry = CategoryRegistry::load(store.clone()).unwrap();
        Self { store, registry }
    }

    fn category_with(&mut self, name: &str, questions: &[&str]) -> i64 {
        self.registry.add(name).unwrap();
        let id = self.registry.require(name).unwrap().id;
        for q in questions {
            let card = NewCard::new(id, q, &format!("answer to {q}")).unwrap();
            self.store.add_card(&card).unwrap();
        }
        id
    }

    fn session(&self, category_id: i64) -> ReviewSession {
        let mut session = ReviewSession::new(self.store.clone());
        session.load(category_id).unwrap();
        session
    }
}

fn question(session: &ReviewSession) -> Option<String> {
    session.current().map(|c| c.question.clone())
}

#[test]
fn scenario_a_incorrect_answers_wrap_around() {
    let mut deck = Deck::new();
    let cat = deck.category_with("Capitals", &["Q1", "Q2"]);
    let mut session = deck.session(cat);

    assert_eq!(question(&session).as_deref(), Some("Q1"));
    session.mark_incorrect().unwrap();
    assert_eq!(session.state().cursor(), Some(1));
    assert_eq!(question(&session).as_deref(), Some("Q2"));
    session.mark_incorrect().unwrap();
    assert_eq!(session.state().cursor(), Some(0));
    assert_eq!(question(&session).as_deref(), Some("Q1"));
}

#[test]
fn scenario_b_correct_answer_retires_card() {
    let mut deck = Deck::new();
    let cat = deck.category_with("Capitals", &["Q1", "Q2"]);
    let mut session = deck.session(cat);

    session.mark_correct().unwrap();
    assert_eq!(session.remaining(), 1);
    assert_eq!(session.state().cursor(), Some(0));
    assert_eq!(question(&session).as_deref(), Some("Q2"));
}

#[test]
fn scenario_c_single_card_stays_current() {
    let mut deck = Deck::new();
    let cat = deck.category_with("Solo", &["Q1"]);
    let mut session = deck.session(cat);

    let outcome = session.mark_incorrect().unwrap();
    assert!(matches!(outcome, ReviewOutcome::Requeued(_)));
    assert_eq!(session.state().cursor(), Some(0));
    assert_eq!(question(&session).as_deref(), Some("Q1"));
}

#[test]
fn scenario_d_exhausted_session_ignores_answers() {
    let mut deck = Deck::new();
    let cat = deck.category_with("Verbs", &["Q1", "Q2", "Q3"]);
    let mut session = deck.session(cat);

    while !session.is_complete() {
        session.mark_correct().unwrap();
    }
    let stats = *session.stats();
    assert_eq!(stats.correct, 3);

    assert_eq!(session.mark_correct().unwrap(), ReviewOutcome::NothingToReview);
    assert_eq!(session.mark_incorrect().unwrap(), ReviewOutcome::NothingToReview);
    assert_eq!(*session.stats(), stats);
}

#[test]
fn scenario_e_session_commit_updates_totals() {
    let mut deck = Deck::new();
    let cat = deck.category_with("Math", &["Q1", "Q2", "Q3", "Q4"]);
    assert_eq!(deck.store.get_global_stats().unwrap(), GlobalStats::default());

    let mut session = deck.session(cat);
    session.mark_incorrect().unwrap();
    session.mark_correct().unwrap();
    session.mark_correct().unwrap();
    session.mark_correct().unwrap();
    let totals = session.finish().unwrap();

    assert_eq!(
        (
            totals.total_sessions,
            totals.total_correct,
            totals.total_incorrect,
            totals.total_reviewed
        ),
        (1, 3, 1, 4)
    );
}

#[test]
fn scenario_f_duplicate_category_absorbed() {
    let mut deck = Deck::new();
    deck.registry.add("X").unwrap();
    deck.registry.add("X").unwrap();
    assert_eq!(deck.registry.names(), vec!["X"]);
    assert_eq!(deck.store.get_all_categories().unwrap().len(), 1);
}

#[test]
fn mastered_cards_surface_last_next_time() {
    let mut deck = Deck::new();
    let cat = deck.category_with("Chemistry", &["H2O", "NaCl", "CO2"]);

    let mut session = deck.session(cat);
    session.mark_correct().unwrap(); // H2O -> 1
    session.mark_incorrect().unwrap(); // NaCl -> 0
    session.mark_correct().unwrap(); // CO2 -> 1
    session.finish().unwrap();

    let session = deck.session(cat);
    assert_eq!(working_order(&session), vec!["NaCl", "H2O", "CO2"]);
}

fn working_order(session: &ReviewSession) -> Vec<String> {
    match session.state() {
        ReviewState::Empty => vec![],
        ReviewState::Active { working_set, .. } => {
            working_set.iter().map(|c| c.question.clone()).collect()
        }
    }
}
