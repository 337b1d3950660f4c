//! The `flashdeck review` command.
//!
//! Reads one command per line and dispatches it to the review session.

use std::io::{self, BufRead, Write};

use anyhow::Result;

use flashdeck_core::registry::CategoryRegistry;
use flashdeck_core::session::{ReviewOutcome, ReviewSession};

use super::StoreTarget;

const HELP: &str = "Commands: [r]eveal, [c]orrect, [i]ncorrect, [d]elete, [s]tats, [q]uit";

/// A parsed line of user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Reveal,
    Correct,
    Incorrect,
    Delete,
    Stats,
    Quit,
}

impl Action {
    fn parse(line: &str) -> Option<Self> {
        match line.trim().to_lowercase().as_str() {
            "r" | "reveal" => Some(Action::Reveal),
            "c" | "y" | "correct" => Some(Action::Correct),
            "i" | "n" | "incorrect" => Some(Action::Incorrect),
            "d" | "delete" => Some(Action::Delete),
            "s" | "stats" => Some(Action::Stats),
            "q" | "quit" | "exit" => Some(Action::Quit),
            _ => None,
        }
    }
}

pub fn execute(target: &StoreTarget, category: &str) -> Result<()> {
    let store = target.open()?;
    let registry = CategoryRegistry::load(store.clone())?;
    let category = registry.require(category)?;

    let mut session = ReviewSession::new(store);
    session.load(category.id)?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let looped = if session.is_complete() {
        writeln!(out, "No cards in {}.", category.name)?;
        Ok(())
    } else {
        writeln!(
            out,
            "Reviewing {} ({} cards)\n{HELP}",
            category.name,
            session.remaining()
        )?;
        run_loop(&mut session, stdin.lock(), &mut out)
    };

    let summary = session.summary();
    let totals = session.finish()?;
    writeln!(out, "\n{}", super::stats::session_table(&summary))?;
    writeln!(
        out,
        "Lifetime: {} sessions, {} cards reviewed",
        totals.total_sessions, totals.total_reviewed
    )?;
    looped
}

/// Drive `session` from `input` until the user quits, input ends, or no
/// cards remain.
///
/// A failed store call is reported and the loop carries on with the card
/// still current.
fn run_loop<R: BufRead, W: Write>(
    session: &mut ReviewSession,
    input: R,
    out: &mut W,
) -> Result<()> {
    show_question(session, out)?;

    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let Some(action) = Action::parse(&line) else {
            writeln!(out, "Unknown command: {}. {HELP}", line.trim())?;
            continue;
        };

        let applied = match action {
            Action::Reveal => {
                if let Some(card) = session.current() {
                    writeln!(out, "Answer: {}", card.answer)?;
                }
                continue;
            }
            Action::Stats => {
                writeln!(out, "{}", super::stats::session_table(&session.summary()))?;
                continue;
            }
            Action::Quit => break,
            Action::Correct => session.mark_correct().map(|outcome| match outcome {
                ReviewOutcome::Retired(card) => Some(format!(
                    "Correct! \"{}\" is done for this session.",
                    card.question
                )),
                _ => None,
            }),
            Action::Incorrect => session.mark_incorrect().map(|outcome| match outcome {
                ReviewOutcome::Requeued(card) => {
                    Some(format!("Incorrect. The answer was: {}", card.answer))
                }
                _ => None,
            }),
            Action::Delete => session
                .delete_current()
                .map(|deleted| deleted.map(|card| format!("Deleted card {}.", card.id))),
        };

        match applied {
            Ok(Some(message)) => writeln!(out, "{message}")?,
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(error = %e, "review action failed");
                writeln!(out, "Error: {e:#}")?;
            }
        }

        if session.is_complete() {
            break;
        }
        show_question(session, out)?;
    }

    if session.is_complete() {
        writeln!(out, "Review complete: no cards left.")?;
    }
    Ok(())
}

fn show_question<W: Write>(session: &ReviewSession, out: &mut W) -> Result<()> {
    if let Some(card) = session.current() {
        writeln!(
            out,
            "\nQuestion: {}  ({} left)",
            card.question,
            session.remaining()
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use flashdeck_core::memory::MemoryStore;

    use super::*;

    fn session_with_store(questions: &[&str]) -> (Arc<MemoryStore>, ReviewSession) {
        let store = Arc::new(MemoryStore::new());
        for q in questions {
            store.seed_card(1, q, &format!("{q}-answer"), 0);
        }
        let mut session = ReviewSession::new(store.clone());
        session.load(1).unwrap();
        (store, session)
    }

    fn session(questions: &[&str]) -> ReviewSession {
        session_with_store(questions).1
    }

    fn run(session: &mut ReviewSession, input: &str) -> String {
        let mut out = Vec::new();
        run_loop(session, input.as_bytes(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn parse_actions() {
        assert_eq!(Action::parse("C"), Some(Action::Correct));
        assert_eq!(Action::parse(" n "), Some(Action::Incorrect));
        assert_eq!(Action::parse("reveal"), Some(Action::Reveal));
        assert_eq!(Action::parse("exit"), Some(Action::Quit));
        assert_eq!(Action::parse("x"), None);
    }

    #[test]
    fn reveal_does_not_advance() {
        let mut s = session(&["Q1", "Q2"]);
        let output = run(&mut s, "r\nr\n");
        assert_eq!(output.matches("Answer: Q1-answer").count(), 2);
        assert_eq!(s.stats().reviewed(), 0);
        assert_eq!(s.current().map(|c| c.question.as_str()), Some("Q1"));
    }

    #[test]
    fn loop_ends_when_cards_run_out() {
        let mut s = session(&["Q1", "Q2"]);
        let output = run(&mut s, "i\nc\nc\nc\n");
        assert!(output.contains("Review complete"));
        assert_eq!(s.stats().correct, 2);
        assert_eq!(s.stats().incorrect, 1);
    }

    #[test]
    fn unknown_command_is_ignored() {
        let mut s = session(&["Q1"]);
        let output = run(&mut s, "hello\nq\n");
        assert!(output.contains("Unknown command: hello"));
        assert_eq!(s.remaining(), 1);
        assert!(!output.contains("Review complete"));
    }

    #[test]
    fn delete_removes_current_card() {
        let mut s = session(&["Q1", "Q2"]);
        let output = run(&mut s, "d\nq\n");
        assert!(output.contains("Deleted card"));
        assert_eq!(s.remaining(), 1);
        assert_eq!(s.stats().reviewed(), 0);
    }

    #[test]
    fn end_of_input_stops_loop() {
        let mut s = session(&["Q1", "Q2"]);
        run(&mut s, "i\n");
        assert_eq!(s.remaining(), 2);
        assert_eq!(s.stats().incorrect, 1);
    }

    #[test]
    fn failed_write_keeps_looping_and_session_still_commits() {
        let (store, mut s) = session_with_store(&["perro", "gato"]);
        run(&mut s, "c\n");
        assert_eq!(s.stats().correct, 1);

        store.set_fail_writes(true);
        let output = run(&mut s, "i\nd\nr\nq\n");
        assert_eq!(output.matches("Error: memory store").count(), 2);
        assert!(output.contains("Answer: gato-answer"));
        assert_eq!(s.remaining(), 1);
        assert_eq!(s.stats().incorrect, 0);

        store.set_fail_writes(false);
        let totals = s.finish().unwrap();
        assert_eq!(totals.total_sessions, 1);
        assert_eq!(totals.total_correct, 1);
        assert_eq!(totals.total_reviewed, 1);
    }
}
