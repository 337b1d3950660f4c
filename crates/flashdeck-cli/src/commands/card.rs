//! The `flashdeck card` commands.

use anyhow::Result;
use comfy_table::Table;

use flashdeck_core::model::{CardId, CardText, NewCard};
use flashdeck_core::registry::CategoryRegistry;

use super::StoreTarget;

pub fn add(target: &StoreTarget, category: &str, question: &str, answer: &str) -> Result<()> {
    let store = target.open()?;
    let registry = CategoryRegistry::load(store.clone())?;
    let category = registry.require(category)?;

    let card = NewCard::new(category.id, question, answer)?;
    let id = store.add_card(&card)?;
    tracing::debug!(card_id = id, category_id = category.id, "card added");
    println!("Added card {id} to {}", category.name);
    Ok(())
}

/// Replace the question and answer of card `id`. The review score is kept.
pub fn edit(target: &StoreTarget, id: CardId, question: &str, answer: &str) -> Result<()> {
    let text = CardText::new(question, answer)?;
    let store = target.open()?;
    if store.update_card(id, &text)? {
        tracing::debug!(card_id = id, "card updated");
        println!("Updated card {id}");
    } else {
        println!("No card with id {id}");
    }
    Ok(())
}

pub fn list(target: &StoreTarget, category: Option<&str>) -> Result<()> {
    let store = target.open()?;
    let registry = CategoryRegistry::load(store.clone())?;

    let categories = match category {
        Some(name) => vec![registry.require(name)?.clone()],
        None => registry.categories().to_vec(),
    };

    let mut table = Table::new();
    table.set_header(vec!["ID", "Category", "Question", "Answer", "Score"]);
    let mut count = 0usize;
    for category in &categories {
        for card in store.get_cards_by_category(category.id)? {
            table.add_row(vec![
                card.id.to_string(),
                category.name.clone(),
                card.question,
                card.answer,
                card.review_score.to_string(),
            ]);
            count += 1;
        }
    }

    if count == 0 {
        println!("No cards found.");
    } else {
        println!("{table}");
    }
    Ok(())
}
