//! The `flashdeck category` commands.

use anyhow::Result;
use comfy_table::Table;

use flashdeck_core::registry::CategoryRegistry;

use super::StoreTarget;

pub fn add(target: &StoreTarget, name: &str) -> Result<()> {
    let store = target.open()?;
    let mut registry = CategoryRegistry::load(store)?;
    if registry.add(name)? {
        println!("Added category: {}", name.trim());
    } else {
        println!("Category already exists: {}", name.trim());
    }
    Ok(())
}

pub fn list(target: &StoreTarget) -> Result<()> {
    let store = target.open()?;
    let registry = CategoryRegistry::load(store.clone())?;

    if registry.categories().is_empty() {
        println!("No categories yet. Run `flashdeck category add <NAME>` to create one.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["ID", "Name", "Cards"]);
    for category in registry.categories() {
        let cards = store.get_cards_by_category(category.id)?;
        table.add_row(vec![
            category.id.to_string(),
            category.name.clone(),
            cards.len().to_string(),
        ]);
    }
    println!("{table}");
    Ok(())
}
