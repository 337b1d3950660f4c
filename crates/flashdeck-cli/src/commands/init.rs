//! The `flashdeck init` command.

use std::path::Path;

use anyhow::Result;

use flashdeck_store::config::SAMPLE_CONFIG;

use super::StoreTarget;

pub fn execute(target: &StoreTarget) -> Result<()> {
    let config_path = target
        .config
        .as_deref()
        .unwrap_or_else(|| Path::new("flashdeck.toml"));
    if config_path.exists() {
        println!("{} already exists, skipping.", config_path.display());
    } else {
        std::fs::write(config_path, SAMPLE_CONFIG)?;
        println!("Created {}", config_path.display());
    }

    let path = target.database_path()?;
    let store = target.open()?;
    println!("Database ready at {}", path.display());

    let stats = store.get_global_stats()?;
    println!();
    super::stats::print_global(&stats);

    println!("\nNext steps:");
    println!("  1. flashdeck category add \"Spanish\"");
    println!("  2. flashdeck card add --category Spanish --question perro --answer dog");
    println!("  3. flashdeck review Spanish");

    Ok(())
}
