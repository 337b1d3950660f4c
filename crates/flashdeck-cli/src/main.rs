//! flashdeck CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "flashdeck", version, about = "Question/answer flashcard review")]
struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Database file (overrides config and FLASHDECK_DB)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a starter config and database
    Init,

    /// Manage categories
    Category {
        #[command(subcommand)]
        action: CategoryAction,
    },

    /// Manage cards
    Card {
        #[command(subcommand)]
        action: CardAction,
    },

    /// Review the cards of a category
    Review {
        /// Category name
        category: String,
    },

    /// Show lifetime statistics
    Stats {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum CategoryAction {
    /// Add a category (existing names are left as they are)
    Add {
        /// Category name
        name: String,
    },
    /// List categories
    List,
}

#[derive(Subcommand)]
enum CardAction {
    /// Add a card to a category
    Add {
        /// Category name
        #[arg(long)]
        category: String,

        /// Question text
        #[arg(long)]
        question: String,

        /// Answer text
        #[arg(long)]
        answer: String,
    },
    /// Change the question and answer of a card
    Edit {
        /// Card ID (see `card list`)
        id: i64,

        /// New question text
        #[arg(long)]
        question: String,

        /// New answer text
        #[arg(long)]
        answer: String,
    },
    /// List cards, optionally for one category
    List {
        /// Category name
        #[arg(long)]
        category: Option<String>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("flashdeck=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let target = commands::StoreTarget {
        config: cli.config,
        db: cli.db,
    };

    let result = match cli.command {
        Commands::Init => commands::init::execute(&target),
        Commands::Category { action } => match action {
            CategoryAction::Add { name } => commands::category::add(&target, &name),
            CategoryAction::List => commands::category::list(&target),
        },
        Commands::Card { action } => match action {
            CardAction::Add {
                category,
                question,
                answer,
            } => commands::card::add(&target, &category, &question, &answer),
            CardAction::Edit {
                id,
                question,
                answer,
            } => commands::card::edit(&target, id, &question, &answer),
            CardAction::List { category } => commands::card::list(&target, category.as_deref()),
        },
        Commands::Review { category } => commands::review::execute(&target, &category),
        Commands::Stats { json } => commands::stats::execute(&target, json),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
