use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use navigation::SectionCatalog;
use shared::deck::Deck;
use tracing_subscriber::EnvFilter;

mod tour;

#[derive(Parser, Debug)]
#[command(name = "tools", about = "Portfolio deck utilities")]
struct Cli {
    /// Deck file; the built-in portfolio when omitted.
    #[arg(long, global = true)]
    deck: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List sections in navigation order with their history locations.
    Sections,
    /// Resolve a deep link ('#plan-90j') to the section it opens.
    Resolve { link: String },
    /// Write the portfolio export as JSON.
    Export {
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Parse and validate a deck file.
    Validate { path: PathBuf },
    /// Visit every section on a timer and print the session history.
    Tour {
        #[arg(long, default_value_t = 1000)]
        dwell_ms: u64,
    },
}

fn load_deck(path: Option<&PathBuf>) -> Result<Deck> {
    match path {
        Some(path) => {
            Deck::load(path).with_context(|| format!("failed to load deck '{}'", path.display()))
        }
        None => Ok(Deck::default()),
    }
}

/// One-line summary of a deck file that parses and validates.
fn validate_deck(path: &Path) -> Result<String> {
    let deck =
        Deck::load(path).with_context(|| format!("deck '{}' is invalid", path.display()))?;
    Ok(format!(
        "ok: {} sections, {} glossary terms",
        deck.sections.len(),
        deck.glossary.len()
    ))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Sections => {
            let deck = load_deck(cli.deck.as_ref())?;
            let catalog = SectionCatalog::new(deck.section_ids())?;
            for (index, section) in deck.sections.iter().enumerate() {
                println!(
                    "{index}\t{}\t{}\t{}",
                    section.id,
                    catalog.location_of(&section.id),
                    section.nav_label
                );
            }
        }
        Command::Resolve { link } => {
            let deck = load_deck(cli.deck.as_ref())?;
            let catalog = SectionCatalog::new(deck.section_ids())?;
            let section = catalog.resolve_initial_section(&link);
            println!("{section}\t{}", catalog.location_of(section));
        }
        Command::Export { out } => {
            let deck = load_deck(cli.deck.as_ref())?;
            let json = serde_json::to_string_pretty(&deck.export(chrono::Utc::now()))
                .context("failed to serialize portfolio export")?;
            match out {
                Some(path) => {
                    fs::write(&path, json)
                        .with_context(|| format!("failed to write '{}'", path.display()))?;
                    println!("exported portfolio to {}", path.display());
                }
                None => println!("{json}"),
            }
        }
        Command::Validate { path } => println!("{}", validate_deck(&path)?),
        Command::Tour { dwell_ms } => {
            let deck = load_deck(cli.deck.as_ref())?;
            let report = tour::run_tour(&deck, Duration::from_millis(dwell_ms)).await?;
            for location in report.locations {
                println!("{location}");
            }
        }
    }

    Ok(())
}
