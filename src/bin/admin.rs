//! CLI tool for inspecting the character pipeline without starting the server.
//!
//! Runs the same fetch, merge and query code the server uses, against the
//! endpoints configured in the environment.
//!
//! # Usage
//!
//! ```bash
//! # Fetch both APIs once and print a per-source summary
//! cargo run --bin admin -- fetch
//!
//! # Search the merged list (prompts for a term when omitted)
//! cargo run --bin admin -- search stark
//!
//! # Show one character and its neighbours
//! cargo run --bin admin -- show 42
//!
//! # Validate the configuration
//! cargo run --bin admin -- config check
//! ```
//!
//! # Environment Variables
//!
//! Same as the server, see `thrones_gallery::config`.

use thrones_gallery::application::services::{CharacterService, Direction};
use thrones_gallery::config::{self, Config};
use thrones_gallery::domain::entities::Character;
use thrones_gallery::domain::sources::FetchOutcome;
use thrones_gallery::server::build_character_service;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Input;
use std::sync::Arc;

/// CLI tool for thrones-gallery.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level commands.
#[derive(Subcommand)]
enum Commands {
    /// Fetch both APIs and print what each returned
    Fetch,

    /// Search characters by name
    Search {
        /// Case-insensitive part of the full name
        term: Option<String>,
    },

    /// Show one character by its merged id
    Show {
        /// Merged character id (1-based)
        id: u32,
    },

    /// Configuration operations
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Configuration subcommands.
#[derive(Subcommand)]
enum ConfigAction {
    /// Load and validate the configuration
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Fetch => {
            let service = load_service()?;
            fetch(&service).await?
        }
        Commands::Search { term } => {
            let service = load_service()?;
            search(&service, term).await?
        }
        Commands::Show { id } => {
            let service = load_service()?;
            show(&service, id).await?
        }
        Commands::Config { action } => handle_config_action(action)?,
    }

    Ok(())
}

/// Builds the service from the environment, as the server does.
fn load_service() -> Result<Arc<CharacterService>> {
    let config = config::load_from_env().context("Invalid configuration")?;
    build_character_service(&config)
}

/// Runs the pipeline once and prints the per-source outcome.
///
/// # Output Format
///
/// ```text
/// 📥 Fetch
///
///   Source       Fetched  Outcome
///   ──────────────────────────────────────────────
///   thrones      53       complete
///   ice_and_fire 2134     truncated: page 43 failed: ...
///
///   Merged: 2181
/// ```
async fn fetch(service: &CharacterService) -> Result<()> {
    println!("{}", "📥 Fetch".bright_blue().bold());
    println!();

    let snapshot = service.snapshot().await;

    println!(
        "  {:<12} {:<8} {}",
        "Source".bright_white().bold(),
        "Fetched".bright_white().bold(),
        "Outcome".bright_white().bold()
    );
    println!("  {}", "─".repeat(46).bright_black());

    for summary in &snapshot.sources {
        let outcome = match &summary.outcome {
            FetchOutcome::Complete => "complete".green(),
            FetchOutcome::Truncated { reason } => format!("truncated: {reason}").yellow(),
            FetchOutcome::Failed { reason } => format!("failed: {reason}").red(),
        };

        println!(
            "  {:<12} {:<8} {}",
            summary.source.as_str().cyan(),
            summary.fetched,
            outcome
        );
    }

    println!();
    println!(
        "  Merged: {}",
        snapshot.characters.len().to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

/// Searches the merged list, prompting for a term when none is given.
async fn search(service: &CharacterService, term: Option<String>) -> Result<()> {
    let term = match term {
        Some(t) => t,
        None => Input::new().with_prompt("Name").interact_text()?,
    };

    println!("{}", format!("🔍 Search \"{term}\"").bright_blue().bold());
    println!();

    let matches = service.search(&term).await;

    if matches.is_empty() {
        println!("{}", "  No character matches".yellow());
        println!();
        return Ok(());
    }

    for character in &matches {
        println!(
            "  {:>5}  {}  {}",
            character.id.to_string().bright_black(),
            character.full_name.cyan(),
            character.family.bright_black()
        );
    }

    println!();
    println!(
        "  Found: {}",
        matches.len().to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

/// Prints one character with the ids of its neighbours.
async fn show(service: &CharacterService, id: u32) -> Result<()> {
    let character = service
        .find_by_id(id)
        .await
        .with_context(|| format!("Character {id} not found"))?;

    print_character(&character);

    let prev = service.navigate(id, Direction::Prev).await;
    let next = service.navigate(id, Direction::Next).await;
    if let (Some(prev), Some(next)) = (prev, next) {
        println!(
            "  {} {} ({})   {} {} ({})",
            "←".bright_black(),
            prev.full_name,
            prev.id,
            "→".bright_black(),
            next.full_name,
            next.id
        );
        println!();
    }

    Ok(())
}

fn print_character(character: &Character) {
    let or_none = |values: &[String], none: &str| {
        if values.is_empty() {
            none.to_string()
        } else {
            values.join(", ")
        }
    };

    println!(
        "{} {}",
        format!("#{}", character.id).bright_black(),
        character.full_name.bright_blue().bold()
    );
    println!();
    println!("  Family:  {}", character.family.cyan());
    println!("  Born:    {}", character.born);
    println!("  Died:    {}", character.died);
    println!("  Titles:  {}", or_none(&character.titles, "No title"));
    println!("  Aliases: {}", or_none(&character.aliases, "No aliases"));
    if let Some(image) = &character.image {
        println!("  Image:   {}", image.bright_black());
    }
    println!("  Source:  {}", character.source.api_name());
    println!();
}

/// Handles configuration commands.
fn handle_config_action(action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Check => {
            println!("{}", "🔧 Checking configuration...".bright_blue());

            let config = Config::from_env()?;
            if let Err(e) = config.validate() {
                println!("{} {}", "❌".red(), e.to_string().red());
                return Err(e);
            }

            println!("  Listen:       {}", config.listen_addr.cyan());
            println!("  ThronesAPI:   {}", config.thrones_api_url.cyan());
            println!("  Ice and Fire: {}", config.ice_and_fire_api_url.cyan());
            println!(
                "  Pages:        {} x {}",
                config.ice_and_fire_max_pages, config.ice_and_fire_page_size
            );
            println!("  Timeout:      {}s", config.http_timeout_seconds);
            println!("{}", "✅ Configuration OK".green().bold());
        }
    }

    Ok(())
}
