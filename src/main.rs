//! Dialbook - Entry Point
//!
//! Interactive loop: reads commands from stdin, runs them through the
//! interpreter, prints the reply. `all` bypasses interpretation and lists
//! every contact directly.

use dialbook::command::CommandInterpreter;
use dialbook::core::config::BookConfig;
use dialbook::core::error::Result;

use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;
use tokio::runtime::Runtime;

/// Phone book managed with natural-language commands
#[derive(Parser, Debug)]
#[command(name = "dialbook")]
#[command(about = "Manage a phone book with natural-language commands")]
struct Args {
    /// TOML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// SQLite database path (overrides config)
    #[arg(long)]
    db: Option<PathBuf>,

    /// Confidence threshold in [0, 1] (overrides config)
    #[arg(long)]
    min_confidence: Option<f32>,
}

fn main() -> Result<()> {
    // Initialize tracing for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("dialbook=info")),
        )
        .init();

    let args = Args::parse();

    let mut config = BookConfig::load(args.config.as_deref())?;
    if let Some(db) = args.db {
        config.db_path = db;
    }
    if let Some(threshold) = args.min_confidence {
        config.min_confidence = threshold.clamp(0.0, 1.0);
    }

    if config.api_key.is_empty() {
        tracing::warn!(
            "LLM_API_KEY not set - natural language commands will be asked to rephrase"
        );
    }
    tracing::info!("phone book at {}", config.db_path.display());

    // Create the async runtime for LLM calls
    let rt = Runtime::new()?;
    let interpreter = CommandInterpreter::from_config(&config)?;

    // Display welcome message
    println!("\n=== PHONE BOOK ===");
    println!("Use natural language to manage your contacts");
    println!();
    println!("Commands:");
    println!("  all             - Show all contacts");
    println!("  quit / q        - Exit");
    println!("  <any text>      - Natural language command, e.g.:");
    println!("      Add John with number 123456789");
    println!("      What is the phone number for Joanna?");
    println!("      Update John's number to 987654321");
    println!("      Who's number is 222333444?");
    println!("      Remove Alex from my contacts");
    println!();

    // Main command loop
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }
        let input = input.trim();

        if input.is_empty() {
            continue;
        }

        if input == "quit" || input == "q" {
            break;
        }

        // "Show all" shortcut: straight to the store, no extraction
        if input == "all" {
            println!("{}", interpreter.list_all());
            continue;
        }

        let reply = rt.block_on(interpreter.interpret(input));
        println!("{}", reply);
    }

    println!("Goodbye!");
    Ok(())
}
