// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Load .env, set up logging, parse command-line arguments
// 2. Load configuration and build the pipeline
// 3. Run once (generate) or keep prompting (interactive)
// 4. Exit with a proper code (0 = README generated, 1 = nothing generated,
//    2 = error)
//
// Rust concepts used:
// - async/await: every step is a network call we wait for
// - Result<T, E>: For error handling
// - match: Pattern matching to handle different subcommands
// =============================================================================

mod cli;
mod config;
mod diagnostic;
mod github;
mod llm;
mod pipeline;
mod present;

use anyhow::{Context, Result};
use clap::Parser;
use std::io::Write;
use std::path::Path;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::{Cli, Commands};
use config::Config;
use pipeline::Pipeline;

#[tokio::main]
async fn main() {
    // A missing .env file is fine; real environment variables still apply
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "readme_forge=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Returns:
//   Ok(0) = README and summary generated
//   Ok(1) = nothing generated (reasons already printed)
//   Err   = configuration or internal error
async fn run() -> Result<i32> {
    let cli = Cli::parse();

    let config = Config::from_env().context("Failed to load configuration")?;
    let pipeline = Pipeline::new(config).context("Failed to create HTTP clients")?;

    match cli.command {
        Some(Commands::Generate { repo_url, json, page }) => {
            handle_generate(&pipeline, &repo_url, json, page.as_deref()).await
        }
        Some(Commands::Interactive) | None => handle_interactive(&pipeline).await,
    }
}

// Handles the 'generate' subcommand
async fn handle_generate(pipeline: &Pipeline, repo_url: &str, json: bool, page: Option<&Path>) -> Result<i32> {
    if !json {
        println!("🔍 Generating README for: {}", repo_url);
        println!("🤖 Model: {}", pipeline.model());
    }

    let outcome = pipeline.run(repo_url).await;

    present::print_outcome(&outcome, json)?;

    if let Some(path) = page {
        tokio::fs::write(path, present::render_page(&outcome))
            .await
            .with_context(|| format!("Failed to write page to {}", path.display()))?;
        if !json {
            println!("🌐 Page written to {}", path.display());
        }
    }

    if outcome.is_complete() {
        Ok(0)
    } else {
        Ok(1)
    }
}

// Handles interactive mode: one run per line of input
//
// Nothing that goes wrong inside a run ends the session; only end of input
// or "quit"/"exit" does.
async fn handle_interactive(pipeline: &Pipeline) -> Result<i32> {
    println!("📄 GitHub README File Generator");
    println!("🤖 Model: {}", pipeline.model());
    println!("Type a repository URL and press Enter. Type 'quit' to leave.\n");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("🔗 Enter GitHub Repository URL: ");
        std::io::stdout().flush()?;

        let line = match lines.next_line().await? {
            Some(line) => line,
            None => break,
        };

        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if matches!(input, "quit" | "exit") {
            break;
        }

        println!("🚀 Generating README...");
        let outcome = pipeline.run(input).await;
        present::print_outcome(&outcome, false)?;
        println!();
    }

    println!("👋 Bye");
    Ok(0)
}
