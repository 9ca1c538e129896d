// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Two ways to use the tool:
// - `readme-forge generate <url>`: one run, then exit
// - `readme-forge` or `readme-forge interactive`: keep asking for URLs
//
// Credentials never go on the command line; they come from the
// environment (see config.rs).
// =============================================================================

use clap::{Parser, Subcommand};
use std::path::PathBuf;

// This struct represents our entire CLI application
#[derive(Parser, Debug)]
#[command(
    name = "readme-forge",
    version,
    about = "Generate a README and a one-line summary for a GitHub repository",
    long_about = "readme-forge collects the source files of a GitHub repository, sends them to a \
                  language model, and shows the generated README.md and a one-line project summary. \
                  Set OPENROUTER_API_KEY (and optionally GITHUB_TOKEN) in the environment or a .env file."
)]
pub struct Cli {
    // No subcommand means interactive mode
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a README for one repository and exit
    ///
    /// Example: readme-forge generate https://github.com/user/repo
    Generate {
        /// GitHub repository URL (e.g., https://github.com/user/repo)
        repo_url: String,

        /// Output the result as JSON instead of readable text
        #[arg(long)]
        json: bool,

        /// Also write an HTML page with the results and a download link
        #[arg(long, value_name = "PATH")]
        page: Option<PathBuf>,
    },

    /// Ask for repository URLs one at a time until `quit` or end of input
    Interactive,
}
