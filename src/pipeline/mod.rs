// src/pipeline/mod.rs
// =============================================================================
// This module runs one README generation from start to finish.
//
// Steps:
// 1. Collect the repository's source files
// 2. Join them into one text blob (file by file, line by line)
// 3. Ask the model for a README of that code
// 4. Ask the model for a one-line summary of that README
//
// Each step reports problems as diagnostics and the run stops at the first
// step that cannot continue. Nothing here panics or returns Err, so an
// interactive session can keep going after a bad URL.
//
// Rust concepts:
// - Struct composition: the pipeline owns a collector and a client
// - Early returns to stop a run
// =============================================================================

mod prompt;

use anyhow::Result;
use serde::Serialize;
use tracing::info;

use crate::config::Config;
use crate::diagnostic::{Diagnostic, Stage};
use crate::github::{Collector, FileContent, RepoRef};
use crate::llm::{CompletionClient, GenerateError};
use crate::present::DownloadArtifact;

/// Everything one run produced
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunOutcome {
    /// "owner/name" when the URL parsed, otherwise the raw input
    pub repository: String,
    /// Paths of the collected files, in the order they were sent to the model
    pub files: Vec<String>,
    pub readme: String,
    pub summary: String,
    pub diagnostics: Vec<Diagnostic>,
}

impl RunOutcome {
    fn new(repo_url: &str) -> Self {
        let repository = RepoRef::parse(repo_url)
            .map(|repo| repo.to_string())
            .unwrap_or_else(|_| repo_url.trim().to_string());

        Self {
            repository,
            ..Self::default()
        }
    }

    /// True when both the README and the summary were generated
    pub fn is_complete(&self) -> bool {
        !self.readme.trim().is_empty() && !self.summary.trim().is_empty()
    }

    /// The README as a downloadable file, once the run is complete
    pub fn download(&self) -> Option<DownloadArtifact> {
        if self.is_complete() {
            Some(DownloadArtifact::readme(&self.readme))
        } else {
            None
        }
    }
}

/// Joins collected files into one blob: files in order, lines joined by '\n'
pub fn join_sources(files: &[FileContent]) -> String {
    files
        .iter()
        .map(|file| file.lines.join("\n"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Collector plus completion client, wired together
pub struct Pipeline {
    collector: Collector,
    generator: CompletionClient,
}

impl Pipeline {
    pub fn new(config: Config) -> Result<Self> {
        Ok(Self {
            collector: Collector::new(config.github)?,
            generator: CompletionClient::new(config.completion)?,
        })
    }

    pub fn model(&self) -> &str {
        self.generator.model()
    }

    /// Runs collection and both generation steps for one repository URL
    pub async fn run(&self, repo_url: &str) -> RunOutcome {
        let mut outcome = RunOutcome::new(repo_url);

        let collection = self.collector.collect(repo_url).await;
        outcome.diagnostics = collection.diagnostics;
        outcome.files = collection.files.iter().map(|f| f.path.clone()).collect();

        // The collector already said why there is nothing to summarize
        if collection.files.is_empty() {
            return outcome;
        }

        let source = join_sources(&collection.files);
        info!(repository = %outcome.repository, files = outcome.files.len(), source_chars = source.len(), "generating README");

        outcome.readme = match self.generator.generate(&prompt::readme_prompt(&source)).await {
            Ok(readme) => readme,
            Err(e) => {
                outcome.diagnostics.push(generation_failed(Stage::Readme, e));
                return outcome;
            }
        };

        info!(repository = %outcome.repository, "generating one-line summary");

        match self.generator.generate(&prompt::summary_prompt(&outcome.readme)).await {
            Ok(summary) => outcome.summary = summary,
            Err(e) => outcome.diagnostics.push(generation_failed(Stage::Summary, e)),
        }

        outcome
    }
}

fn generation_failed(stage: Stage, error: GenerateError) -> Diagnostic {
    Diagnostic::GenerationFailed {
        stage,
        reason: error.to_string(),
    }
}
