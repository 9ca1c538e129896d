// src/present/terminal.rs
// =============================================================================
// Prints a run in the terminal, either as readable sections or as JSON.
//
// Readable output looks like:
//
//   📝 Project Summary (1-line):
//   <summary>
//
//   📘 README.md Content:
//   <readme>
//
//   📥 Download README.md: data:text/markdown;base64,...
//
// followed by any warnings and errors from the run.
// =============================================================================

use anyhow::Result;
use serde::Serialize;

use super::DownloadArtifact;
use crate::diagnostic::{Diagnostic, Severity};
use crate::pipeline::RunOutcome;

// JSON shape of a run, with the download link spelled out
#[derive(Serialize)]
struct Report<'a> {
    repository: &'a str,
    complete: bool,
    files: &'a [String],
    summary: &'a str,
    readme: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    download: Option<DownloadReport>,
    diagnostics: Vec<DiagnosticReport<'a>>,
}

#[derive(Serialize)]
struct DownloadReport {
    #[serde(flatten)]
    artifact: DownloadArtifact,
    data_uri: String,
}

#[derive(Serialize)]
struct DiagnosticReport<'a> {
    severity: Severity,
    message: String,
    #[serde(flatten)]
    detail: &'a Diagnostic,
}

/// Prints the outcome as sections, or as pretty JSON when `json` is set
pub fn print_outcome(outcome: &RunOutcome, json: bool) -> Result<()> {
    if json {
        println!("{}", render_json(outcome)?);
    } else {
        print!("{}", render_text(outcome));
    }
    Ok(())
}

pub fn render_json(outcome: &RunOutcome) -> Result<String> {
    let report = Report {
        repository: &outcome.repository,
        complete: outcome.is_complete(),
        files: &outcome.files,
        summary: outcome.summary.trim(),
        readme: outcome.readme.trim(),
        download: outcome.download().map(|artifact| DownloadReport {
            data_uri: artifact.data_uri(),
            artifact,
        }),
        diagnostics: outcome
            .diagnostics
            .iter()
            .map(|diagnostic| DiagnosticReport {
                severity: diagnostic.severity(),
                message: diagnostic.to_string(),
                detail: diagnostic,
            })
            .collect(),
    };

    Ok(serde_json::to_string_pretty(&report)?)
}

pub fn render_text(outcome: &RunOutcome) -> String {
    let mut out = String::new();

    if let Some(artifact) = outcome.download() {
        out.push_str(&format!("\n📄 Used {} file(s) from {}\n", outcome.files.len(), outcome.repository));

        out.push_str("\n📝 Project Summary (1-line):\n");
        out.push_str(outcome.summary.trim());
        out.push('\n');

        out.push_str("\n📘 README.md Content:\n");
        out.push_str(&"=".repeat(60));
        out.push('\n');
        out.push_str(outcome.readme.trim());
        out.push('\n');
        out.push_str(&"=".repeat(60));
        out.push('\n');

        out.push_str(&format!("\n📥 Download {}: {}\n", artifact.file_name, artifact.data_uri()));
    } else if outcome.readme.trim().is_empty() {
        out.push_str(&format!("\n⚠️  No README generated for {}\n", outcome.repository));
    } else {
        // A README without its summary is not offered for download
        out.push_str(&format!(
            "\n⚠️  README and summary were not both generated for {}\n",
            outcome.repository
        ));
    }

    for diagnostic in &outcome.diagnostics {
        out.push_str(&format!("{} {}\n", severity_marker(diagnostic.severity()), diagnostic));
    }

    out
}

fn severity_marker(severity: Severity) -> &'static str {
    match severity {
        Severity::Warning => "⚠️ ",
        Severity::Error => "❌",
    }
}
