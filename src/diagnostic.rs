// src/diagnostic.rs
// =============================================================================
// User-facing messages produced while a run is in progress.
//
// Instead of printing warnings from deep inside the collector, every
// recoverable or fatal problem becomes a Diagnostic value that travels back
// with the result. The presentation layer decides how to show them, and
// tests can count them.
// =============================================================================

use serde::Serialize;

/// How bad a diagnostic is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// The run continued (an item was skipped, or there was nothing to do)
    Warning,
    /// The run stopped at this point
    Error,
}

/// Which of the two completion calls a generation failure belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Readme,
    Summary,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Readme => write!(f, "README"),
            Stage::Summary => write!(f, "summary"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    #[error("Please enter a valid GitHub repository URL ({reason})")]
    InvalidRepository { input: String, reason: String },

    #[error("Failed to fetch repository contents for {repository}: {reason}")]
    RootListingFailed { repository: String, reason: String },

    #[error("Could not fetch file: {path}. Skipping. Error: {reason}")]
    SkippedFile { path: String, reason: String },

    #[error("Could not fetch directory: {path}. Skipping. Error: {reason}")]
    SkippedDirectory { path: String, reason: String },

    #[error("No files ending in {} found in the repository", .extensions.join(" or "))]
    NoMatchingFiles { extensions: Vec<String> },

    #[error("Generating the {stage} failed: {reason}")]
    GenerationFailed { stage: Stage, reason: String },
}

impl Diagnostic {
    pub fn severity(&self) -> Severity {
        match self {
            Diagnostic::InvalidRepository { .. }
            | Diagnostic::RootListingFailed { .. }
            | Diagnostic::GenerationFailed { .. } => Severity::Error,
            Diagnostic::SkippedFile { .. }
            | Diagnostic::SkippedDirectory { .. }
            | Diagnostic::NoMatchingFiles { .. } => Severity::Warning,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity() {
        let skipped = Diagnostic::SkippedFile {
            path: "src/a.py".to_string(),
            reason: "HTTP 404".to_string(),
        };
        assert_eq!(skipped.severity(), Severity::Warning);

        let root = Diagnostic::RootListingFailed {
            repository: "owner/demo".to_string(),
            reason: "HTTP 404".to_string(),
        };
        assert_eq!(root.severity(), Severity::Error);
    }

    #[test]
    fn test_messages() {
        let none = Diagnostic::NoMatchingFiles {
            extensions: vec![".py".to_string(), ".ipynb".to_string()],
        };
        assert_eq!(
            none.to_string(),
            "No files ending in .py or .ipynb found in the repository"
        );

        let failed = Diagnostic::GenerationFailed {
            stage: Stage::Summary,
            reason: "HTTP 500".to_string(),
        };
        assert_eq!(failed.to_string(), "Generating the summary failed: HTTP 500");
    }

    #[test]
    fn test_serializes_with_kind_and_fields() {
        let skipped = Diagnostic::SkippedDirectory {
            path: "docs".to_string(),
            reason: "timeout".to_string(),
        };
        let value = serde_json::to_value(&skipped).unwrap();
        assert_eq!(value["kind"], "skipped_directory");
        assert_eq!(value["path"], "docs");
    }
}
