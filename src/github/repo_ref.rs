// src/github/repo_ref.rs
// =============================================================================
// Parsing repository URLs into an owner/name pair.
//
// Users paste all sorts of things into the prompt:
//   https://github.com/owner/repo
//   https://github.com/owner/repo.git
//   https://github.com/owner/repo/tree/main/src
//   github.com/owner/repo/
// All of these should reduce to ("owner", "repo").
//
// Rust concepts:
// - FromStr-style constructors returning Result
// - The `url` crate for robust URL parsing
// =============================================================================

use std::fmt;
use url::Url;

/// An owner/name pair identifying one GitHub repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    pub owner: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepoRefError {
    #[error("no repository URL given")]
    Empty,
    #[error("not a URL: {0}")]
    Malformed(String),
    #[error("not a GitHub URL: {0}")]
    NotGithub(String),
    #[error("expected https://github.com/<owner>/<repo>, got {0}")]
    MissingOwnerOrName(String),
}

impl RepoRef {
    /// Parses a GitHub repository URL
    ///
    /// The scheme is optional; anything after the repository name
    /// (branches, sub-paths, query strings) is ignored.
    pub fn parse(input: &str) -> Result<Self, RepoRefError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(RepoRefError::Empty);
        }

        // Allow "github.com/owner/repo" by assuming https
        let with_scheme = if input.contains("://") {
            input.to_string()
        } else {
            format!("https://{}", input)
        };

        let url = Url::parse(&with_scheme).map_err(|_| RepoRefError::Malformed(input.to_string()))?;

        match url.host_str() {
            Some("github.com") | Some("www.github.com") => {}
            _ => return Err(RepoRefError::NotGithub(input.to_string())),
        }

        let mut segments = url
            .path_segments()
            .into_iter()
            .flatten()
            .filter(|segment| !segment.is_empty());

        let owner = segments.next().unwrap_or_default();
        let name = segments.next().unwrap_or_default();
        let name = name.strip_suffix(".git").unwrap_or(name);

        if owner.is_empty() || name.is_empty() {
            return Err(RepoRefError::MissingOwnerOrName(input.to_string()));
        }

        Ok(Self {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }

    /// The "list contents" endpoint for the repository root
    pub fn contents_url(&self, api_url: &str) -> String {
        format!("{}/repos/{}/{}/contents", api_url, self.owner, self.name)
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}
