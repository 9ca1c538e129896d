// src/github/contents.rs
// =============================================================================
// Types and HTTP helpers for the GitHub "repository contents" API.
//
// A listing request (GET /repos/{owner}/{repo}/contents) returns a JSON
// array with one object per entry:
//
//   { "type": "file", "name": "main.py", "path": "src/main.py",
//     "url": "https://api.github.com/...", "download_url": "https://raw..." }
//
// Directories have "type": "dir" and their "url" lists the sub-directory.
//
// Rust concepts:
// - serde attributes: rename, other, default
// - anyhow for quick error propagation in small helpers
// =============================================================================

use anyhow::{anyhow, Result};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Deserialize;

/// The kind of a listing entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Dir,
    /// symlink, submodule, or anything GitHub adds later
    #[serde(other)]
    Other,
}

/// One entry of a contents listing
#[derive(Debug, Clone, Deserialize)]
pub struct TreeEntry {
    #[serde(rename = "type")]
    pub kind: EntryKind,
    pub name: String,
    #[serde(default)]
    pub path: String,
    /// API URL; for directories this is the sub-listing
    #[serde(default)]
    pub url: String,
    /// Raw file URL; null for directories
    #[serde(default)]
    pub download_url: Option<String>,
}

impl TreeEntry {
    /// True for files whose name ends in one of `extensions`
    pub fn is_source_file(&self, extensions: &[String]) -> bool {
        self.kind == EntryKind::File && extensions.iter().any(|ext| self.name.ends_with(ext.as_str()))
    }

    /// Path for messages; falls back to the name if the API left it out
    pub fn display_path(&self) -> &str {
        if self.path.is_empty() {
            &self.name
        } else {
            &self.path
        }
    }
}

/// The full text of one collected file, split into lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileContent {
    pub path: String,
    pub lines: Vec<String>,
}

impl FileContent {
    pub fn new(path: impl Into<String>, text: &str) -> Self {
        Self {
            path: path.into(),
            lines: split_lines(text),
        }
    }
}

// Splits on every line boundary a source file may use: \n, \r\n, a lone \r
// (classic Mac), and the rarer \v, \f, \x1c-\x1e, NEL, U+2028 and U+2029.
// A trailing boundary does not produce an empty last line.
fn split_lines(text: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                lines.push(std::mem::take(&mut current));
            }
            '\n' | '\x0b' | '\x0c' | '\x1c' | '\x1d' | '\x1e' | '\u{85}' | '\u{2028}' | '\u{2029}' => {
                lines.push(std::mem::take(&mut current));
            }
            _ => current.push(c),
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

// Adds the optional bearer token to a GitHub request
pub(crate) fn authorize(request: RequestBuilder, token: Option<&str>) -> RequestBuilder {
    match token {
        Some(token) => request.bearer_auth(token),
        None => request,
    }
}

// Fetches one listing (root or sub-directory)
pub(crate) async fn fetch_listing(client: &Client, url: &str, token: Option<&str>) -> Result<Vec<TreeEntry>> {
    let request = client
        .get(url)
        .header(reqwest::header::ACCEPT, "application/vnd.github+json");

    let response = send(authorize(request, token)).await?;
    let entries = response
        .json::<Vec<TreeEntry>>()
        .await
        .map_err(|e| anyhow!("unexpected listing format: {}", e))?;

    Ok(entries)
}

// Fetches the raw text of one file
pub(crate) async fn fetch_text(client: &Client, url: &str, token: Option<&str>) -> Result<String> {
    let response = send(authorize(client.get(url), token)).await?;
    let content = response.text().await.map_err(|e| anyhow!(describe_error(&e)))?;
    Ok(content)
}

// Sends a request and turns transport errors and non-2xx statuses into
// readable messages
async fn send(request: RequestBuilder) -> Result<Response> {
    let response = request.send().await.map_err(|e| anyhow!(describe_error(&e)))?;
    check_status(response)
}

fn check_status(response: Response) -> Result<Response> {
    let status = response.status();

    if status.is_success() {
        return Ok(response);
    }

    // GitHub reports an exhausted rate limit as 403/429 with this header at 0
    let rate_limited = matches!(status, StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS)
        && response
            .headers()
            .get("x-ratelimit-remaining")
            .and_then(|v| v.to_str().ok())
            == Some("0");

    if rate_limited {
        return Err(anyhow!(
            "HTTP {} (GitHub API rate limit exceeded; set GITHUB_TOKEN to raise it)",
            status.as_u16()
        ));
    }

    Err(anyhow!("HTTP {}", status.as_u16()))
}

/// Describes a reqwest error in plain words
pub(crate) fn describe_error(error: &reqwest::Error) -> String {
    if error.is_timeout() {
        "request timed out".to_string()
    } else if error.is_connect() {
        "connection failed".to_string()
    } else if error.is_decode() {
        format!("could not read response body: {}", error)
    } else {
        error.to_string()
    }
}
