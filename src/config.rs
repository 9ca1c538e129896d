// src/config.rs
// =============================================================================
// This module loads the settings our pipeline needs from the environment.
//
// Everything the collector and the completion client need (credentials,
// endpoints, model id, which file extensions count as source) lives in one
// Config value that is built once in main and handed to each component.
// Nothing below reads the environment on its own.
//
// Rust concepts:
// - Closures as parameters: from_lookup takes any "key -> value" function
// - thiserror: derive Display/Error for our error enum
// - Manual trait impls: Debug is written by hand so secrets never print
// =============================================================================

use std::env;
use std::fmt;

pub const DEFAULT_MODEL: &str = "deepseek/deepseek-r1-zero:free";
pub const DEFAULT_COMPLETION_URL: &str = "https://openrouter.ai/api/v1/chat/completions";
pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";
pub const DEFAULT_EXTENSIONS: &[&str] = &[".py", ".ipynb"];
pub const DEFAULT_FETCH_CONCURRENCY: usize = 8;

/// Settings for walking a GitHub repository
#[derive(Clone)]
pub struct GithubConfig {
    /// Base URL of the REST API (no trailing slash)
    pub api_url: String,
    /// Optional access token, sent as a bearer credential
    pub token: Option<String>,
    /// File name suffixes that count as source files
    pub extensions: Vec<String>,
    /// How many files of one directory level may be fetched at once
    pub fetch_concurrency: usize,
}

/// Settings for the chat completion endpoint
#[derive(Clone)]
pub struct CompletionConfig {
    pub url: String,
    pub api_key: String,
    pub model: String,
    /// Sent as `HTTP-Referer` when present
    pub site_url: Option<String>,
    /// Sent as `X-Title` when present
    pub site_name: Option<String>,
}

/// Application configuration loaded from environment variables
#[derive(Clone, Debug)]
pub struct Config {
    pub github: GithubConfig,
    pub completion: CompletionConfig,
}

impl Config {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from any key/value source
    ///
    /// Empty values are treated the same as missing ones.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let api_key = get("OPENROUTER_API_KEY").ok_or(ConfigError::MissingEnvVar("OPENROUTER_API_KEY"))?;

        let fetch_concurrency = match get("README_FORGE_FETCH_CONCURRENCY") {
            Some(raw) => raw
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|n| *n >= 1)
                .ok_or(ConfigError::InvalidValue("README_FORGE_FETCH_CONCURRENCY"))?,
            None => DEFAULT_FETCH_CONCURRENCY,
        };

        let extensions = match get("README_FORGE_EXTENSIONS") {
            Some(raw) => {
                let parsed = parse_extensions(&raw);
                if parsed.is_empty() {
                    return Err(ConfigError::InvalidValue("README_FORGE_EXTENSIONS"));
                }
                parsed
            }
            None => DEFAULT_EXTENSIONS.iter().map(|ext| ext.to_string()).collect(),
        };

        let github = GithubConfig {
            api_url: get("GITHUB_API_URL")
                .unwrap_or_else(|| DEFAULT_GITHUB_API_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            token: get("GITHUB_TOKEN"),
            extensions,
            fetch_concurrency,
        };

        let completion = CompletionConfig {
            url: get("OPENROUTER_API_URL").unwrap_or_else(|| DEFAULT_COMPLETION_URL.to_string()),
            api_key,
            model: get("README_FORGE_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            site_url: get("OPENROUTER_SITE_URL"),
            site_name: get("OPENROUTER_SITE_NAME"),
        };

        Ok(Self { github, completion })
    }
}

// Splits ".py, ipynb,.rs" into [".py", ".ipynb", ".rs"]
fn parse_extensions(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|ext| !ext.is_empty())
        .map(|ext| {
            if ext.starts_with('.') {
                ext.to_string()
            } else {
                format!(".{}", ext)
            }
        })
        .collect()
}

fn redact(secret: &Option<String>) -> &'static str {
    if secret.is_some() {
        "<redacted>"
    } else {
        "<none>"
    }
}

impl fmt::Debug for GithubConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GithubConfig")
            .field("api_url", &self.api_url)
            .field("token", &redact(&self.token))
            .field("extensions", &self.extensions)
            .field("fetch_concurrency", &self.fetch_concurrency)
            .finish()
    }
}

impl fmt::Debug for CompletionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompletionConfig")
            .field("url", &self.url)
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("site_url", &self.site_url)
            .field("site_name", &self.site_name)
            .finish()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(&'static str),
    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(&'static str),
}
