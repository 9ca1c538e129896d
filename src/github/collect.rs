// src/github/collect.rs
// =============================================================================
// This module walks a repository's file tree breadth-first and collects the
// text of every source file.
//
// How it works:
// 1. List the repository root and put every entry in a queue
// 2. Take the whole queue as the current "level"
// 3. Fetch every matching file of the level (a few at a time, results kept
//    in queue order)
// 4. List every directory of the level and queue what comes back
// 5. Repeat until the queue is empty
//
// Processing a level at a time gives exactly the same file order as popping
// entries one by one, but lets the file downloads of one level overlap.
//
// Failure policy:
// - Root listing fails -> one error diagnostic, nothing else is fetched
// - A file or sub-directory fails -> one warning, skip it, keep going
// - Nothing matched -> one warning, empty result
//
// Rust concepts:
// - VecDeque: queue for breadth-first traversal
// - HashSet: to make sure no directory is listed twice
// - Streams: futures::stream with .buffered() for bounded, ordered concurrency
// =============================================================================

use anyhow::Result;
use futures::stream::{self, StreamExt};
use reqwest::Client;
use std::collections::{HashSet, VecDeque};
use tracing::{debug, info, warn};

use super::contents::{fetch_listing, fetch_text, EntryKind, FileContent, TreeEntry};
use super::repo_ref::RepoRef;
use crate::config::GithubConfig;
use crate::diagnostic::Diagnostic;

/// Everything one traversal produced: the files in discovery order and the
/// problems met on the way
#[derive(Debug, Default)]
pub struct Collection {
    pub files: Vec<FileContent>,
    pub diagnostics: Vec<Diagnostic>,
}

impl Collection {
    fn failed(diagnostic: Diagnostic) -> Self {
        Self {
            files: Vec::new(),
            diagnostics: vec![diagnostic],
        }
    }
}

/// Collects source files from GitHub repositories
pub struct Collector {
    client: Client,
    config: GithubConfig,
}

impl Collector {
    pub fn new(config: GithubConfig) -> Result<Self> {
        // GitHub rejects API requests without a User-Agent
        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, config })
    }

    fn token(&self) -> Option<&str> {
        self.config.token.as_deref()
    }

    /// Walks the repository behind `repo_url` and returns its source files
    ///
    /// Never fails: every problem is reported as a diagnostic inside the
    /// returned collection.
    pub async fn collect(&self, repo_url: &str) -> Collection {
        let repo = match RepoRef::parse(repo_url) {
            Ok(repo) => repo,
            Err(e) => {
                warn!(input = repo_url, error = %e, "invalid repository reference");
                return Collection::failed(Diagnostic::InvalidRepository {
                    input: repo_url.to_string(),
                    reason: e.to_string(),
                });
            }
        };

        info!(repository = %repo, "listing repository contents");

        let root_url = repo.contents_url(&self.config.api_url);
        let root = match fetch_listing(&self.client, &root_url, self.token()).await {
            Ok(entries) => entries,
            Err(e) => {
                warn!(repository = %repo, error = %e, "root listing failed");
                return Collection::failed(Diagnostic::RootListingFailed {
                    repository: repo.to_string(),
                    reason: e.to_string(),
                });
            }
        };

        let mut collection = self.walk(root).await;

        if collection.files.is_empty() {
            collection.diagnostics.push(Diagnostic::NoMatchingFiles {
                extensions: self.config.extensions.clone(),
            });
        }

        info!(
            repository = %repo,
            files = collection.files.len(),
            skipped = collection.diagnostics.len(),
            "collection finished"
        );

        collection
    }

    // Breadth-first traversal starting from the root entries
    async fn walk(&self, root: Vec<TreeEntry>) -> Collection {
        let mut collection = Collection::default();
        let mut queue: VecDeque<TreeEntry> = root.into();
        let mut listed: HashSet<String> = HashSet::new();
        let mut depth = 0usize;

        while !queue.is_empty() {
            let level: Vec<TreeEntry> = queue.drain(..).collect();
            debug!(depth, entries = level.len(), "processing level");

            let mut files = Vec::new();
            let mut dirs = Vec::new();
            for entry in level {
                match entry.kind {
                    EntryKind::File if entry.is_source_file(&self.config.extensions) => files.push(entry),
                    EntryKind::Dir => {
                        // Mark as listed when queued so a repeat in the same level is skipped too
                        if listed.insert(entry.url.clone()) {
                            dirs.push(entry);
                        }
                    }
                    _ => {}
                }
            }

            for (entry, result) in self.fetch_files(files).await {
                match result {
                    Ok(text) => {
                        debug!(path = entry.display_path(), "fetched file");
                        collection.files.push(FileContent::new(entry.display_path(), &text));
                    }
                    Err(e) => {
                        warn!(path = entry.display_path(), error = %e, "skipping file");
                        collection.diagnostics.push(Diagnostic::SkippedFile {
                            path: entry.display_path().to_string(),
                            reason: e.to_string(),
                        });
                    }
                }
            }

            for (entry, result) in self.fetch_directories(dirs).await {
                match result {
                    Ok(children) => queue.extend(children),
                    Err(e) => {
                        warn!(path = entry.display_path(), error = %e, "skipping directory");
                        collection.diagnostics.push(Diagnostic::SkippedDirectory {
                            path: entry.display_path().to_string(),
                            reason: e.to_string(),
                        });
                    }
                }
            }

            depth += 1;
        }

        collection
    }

    // Downloads files with bounded concurrency; output order matches input order
    async fn fetch_files(&self, files: Vec<TreeEntry>) -> Vec<(TreeEntry, Result<String>)> {
        let fetches = files.into_iter().map(|entry| async move {
            let result = match entry.download_url.as_deref() {
                Some(url) => fetch_text(&self.client, url, self.token()).await,
                None => Err(anyhow::anyhow!("no download URL")),
            };
            (entry, result)
        });

        stream::iter(fetches)
            .buffered(self.config.fetch_concurrency)
            .collect()
            .await
    }

    async fn fetch_directories(&self, dirs: Vec<TreeEntry>) -> Vec<(TreeEntry, Result<Vec<TreeEntry>>)> {
        let listings = dirs.into_iter().map(|entry| async move {
            let result = fetch_listing(&self.client, &entry.url, self.token()).await;
            (entry, result)
        });

        stream::iter(listings)
            .buffered(self.config.fetch_concurrency)
            .collect()
            .await
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. buffered vs buffer_unordered
//    - Both run up to N futures at once
//    - buffer_unordered yields results as they finish (fastest first)
//    - buffered yields results in the order the futures were created
//    - We need the order: the model sees files in discovery order, and the
//      same repository must always produce the same prompt
//
// 2. Why drain the whole queue each round?
//    - Everything in the queue belongs to the same breadth-first level
//    - Children of this level's directories go to the back of the queue,
//      which is exactly where one-at-a-time popping would put them
//
// 3. Why `async move` with `self` inside?
//    - `self` is a `&Collector`, and references are Copy
//    - Each future gets its own copy of the reference, not of the Collector
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::Severity;
    use mockito::{Matcher, Server, ServerGuard};
    use serde_json::json;

    fn config(server: &ServerGuard, concurrency: usize) -> GithubConfig {
        GithubConfig {
            api_url: server.url(),
            token: None,
            extensions: vec![".py".to_string(), ".ipynb".to_string()],
            fetch_concurrency: concurrency,
        }
    }

    fn file(server: &ServerGuard, path: &str) -> serde_json::Value {
        let name = path.rsplit('/').next().unwrap();
        json!({
            "type": "file",
            "name": name,
            "path": path,
            "url": format!("{}/api/{}", server.url(), path),
            "download_url": format!("{}/raw/{}", server.url(), path),
        })
    }

    fn dir(server: &ServerGuard, path: &str) -> serde_json::Value {
        let name = path.rsplit('/').next().unwrap();
        json!({
            "type": "dir",
            "name": name,
            "path": path,
            "url": format!("{}/repos/owner/demo/contents/{}", server.url(), path),
            "download_url": null,
        })
    }

    async fn mock_json(server: &mut ServerGuard, path: &str, body: serde_json::Value) -> mockito::Mock {
        server
            .mock("GET", path)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .create_async()
            .await
    }

    async fn mock_raw(server: &mut ServerGuard, path: &str, body: &str) -> mockito::Mock {
        server
            .mock("GET", format!("/raw/{}", path).as_str())
            .with_status(200)
            .with_body(body)
            .create_async()
            .await
    }

    // Builds this tree:
    //   a.py
    //   pkg/
    //     b.py
    //     deep/
    //       d.ipynb
    //   README.md
    //   c.py
    async fn nested_repo(server: &mut ServerGuard) -> Vec<mockito::Mock> {
        let root = json!([file(server, "a.py"), dir(server, "pkg"), file(server, "README.md"), file(server, "c.py")]);
        let pkg = json!([dir(server, "pkg/deep"), file(server, "pkg/b.py")]);
        let deep = json!([file(server, "pkg/deep/d.ipynb")]);

        vec![
            mock_json(server, "/repos/owner/demo/contents", root).await,
            mock_json(server, "/repos/owner/demo/contents/pkg", pkg).await,
            mock_json(server, "/repos/owner/demo/contents/pkg/deep", deep).await,
            mock_raw(server, "a.py", "print('a')\n").await,
            mock_raw(server, "c.py", "print('c')\n").await,
            mock_raw(server, "pkg/b.py", "print('b')\n").await,
            mock_raw(server, "pkg/deep/d.ipynb", "{\"cells\": []}\n").await,
        ]
    }

    fn paths(collection: &Collection) -> Vec<&str> {
        collection.files.iter().map(|f| f.path.as_str()).collect()
    }

    #[tokio::test]
    async fn test_collects_every_matching_leaf_in_breadth_first_order() {
        let mut server = Server::new_async().await;
        let _repo = nested_repo(&mut server).await;

        let collector = Collector::new(config(&server, 4)).unwrap();
        let collection = collector.collect("https://github.com/owner/demo").await;

        assert_eq!(paths(&collection), vec!["a.py", "c.py", "pkg/b.py", "pkg/deep/d.ipynb"]);
        assert!(collection.diagnostics.is_empty());
        assert_eq!(collection.files[0].lines, vec!["print('a')"]);
    }

    #[tokio::test]
    async fn test_order_does_not_depend_on_concurrency() {
        let mut server = Server::new_async().await;
        let _repo = nested_repo(&mut server).await;

        let sequential = Collector::new(config(&server, 1)).unwrap();
        let parallel = Collector::new(config(&server, 8)).unwrap();

        let first = sequential.collect("https://github.com/owner/demo").await;
        let second = parallel.collect("https://github.com/owner/demo").await;

        assert_eq!(first.files, second.files);
    }

    #[tokio::test]
    async fn test_root_failure_is_one_error_and_no_fetches() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/repos/owner/demo/contents")
            .with_status(404)
            .create_async()
            .await;
        let raw = server
            .mock("GET", Matcher::Regex("^/raw/".to_string()))
            .expect(0)
            .create_async()
            .await;

        let collector = Collector::new(config(&server, 4)).unwrap();
        let collection = collector.collect("https://github.com/owner/demo").await;

        assert!(collection.files.is_empty());
        assert_eq!(collection.diagnostics.len(), 1);
        assert_eq!(collection.diagnostics[0].severity(), Severity::Error);
        assert!(matches!(collection.diagnostics[0], Diagnostic::RootListingFailed { .. }));
        raw.assert_async().await;
    }

    #[tokio::test]
    async fn test_failed_file_is_skipped_with_one_warning() {
        let mut server = Server::new_async().await;
        let root = json!([file(&server, "ok.py"), file(&server, "broken.py"), file(&server, "also_ok.py")]);
        let _m = mock_json(&mut server, "/repos/owner/demo/contents", root).await;
        let _m = mock_raw(&mut server, "ok.py", "x = 1").await;
        let _m = mock_raw(&mut server, "also_ok.py", "y = 2").await;
        let _m = server
            .mock("GET", "/raw/broken.py")
            .with_status(500)
            .create_async()
            .await;

        let collector = Collector::new(config(&server, 2)).unwrap();
        let collection = collector.collect("https://github.com/owner/demo").await;

        assert_eq!(paths(&collection), vec!["ok.py", "also_ok.py"]);
        assert_eq!(collection.diagnostics.len(), 1);
        assert_eq!(
            collection.diagnostics[0],
            Diagnostic::SkippedFile {
                path: "broken.py".to_string(),
                reason: "HTTP 500".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_failed_directory_is_skipped() {
        let mut server = Server::new_async().await;
        let root = json!([dir(&server, "gone"), file(&server, "main.py")]);
        let _m = mock_json(&mut server, "/repos/owner/demo/contents", root).await;
        let _m = mock_raw(&mut server, "main.py", "main()").await;
        let _m = server
            .mock("GET", "/repos/owner/demo/contents/gone")
            .with_status(404)
            .create_async()
            .await;

        let collector = Collector::new(config(&server, 4)).unwrap();
        let collection = collector.collect("https://github.com/owner/demo").await;

        assert_eq!(paths(&collection), vec!["main.py"]);
        assert!(matches!(
            &collection.diagnostics[..],
            [Diagnostic::SkippedDirectory { path, .. }] if path == "gone"
        ));
    }

    #[tokio::test]
    async fn test_empty_repository_warns() {
        let mut server = Server::new_async().await;
        let _m = mock_json(&mut server, "/repos/owner/demo/contents", json!([])).await;

        let collector = Collector::new(config(&server, 4)).unwrap();
        let collection = collector.collect("https://github.com/owner/demo").await;

        assert!(collection.files.is_empty());
        assert_eq!(collection.diagnostics.len(), 1);
        assert_eq!(collection.diagnostics[0].severity(), Severity::Warning);
    }

    #[tokio::test]
    async fn test_unrecognized_files_are_not_fetched() {
        let mut server = Server::new_async().await;
        let root = json!([file(&server, "main.py"), file(&server, "image.png")]);
        let _m = mock_json(&mut server, "/repos/owner/demo/contents", root).await;
        let _m = mock_raw(&mut server, "main.py", "print('demo')").await;
        let png = server
            .mock("GET", "/raw/image.png")
            .expect(0)
            .create_async()
            .await;

        let collector = Collector::new(config(&server, 4)).unwrap();
        let collection = collector.collect("https://github.com/owner/demo").await;

        assert_eq!(paths(&collection), vec!["main.py"]);
        png.assert_async().await;
    }

    #[tokio::test]
    async fn test_invalid_url_makes_no_requests() {
        let server = Server::new_async().await;
        let collector = Collector::new(config(&server, 4)).unwrap();

        let collection = collector.collect("").await;

        assert!(collection.files.is_empty());
        assert!(matches!(
            &collection.diagnostics[..],
            [Diagnostic::InvalidRepository { .. }]
        ));
    }

    #[tokio::test]
    async fn test_token_sent_on_listing_and_download() {
        let mut server = Server::new_async().await;
        let root = json!([file(&server, "main.py")]);
        let listing = server
            .mock("GET", "/repos/owner/demo/contents")
            .match_header("authorization", "Bearer ghp_test")
            .with_status(200)
            .with_body(root.to_string())
            .create_async()
            .await;
        let raw = server
            .mock("GET", "/raw/main.py")
            .match_header("authorization", "Bearer ghp_test")
            .with_status(200)
            .with_body("pass")
            .create_async()
            .await;

        let mut github = config(&server, 4);
        github.token = Some("ghp_test".to_string());
        let collection = Collector::new(github).unwrap().collect("https://github.com/owner/demo").await;

        assert_eq!(collection.files.len(), 1);
        listing.assert_async().await;
        raw.assert_async().await;
    }

    #[tokio::test]
    async fn test_each_directory_is_listed_once() {
        let mut server = Server::new_async().await;
        // "a" appears twice at the root and its own listing points back at it
        let root = json!([dir(&server, "a"), dir(&server, "a"), file(&server, "main.py")]);
        let a = json!([dir(&server, "a"), file(&server, "a/x.py")]);
        let _m = mock_json(&mut server, "/repos/owner/demo/contents", root).await;
        let _m = mock_raw(&mut server, "main.py", "main()").await;
        let _m = mock_raw(&mut server, "a/x.py", "x = 1").await;
        let listing_a = server
            .mock("GET", "/repos/owner/demo/contents/a")
            .with_status(200)
            .with_body(a.to_string())
            .expect(1)
            .create_async()
            .await;

        let collector = Collector::new(config(&server, 4)).unwrap();
        let collection = collector.collect("https://github.com/owner/demo").await;

        assert_eq!(paths(&collection), vec!["main.py", "a/x.py"]);
        assert!(collection.diagnostics.is_empty());
        listing_a.assert_async().await;
    }

    #[tokio::test]
    async fn test_source_file_without_download_url_is_skipped() {
        let mut server = Server::new_async().await;
        let root = json!([
            {"type": "file", "name": "lfs.py", "path": "lfs.py",
             "url": format!("{}/api/lfs.py", server.url()),
             "download_url": null},
            file(&server, "main.py")
        ]);
        let _m = mock_json(&mut server, "/repos/owner/demo/contents", root).await;
        let _m = mock_raw(&mut server, "main.py", "main()").await;

        let collector = Collector::new(config(&server, 4)).unwrap();
        let collection = collector.collect("https://github.com/owner/demo").await;

        assert_eq!(paths(&collection), vec!["main.py"]);
        assert_eq!(
            collection.diagnostics,
            vec![Diagnostic::SkippedFile {
                path: "lfs.py".to_string(),
                reason: "no download URL".to_string(),
            }]
        );
        assert_eq!(collection.diagnostics[0].severity(), Severity::Warning);
    }
}
