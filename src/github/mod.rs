// src/github/mod.rs
// =============================================================================
// This module collects source files from GitHub repositories.
//
// Submodules:
// - repo_ref: turns a pasted URL into an owner/name pair
// - contents: types and HTTP helpers for the contents API
// - collect: the breadth-first walk over a repository
//
// Rust concepts:
// - Modules: Organizing related functionality
// - Public API: What other parts of the app can use
// =============================================================================

mod collect;
mod contents;
mod repo_ref;

pub use collect::Collector;
pub use contents::FileContent;
pub use repo_ref::RepoRef;

pub(crate) use contents::describe_error;
