// src/present/mod.rs
// =============================================================================
// This module shows a finished run to the user.
//
// Submodules:
// - download: the README as an inline base64 download
// - terminal: readable sections or JSON on stdout
// - page: a self-contained HTML page with the download link
// =============================================================================

mod download;
mod page;
mod terminal;

pub use download::DownloadArtifact;
pub use page::render_page;
pub use terminal::print_outcome;
