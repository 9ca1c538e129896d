// src/present/download.rs
// =============================================================================
// The generated README as a downloadable file.
//
// Nothing is written on the server side: the file travels inline as a
// base64 `data:` URI that a browser saves under `file_name` when the link
// is clicked.
// =============================================================================

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DownloadArtifact {
    pub file_name: String,
    pub media_type: String,
    /// Standard base64 of the file bytes
    pub encoded: String,
}

impl DownloadArtifact {
    /// A `README.md` holding `text` unchanged
    pub fn readme(text: &str) -> Self {
        Self {
            file_name: "README.md".to_string(),
            media_type: "text/markdown".to_string(),
            encoded: STANDARD.encode(text.as_bytes()),
        }
    }

    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", self.media_type, self.encoded)
    }
}
