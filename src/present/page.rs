// src/present/page.rs
// =============================================================================
// Renders a run as a small self-contained HTML page:
// - the one-line summary
// - the README text
// - a "Download README.md" link carrying the file inline
// - any warnings or errors from the run
//
// Text from the model is escaped before it goes into the page, so a README
// containing "<script>" shows up as text.
// =============================================================================

use crate::diagnostic::Severity;
use crate::pipeline::RunOutcome;

const STYLE: &str = "body{font-family:sans-serif;max-width:60rem;margin:2rem auto;padding:0 1rem}\
pre{background:#f6f8fa;padding:1rem;white-space:pre-wrap;border-radius:6px}\
.warning{color:#9a6700}.error{color:#cf222e}";

/// Builds the full HTML document for `outcome`
pub fn render_page(outcome: &RunOutcome) -> String {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str(&format!("<title>README for {}</title>\n", escape_html(&outcome.repository)));
    html.push_str(&format!("<style>{}</style>\n", STYLE));
    html.push_str("</head>\n<body>\n<h1>📄 GitHub README File Generator</h1>\n");
    html.push_str(&format!("<p>Repository: <code>{}</code></p>\n", escape_html(&outcome.repository)));

    if let Some(artifact) = outcome.download() {
        html.push_str("<h2>📝 Project Summary (1-line):</h2>\n");
        html.push_str(&format!("<pre>{}</pre>\n", escape_html(outcome.summary.trim())));

        html.push_str("<h2>📘 README.md Content:</h2>\n");
        html.push_str(&format!("<pre>{}</pre>\n", escape_html(outcome.readme.trim())));

        html.push_str(&format!(
            "<p><a href=\"{}\" download=\"{}\">📥 Download {}</a></p>\n",
            artifact.data_uri(),
            escape_html(&artifact.file_name),
            escape_html(&artifact.file_name)
        ));
    } else {
        html.push_str("<p>No README was generated.</p>\n");
    }

    if !outcome.diagnostics.is_empty() {
        html.push_str("<h2>Messages</h2>\n<ul>\n");
        for diagnostic in &outcome.diagnostics {
            let class = match diagnostic.severity() {
                Severity::Warning => "warning",
                Severity::Error => "error",
            };
            html.push_str(&format!(
                "<li class=\"{}\">{}</li>\n",
                class,
                escape_html(&diagnostic.to_string())
            ));
        }
        html.push_str("</ul>\n");
    }

    html.push_str("</body>\n</html>\n");
    html
}

/// Escapes the five HTML special characters
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
