//! Vanity page rendering.
//!
//! The page carries the `go-import` and `go-source` meta tags that the `go`
//! tool reads, and forwards browsers to the documentation viewer.

use std::fmt::Write;

use thiserror::Error;

use crate::routing::RenderInput;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to format page: {0}")]
    Format(#[from] std::fmt::Error),

    #[error("{0}")]
    Other(String),
}

/// Turns a permitted routing decision into a response body.
pub trait PageRenderer: Send + Sync {
    fn render(&self, input: &RenderInput) -> Result<String, RenderError>;
}

/// HTML page renderer used by the server.
#[derive(Debug, Clone)]
pub struct VanityPage {
    doc_viewer_url: String,
}

impl VanityPage {
    pub fn new(doc_viewer_url: impl Into<String>) -> Self {
        Self {
            doc_viewer_url: doc_viewer_url.into(),
        }
    }
}

impl PageRenderer for VanityPage {
    fn render(&self, input: &RenderInput) -> Result<String, RenderError> {
        let import = escape_html(&input.import_path);
        let repo = escape_html(&input.repo);
        let display = escape_html(&input.display);
        let docs = escape_html(&format!(
            "{}/{}",
            self.doc_viewer_url.trim_end_matches('/'),
            input.import_path
        ));

        let mut page = String::with_capacity(512);
        writeln!(page, "<!DOCTYPE html>")?;
        writeln!(page, "<html>")?;
        writeln!(page, "<head>")?;
        writeln!(page, r#"<meta http-equiv="Content-Type" content="text/html; charset=utf-8"/>"#)?;
        writeln!(page, r#"<meta name="go-import" content="{import} git {repo}">"#)?;
        writeln!(page, r#"<meta name="go-source" content="{import} {display}">"#)?;
        writeln!(page, r#"<meta http-equiv="refresh" content="0; url={docs}">"#)?;
        writeln!(page, "</head>")?;
        writeln!(page, "<body>")?;
        writeln!(page, r#"Nothing to see here; <a href="{docs}">see the package on godoc</a>."#)?;
        writeln!(page, "</body>")?;
        write!(page, "</html>")?;
        Ok(page)
    }
}

fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&#34;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}
