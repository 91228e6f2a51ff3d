//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from the TOML config file.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Default destination for clients rejected by an allowlist.
pub const DEFAULT_FALLBACK_REDIRECT_URL: &str = "https://yuanc.com";

/// Default documentation viewer that browsers are sent on to.
pub const DEFAULT_DOC_VIEWER_URL: &str = "https://godoc.org";

/// Root configuration for the vanity import server.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct VanityConfig {
    /// Listener and vanity-domain settings.
    pub server: ServerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Import path table keyed by exact request path (e.g. `/pkg/foo`).
    pub paths: BTreeMap<String, PathConfig>,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Custom domain used as the import path prefix, e.g. "example.com".
    pub host: String,

    /// Where denied clients are redirected.
    pub fallback_redirect_url: String,

    /// Documentation site linked from the rendered page.
    pub doc_viewer_url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            host: String::new(),
            fallback_redirect_url: DEFAULT_FALLBACK_REDIRECT_URL.to_string(),
            doc_viewer_url: DEFAULT_DOC_VIEWER_URL.to_string(),
        }
    }
}

/// A single import path entry.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct PathConfig {
    /// Repository URL announced in the `go-import` tag.
    #[serde(default)]
    pub repo: String,

    /// `go-source` display template. Derived for GitHub repositories when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,

    /// Client addresses or CIDR ranges allowed to fetch this path. Empty allows everyone.
    #[serde(default)]
    pub allows: Vec<String>,
}

impl PathConfig {
    /// Fill in the display template for repositories hosted on GitHub.
    ///
    /// An explicit, non-empty display is never overwritten.
    pub fn apply_display_default(&mut self) {
        if self.display.as_deref().is_some_and(|d| !d.is_empty()) {
            return;
        }
        if self.repo.contains("github.com") {
            let repo = &self.repo;
            self.display = Some(format!(
                "{repo} {repo}/tree/master{{/dir}} {repo}/blob/master{{/dir}}/{{file}}#L{{line}}"
            ));
        }
    }

    /// Display template as rendered, empty when none is known.
    pub fn display(&self) -> &str {
        self.display.as_deref().unwrap_or_default()
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
