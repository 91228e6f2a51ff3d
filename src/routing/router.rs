//! Per-request routing decision.
//!
//! # Responsibilities
//! - Look up the import path for the request
//! - Resolve the client address and apply the path's allowlist
//! - Build the render input for permitted requests
//!
//! # Design Decisions
//! - Pure and synchronous: no I/O, no shared mutable state
//! - Explicit NotFound rather than silent default
//! - Rendering is left to the caller so the decision can be tested on its own

use axum::http::HeaderMap;

use crate::config::VanityConfig;
use crate::routing::table::PathTable;
use crate::security::resolve_client_ip;

/// Values substituted into the vanity page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderInput {
    /// `<host>/<path>`, e.g. `example.com/pkg/foo`.
    pub import_path: String,
    pub repo: String,
    pub display: String,
}

/// Outcome of routing a single request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    NotFound,
    Denied {
        client_ip: String,
        redirect_to: String,
    },
    Permit(RenderInput),
}

/// Immutable router built once from the loaded configuration.
#[derive(Debug, Clone)]
pub struct VanityRouter {
    host: String,
    fallback_redirect_url: String,
    table: PathTable,
}

impl VanityRouter {
    pub fn from_config(config: &VanityConfig) -> Self {
        Self {
            host: config.server.host.trim().to_string(),
            fallback_redirect_url: config.server.fallback_redirect_url.clone(),
            table: PathTable::from_config(&config.paths),
        }
    }

    /// Route a request for `path` arriving from `peer` with `headers`.
    pub fn route(&self, path: &str, headers: &HeaderMap, peer: &str) -> RouteDecision {
        let Some(entry) = self.table.lookup(path) else {
            return RouteDecision::NotFound;
        };

        let client_ip = resolve_client_ip(headers, peer);
        if !entry.allowlist.permits(&client_ip) {
            tracing::warn!(client_ip = %client_ip, path = %path, "Forbidden: client not in allowlist");
            return RouteDecision::Denied {
                client_ip,
                redirect_to: self.fallback_redirect_url.clone(),
            };
        }

        RouteDecision::Permit(RenderInput {
            import_path: self.import_path(path),
            repo: entry.repo.clone(),
            display: entry.display.clone(),
        })
    }

    fn import_path(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.host.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}
