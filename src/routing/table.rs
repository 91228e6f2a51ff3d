//! Import path lookup.
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - O(1) lookup via HashMap keyed by the raw request path

use std::collections::HashMap;

use crate::config::PathConfig;
use crate::security::Allowlist;

/// A compiled import path entry.
#[derive(Debug, Clone)]
pub struct ImportPath {
    pub repo: String,
    pub display: String,
    pub allowlist: Allowlist,
}

impl ImportPath {
    pub fn from_config(path: &str, config: &PathConfig) -> Self {
        let allowlist = Allowlist::new(&config.allows);
        for rule in allowlist.rules().iter().filter(|r| !r.is_usable()) {
            tracing::warn!(path = %path, rule = ?rule, "Allow rule is neither an IP address nor a CIDR range; it will never match");
        }

        Self {
            repo: config.repo.clone(),
            display: config.display().to_string(),
            allowlist,
        }
    }
}

/// Path → import path table.
#[derive(Debug, Clone, Default)]
pub struct PathTable {
    entries: HashMap<String, ImportPath>,
}

impl PathTable {
    pub fn from_config<'a, I>(paths: I) -> Self
    where
        I: IntoIterator<Item = (&'a String, &'a PathConfig)>,
    {
        let entries = paths
            .into_iter()
            .map(|(path, config)| (path.clone(), ImportPath::from_config(path, config)))
            .collect();
        Self { entries }
    }

    /// Exact-match lookup.
    pub fn lookup(&self, path: &str) -> Option<&ImportPath> {
        self.entries.get(path)
    }

}
