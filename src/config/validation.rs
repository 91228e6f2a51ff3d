//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check that the vanity host is set
//! - Check that addresses and URLs parse
//! - Check that every import path entry is usable
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: VanityConfig → Result<(), Vec<ValidationError>>
//! - Allow rules are not validated here; unparseable rules never match

use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::VanityConfig;

/// A single semantic problem found in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("server.host must be set to the custom domain, e.g. example.com")]
    MissingHost,

    #[error("{field} is not a valid socket address: {value}")]
    InvalidAddress { field: &'static str, value: String },

    #[error("{field} is not a valid URL: {value}")]
    InvalidUrl { field: &'static str, value: String },

    #[error("path {0:?} must start with '/'")]
    RelativePath(String),

    #[error("path {0:?} has no repo")]
    MissingRepo(String),
}

pub fn validate_config(config: &VanityConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.server.host.trim().trim_end_matches('/').is_empty() {
        errors.push(ValidationError::MissingHost);
    }

    if config.server.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "server.bind_address",
            value: config.server.bind_address.clone(),
        });
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidAddress {
            field: "observability.metrics_address",
            value: config.observability.metrics_address.clone(),
        });
    }

    for (field, value) in [
        ("server.fallback_redirect_url", &config.server.fallback_redirect_url),
        ("server.doc_viewer_url", &config.server.doc_viewer_url),
    ] {
        if Url::parse(value).is_err() {
            errors.push(ValidationError::InvalidUrl {
                field,
                value: value.clone(),
            });
        }
    }

    for (path, entry) in &config.paths {
        if !path.starts_with('/') {
            errors.push(ValidationError::RelativePath(path.clone()));
        }
        if entry.repo.trim().is_empty() {
            errors.push(ValidationError::MissingRepo(path.clone()));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::PathConfig;

    fn valid_config() -> VanityConfig {
        let mut config = VanityConfig::default();
        config.server.host = "example.com".into();
        config.paths.insert(
            "/pkg/foo".into(),
            PathConfig {
                repo: "https://github.com/acme/foo".into(),
                ..Default::default()
            },
        );
        config
    }

    #[test]
    fn test_valid_config_passes() {
        assert_eq!(validate_config(&valid_config()), Ok(()));
    }

    #[test]
    fn test_reports_every_error() {
        let mut config = valid_config();
        config.server.host = "/".into();
        config.server.bind_address = "nowhere".into();
        config.server.fallback_redirect_url = "not a url".into();
        config.paths.insert("pkg/bar".into(), PathConfig::default());

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::MissingHost,
                ValidationError::InvalidAddress {
                    field: "server.bind_address",
                    value: "nowhere".into(),
                },
                ValidationError::InvalidUrl {
                    field: "server.fallback_redirect_url",
                    value: "not a url".into(),
                },
                ValidationError::RelativePath("pkg/bar".into()),
                ValidationError::MissingRepo("pkg/bar".into()),
            ]
        );
    }

    #[test]
    fn test_metrics_address_checked_only_when_enabled() {
        let mut config = valid_config();
        config.observability.metrics_address = "bogus".into();
        assert!(validate_config(&config).is_ok());

        config.observability.metrics_enabled = true;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_malformed_allow_rules_are_not_errors() {
        let mut config = valid_config();
        config.paths.get_mut("/pkg/foo").unwrap().allows = vec!["garbage".into(), "".into()];
        assert!(validate_config(&config).is_ok());
    }
}
