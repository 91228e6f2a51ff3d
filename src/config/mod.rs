//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! vanity.toml
//!     → loader.rs (read, deserialize, fill display defaults)
//!     → validation.rs (semantic checks)
//!     → VanityConfig (validated, immutable)
//!     → compiled into the routing table and shared via Arc
//! ```
//!
//! # Design Decisions
//! - Config is loaded once at startup; there is no reload path
//! - All sections have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{ObservabilityConfig, PathConfig, ServerConfig, TimeoutConfig, VanityConfig};
