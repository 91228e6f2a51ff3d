//! Vanity import path server library.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;
pub mod security;

pub use config::schema::VanityConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
