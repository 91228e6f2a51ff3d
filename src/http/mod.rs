//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID)
//!     → routing (lookup, client address, allowlist)
//!     → render.rs (vanity page) | 302 redirect | 404
//!     → Send to client
//! ```

pub mod render;
pub mod request;
pub mod server;

pub use render::{PageRenderer, RenderError, VanityPage};
pub use request::{RequestIdExt, X_REQUEST_ID};
pub use server::HttpServer;
