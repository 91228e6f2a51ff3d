//! Access control subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request (headers, peer address):
//!     → client_ip.rs (pick the originating client address)
//!     → allowlist.rs (match against the path's rules)
//!     → permit or deny
//! ```
//!
//! # Design Decisions
//! - Fail closed: unparseable client addresses never match
//! - Open by default: a path without rules is public
//! - Malformed rules are skipped, never fatal

pub mod allowlist;
pub mod client_ip;

pub use allowlist::{AllowRule, Allowlist};
pub use client_ip::resolve_client_ip;
