//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request (path, headers, peer)
//!     → table.rs (exact path lookup)
//!     → security (resolve client, evaluate allowlist)
//!     → router.rs: NotFound | Denied | Permit(RenderInput)
//!
//! Table compilation (at startup):
//!     VanityConfig.paths
//!     → classify allow rules
//!     → freeze as immutable PathTable
//! ```
//!
//! # Design Decisions
//! - Table compiled at startup, immutable at runtime
//! - Exact match only: no prefixes, wildcards or normalization
//! - Deterministic: same input always yields the same decision

pub mod router;
pub mod table;

pub use router::{RenderInput, RouteDecision, VanityRouter};
pub use table::{ImportPath, PathTable};
