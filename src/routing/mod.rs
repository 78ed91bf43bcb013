//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (method, path)
//!     → router.rs (ordered route table)
//!     → matcher.rs (evaluate match conditions)
//!     → Return: Api(route) | Static | NotFound
//! ```
//!
//! # Design Decisions
//! - Routes declared at startup, immutable at runtime
//! - Exact method and path matching only
//! - Deterministic: same input always matches same route
//! - Unclaimed GET/HEAD requests go to the static asset server

pub mod matcher;
pub mod router;

pub use router::{ApiRoute, Dispatch, RouteTable, LIST_YAML_FILES_PATH, SAVE_YAML_PATH};
