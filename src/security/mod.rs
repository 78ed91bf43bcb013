//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! POST /api/save-yaml:
//!     → limits.rs (Content-Length present, within max_body_size)
//!     → gateway::resolver (containment check)
//! ```
//!
//! # Design Decisions
//! - Fail closed: reject on any check failure
//! - No trust in client input; the local user is trusted, their browser's payloads are not

pub mod limits;
