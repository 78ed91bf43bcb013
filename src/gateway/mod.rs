//! YAML gateway subsystem.
//!
//! # Data Flow
//! ```text
//! GET /api/yaml-files
//!     → listing.rs (read YAML directory, filter, sort)
//!     → {"files": [...]}
//!
//! POST /api/save-yaml
//!     → security::limits (Content-Length, size cap)
//!     → save.rs (decode JSON, validate fields)
//!     → resolver.rs (normalize, resolve, containment check)
//!     → locks.rs (per-path mutex)
//!     → save.rs (verbatim write)
//!     → {"ok": true, "saved": "<abs path>"}
//! ```
//!
//! # Design Decisions
//! - The gateway holds no state besides its config and the lock table
//! - Every read or write target is a `YamlFileRef`; there is no other way
//!   to reach the filesystem from a request

pub mod error;
pub mod listing;
pub mod locks;
pub mod resolver;
pub mod save;

pub use error::GatewayError;
pub use listing::FileListing;
pub use resolver::{PathRejection, PathResolver, YamlFileRef};
pub use save::{SaveOutcome, SaveRequest};

use axum::body::Body;
use axum::http::HeaderMap;

use crate::config::ServerConfig;
use crate::gateway::locks::WriteLocks;
use crate::security::limits::read_declared_body;

/// Validated filesystem access for the viewer's two API operations.
#[derive(Debug)]
pub struct Gateway {
    resolver: PathResolver,
    locks: WriteLocks,
    max_body_size: usize,
}

impl Gateway {
    pub fn new(config: &ServerConfig) -> Self {
        Self {
            resolver: PathResolver::new(
                config.project_root(),
                &config.yaml_directory(),
                config.gateway.strict_paths,
            ),
            locks: WriteLocks::new(),
            max_body_size: config.security.max_body_size,
        }
    }

    pub fn resolver(&self) -> &PathResolver {
        &self.resolver
    }

    /// Current contents of the YAML directory.
    pub async fn list_files(&self) -> FileListing {
        listing::list_yaml_files(self.resolver.yaml_directory()).await
    }

    /// Validate a save request and write it.
    pub async fn save(&self, headers: &HeaderMap, body: Body) -> Result<SaveOutcome, GatewayError> {
        let bytes = read_declared_body(headers, body, self.max_body_size).await?;
        let request = SaveRequest::decode(&bytes, &self.resolver)?;

        let _guard = self.locks.acquire(request.target.path()).await;
        save::write_yaml(request.target.path(), &request.yaml).await
    }
}
