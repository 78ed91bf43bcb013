//! Local server for the YAML diagram viewer.
//!
//! Serves the viewer's static files from a project root and exposes a small
//! JSON API that lists and saves the YAML documents inside one directory.

pub mod config;
pub mod gateway;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;
pub mod security;

pub use config::schema::ServerConfig;
pub use gateway::Gateway;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
