//! Route lookup and dispatch.
//!
//! # Responsibilities
//! - Hold the ordered API route table
//! - Decide, per request, between an API route, static assets, or 404
//!
//! # Design Decisions
//! - Immutable after construction (shared without locks)
//! - First match wins, in declaration order
//! - Explicit `Dispatch` result rather than a silent default

use axum::body::Body;
use axum::http::{Method, Request};

use crate::routing::matcher::{AndMatcher, ExactPathMatcher, Matcher, MethodMatcher};

pub const LIST_YAML_FILES_PATH: &str = "/api/yaml-files";
pub const SAVE_YAML_PATH: &str = "/api/save-yaml";

/// Operations exposed by the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiRoute {
    ListYamlFiles,
    SaveYaml,
}

impl ApiRoute {
    /// Label used in logs and metrics.
    pub fn name(self) -> &'static str {
        match self {
            ApiRoute::ListYamlFiles => "list_yaml_files",
            ApiRoute::SaveYaml => "save_yaml",
        }
    }
}

/// Where a request should go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    Api(ApiRoute),
    /// GET/HEAD that no API route claimed.
    Static,
    /// Any other method on a path no API route claimed.
    NotFound,
}

#[derive(Debug)]
struct CompiledRoute {
    route: ApiRoute,
    matcher: AndMatcher,
}

/// Ordered table of API routes.
#[derive(Debug)]
pub struct RouteTable {
    routes: Vec<CompiledRoute>,
}

impl RouteTable {
    pub fn new() -> Self {
        let routes = [
            (ApiRoute::ListYamlFiles, Method::GET, LIST_YAML_FILES_PATH),
            (ApiRoute::SaveYaml, Method::POST, SAVE_YAML_PATH),
        ]
        .into_iter()
        .map(|(route, method, path)| CompiledRoute {
            route,
            matcher: AndMatcher::new(vec![
                Box::new(MethodMatcher::new(method)),
                Box::new(ExactPathMatcher::new(path)),
            ]),
        })
        .collect();

        Self { routes }
    }

    /// First API route matching the request, if any.
    pub fn match_request(&self, req: &Request<Body>) -> Option<ApiRoute> {
        self.routes
            .iter()
            .find(|r| r.matcher.matches(req))
            .map(|r| r.route)
    }

    pub fn dispatch(&self, req: &Request<Body>) -> Dispatch {
        if let Some(route) = self.match_request(req) {
            return Dispatch::Api(route);
        }
        if req.method() == Method::GET || req.method() == Method::HEAD {
            Dispatch::Static
        } else {
            Dispatch::NotFound
        }
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::new()
    }
}
