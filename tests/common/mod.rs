//! Shared utilities for integration testing.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use axum::body::{Body, Bytes};
use axum::http::{header, HeaderMap, Method, Request, StatusCode};
use axum::Router;
use tempfile::TempDir;
use tower::ServiceExt;
use yaml_diagram_server::{HttpServer, ServerConfig};

/// A throwaway project root with a viewer page and a YAML directory.
pub struct TestProject {
    _dir: TempDir,
    pub root: PathBuf,
}

impl TestProject {
    pub fn new() -> Self {
        let project = Self::without_yaml_dir();
        fs::create_dir(project.yaml_dir()).unwrap();
        project
    }

    pub fn without_yaml_dir() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().canonicalize().unwrap();
        fs::create_dir(root.join("viewer")).unwrap();
        fs::write(root.join("viewer").join("index.html"), "<html>viewer</html>").unwrap();
        Self { _dir: dir, root }
    }

    pub fn yaml_dir(&self) -> PathBuf {
        self.root.join("YAML")
    }

    pub fn write_yaml(&self, name: &str, content: &str) {
        fs::write(self.yaml_dir().join(name), content).unwrap();
    }

    pub fn config(&self) -> ServerConfig {
        ServerConfig::for_project(&self.root)
    }

    pub fn router(&self) -> Router {
        HttpServer::new(self.config()).router()
    }

    /// Names of every entry under `dir`, sorted.
    pub fn entries(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .map(|rd| {
                rd.map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
                    .collect()
            })
            .unwrap_or_default();
        names.sort();
        names
    }
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl TestResponse {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).unwrap()
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

pub async fn send(router: Router, request: Request<Body>) -> TestResponse {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    TestResponse {
        status,
        headers,
        body,
    }
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// POST with an explicit `Content-Length`, as a browser would send it.
pub fn post(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::CONTENT_LENGTH, body.len())
        .body(Body::from(body.to_string()))
        .unwrap()
}
