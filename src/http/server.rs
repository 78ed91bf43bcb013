//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router and wire up middleware (tracing, timeout, request ID)
//! - Dispatch requests through the route table to the gateway
//! - Delegate unclaimed GET/HEAD requests to the static asset server
//! - Serve on a listener until the shutdown signal fires

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceExt;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    services::ServeDir,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ServerConfig;
use crate::gateway::Gateway;
use crate::http::handlers;
use crate::http::request::{request_id, UuidRequestId};
use crate::observability::metrics;
use crate::routing::{ApiRoute, Dispatch, RouteTable};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<Gateway>,
    pub routes: Arc<RouteTable>,
    pub assets: ServeDir,
}

/// HTTP server for the diagram viewer.
pub struct HttpServer {
    router: Router,
    config: ServerConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ServerConfig) -> Self {
        let state = AppState {
            gateway: Arc::new(Gateway::new(&config)),
            routes: Arc::new(RouteTable::new()),
            assets: ServeDir::new(config.project_root()),
        };

        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ServerConfig, state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(dispatch_handler))
            .route("/", any(dispatch_handler))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(UuidRequestId))
    }

    /// The fully layered router, for serving or in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` fires.
    ///
    /// The listener is owned by the serve future and closed on every exit path.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            project_root = %self.config.project_root().display(),
            yaml_directory = %self.config.yaml_directory().display(),
            "HTTP server starting"
        );

        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }
}

/// Single entry point: route table first, static assets second.
async fn dispatch_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start_time = Instant::now();
    let request_id = request_id(&request);
    let method = request.method().to_string();

    let (label, response) = match state.routes.dispatch(&request) {
        Dispatch::Api(route @ ApiRoute::ListYamlFiles) => (
            route.name(),
            handlers::list_yaml_files(&state.gateway, &request_id).await,
        ),
        Dispatch::Api(route @ ApiRoute::SaveYaml) => (
            route.name(),
            handlers::save_yaml(&state.gateway, &request_id, request).await,
        ),
        Dispatch::Static => ("static", serve_static(state.assets.clone(), request).await),
        Dispatch::NotFound => {
            tracing::debug!(
                request_id = %request_id,
                method = %method,
                path = %request.uri().path(),
                "No endpoint matched"
            );
            ("none", (StatusCode::NOT_FOUND, "Endpoint not found").into_response())
        }
    };

    metrics::record_request(label, &method, response.status().as_u16(), start_time);
    response
}

async fn serve_static(assets: ServeDir, request: Request<Body>) -> Response {
    match assets.oneshot(request).await {
        Ok(response) => response.into_response(),
        Err(never) => match never {},
    }
}
