//! YAML diagram viewer server.
//!
//! # Architecture Overview
//!
//! ```text
//!                      ┌──────────────────────────────────────────────┐
//!                      │              YAML DIAGRAM SERVER              │
//!                      │                                              │
//!   Browser request    │  ┌────────┐    ┌───────────┐                 │
//!   ───────────────────┼─▶│  http  │───▶│  routing  │                 │
//!                      │  │ server │    │   table   │                 │
//!                      │  └────────┘    └─────┬─────┘                 │
//!                      │                      │                       │
//!                      │          ┌───────────┴────────────┐          │
//!                      │          ▼                        ▼          │
//!                      │  ┌──────────────┐        ┌──────────────┐    │
//!                      │  │   gateway    │        │   ServeDir   │    │
//!                      │  │ list / save  │        │ static files │    │
//!                      │  └──────┬───────┘        └──────────────┘    │
//!                      │         ▼                                    │
//!                      │   YAML directory                             │
//!                      │                                              │
//!                      │  config · lifecycle · observability · limits │
//!                      └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tokio::net::TcpListener;

use yaml_diagram_server::config::{load_config, ConfigOverrides};
use yaml_diagram_server::lifecycle::{signals, Shutdown};
use yaml_diagram_server::observability::{logging, metrics};
use yaml_diagram_server::HttpServer;

#[derive(Parser, Debug)]
#[command(name = "yaml-diagram-server", version)]
#[command(about = "Start the local server for the YAML diagram viewer", long_about = None)]
struct Cli {
    /// HTTP port (default: 8080)
    #[arg(short, long, value_parser = clap::value_parser!(u16).range(1..))]
    port: Option<u16>,

    /// Project root to serve (default: current directory)
    #[arg(long)]
    root: Option<PathBuf>,

    /// TOML configuration file (default: diagram-server.toml in the project root)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Do not open the viewer in a browser
    #[arg(long)]
    no_browser: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(ConfigOverrides {
        port: cli.port,
        project_root: cli.root,
        config_file: cli.config,
    }) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::from(2);
        }
    };

    logging::init_logging(&config.observability.log_level);
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "yaml-diagram-server starting");

    if let Err(e) = std::env::set_current_dir(config.project_root()) {
        eprintln!(
            "Error: cannot enter {}: {e}",
            config.project_root().display()
        );
        return ExitCode::from(2);
    }

    // installed before binding so an early Ctrl+C still stops cleanly
    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    signals::spawn_signal_listener(shutdown);

    let url = config.viewer_url();
    println!("Serving from: {}", config.project_root().display());
    println!("Opening: {url}");
    println!("Press Ctrl+C to stop.");

    let listener = match TcpListener::bind(config.bind_address()).await {
        Ok(listener) => listener,
        Err(e) => {
            eprintln!(
                "Error: unable to start server on port {}: {e}",
                config.listener.port
            );
            return ExitCode::from(1);
        }
    };

    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        }
    }

    if !cli.no_browser {
        if let Err(e) = open::that_detached(&url) {
            tracing::warn!(url = %url, error = %e, "Could not open a browser");
        }
    }

    let server = HttpServer::new(config);
    if let Err(e) = server.run(listener, server_shutdown).await {
        eprintln!("Error: server failed: {e}");
        return ExitCode::from(1);
    }

    println!("\nServer stopped.");
    ExitCode::SUCCESS
}
