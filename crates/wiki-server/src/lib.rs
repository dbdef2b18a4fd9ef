//! HTTP server for the wiki.
//!
//! Serves three page operations over a flat namespace of titles:
//!
//! | path             | effect                                              |
//! |------------------|-----------------------------------------------------|
//! | `/`              | 302 to `/view/<root title>`                         |
//! | `/view/<title>`  | rendered page, or 302 to `/edit/<title>` if unsaved |
//! | `/edit/<title>`  | edit form (empty for unsaved pages)                 |
//! | `/save/<title>`  | store form field `body`, 302 to `/view/<title>`     |
//!
//! Any other path is a 404.
//!
//! # Quick Start
//!
//! ```ignore
//! use std::path::PathBuf;
//! use wiki_server::{ServerConfig, run_server};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ServerConfig {
//!         host: "127.0.0.1".to_owned(),
//!         port: 8080,
//!         data_dir: PathBuf::from("data"),
//!         templates_dir: None,
//!         root_title: "FrontPage".to_owned(),
//!     };
//!
//!     run_server(config).await.unwrap();
//! }
//! ```
//!
//! # Architecture
//!
//! ```text
//! Browser ──HTTP──► axum fallback (dispatch)
//!                        │
//!                        ├─► Route::parse ──► view / edit / save handler
//!                        │                        │
//!                        │                        ├─► PageStore ──► FsStorage (<data_dir>/<title>.txt)
//!                        │                        │
//!                        │                        └─► Arc<dyn Render> (minijinja)
//!                        │
//!                        └─► 404 for anything else
//! ```

mod app;
mod error;
mod handlers;
mod middleware;
mod state;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use state::AppState;
use wiki_page::{PageStore, Title};
use wiki_render::{Render, TemplateRenderer};
use wiki_storage::{FsStorage, Storage};

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Directory holding page records.
    pub data_dir: PathBuf,
    /// Directory with `view.html` and `edit.html` (`None` uses built-in templates).
    pub templates_dir: Option<PathBuf>,
    /// Title `/` redirects to.
    pub root_title: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 8080,
            data_dir: PathBuf::from("data"),
            templates_dir: None,
            root_title: wiki_config::DEFAULT_ROOT_TITLE.to_owned(),
        }
    }
}

/// Run the server.
///
/// # Arguments
///
/// * `config` - Server configuration
///
/// # Errors
///
/// Returns an error if templates fail to load, the root title is invalid,
/// or the server fails to start.
pub async fn run_server(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let state = Arc::new(build_state(&config)?);

    // Create router
    let app = app::create_router(state);

    // Bind and run server
    let addr = SocketAddr::from_str(&format!("{}:{}", config.host, config.port))?;
    tracing::info!(
        address = %addr,
        data_dir = %config.data_dir.display(),
        root_title = %config.root_title,
        "Starting server"
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Build the shared state: file storage, page store, and renderer.
fn build_state(config: &ServerConfig) -> Result<AppState, Box<dyn std::error::Error>> {
    let storage: Arc<dyn Storage> = Arc::new(FsStorage::new(config.data_dir.clone()));

    let renderer: Arc<dyn Render> = match &config.templates_dir {
        Some(dir) => Arc::new(TemplateRenderer::from_dir(dir)?),
        None => Arc::new(TemplateRenderer::embedded()?),
    };

    Ok(AppState {
        pages: PageStore::new(storage),
        renderer,
        root_title: Title::parse(&config.root_title)?,
    })
}

/// Wait for shutdown signal (Ctrl-C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received, stopping server...");
}

/// Create server configuration from wiki config.
#[must_use]
pub fn server_config_from_wiki_config(config: &wiki_config::Config) -> ServerConfig {
    ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        data_dir: config.wiki_resolved.data_dir.clone(),
        templates_dir: config.wiki_resolved.templates_dir.clone(),
        root_title: config.wiki_resolved.root_title.clone(),
    }
}
