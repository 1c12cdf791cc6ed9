//! # HTTP Server
//!
//! Main HTTP server combining all endpoint routers.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use super::health_routes::health_routes;
use crate::config::HttpServerConfig;
use crate::db::Database;
use crate::songs::{songs_routes, SongPayloadValidator, SongsHandler, SongsService};

/// HTTP server for the songs API
pub struct HttpServer {
    config: HttpServerConfig,
    database: Database,
    router: Router,
}

impl HttpServer {
    /// Create a server over an already-opened database
    pub fn with_config(config: HttpServerConfig, database: Database) -> Self {
        let router = Self::build_router(&config, &database);
        Self {
            config,
            database,
            router,
        }
    }

    /// Build the combined router with all endpoints
    fn build_router(config: &HttpServerConfig, database: &Database) -> Router {
        let service = SongsService::new(database.pool().clone());
        let handler = Arc::new(SongsHandler::new(service, SongPayloadValidator::new()));

        Router::new()
            .merge(health_routes())
            .merge(songs_routes(handler))
            .layer(cors_layer(config))
            .layer(TraceLayer::new_for_http())
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Serve until Ctrl-C or SIGTERM, then close the pool
    pub async fn start(self) -> Result<(), std::io::Error> {
        let addr: SocketAddr = self.config.socket_addr().parse().map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("invalid socket address '{}': {}", self.config.socket_addr(), e),
            )
        })?;

        let listener = TcpListener::bind(addr).await?;
        info!(%addr, "songs API listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("HTTP server stopped");
        self.database.close().await;
        Ok(())
    }
}

/// Permissive when no origins are configured
fn cors_layer(config: &HttpServerConfig) -> CorsLayer {
    if config.cors_origins.is_empty() {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let origins: Vec<_> = config
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(%origin, "ignoring unparseable CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("shutdown signal received");
}
