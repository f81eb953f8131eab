//! # HTTP Server
//!
//! Builds the axum router (landing page, health check, user API), applies
//! CORS from configuration and request tracing, and serves.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::response::Html;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::auth::TokenVerifier;
use crate::config::AppConfig;
use crate::site;
use crate::users::UserRepository;

use super::users_routes;

/// Shared per-process state; everything request-scoped lives in handlers
pub struct AppState {
    pub users: UserRepository,
    pub verifier: TokenVerifier,
}

impl AppState {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            users: UserRepository::new(),
            verifier: TokenVerifier::new(&config.auth.jwt_secret, config.auth.token_ttl_minutes),
        }
    }
}

/// HTTP server for the landing site and API
pub struct HttpServer {
    config: AppConfig,
    router: Router,
}

impl HttpServer {
    /// Create a server with fresh state
    pub fn new(config: AppConfig) -> Self {
        let state = Arc::new(AppState::new(&config));
        Self::with_state(config, state)
    }

    /// Create a server over existing state (used by tests)
    pub fn with_state(config: AppConfig, state: Arc<AppState>) -> Self {
        let router = Self::build_router(&config, state);
        Self { config, router }
    }

    fn build_router(config: &AppConfig, state: Arc<AppState>) -> Router {
        let cors = if config.server.cors_origins.is_empty() {
            // No origins configured: permissive, for development
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            use tower_http::cors::AllowOrigin;
            let origins: Vec<_> = config
                .server
                .cors_origins
                .iter()
                .filter_map(|s| s.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        };

        Router::new()
            .route("/", get(landing_handler))
            .route("/health", get(health_handler))
            .nest("/api/users", users_routes::router())
            .with_state(state)
            .layer(cors)
            .layer(TraceLayer::new_for_http())
    }

    /// Socket address the server will bind to
    pub fn socket_addr(&self) -> String {
        self.config.server.socket_addr()
    }

    /// Take the router (for tests)
    pub fn router(self) -> Router {
        self.router
    }

    /// Bind and serve until shutdown
    pub async fn start(self) -> Result<(), std::io::Error> {
        let addr: SocketAddr = self.socket_addr().parse().map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("invalid bind address: {}", e),
            )
        })?;

        tracing::info!(%addr, "starting stackpilot");
        let listener = TcpListener::bind(addr).await?;
        axum::serve(listener, self.router).await
    }
}

async fn landing_handler() -> Html<String> {
    Html(site::render())
}

async fn health_handler() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
