//! API router configuration.

use std::net::SocketAddr;

use axum::{http::Method, routing::get, Router};
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{get_state, AppState};
use crate::error::BridgeError;

/// Path of the snapshot endpoint.
pub const STATE_PATH: &str = "/state";

/// Create the API router serving the given state.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route(STATE_PATH, get(get_state))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET])
                .allow_headers(Any),
        )
        .with_state(state)
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
}

impl ServerConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Parse the configured host and port into a socket address.
    pub fn socket_addr(&self) -> crate::Result<SocketAddr> {
        self.bind_address()
            .parse()
            .map_err(|_| BridgeError::InvalidAddress(self.bind_address()))
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
        }
    }
}

/// Bind the listening socket for `config`.
pub async fn bind(config: &ServerConfig) -> crate::Result<TcpListener> {
    let addr = config.socket_addr()?;
    TcpListener::bind(addr).await.map_err(|source| BridgeError::Bind {
        addr: addr.to_string(),
        source,
    })
}

/// Serve the API on an already bound listener until the process exits.
pub async fn serve_on(listener: TcpListener, state: AppState) -> crate::Result<()> {
    let router = create_router(state);

    axum::serve(listener, router)
        .await
        .map_err(|e| BridgeError::Server(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_config_default() {
        let config = ServerConfig::default();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8000);
        assert_eq!(config.bind_address(), "127.0.0.1:8000");
    }

    #[test]
    fn test_server_config_custom() {
        let config = ServerConfig::new("0.0.0.0", 8080);
        assert_eq!(config.bind_address(), "0.0.0.0:8080");
        assert_eq!(config.socket_addr().unwrap().port(), 8080);
    }

    #[test]
    fn test_invalid_host() {
        let config = ServerConfig::new("localhost", 8000);
        assert!(matches!(
            config.socket_addr(),
            Err(BridgeError::InvalidAddress(_))
        ));
    }

    #[tokio::test]
    async fn test_bind_ephemeral() {
        let listener = bind(&ServerConfig::new("127.0.0.1", 0)).await.unwrap();
        assert_ne!(listener.local_addr().unwrap().port(), 0);
    }

    #[test]
    fn test_router_creation() {
        let _router = create_router(AppState::default());
    }
}
