//! Server startup and binding
//!
//! Provides functionality to start the Axum server with configurable
//! host/port.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;

use crate::config::ServerConfig;
use crate::routes;

/// Server instance that can be started
pub struct Server {
    /// Server configuration
    config: Arc<ServerConfig>,
    /// The built router
    router: Router,
}

impl Server {
    /// Create a new server instance with the given configuration
    pub fn new(config: ServerConfig) -> Self {
        let config = Arc::new(config);
        let router = routes::build_router(config.clone());

        Self { config, router }
    }

    /// Get the socket address the server will bind to
    pub fn socket_addr(&self) -> SocketAddr {
        format!("{}:{}", self.config.host, self.config.port)
            .parse()
            .expect("Invalid socket address")
    }

    /// Get the configuration
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Run the server
    ///
    /// Binds to the configured host/port and serves requests until the
    /// process is stopped.
    pub async fn run(self) -> Result<(), std::io::Error> {
        let addr = self.socket_addr();
        let listener = TcpListener::bind(addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, self.router).await
    }

    /// Run the server with a specific listener
    ///
    /// Useful for testing with a listener bound to port 0 to get a random
    /// available port.
    pub async fn run_with_listener(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, self.router).await
    }
}
