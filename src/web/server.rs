//! Event ingress server.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;

use super::router::{create_health_router, create_router};
use crate::config::ServerConfig;
use crate::error::{RelayError, Result};
use crate::plugin::RelayPlugin;

/// HTTP server receiving host events.
pub struct EventServer {
    host: String,
    port: u16,
    plugin: Arc<RelayPlugin>,
}

impl EventServer {
    /// Create a server for the configured address.
    ///
    /// The host may be an IP address or a name such as `localhost`; it is
    /// resolved when the server binds.
    pub fn new(config: &ServerConfig, plugin: Arc<RelayPlugin>) -> Self {
        Self {
            host: config.host.clone(),
            port: config.port,
            plugin,
        }
    }

    /// Configured `host:port`.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    async fn bind(&self) -> Result<TcpListener> {
        TcpListener::bind((self.host.as_str(), self.port))
            .await
            .map_err(|e| {
                RelayError::Io(std::io::Error::new(
                    e.kind(),
                    format!("cannot listen on {}: {}", self.bind_address(), e),
                ))
            })
    }

    fn router(&self) -> axum::Router {
        create_router(Arc::clone(&self.plugin)).merge(create_health_router())
    }

    /// Run the server until it fails.
    pub async fn run(self) -> Result<()> {
        let router = self.router();
        let listener = self.bind().await?;
        let local_addr = listener.local_addr()?;

        tracing::info!("Event ingress listening on http://{}", local_addr);

        axum::serve(listener, router).await?;
        Ok(())
    }

    /// Run the server in the background and return the actual bound address.
    ///
    /// This is useful for testing when binding to port 0.
    pub async fn run_with_addr(self) -> Result<SocketAddr> {
        let router = self.router();
        let listener = self.bind().await?;
        let local_addr = listener.local_addr()?;

        tracing::info!("Event ingress listening on http://{}", local_addr);

        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, router).await {
                tracing::error!("Event ingress error: {}", e);
            }
        });

        Ok(local_addr)
    }
}
