//! HTTP server for the archive.

pub mod routes;

use std::net::SocketAddr;

use crate::service::ArchiveService;

/// HTTP front end over an [`ArchiveService`].
#[derive(Debug)]
pub struct ArchiveServer {
    service: ArchiveService,
}

impl ArchiveServer {
    /// Create a new server.
    #[must_use]
    pub const fn new(service: ArchiveService) -> Self {
        Self { service }
    }

    /// Run the server in HTTP mode until Ctrl-C.
    ///
    /// # Errors
    ///
    /// Returns error on bind or server failure.
    pub async fn run_http(self, port: u16) -> anyhow::Result<()> {
        let router = routes::create_router(self.service);
        let addr = SocketAddr::from(([0, 0, 0, 0], port));

        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("HTTP server listening on http://{}", addr);

        axum::serve(listener, router).with_graceful_shutdown(shutdown_signal()).await?;

        tracing::info!("HTTP server shut down");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl-C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Received shutdown signal");
}
