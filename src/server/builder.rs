//! ServerBuilder for fluent API to build the dashboard server

use super::host::AppState;
use super::router::build_router;
use crate::config::AppConfig;
use crate::core::events::EventBus;
use crate::core::service::{CredentialVerifier, InvoiceQueries, InvoiceRepository, InvoiceStore};
use crate::storage::ConfiguredCredentials;
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Builder for the invoices dashboard router
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new()
///     .with_store(InMemoryInvoiceStore::seeded())
///     .with_config(AppConfig::default())
///     .build()?;
/// ```
pub struct ServerBuilder {
    repository: Option<Arc<dyn InvoiceRepository>>,
    queries: Option<Arc<dyn InvoiceQueries>>,
    config: AppConfig,
    event_bus: Option<EventBus>,
    verifier: Option<Arc<dyn CredentialVerifier>>,
}

impl ServerBuilder {
    pub fn new() -> Self {
        Self {
            repository: None,
            queries: None,
            config: AppConfig::default(),
            event_bus: None,
            verifier: None,
        }
    }

    /// Set the store serving both the actions and the pages (required)
    pub fn with_store<S: InvoiceStore + 'static>(self, store: S) -> Self {
        self.with_shared_store(Arc::new(store))
    }

    /// Same as [`with_store`](Self::with_store) for a store the caller keeps a handle on
    pub fn with_shared_store<S: InvoiceStore + 'static>(mut self, store: Arc<S>) -> Self {
        let repository: Arc<dyn InvoiceRepository> = store.clone();
        let queries: Arc<dyn InvoiceQueries> = store;
        self.repository = Some(repository);
        self.queries = Some(queries);
        self
    }

    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = config;
        self
    }

    /// Broadcast revalidations on `bus` instead of a bus sized from the config
    pub fn with_event_bus(mut self, bus: EventBus) -> Self {
        self.event_bus = Some(bus);
        self
    }

    /// Check sign-in credentials with `verifier` instead of the configured accounts
    pub fn with_credential_verifier(mut self, verifier: Arc<dyn CredentialVerifier>) -> Self {
        self.verifier = Some(verifier);
        self
    }

    /// Build the shared state without routing it
    pub fn build_state(self) -> Result<AppState> {
        let repository = self
            .repository
            .ok_or_else(|| anyhow::anyhow!("A store is required. Call .with_store()"))?;
        let queries = self
            .queries
            .ok_or_else(|| anyhow::anyhow!("A store is required. Call .with_store()"))?;

        let event_bus = self
            .event_bus
            .unwrap_or_else(|| EventBus::new(self.config.cache.event_capacity));

        let verifier: Arc<dyn CredentialVerifier> = match self.verifier {
            Some(verifier) => verifier,
            None => Arc::new(ConfiguredCredentials::from_config(&self.config.auth)?),
        };

        Ok(AppState::from_components(
            repository,
            queries,
            Some(event_bus),
            self.config.actions.delete_enabled,
        )?
        .with_credential_verifier(verifier))
    }

    /// Build the final router
    pub fn build(self) -> Result<Router> {
        Ok(build_router(self.build_state()?))
    }

    /// Serve the application with graceful shutdown
    ///
    /// This will:
    /// - Bind to the provided address
    /// - Start the cache event logger
    /// - Start serving requests
    /// - Handle SIGTERM and SIGINT (Ctrl+C) for graceful shutdown
    pub async fn serve(self, addr: &str) -> Result<()> {
        let state = self.build_state()?;
        start_event_logger(&state);
        let app = build_router(state);
        let listener = TcpListener::bind(addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Attach the logging subscriber to the state's event bus, if it has one
fn start_event_logger(state: &AppState) -> Option<JoinHandle<()>> {
    state.event_bus().map(EventBus::spawn_logger)
}

async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}
