use std::future::Future;
use std::sync::Arc;

use axum::Router;
use thiserror::Error;
use tokio::net::TcpListener;
use tracing::{error, info};

use crate::api::{router, AppState};
use crate::restaurants::{RestaurantDocument, RestaurantRepository, StoreRestaurantRepository};
use crate::store::{DocumentStore, InMemoryStore, MongoStore, StoreError};

use super::config::{AppConfig, ConfigError, StoreMode};

/// Errors that stop the application from starting or serving.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to connect to store: {0}")]
    Store(#[from] StoreError),

    #[error("Server error: {0}")]
    Io(#[from] std::io::Error),
}

/// The wired restaurant service.
///
/// `RestaurantApp` is responsible for:
/// - **Store selection**: MongoDB or in-memory, per [`StoreMode`]
/// - **Dependency wiring**: store → repository → orchestration → router
/// - **Serving**: binding the listener and shutting down gracefully on Ctrl+C
///
/// # Example
///
/// ```ignore
/// let config = AppConfig::from_env()?;
/// RestaurantApp::new(config).await?.serve().await?;
/// ```
pub struct RestaurantApp {
    config: AppConfig,
    state: AppState,
}

impl RestaurantApp {
    /// Connects the configured store and wires every layer on top of it.
    pub async fn new(config: AppConfig) -> Result<Self, AppError> {
        let store: Arc<dyn DocumentStore<RestaurantDocument>> = match config.store_mode {
            StoreMode::Mongo => {
                let uri = config
                    .connection_string
                    .as_deref()
                    .ok_or(ConfigError::MissingConnectionString)?;
                Arc::new(MongoStore::connect(uri, &config.database, config.store_timeout).await?)
            }
            StoreMode::InMemory => {
                info!("Using in-memory store");
                Arc::new(InMemoryStore::new())
            }
        };

        let repository = StoreRestaurantRepository::new(store, config.collection.clone());
        Ok(Self::with_repository(config, Arc::new(repository)))
    }

    /// Wires the application over an already-built repository.
    pub fn with_repository(config: AppConfig, repository: Arc<dyn RestaurantRepository>) -> Self {
        Self {
            config,
            state: AppState::new(repository),
        }
    }

    pub fn router(&self) -> Router {
        router(self.state.clone())
    }

    /// Binds the configured address and serves until Ctrl+C.
    pub async fn serve(self) -> Result<(), AppError> {
        let listener = TcpListener::bind(self.config.bind_address()).await?;
        self.serve_with_shutdown(listener, shutdown_signal()).await
    }

    /// Serves on `listener` until `signal` completes, then drains in-flight requests.
    pub async fn serve_with_shutdown(
        self,
        listener: TcpListener,
        signal: impl Future<Output = ()> + Send + 'static,
    ) -> Result<(), AppError> {
        info!(address = ?listener.local_addr().ok(), "Listening");
        axum::serve(listener, self.router())
            .with_graceful_shutdown(signal)
            .await?;
        info!("Server shutdown complete");
        Ok(())
    }
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received Ctrl+C, initiating graceful shutdown"),
        Err(e) => error!(error = %e, "Failed to listen for Ctrl+C"),
    }
}
