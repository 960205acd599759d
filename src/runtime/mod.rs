//! Runtime wiring and lifecycle management.
//!
//! This module contains the infrastructure for running the service:
//!
//! - **Configuration**: Reading settings from the environment
//! - **Wiring**: Building store, repository, orchestration and router
//! - **Observability setup**: Initializing tracing and logging
//!
//! # Main Components
//!
//! - [`AppConfig`] - Settings loaded from environment variables
//! - [`RestaurantApp`] - Wires the layers together and serves HTTP
//! - [`setup_tracing`] - Initializes the tracing/logging infrastructure

pub mod app;
pub mod config;
pub mod tracing;

pub use app::*;
pub use config::*;
pub use tracing::*;
