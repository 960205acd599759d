#![doc(html_logo_url = "https://www.rust-lang.org/logos/rust-logo-128x128.png")]
#![doc(html_favicon_url = "https://www.rust-lang.org/favicon.ico")]
//! # Restaurant Service
//!
//! > **A layered CRUD service for restaurants over a document database.**
//!
//! This crate exposes a small REST API for listing, fetching, creating and
//! partially updating restaurant records stored in MongoDB. Each layer talks to
//! the next through a trait, so any layer can be swapped or mocked.
//!
//! ## 🏗️ Design Philosophy
//!
//! ### Why a generic store?
//!
//! Persistence is written **once** as [`DocumentStore<T>`](store::DocumentStore),
//! generic over any [`Document`](store::Document). The restaurant repository only
//! describes *what* to match and change using [`Filter`](store::Filter) and
//! [`UpdateOp`](store::UpdateOp) values; each store decides *how*:
//! - [`MongoStore`](store::MongoStore) renders them into BSON queries.
//! - [`InMemoryStore`](store::InMemoryStore) evaluates them directly, for tests and local runs.
//!
//! ### Three shapes of a restaurant
//! A restaurant exists as a request/response DTO ([`api::dto`]), a business
//! object ([`domain`]) and a stored document ([`restaurants::document`]).
//! Conversions between them are plain `From`/`TryFrom` impls; the only fallible
//! one is reading a stored website that is not a valid URI.
//!
//! ## 👩‍💻 Architecture Notes
//!
//! ### 1. Type-Safe Error Handling
//! Each layer defines its own error enum (`StoreError`, `RepositoryError`,
//! `OrchestrationError`) and wraps the layer below with `#[from]`. The REST layer
//! turns them into status codes in one place, [`api::ApiErrorResponse`].
//!
//! ### 2. Write Outcomes
//! Writes return a [`TransactionResult`](store::TransactionResult). An update with
//! nothing to change, or a bulk insert with nothing to insert, is never sent to the
//! store and reports `transactionRun = false`, which counts as success.
//!
//! ### 3. Observability
//! We use `tracing` everywhere with structured fields. Repository and orchestration
//! methods are `#[instrument]`ed, and the router carries `tower-http`'s `TraceLayer`.
//! See the [`runtime::tracing`] module for setup.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Engine ([`store`])
//! - **Role**: Generic document persistence with timeouts and typed errors.
//! - **Key items**: [`DocumentStore`](store::DocumentStore), [`Filter`](store::Filter),
//!   [`TransactionResult`](store::TransactionResult), [`MockStore`](store::mock::MockStore).
//!
//! ### 2. The Repository ([`restaurants`])
//! - **Role**: Query/update construction and document mapping for restaurants.
//! - **Key items**: [`RestaurantRepository`](restaurants::RestaurantRepository),
//!   [`StoreRestaurantRepository`](restaurants::StoreRestaurantRepository).
//!
//! ### 3. The Business Layer ([`domain`], [`orchestration`])
//! - **Role**: Id generation and existence checks on top of the repository.
//! - **Key items**: [`RestaurantOrchestration`](orchestration::RestaurantOrchestration).
//!
//! ### 4. The Interface ([`api`])
//! - **Role**: axum handlers, request validation and HTTP error mapping.
//!
//! ### 5. The Runtime ([`runtime`])
//! - **Role**: Configuration, wiring and graceful shutdown.
//! - **Key items**: [`AppConfig`](runtime::AppConfig), [`RestaurantApp`](runtime::RestaurantApp).
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! # Against MongoDB
//! MONGODB_CONN=mongodb://localhost:27017 RUST_LOG=info cargo run
//!
//! # Without a database
//! STORE_MODE=in_memory cargo run
//! ```
//!
//! ### Running Tests
//!
//! ```bash
//! cargo test
//! ```

pub mod api;
pub mod domain;
pub mod orchestration;
pub mod restaurants;
pub mod runtime;
pub mod store;
