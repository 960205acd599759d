//! Restaurant persistence: stored document shape, mapping and the repository.
//!
//! # Main Components
//!
//! - [`RestaurantDocument`] - How a restaurant is laid out in the collection
//! - [`RestaurantRepository`] - Business-object level persistence contract
//! - [`StoreRestaurantRepository`] - Repository over any [`DocumentStore`](crate::store::DocumentStore)

pub mod document;
pub mod error;
pub mod mapper;
pub mod repo;
pub mod update;

pub use document::{LocationDocument, RestaurantDocument, DEFAULT_COUNTRY};
pub use error::RepositoryError;
pub use repo::{RestaurantRepository, StoreRestaurantRepository, DEFAULT_COLLECTION};
pub use update::restaurant_updates;
