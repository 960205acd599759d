//! Business-level restaurant operations sitting between the REST layer and the repository.

pub mod error;
pub mod restaurant;

pub use error::OrchestrationError;
pub use restaurant::{generate_id, RestaurantOrchestration};
