//! REST surface over [`RestaurantOrchestration`](crate::orchestration::RestaurantOrchestration).
//!
//! | Method | Path | Handler |
//! |---|---|---|
//! | GET | `/restaurants` | [`list_restaurants`] |
//! | GET | `/restaurants/{id}` | [`get_restaurant`] |
//! | POST | `/restaurants` | [`create_restaurant`] |
//! | POST | `/restaurants/bulk` | [`create_many_restaurants`] |
//! | PATCH | `/restaurants/{id}` | [`update_restaurant`] |
//! | GET | `/health` | [`health_check`] |

pub mod dto;
pub mod error;
pub mod handlers;
pub mod query;
pub mod routes;
pub mod validation;

pub use error::{ApiError, ApiErrorResponse};
pub use handlers::*;
pub use routes::router;
pub use validation::{FieldError, Validate, ValidJson, ValidationError};
