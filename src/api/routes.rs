use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use super::handlers::{
    create_many_restaurants, create_restaurant, get_restaurant, health_check, list_restaurants,
    update_restaurant, AppState,
};

/// Builds the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/restaurants", get(list_restaurants).post(create_restaurant))
        .route("/restaurants/bulk", post(create_many_restaurants))
        .route("/restaurants/{id}", get(get_restaurant).patch(update_restaurant))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
