//! HTTP handlers for the restaurant endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, RawQuery, State},
    http::{header, HeaderName, StatusCode},
    response::IntoResponse,
    Json,
};
use tracing::info;

use crate::orchestration::RestaurantOrchestration;
use crate::restaurants::RestaurantRepository;
use crate::store::TransactionResultView;

use super::dto::{CreateRestaurantRequest, HealthResponse, RestaurantResponse, UpdateRestaurantRequest};
use super::error::ApiErrorResponse;
use super::query::parse_list_query;
use super::validation::{ValidJson, ValidationError};

/// Response header carrying the list pagination metadata as JSON.
pub const PAGINATION_HEADER: HeaderName = HeaderName::from_static("x-pagination");

/// Orchestration type shared by all handlers.
pub type Orchestration = RestaurantOrchestration<Arc<dyn RestaurantRepository>>;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub orchestration: Arc<Orchestration>,
}

impl AppState {
    pub fn new(repository: Arc<dyn RestaurantRepository>) -> Self {
        Self {
            orchestration: Arc::new(RestaurantOrchestration::new(repository)),
        }
    }
}

/// `GET /restaurants`
pub async fn list_restaurants(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    info!("List restaurants request received");
    let params = parse_list_query(query.as_deref())?;
    let page = state.orchestration.list_restaurants(&params).await?;

    let meta = serde_json::to_string(&page.meta)
        .map_err(|e| ApiErrorResponse::internal_error(e.to_string()))?;
    let body: Vec<RestaurantResponse> = page.data.into_iter().map(Into::into).collect();

    Ok(([(PAGINATION_HEADER, meta)], Json(body)))
}

/// `GET /restaurants/{id}`
pub async fn get_restaurant(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<RestaurantResponse>, ApiErrorResponse> {
    info!(%id, "Get restaurant request received");
    match state.orchestration.get_restaurant(&id).await? {
        Some(restaurant) => Ok(Json(restaurant.into())),
        None => Err(ApiErrorResponse::not_found(format!("Restaurant {id} not found"))),
    }
}

/// `POST /restaurants`
pub async fn create_restaurant(
    State(state): State<AppState>,
    ValidJson(request): ValidJson<CreateRestaurantRequest>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    info!("Add restaurant request received");
    let created = state.orchestration.create_restaurant(request.into()).await?;
    let location = format!("/restaurants/{}", created.id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(RestaurantResponse::from(created)),
    ))
}

/// `POST /restaurants/bulk`
pub async fn create_many_restaurants(
    State(state): State<AppState>,
    ValidJson(requests): ValidJson<Vec<CreateRestaurantRequest>>,
) -> Result<Json<TransactionResultView>, ApiErrorResponse> {
    info!(count = requests.len(), "Bulk add restaurants request received");
    if requests.is_empty() {
        return Err(ValidationError::single("body", "must contain at least one restaurant").into());
    }
    let result = state
        .orchestration
        .create_many_restaurants(requests.into_iter().map(Into::into).collect())
        .await?;
    Ok(Json(result.into()))
}

/// `PATCH /restaurants/{id}`
pub async fn update_restaurant(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidJson(request): ValidJson<UpdateRestaurantRequest>,
) -> Result<Json<bool>, ApiErrorResponse> {
    info!(%id, "Update restaurant request received");
    let success = state.orchestration.update_restaurant(&id, &request.into()).await?;
    Ok(Json(success))
}

/// `GET /health`
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}
