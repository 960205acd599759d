use mongodb::bson::oid::ObjectId;
use tracing::{info, instrument, warn};

use crate::domain::{
    CreateRestaurantRequestBo, FilterQueryParametersBo, Page, RestaurantBo, UpdateRestaurantRequestBo,
};
use crate::restaurants::RestaurantRepository;
use crate::store::TransactionResult;

use super::error::OrchestrationError;

/// Business operations on restaurants.
///
/// Assigns identities to new restaurants and checks that an update target
/// exists before delegating to the repository.
#[derive(Debug, Clone)]
pub struct RestaurantOrchestration<R> {
    repository: R,
}

/// A fresh 24-character hex identity.
pub fn generate_id() -> String {
    ObjectId::new().to_hex()
}

impl<R: RestaurantRepository> RestaurantOrchestration<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    #[instrument(skip(self))]
    pub async fn list_restaurants(
        &self,
        params: &FilterQueryParametersBo,
    ) -> Result<Page<RestaurantBo>, OrchestrationError> {
        Ok(self.repository.query_restaurants(params).await?)
    }

    #[instrument(skip(self))]
    pub async fn get_restaurant(&self, id: &str) -> Result<Option<RestaurantBo>, OrchestrationError> {
        Ok(self.repository.get_restaurant(id).await?)
    }

    #[instrument(skip(self, request))]
    pub async fn create_restaurant(
        &self,
        request: CreateRestaurantRequestBo,
    ) -> Result<RestaurantBo, OrchestrationError> {
        let restaurant = request.into_restaurant(generate_id());
        info!(id = %restaurant.id, "Creating restaurant");
        Ok(self.repository.create_restaurant(restaurant).await?)
    }

    #[instrument(skip(self, requests), fields(count = requests.len()))]
    pub async fn create_many_restaurants(
        &self,
        requests: Vec<CreateRestaurantRequestBo>,
    ) -> Result<TransactionResult, OrchestrationError> {
        let restaurants = requests
            .into_iter()
            .map(|request| request.into_restaurant(generate_id()))
            .collect();
        Ok(self.repository.create_many_restaurants(restaurants).await?)
    }

    /// Returns the success of the update. Fails with `NotFound` when `id` is unknown.
    #[instrument(skip(self, request))]
    pub async fn update_restaurant(
        &self,
        id: &str,
        request: &UpdateRestaurantRequestBo,
    ) -> Result<bool, OrchestrationError> {
        if self.repository.get_restaurant(id).await?.is_none() {
            warn!("Update target not found");
            return Err(OrchestrationError::NotFound(id.to_owned()));
        }
        let result = self.repository.update_restaurant(id, request).await?;
        info!(?result, success = result.success(), "Updated restaurant");
        Ok(result.success())
    }
}
