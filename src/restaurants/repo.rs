use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, instrument};

use crate::domain::{FilterQueryParametersBo, Page, RestaurantBo, UpdateRestaurantRequestBo};
use crate::store::{DocumentStore, Filter, TransactionResult};

use super::document::RestaurantDocument;
use super::error::RepositoryError;
use super::update::restaurant_updates;

/// Collection restaurants are stored in unless configured otherwise.
pub const DEFAULT_COLLECTION: &str = "restaurants";

/// Restaurant persistence, expressed in business objects.
#[async_trait]
pub trait RestaurantRepository: Send + Sync {
    /// Returns one page of restaurants matching `params`.
    async fn query_restaurants(
        &self,
        params: &FilterQueryParametersBo,
    ) -> Result<Page<RestaurantBo>, RepositoryError>;

    async fn get_restaurant(&self, id: &str) -> Result<Option<RestaurantBo>, RepositoryError>;

    /// Persists a restaurant whose id was already assigned by the caller.
    async fn create_restaurant(&self, restaurant: RestaurantBo) -> Result<RestaurantBo, RepositoryError>;

    async fn create_many_restaurants(
        &self,
        restaurants: Vec<RestaurantBo>,
    ) -> Result<TransactionResult, RepositoryError>;

    /// Applies the present, non-blank fields of `update` to restaurant `id`.
    async fn update_restaurant(
        &self,
        id: &str,
        update: &UpdateRestaurantRequestBo,
    ) -> Result<TransactionResult, RepositoryError>;
}

#[async_trait]
impl<R: RestaurantRepository + ?Sized> RestaurantRepository for Arc<R> {
    async fn query_restaurants(
        &self,
        params: &FilterQueryParametersBo,
    ) -> Result<Page<RestaurantBo>, RepositoryError> {
        (**self).query_restaurants(params).await
    }

    async fn get_restaurant(&self, id: &str) -> Result<Option<RestaurantBo>, RepositoryError> {
        (**self).get_restaurant(id).await
    }

    async fn create_restaurant(&self, restaurant: RestaurantBo) -> Result<RestaurantBo, RepositoryError> {
        (**self).create_restaurant(restaurant).await
    }

    async fn create_many_restaurants(
        &self,
        restaurants: Vec<RestaurantBo>,
    ) -> Result<TransactionResult, RepositoryError> {
        (**self).create_many_restaurants(restaurants).await
    }

    async fn update_restaurant(
        &self,
        id: &str,
        update: &UpdateRestaurantRequestBo,
    ) -> Result<TransactionResult, RepositoryError> {
        (**self).update_restaurant(id, update).await
    }
}

/// [`RestaurantRepository`] backed by any [`DocumentStore`] of restaurant documents.
#[derive(Debug, Clone)]
pub struct StoreRestaurantRepository<S> {
    store: S,
    collection: String,
}

impl<S: DocumentStore<RestaurantDocument>> StoreRestaurantRepository<S> {
    pub fn new(store: S, collection: impl Into<String>) -> Self {
        Self {
            store,
            collection: collection.into(),
        }
    }

    /// Uses the [`DEFAULT_COLLECTION`].
    pub fn with_store(store: S) -> Self {
        Self::new(store, DEFAULT_COLLECTION)
    }
}

/// `(name ~ any of names) AND (cuisineType ~ cuisine)`; blank criteria are ignored.
fn query_filter(params: &FilterQueryParametersBo) -> Filter {
    let names: Vec<Filter> = params
        .names
        .iter()
        .filter(|name| !name.trim().is_empty())
        .map(|name| Filter::contains("name", name))
        .collect();
    let name_filter = if names.is_empty() {
        Filter::All
    } else {
        Filter::any_of(names)
    };

    let cuisine_filter = match params.cuisine_type.as_deref() {
        Some(cuisine) if !cuisine.trim().is_empty() => Filter::contains("cuisineType", cuisine),
        _ => Filter::All,
    };

    Filter::all_of(vec![name_filter, cuisine_filter])
}

#[async_trait]
impl<S: DocumentStore<RestaurantDocument>> RestaurantRepository for StoreRestaurantRepository<S> {
    #[instrument(skip(self))]
    async fn query_restaurants(
        &self,
        params: &FilterQueryParametersBo,
    ) -> Result<Page<RestaurantBo>, RepositoryError> {
        let filter = query_filter(params);
        let pagination = params.pagination;
        debug!(?filter, "Finding restaurants");

        let total = self.store.count(&self.collection, &filter).await?;
        let documents = self
            .store
            .find_page(&self.collection, &filter, pagination.skip(), pagination.page_size)
            .await?;
        let data = documents
            .into_iter()
            .map(RestaurantBo::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        info!(total, returned = data.len(), "Found restaurants");
        Ok(Page::new(data, pagination, total))
    }

    #[instrument(skip(self))]
    async fn get_restaurant(&self, id: &str) -> Result<Option<RestaurantBo>, RepositoryError> {
        debug!("Finding restaurant by id");
        let found = self.store.find_one(&self.collection, &Filter::id(id)).await?;
        Ok(found.map(RestaurantBo::try_from).transpose()?)
    }

    #[instrument(skip(self, restaurant), fields(id = %restaurant.id))]
    async fn create_restaurant(&self, restaurant: RestaurantBo) -> Result<RestaurantBo, RepositoryError> {
        info!("Adding new restaurant");
        let inserted = self
            .store
            .insert_one(&self.collection, RestaurantDocument::from(restaurant))
            .await?;
        Ok(RestaurantBo::try_from(inserted)?)
    }

    #[instrument(skip(self, restaurants), fields(count = restaurants.len()))]
    async fn create_many_restaurants(
        &self,
        restaurants: Vec<RestaurantBo>,
    ) -> Result<TransactionResult, RepositoryError> {
        info!("Adding new restaurants");
        let documents = restaurants.into_iter().map(RestaurantDocument::from).collect();
        Ok(self.store.insert_many(&self.collection, documents).await?)
    }

    #[instrument(skip(self, update))]
    async fn update_restaurant(
        &self,
        id: &str,
        update: &UpdateRestaurantRequestBo,
    ) -> Result<TransactionResult, RepositoryError> {
        let updates = restaurant_updates(update);
        debug!(fields = updates.len(), "Updating restaurant");
        Ok(self
            .store
            .update_one(&self.collection, &Filter::id(id), &updates)
            .await?)
    }
}
