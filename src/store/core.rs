//! # Core Store Abstraction
//!
//! This module defines the generic building blocks for document persistence.
//!
//! ## Key Types
//!
//! - [`Document`]: The capability every persisted entity must have.
//! - [`DocumentStore`]: Generic CRUD access to named collections of a [`Document`] type.
//! - [`StoreError`]: Common store failures (unavailable, duplicate key, ...).

use std::fmt::Debug;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use tracing::info;

use super::filter::{Filter, UpdateOp};
use super::transaction::TransactionResult;

/// Trait that any persisted entity must implement to be handled by a [`DocumentStore`].
///
/// # Architecture Note
/// By defining one contract for storage documents we write each store *once*
/// and reuse it for every collection. The bounds are what the MongoDB driver
/// needs to (de)serialize a typed collection; the in-memory store relies on
/// the same serde implementation, so both stores see identical field names.
pub trait Document: Serialize + DeserializeOwned + Clone + Debug + Send + Sync + Unpin + 'static {
    /// The string form of the document identity.
    fn id(&self) -> &str;
}

/// Errors that can occur when talking to a document store.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum StoreError {
    /// Connectivity failure, server selection failure or call timeout.
    #[error("Store unavailable: {0}")]
    Unavailable(String),
    /// Any other driver-level failure.
    #[error("Store operation failed: {0}")]
    OperationFailed(String),
    /// An insert collided with an existing identity.
    #[error("Duplicate key: {0}")]
    DuplicateKey(String),
    /// A document could not be converted to or from its stored form.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Generic, type-parameterized access to a document store, addressed by collection name.
///
/// # Provided Methods
/// [`DocumentStore::update_one`] and [`DocumentStore::insert_many`] are provided:
/// they short-circuit an empty update list or an empty batch to
/// [`TransactionResult::not_run`] and only otherwise call
/// [`DocumentStore::apply_update`] or [`DocumentStore::apply_insert_many`].
/// Implementations never see an empty list.
#[async_trait]
pub trait DocumentStore<T: Document>: Send + Sync {
    /// Returns every document matching `filter`; empty when none match.
    async fn find_many(&self, collection: &str, filter: &Filter) -> Result<Vec<T>, StoreError>;

    /// Returns at most `limit` matching documents after skipping `skip`.
    async fn find_page(
        &self,
        collection: &str,
        filter: &Filter,
        skip: u64,
        limit: u64,
    ) -> Result<Vec<T>, StoreError>;

    /// Counts the documents matching `filter`.
    async fn count(&self, collection: &str, filter: &Filter) -> Result<u64, StoreError>;

    /// Returns the first match, or `None`.
    async fn find_one(&self, collection: &str, filter: &Filter) -> Result<Option<T>, StoreError>;

    /// Inserts one document and returns it.
    async fn insert_one(&self, collection: &str, entity: T) -> Result<T, StoreError>;

    /// Inserts a non-empty batch of documents or fails.
    async fn apply_insert_many(
        &self,
        collection: &str,
        entities: Vec<T>,
    ) -> Result<TransactionResult, StoreError>;

    /// Replaces exactly one matched document. Expects one record.
    async fn replace_one(
        &self,
        collection: &str,
        filter: &Filter,
        entity: T,
    ) -> Result<TransactionResult, StoreError>;

    /// Applies a non-empty combined update to one matched document. Expects one record.
    async fn apply_update(
        &self,
        collection: &str,
        filter: &Filter,
        updates: &[UpdateOp],
    ) -> Result<TransactionResult, StoreError>;

    /// Removes one matched document. Expects one record.
    async fn delete_one(
        &self,
        collection: &str,
        filter: &Filter,
    ) -> Result<TransactionResult, StoreError>;

    /// Removes every matched document, expecting `expected` of them.
    async fn delete_many(
        &self,
        collection: &str,
        filter: &Filter,
        expected: u64,
    ) -> Result<TransactionResult, StoreError>;

    /// Applies a combined set of update operations to one matched document.
    async fn update_one(
        &self,
        collection: &str,
        filter: &Filter,
        updates: &[UpdateOp],
    ) -> Result<TransactionResult, StoreError> {
        if updates.is_empty() {
            info!(collection, "No updates to perform");
            return Ok(TransactionResult::not_run());
        }
        self.apply_update(collection, filter, updates).await
    }

    /// Inserts every document or fails.
    async fn insert_many(
        &self,
        collection: &str,
        entities: Vec<T>,
    ) -> Result<TransactionResult, StoreError> {
        if entities.is_empty() {
            info!(collection, "No documents to insert");
            return Ok(TransactionResult::not_run());
        }
        self.apply_insert_many(collection, entities).await
    }
}

#[async_trait]
impl<T: Document, S: DocumentStore<T> + ?Sized> DocumentStore<T> for std::sync::Arc<S> {
    async fn find_many(&self, collection: &str, filter: &Filter) -> Result<Vec<T>, StoreError> {
        (**self).find_many(collection, filter).await
    }

    async fn find_page(
        &self,
        collection: &str,
        filter: &Filter,
        skip: u64,
        limit: u64,
    ) -> Result<Vec<T>, StoreError> {
        (**self).find_page(collection, filter, skip, limit).await
    }

    async fn count(&self, collection: &str, filter: &Filter) -> Result<u64, StoreError> {
        (**self).count(collection, filter).await
    }

    async fn find_one(&self, collection: &str, filter: &Filter) -> Result<Option<T>, StoreError> {
        (**self).find_one(collection, filter).await
    }

    async fn insert_one(&self, collection: &str, entity: T) -> Result<T, StoreError> {
        (**self).insert_one(collection, entity).await
    }

    async fn apply_insert_many(
        &self,
        collection: &str,
        entities: Vec<T>,
    ) -> Result<TransactionResult, StoreError> {
        (**self).apply_insert_many(collection, entities).await
    }

    async fn replace_one(
        &self,
        collection: &str,
        filter: &Filter,
        entity: T,
    ) -> Result<TransactionResult, StoreError> {
        (**self).replace_one(collection, filter, entity).await
    }

    async fn apply_update(
        &self,
        collection: &str,
        filter: &Filter,
        updates: &[UpdateOp],
    ) -> Result<TransactionResult, StoreError> {
        (**self).apply_update(collection, filter, updates).await
    }

    async fn delete_one(
        &self,
        collection: &str,
        filter: &Filter,
    ) -> Result<TransactionResult, StoreError> {
        (**self).delete_one(collection, filter).await
    }

    async fn delete_many(
        &self,
        collection: &str,
        filter: &Filter,
        expected: u64,
    ) -> Result<TransactionResult, StoreError> {
        (**self).delete_many(collection, filter, expected).await
    }
}
