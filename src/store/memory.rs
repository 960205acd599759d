//! In-memory [`DocumentStore`] for development and testing.
//!
//! Documents are kept in their serialized BSON form so that filters and updates
//! see exactly the field names MongoDB would.

use std::collections::HashMap;

use async_trait::async_trait;
use mongodb::bson::{self, Document as BsonDocument};
use tokio::sync::RwLock;
use tracing::{debug, info};

use super::core::{Document, DocumentStore, StoreError};
use super::filter::{bson_eq, Filter, UpdateOp};
use super::transaction::TransactionResult;

/// Collections of BSON documents, kept in insertion order.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    collections: RwLock<HashMap<String, Vec<BsonDocument>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn to_bson<T: Document>(entity: &T) -> Result<BsonDocument, StoreError> {
    bson::to_document(entity).map_err(|e| StoreError::Serialization(e.to_string()))
}

fn from_bson<T: Document>(document: &BsonDocument) -> Result<T, StoreError> {
    bson::from_document(document.clone()).map_err(|e| StoreError::Serialization(e.to_string()))
}

fn same_id(left: &BsonDocument, right: &BsonDocument) -> bool {
    match (left.get("_id"), right.get("_id")) {
        (Some(a), Some(b)) => bson_eq(a, b),
        _ => false,
    }
}

#[async_trait]
impl<T: Document> DocumentStore<T> for InMemoryStore {
    async fn find_many(&self, collection: &str, filter: &Filter) -> Result<Vec<T>, StoreError> {
        DocumentStore::<T>::find_page(self, collection, filter, 0, u64::MAX).await
    }

    async fn find_page(
        &self,
        collection: &str,
        filter: &Filter,
        skip: u64,
        limit: u64,
    ) -> Result<Vec<T>, StoreError> {
        let collections = self.collections.read().await;
        let Some(documents) = collections.get(collection) else {
            return Ok(Vec::new());
        };
        let skip = usize::try_from(skip).unwrap_or(usize::MAX);
        let limit = usize::try_from(limit).unwrap_or(usize::MAX);
        debug!(collection, ?filter, skip, limit, "Finding items by filter");
        documents
            .iter()
            .filter(|d| filter.matches(d))
            .skip(skip)
            .take(limit)
            .map(from_bson)
            .collect()
    }

    async fn count(&self, collection: &str, filter: &Filter) -> Result<u64, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .map_or(0, |documents| {
                documents.iter().filter(|d| filter.matches(d)).count()
            }) as u64)
    }

    async fn find_one(&self, collection: &str, filter: &Filter) -> Result<Option<T>, StoreError> {
        let collections = self.collections.read().await;
        collections
            .get(collection)
            .and_then(|documents| documents.iter().find(|d| filter.matches(d)))
            .map(from_bson)
            .transpose()
    }

    async fn insert_one(&self, collection: &str, entity: T) -> Result<T, StoreError> {
        let document = to_bson(&entity)?;
        let mut collections = self.collections.write().await;
        let documents = collections.entry(collection.to_owned()).or_default();
        if documents.iter().any(|existing| same_id(existing, &document)) {
            return Err(StoreError::DuplicateKey(entity.id().to_owned()));
        }
        documents.push(document);
        info!(collection, id = entity.id(), size = documents.len(), "Inserted");
        Ok(entity)
    }

    async fn apply_insert_many(
        &self,
        collection: &str,
        entities: Vec<T>,
    ) -> Result<TransactionResult, StoreError> {
        let incoming = entities.iter().map(to_bson).collect::<Result<Vec<_>, _>>()?;
        let mut collections = self.collections.write().await;
        let documents = collections.entry(collection.to_owned()).or_default();
        // All-or-nothing: reject the whole batch before touching the collection.
        for (index, document) in incoming.iter().enumerate() {
            let clashes_existing = documents.iter().any(|existing| same_id(existing, document));
            let clashes_batch = incoming[..index].iter().any(|earlier| same_id(earlier, document));
            if clashes_existing || clashes_batch {
                return Err(StoreError::DuplicateKey(entities[index].id().to_owned()));
            }
        }
        let inserted = incoming.len() as u64;
        documents.extend(incoming);
        info!(collection, inserted, size = documents.len(), "Inserted many");
        Ok(TransactionResult::acknowledged(entities.len() as u64, inserted))
    }

    async fn replace_one(
        &self,
        collection: &str,
        filter: &Filter,
        entity: T,
    ) -> Result<TransactionResult, StoreError> {
        let replacement = to_bson(&entity)?;
        let mut collections = self.collections.write().await;
        let modified = collections
            .get_mut(collection)
            .and_then(|documents| documents.iter_mut().find(|d| filter.matches(d)))
            .map(|current| {
                let changed = *current != replacement;
                *current = replacement;
                changed
            })
            .unwrap_or(false);
        Ok(TransactionResult::acknowledged(1, u64::from(modified)))
    }

    async fn apply_update(
        &self,
        collection: &str,
        filter: &Filter,
        updates: &[UpdateOp],
    ) -> Result<TransactionResult, StoreError> {
        let mut collections = self.collections.write().await;
        let modified = collections
            .get_mut(collection)
            .and_then(|documents| documents.iter_mut().find(|d| filter.matches(d)))
            .map(|current| {
                // Apply every op; `|` does not short-circuit.
                updates
                    .iter()
                    .fold(false, |changed, update| update.apply(current) | changed)
            })
            .unwrap_or(false);
        debug!(collection, modified, "Updated");
        Ok(TransactionResult::acknowledged(1, u64::from(modified)))
    }

    async fn delete_one(
        &self,
        collection: &str,
        filter: &Filter,
    ) -> Result<TransactionResult, StoreError> {
        let mut collections = self.collections.write().await;
        let deleted = collections
            .get_mut(collection)
            .and_then(|documents| {
                let position = documents.iter().position(|d| filter.matches(d))?;
                documents.remove(position);
                Some(())
            })
            .is_some();
        Ok(TransactionResult::acknowledged(1, u64::from(deleted)))
    }

    async fn delete_many(
        &self,
        collection: &str,
        filter: &Filter,
        expected: u64,
    ) -> Result<TransactionResult, StoreError> {
        let mut collections = self.collections.write().await;
        let deleted = collections.get_mut(collection).map_or(0, |documents| {
            let before = documents.len();
            documents.retain(|d| !filter.matches(d));
            before - documents.len()
        });
        Ok(TransactionResult::acknowledged(expected, deleted as u64))
    }
}
