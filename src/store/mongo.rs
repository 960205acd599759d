//! MongoDB-backed [`DocumentStore`].

use std::future::IntoFuture;
use std::time::Duration;

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::error::{ErrorKind, InsertManyError, WriteFailure};
use mongodb::{Client, Collection, Database};
use tracing::{debug, info, instrument};

use super::core::{Document, DocumentStore, StoreError};
use super::filter::{to_update_document, Filter, UpdateOp};
use super::transaction::TransactionResult;

const DUPLICATE_KEY_CODE: i32 = 11000;

impl From<mongodb::error::Error> for StoreError {
    fn from(err: mongodb::error::Error) -> Self {
        match err.kind.as_ref() {
            ErrorKind::Write(WriteFailure::WriteError(write)) if write.code == DUPLICATE_KEY_CODE => {
                StoreError::DuplicateKey(write.message.clone())
            }
            ErrorKind::InsertMany(InsertManyError {
                write_errors: Some(errors),
                ..
            }) if errors.iter().any(|e| e.code == DUPLICATE_KEY_CODE) => {
                let messages: Vec<&str> = errors
                    .iter()
                    .filter(|e| e.code == DUPLICATE_KEY_CODE)
                    .map(|e| e.message.as_str())
                    .collect();
                StoreError::DuplicateKey(messages.join("; "))
            }
            ErrorKind::ServerSelection { .. }
            | ErrorKind::Io(_)
            | ErrorKind::ConnectionPoolCleared { .. } => StoreError::Unavailable(err.to_string()),
            ErrorKind::BsonSerialization(_) | ErrorKind::BsonDeserialization(_) => {
                StoreError::Serialization(err.to_string())
            }
            _ => StoreError::OperationFailed(err.to_string()),
        }
    }
}

/// The driver takes signed counts; anything past `i64::MAX` saturates.
fn driver_count(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

/// A [`DocumentStore`] over one MongoDB database.
///
/// The client is created once and shared; cloning the store is cheap and
/// shares the same connection pool. Every driver call is bounded by `timeout`,
/// and an expired call surfaces as [`StoreError::Unavailable`].
#[derive(Clone, Debug)]
pub struct MongoStore {
    database: Database,
    timeout: Duration,
}

impl MongoStore {
    pub fn new(database: Database, timeout: Duration) -> Self {
        Self { database, timeout }
    }

    /// Connects to `uri` and selects `database_name`.
    pub async fn connect(
        uri: &str,
        database_name: &str,
        timeout: Duration,
    ) -> Result<Self, StoreError> {
        info!(database = database_name, "Configuring MongoDB client");
        let client = Client::with_uri_str(uri).await?;
        let database = client.database(database_name);
        info!(database = database_name, "MongoDB client ready");
        Ok(Self::new(database, timeout))
    }

    fn collection<T: Document>(&self, name: &str) -> Collection<T> {
        self.database.collection::<T>(name)
    }

    async fn run<F, R>(&self, operation: &'static str, call: F) -> Result<R, StoreError>
    where
        F: IntoFuture<Output = mongodb::error::Result<R>>,
    {
        match tokio::time::timeout(self.timeout, call).await {
            Ok(result) => result.map_err(StoreError::from),
            Err(_) => Err(StoreError::Unavailable(format!(
                "{operation} timed out after {:?}",
                self.timeout
            ))),
        }
    }
}

#[async_trait]
impl<T: Document> DocumentStore<T> for MongoStore {
    #[instrument(skip(self, filter))]
    async fn find_many(&self, collection: &str, filter: &Filter) -> Result<Vec<T>, StoreError> {
        let coll = self.collection::<T>(collection);
        let query = filter.to_bson();
        debug!(?query, "Finding items by filter");
        self.run("find_many", async move {
            coll.find(query).await?.try_collect::<Vec<T>>().await
        })
        .await
    }

    #[instrument(skip(self, filter))]
    async fn find_page(
        &self,
        collection: &str,
        filter: &Filter,
        skip: u64,
        limit: u64,
    ) -> Result<Vec<T>, StoreError> {
        let coll = self.collection::<T>(collection);
        let query = filter.to_bson();
        // The server rejects a skip that does not fit a signed 64-bit value.
        let skip = driver_count(skip).unsigned_abs();
        let limit = driver_count(limit);
        debug!(?query, skip, limit, "Finding page by filter");
        self.run("find_page", async move {
            coll.find(query)
                .skip(skip)
                .limit(limit)
                .await?
                .try_collect::<Vec<T>>()
                .await
        })
        .await
    }

    #[instrument(skip(self, filter))]
    async fn count(&self, collection: &str, filter: &Filter) -> Result<u64, StoreError> {
        let coll = self.collection::<T>(collection);
        self.run("count", coll.count_documents(filter.to_bson())).await
    }

    #[instrument(skip(self, filter))]
    async fn find_one(&self, collection: &str, filter: &Filter) -> Result<Option<T>, StoreError> {
        let coll = self.collection::<T>(collection);
        let query = filter.to_bson();
        debug!(?query, "Finding item by filter");
        self.run("find_one", coll.find_one(query)).await
    }

    #[instrument(skip(self, entity), fields(id = entity.id()))]
    async fn insert_one(&self, collection: &str, entity: T) -> Result<T, StoreError> {
        let coll = self.collection::<T>(collection);
        info!("Inserting new document");
        self.run("insert_one", coll.insert_one(&entity)).await?;
        Ok(entity)
    }

    #[instrument(skip(self, entities), fields(count = entities.len()))]
    async fn apply_insert_many(
        &self,
        collection: &str,
        entities: Vec<T>,
    ) -> Result<TransactionResult, StoreError> {
        let coll = self.collection::<T>(collection);
        info!("Inserting new documents");
        let result = self.run("insert_many", coll.insert_many(&entities)).await?;
        Ok(TransactionResult::acknowledged(
            entities.len() as u64,
            result.inserted_ids.len() as u64,
        ))
    }

    #[instrument(skip(self, filter, entity), fields(id = entity.id()))]
    async fn replace_one(
        &self,
        collection: &str,
        filter: &Filter,
        entity: T,
    ) -> Result<TransactionResult, StoreError> {
        let coll = self.collection::<T>(collection);
        info!("Starting replace operation");
        let result = self
            .run("replace_one", coll.replace_one(filter.to_bson(), &entity))
            .await?;
        Ok(TransactionResult::acknowledged(1, result.modified_count))
    }

    #[instrument(skip(self, filter, updates), fields(updates = updates.len()))]
    async fn apply_update(
        &self,
        collection: &str,
        filter: &Filter,
        updates: &[UpdateOp],
    ) -> Result<TransactionResult, StoreError> {
        let coll = self.collection::<T>(collection);
        let update = to_update_document(updates);
        debug!(?update, "Updating document");
        let result = self
            .run("update_one", coll.update_one(filter.to_bson(), update))
            .await?;
        Ok(TransactionResult::acknowledged(1, result.modified_count))
    }

    #[instrument(skip(self, filter))]
    async fn delete_one(
        &self,
        collection: &str,
        filter: &Filter,
    ) -> Result<TransactionResult, StoreError> {
        let coll = self.collection::<T>(collection);
        let result = self.run("delete_one", coll.delete_one(filter.to_bson())).await?;
        Ok(TransactionResult::acknowledged(1, result.deleted_count))
    }

    #[instrument(skip(self, filter))]
    async fn delete_many(
        &self,
        collection: &str,
        filter: &Filter,
        expected: u64,
    ) -> Result<TransactionResult, StoreError> {
        let coll = self.collection::<T>(collection);
        let result = self
            .run("delete_many", coll.delete_many(filter.to_bson()))
            .await?;
        Ok(TransactionResult::acknowledged(expected, result.deleted_count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::{self, doc};
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Note {
        #[serde(rename = "_id")]
        id: String,
        title: String,
    }

    impl Document for Note {
        fn id(&self) -> &str {
            &self.id
        }
    }

    fn note(id: &str) -> Note {
        Note {
            id: id.into(),
            title: "title".into(),
        }
    }

    /// Port 1 never accepts connections, so nothing here needs a server.
    async fn unreachable_store(server_selection_ms: u64, timeout: Duration) -> MongoStore {
        let uri = format!("mongodb://127.0.0.1:1/?serverSelectionTimeoutMS={server_selection_ms}");
        MongoStore::connect(&uri, "restaurants_test", timeout).await.unwrap()
    }

    #[tokio::test]
    async fn test_slow_call_times_out_as_unavailable() {
        let store = unreachable_store(30_000, Duration::from_millis(100)).await;

        let err = DocumentStore::<Note>::find_many(&store, "notes", &Filter::All)
            .await
            .unwrap_err();

        match err {
            StoreError::Unavailable(message) => assert!(message.contains("find_many timed out")),
            other => panic!("expected Unavailable, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_server_selection_failure_is_unavailable() {
        let store = unreachable_store(50, Duration::from_secs(10)).await;

        let err = DocumentStore::<Note>::count(&store, "notes", &Filter::All)
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::Unavailable(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn test_empty_batch_is_not_sent_to_the_server() {
        // Would time out if the driver were called.
        let store = unreachable_store(30_000, Duration::from_millis(100)).await;

        let result = DocumentStore::<Note>::insert_many(&store, "notes", Vec::new())
            .await
            .unwrap();

        assert!(!result.transaction_run);
        assert!(result.success());
    }

    #[tokio::test]
    async fn test_non_empty_batch_reaches_the_driver() {
        let store = unreachable_store(30_000, Duration::from_millis(100)).await;

        let err = store.insert_many("notes", vec![note("1")]).await.unwrap_err();

        assert!(matches!(err, StoreError::Unavailable(_)), "got {err:?}");
    }

    #[test]
    fn test_write_error_with_duplicate_code_is_duplicate_key() {
        let write: mongodb::error::WriteError = bson::from_document(doc! {
            "code": DUPLICATE_KEY_CODE,
            "errmsg": "E11000 duplicate key error collection: db.restaurants",
        })
        .unwrap();
        let err = mongodb::error::Error::from(ErrorKind::Write(WriteFailure::WriteError(write)));

        assert_eq!(
            StoreError::from(err),
            StoreError::DuplicateKey("E11000 duplicate key error collection: db.restaurants".into())
        );
    }

    #[test]
    fn test_other_write_error_is_operation_failed() {
        let write: mongodb::error::WriteError =
            bson::from_document(doc! { "code": 121, "errmsg": "Document failed validation" })
                .unwrap();
        let err = mongodb::error::Error::from(ErrorKind::Write(WriteFailure::WriteError(write)));

        assert!(matches!(StoreError::from(err), StoreError::OperationFailed(_)));
    }

    #[test]
    fn test_bulk_insert_duplicate_is_matched_by_code() {
        let failure: InsertManyError = bson::from_document(doc! {
            "writeErrors": [
                { "index": 1, "code": DUPLICATE_KEY_CODE, "errmsg": "dup _id 2" },
            ],
        })
        .unwrap();
        let err = mongodb::error::Error::from(ErrorKind::InsertMany(failure));

        assert_eq!(StoreError::from(err), StoreError::DuplicateKey("dup _id 2".into()));
    }

    #[test]
    fn test_bulk_insert_without_duplicate_code_is_operation_failed() {
        // The text mentions E11000 but the code does not.
        let failure: InsertManyError = bson::from_document(doc! {
            "writeErrors": [
                { "index": 0, "code": 121, "errmsg": "E11000 lookalike" },
            ],
        })
        .unwrap();
        let err = mongodb::error::Error::from(ErrorKind::InsertMany(failure));

        assert!(matches!(StoreError::from(err), StoreError::OperationFailed(_)));
    }

    #[test]
    fn test_io_error_is_unavailable() {
        let err = mongodb::error::Error::from(std::io::ErrorKind::ConnectionRefused);

        assert!(matches!(StoreError::from(err), StoreError::Unavailable(_)));
    }

    #[test]
    fn test_bson_errors_are_serialization() {
        let ser = bson::to_document(&5_i32).unwrap_err();
        let de = bson::from_document::<Note>(doc! { "_id": 7 }).unwrap_err();

        assert!(matches!(
            StoreError::from(mongodb::error::Error::from(ser)),
            StoreError::Serialization(_)
        ));
        assert!(matches!(
            StoreError::from(mongodb::error::Error::from(de)),
            StoreError::Serialization(_)
        ));
    }

    #[test]
    fn test_driver_count_saturates() {
        assert_eq!(driver_count(0), 0);
        assert_eq!(driver_count(25), 25);
        assert_eq!(driver_count(u64::MAX), i64::MAX);
        assert_eq!(driver_count(u64::MAX).unsigned_abs(), i64::MAX as u64);
    }
}
