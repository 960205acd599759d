//! # Mock Store
//!
//! Utilities for testing repositories and orchestration in isolation.
//!
//! Create a [`MockStore`], queue the responses you expect with the
//! `expect_*` builders, hand the store to the code under test, then call
//! [`MockStore::verify`] to assert every expectation was consumed.
//!
//! ```ignore
//! let mut mock = MockStore::<RestaurantDocument>::new();
//! mock.expect_find_one().return_ok(None);
//!
//! let repo = StoreRestaurantRepository::new(Arc::new(mock.clone()), "restaurants");
//! // Use repo in tests...
//! mock.verify();
//! ```
//!
//! Calls are matched strictly in order. An unexpected call panics, which fails
//! the test at the point where the code under test diverged.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use paste::paste;

use super::core::{Document, DocumentStore, StoreError};
use super::filter::{Filter, UpdateOp};
use super::transaction::TransactionResult;

/// A queued response, one variant per store operation.
enum Expectation<T> {
    FindMany(Result<Vec<T>, StoreError>),
    FindPage(Result<Vec<T>, StoreError>),
    Count(Result<u64, StoreError>),
    FindOne(Result<Option<T>, StoreError>),
    InsertOne(Result<T, StoreError>),
    ApplyInsertMany(Result<TransactionResult, StoreError>),
    ReplaceOne(Result<TransactionResult, StoreError>),
    ApplyUpdate(Result<TransactionResult, StoreError>),
    DeleteOne(Result<TransactionResult, StoreError>),
    DeleteMany(Result<TransactionResult, StoreError>),
}

/// A store double that replays queued responses.
///
/// Clones share the same expectation queue.
pub struct MockStore<T: Document> {
    expectations: Arc<Mutex<VecDeque<Expectation<T>>>>,
}

impl<T: Document> Clone for MockStore<T> {
    fn clone(&self) -> Self {
        Self {
            expectations: self.expectations.clone(),
        }
    }
}

impl<T: Document> Default for MockStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Document> MockStore<T> {
    /// Creates a new mock store with no expectations.
    pub fn new() -> Self {
        Self {
            expectations: Arc::new(Mutex::new(VecDeque::new())),
        }
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let exps = self.expectations.lock().unwrap();
        if !exps.is_empty() {
            panic!("Not all expectations were met. {} remaining", exps.len());
        }
    }

    fn next(&self) -> Option<Expectation<T>> {
        self.expectations.lock().unwrap().pop_front()
    }
}

fn unexpected(operation: &str, collection: &str) -> ! {
    panic!("Unexpected {operation} call on `{collection}` or expectation mismatch");
}

macro_rules! expectation_builders {
    ($($variant:ident => $method:ident : $ok:ty),* $(,)?) => {
        paste! {
            $(
                #[doc = "Builder for `" $method "` expectations."]
                pub struct [<$variant ExpectationBuilder>]<T: Document> {
                    expectations: Arc<Mutex<VecDeque<Expectation<T>>>>,
                }

                impl<T: Document> [<$variant ExpectationBuilder>]<T> {
                    /// Sets the expectation to return a successful result.
                    pub fn return_ok(self, value: $ok) {
                        self.push(Ok(value));
                    }

                    /// Sets the expectation to return an error.
                    pub fn return_err(self, error: StoreError) {
                        self.push(Err(error));
                    }

                    fn push(self, response: Result<$ok, StoreError>) {
                        let mut exps = self.expectations.lock().unwrap();
                        exps.push_back(Expectation::$variant(response));
                    }
                }
            )*

            impl<T: Document> MockStore<T> {
                $(
                    #[doc = "Expects a `" $method "` call."]
                    pub fn [<expect_ $method>](&mut self) -> [<$variant ExpectationBuilder>]<T> {
                        [<$variant ExpectationBuilder>] {
                            expectations: self.expectations.clone(),
                        }
                    }
                )*
            }
        }
    };
}

expectation_builders! {
    FindMany => find_many: Vec<T>,
    FindPage => find_page: Vec<T>,
    Count => count: u64,
    FindOne => find_one: Option<T>,
    InsertOne => insert_one: T,
    ApplyInsertMany => apply_insert_many: TransactionResult,
    ReplaceOne => replace_one: TransactionResult,
    ApplyUpdate => apply_update: TransactionResult,
    DeleteOne => delete_one: TransactionResult,
    DeleteMany => delete_many: TransactionResult,
}

#[async_trait]
impl<T: Document> DocumentStore<T> for MockStore<T> {
    async fn find_many(&self, collection: &str, _filter: &Filter) -> Result<Vec<T>, StoreError> {
        match self.next() {
            Some(Expectation::FindMany(response)) => response,
            _ => unexpected("find_many", collection),
        }
    }

    async fn find_page(
        &self,
        collection: &str,
        _filter: &Filter,
        _skip: u64,
        _limit: u64,
    ) -> Result<Vec<T>, StoreError> {
        match self.next() {
            Some(Expectation::FindPage(response)) => response,
            _ => unexpected("find_page", collection),
        }
    }

    async fn count(&self, collection: &str, _filter: &Filter) -> Result<u64, StoreError> {
        match self.next() {
            Some(Expectation::Count(response)) => response,
            _ => unexpected("count", collection),
        }
    }

    async fn find_one(&self, collection: &str, _filter: &Filter) -> Result<Option<T>, StoreError> {
        match self.next() {
            Some(Expectation::FindOne(response)) => response,
            _ => unexpected("find_one", collection),
        }
    }

    async fn insert_one(&self, collection: &str, _entity: T) -> Result<T, StoreError> {
        match self.next() {
            Some(Expectation::InsertOne(response)) => response,
            _ => unexpected("insert_one", collection),
        }
    }

    async fn apply_insert_many(
        &self,
        collection: &str,
        _entities: Vec<T>,
    ) -> Result<TransactionResult, StoreError> {
        match self.next() {
            Some(Expectation::ApplyInsertMany(response)) => response,
            _ => unexpected("apply_insert_many", collection),
        }
    }

    async fn replace_one(
        &self,
        collection: &str,
        _filter: &Filter,
        _entity: T,
    ) -> Result<TransactionResult, StoreError> {
        match self.next() {
            Some(Expectation::ReplaceOne(response)) => response,
            _ => unexpected("replace_one", collection),
        }
    }

    async fn apply_update(
        &self,
        collection: &str,
        _filter: &Filter,
        _updates: &[UpdateOp],
    ) -> Result<TransactionResult, StoreError> {
        match self.next() {
            Some(Expectation::ApplyUpdate(response)) => response,
            _ => unexpected("apply_update", collection),
        }
    }

    async fn delete_one(
        &self,
        collection: &str,
        _filter: &Filter,
    ) -> Result<TransactionResult, StoreError> {
        match self.next() {
            Some(Expectation::DeleteOne(response)) => response,
            _ => unexpected("delete_one", collection),
        }
    }

    async fn delete_many(
        &self,
        collection: &str,
        _filter: &Filter,
        _expected: u64,
    ) -> Result<TransactionResult, StoreError> {
        match self.next() {
            Some(Expectation::DeleteMany(response)) => response,
            _ => unexpected("delete_many", collection),
        }
    }
}
