mod common;

use std::sync::Arc;

use common::{create_request, document, memory_repository};
use restaurant_service::domain::{FilterQueryParametersBo, UpdateRestaurantRequestBo, Website};
use restaurant_service::orchestration::{OrchestrationError, RestaurantOrchestration};
use restaurant_service::restaurants::{RepositoryError, RestaurantDocument, StoreRestaurantRepository};
use restaurant_service::store::mock::MockStore;
use restaurant_service::store::{StoreError, TransactionResult};

fn mocked() -> (
    MockStore<RestaurantDocument>,
    RestaurantOrchestration<StoreRestaurantRepository<MockStore<RestaurantDocument>>>,
) {
    let mock = MockStore::new();
    let repository = StoreRestaurantRepository::with_store(mock.clone());
    (mock, RestaurantOrchestration::new(repository))
}

fn is_object_id_hex(id: &str) -> bool {
    id.len() == 24 && id.chars().all(|c| c.is_ascii_hexdigit())
}

/// Integration test: real orchestration over the in-memory repository.
/// A create assigns a new ObjectId and keeps every submitted field.
#[tokio::test]
async fn test_create_echoes_fields_with_new_id() {
    let orchestration = RestaurantOrchestration::new(memory_repository());
    let mut request = create_request("Luigi's", "Italian");
    request.website = Some(Website::parse("https://luigis.example.com").unwrap());

    let created = orchestration.create_restaurant(request.clone()).await.unwrap();

    assert!(is_object_id_hex(&created.id));
    assert_eq!(created.name, request.name);
    assert_eq!(created.cuisine_type, request.cuisine_type);
    assert_eq!(created.website, request.website);
    assert_eq!(created.address.zip_code, request.address.zip_code);

    // Verify we can read it back
    let fetched = orchestration.get_restaurant(&created.id).await.unwrap();
    assert_eq!(fetched, Some(created));
}

/// Every restaurant in a bulk create gets its own id.
#[tokio::test]
async fn test_create_many_assigns_distinct_ids() {
    let orchestration = RestaurantOrchestration::new(memory_repository());
    let requests = vec![
        create_request("A", "Thai"),
        create_request("B", "Thai"),
        create_request("C", "Thai"),
    ];

    let result = orchestration.create_many_restaurants(requests).await.unwrap();
    assert!(result.success());

    let page = orchestration
        .list_restaurants(&FilterQueryParametersBo::default())
        .await
        .unwrap();
    let mut ids: Vec<_> = page.data.iter().map(|r| r.id.clone()).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 3);
    assert!(ids.iter().all(|id| is_object_id_hex(id)));
}

/// Orchestration with a mocked store: the existence check runs first, and a
/// missing restaurant stops the update before any write.
#[tokio::test]
async fn test_update_of_missing_restaurant_is_not_found() {
    let (mut mock, orchestration) = mocked();

    // Define expectations: only the lookup, no update
    mock.expect_find_one().return_ok(None);

    let update = UpdateRestaurantRequestBo {
        name: Some("Renamed".into()),
        ..Default::default()
    };
    let err = orchestration
        .update_restaurant("65f1c2a9e4b0a1b2c3d4e5f6", &update)
        .await
        .unwrap_err();

    assert_eq!(err, OrchestrationError::NotFound("65f1c2a9e4b0a1b2c3d4e5f6".into()));
    mock.verify();
}

/// The boolean result of an update is the store's success rule; zero modified records is `false`.
#[tokio::test]
async fn test_update_reports_store_outcome() {
    let (mut mock, orchestration) = mocked();
    let existing = document("Cafe", "French");

    // Lookup finds the restaurant, the write modifies nothing
    mock.expect_find_one().return_ok(Some(existing.clone()));
    mock.expect_apply_update().return_ok(TransactionResult::acknowledged(1, 0));

    let update = UpdateRestaurantRequestBo {
        phone: Some("555-0199".into()),
        ..Default::default()
    };
    let success = orchestration.update_restaurant(&existing.id, &update).await.unwrap();

    assert!(!success);
    mock.verify();
}

/// An update with nothing to change only performs the existence check.
#[tokio::test]
async fn test_empty_update_succeeds_without_store_write() {
    let (mut mock, orchestration) = mocked();
    let existing = document("Cafe", "French");
    mock.expect_find_one().return_ok(Some(existing.clone()));

    let success = orchestration
        .update_restaurant(&existing.id, &UpdateRestaurantRequestBo::default())
        .await
        .unwrap();

    assert!(success);
    mock.verify();
}

/// Store errors reach the caller wrapped by each layer.
#[tokio::test]
async fn test_store_failures_propagate() {
    let (mut mock, orchestration) = mocked();
    mock.expect_find_one()
        .return_err(StoreError::Unavailable("server selection timeout".into()));

    let err = orchestration.get_restaurant("65f1c2a9e4b0a1b2c3d4e5f6").await.unwrap_err();

    assert!(matches!(
        err,
        OrchestrationError::Repository(RepositoryError::Store(StoreError::Unavailable(_)))
    ));
    mock.verify();
}

/// A stored website that is not a URI fails the document to business object mapping.
#[tokio::test]
async fn test_corrupt_stored_website_is_a_mapping_error() {
    let (mut mock, orchestration) = mocked();
    let mut corrupt = document("Cafe", "French");
    corrupt.website = Some("not a uri".into());
    mock.expect_find_one().return_ok(Some(corrupt));

    let err = orchestration.get_restaurant("65f1c2a9e4b0a1b2c3d4e5f6").await.unwrap_err();

    assert!(matches!(err, OrchestrationError::Repository(RepositoryError::Mapping(_))));
    mock.verify();
}

/// The orchestration accepts a shared `Arc<dyn RestaurantRepository>`.
#[tokio::test]
async fn test_shared_repository_behind_arc() {
    let repository: Arc<dyn restaurant_service::restaurants::RestaurantRepository> =
        Arc::new(memory_repository());
    let orchestration = RestaurantOrchestration::new(repository);

    let created = orchestration.create_restaurant(create_request("Arc", "Any")).await.unwrap();

    assert!(orchestration.get_restaurant(&created.id).await.unwrap().is_some());
}

/// An empty bulk create never reaches the store.
#[tokio::test]
async fn test_create_many_of_nothing_skips_the_store() {
    let (mock, orchestration) = mocked();

    // No expectations: any store call would panic
    let result = orchestration.create_many_restaurants(Vec::new()).await.unwrap();

    assert!(!result.transaction_run);
    assert!(result.success());
    mock.verify();
}
