mod common;

use common::{memory_repository, restaurant};
use restaurant_service::domain::{
    FilterQueryParametersBo, Pagination, UpdateLocationRequestBo, UpdateRestaurantRequestBo,
};
use restaurant_service::restaurants::{RepositoryError, RestaurantRepository};
use restaurant_service::store::StoreError;

async fn seeded() -> common::MemoryRepository {
    let repo = memory_repository();
    for (name, cuisine) in [
        ("Pizza Palace", "Italian"),
        ("Sushi Roma", "Italian"),
        ("Sushi Zen", "Japanese"),
        ("Pasta House", "Italian"),
        ("Pizza Express", "American"),
    ] {
        repo.create_restaurant(restaurant(name, cuisine)).await.unwrap();
    }
    repo
}

fn names(page: &restaurant_service::domain::Page<restaurant_service::domain::RestaurantBo>) -> Vec<&str> {
    let mut names: Vec<&str> = page.data.iter().map(|r| r.name.as_str()).collect();
    names.sort_unstable();
    names
}

/// Name terms are OR-ed, then AND-ed with the cuisine; both match case-insensitive substrings.
#[tokio::test]
async fn test_query_by_names_and_cuisine() {
    let repo = seeded().await;
    let params = FilterQueryParametersBo {
        names: vec!["pizza".into(), "SUSHI".into()],
        cuisine_type: Some("ital".into()),
        ..Default::default()
    };

    let page = repo.query_restaurants(&params).await.unwrap();

    assert_eq!(names(&page), ["Pizza Palace", "Sushi Roma"]);
    assert_eq!(page.meta.total_records, 2);
}

/// Default criteria return every restaurant on the first page.
#[tokio::test]
async fn test_query_without_filter_returns_everything() {
    let repo = seeded().await;

    let page = repo
        .query_restaurants(&FilterQueryParametersBo::default())
        .await
        .unwrap();

    assert_eq!(page.data.len(), 5);
    assert_eq!(page.meta.total_pages, 1);
    assert_eq!(page.meta.current_page, 1);
}

/// Walking every page visits each restaurant exactly once.
#[tokio::test]
async fn test_query_pages_through_results() {
    let repo = seeded().await;
    let mut params = FilterQueryParametersBo {
        pagination: Pagination { page: 1, page_size: 2 },
        ..Default::default()
    };

    // Collect ids across all three pages
    let mut seen = Vec::new();
    for page_number in 1..=3 {
        params.pagination.page = page_number;
        let page = repo.query_restaurants(&params).await.unwrap();
        assert_eq!(page.meta.total_records, 5);
        assert_eq!(page.meta.total_pages, 3);
        assert_eq!(page.meta.page_record_count, page.data.len() as u64);
        seen.extend(page.data.into_iter().map(|r| r.id));
    }

    // No id repeats and none is skipped
    seen.sort();
    seen.dedup();
    assert_eq!(seen.len(), 5);
}

/// A lookup by id finds the stored restaurant; an unknown id is `None`, not an error.
#[tokio::test]
async fn test_get_by_id_and_missing_id() {
    let repo = memory_repository();
    let created = repo.create_restaurant(restaurant("Cafe", "French")).await.unwrap();

    // Existing id
    let found = repo.get_restaurant(&created.id).await.unwrap();
    assert_eq!(found, Some(created));

    // Well-formed id that was never stored
    let missing = repo.get_restaurant("65f1c2a9e4b0a1b2c3d4e5f6").await.unwrap();
    assert_eq!(missing, None);
}

/// Creating the same id twice surfaces the store's duplicate key error.
#[tokio::test]
async fn test_duplicate_create_is_rejected() {
    let repo = memory_repository();
    let cafe = restaurant("Cafe", "French");
    repo.create_restaurant(cafe.clone()).await.unwrap();

    let err = repo.create_restaurant(cafe).await.unwrap_err();

    assert!(matches!(err, RepositoryError::Store(StoreError::DuplicateKey(_))));
}

/// A bulk create reports one expected and one actual record per restaurant.
#[tokio::test]
async fn test_bulk_create_three() {
    let repo = memory_repository();
    let batch = vec![
        restaurant("A", "Thai"),
        restaurant("B", "Thai"),
        restaurant("C", "Thai"),
    ];

    let result = repo.create_many_restaurants(batch).await.unwrap();

    assert_eq!(result.expected_record_count, 3);
    assert_eq!(result.actual_record_count, 3);
    assert!(result.success());
}

/// Blank fields produce no update, so nothing is sent and the result counts as success.
#[tokio::test]
async fn test_empty_update_is_not_run() {
    let repo = memory_repository();
    let created = repo.create_restaurant(restaurant("Cafe", "French")).await.unwrap();
    let update = UpdateRestaurantRequestBo {
        name: Some("  ".into()),
        ..Default::default()
    };

    let result = repo.update_restaurant(&created.id, &update).await.unwrap();

    assert!(!result.transaction_run);
    assert!(result.success());
}

/// Only fields present in the request change; nested address fields are updated one by one.
#[tokio::test]
async fn test_update_changes_only_present_fields() {
    let repo = memory_repository();
    let created = repo.create_restaurant(restaurant("Cafe", "French")).await.unwrap();
    let update = UpdateRestaurantRequestBo {
        cuisine_type: Some("Bistro".into()),
        address: Some(UpdateLocationRequestBo {
            city: Some("Dallas".into()),
            ..Default::default()
        }),
        ..Default::default()
    };

    let result = repo.update_restaurant(&created.id, &update).await.unwrap();
    assert!(result.success());

    // Untouched fields keep their values
    let stored = repo.get_restaurant(&created.id).await.unwrap().unwrap();
    assert_eq!(stored.name, "Cafe");
    assert_eq!(stored.cuisine_type, "Bistro");
    assert_eq!(stored.address.city, "Dallas");
    assert_eq!(stored.address.street, created.address.street);
}

/// An empty batch is skipped before the store and reports success.
#[tokio::test]
async fn test_bulk_create_of_nothing_is_not_run() {
    let repo = memory_repository();

    let result = repo.create_many_restaurants(Vec::new()).await.unwrap();

    assert!(!result.transaction_run);
    assert!(result.success());

    // Nothing was stored
    let page = repo
        .query_restaurants(&FilterQueryParametersBo::default())
        .await
        .unwrap();
    assert_eq!(page.meta.total_records, 0);
}

/// A page past the end returns no data but still reports the real total.
#[tokio::test]
async fn test_query_past_last_page_is_empty() {
    let repo = seeded().await;
    let params = FilterQueryParametersBo {
        pagination: Pagination { page: u64::MAX, page_size: 25 },
        ..Default::default()
    };

    let page = repo.query_restaurants(&params).await.unwrap();

    assert!(page.data.is_empty());
    assert_eq!(page.meta.total_records, 5);
    assert_eq!(page.meta.current_page, u64::MAX);
}
