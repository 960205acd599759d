#![allow(dead_code)]

use std::sync::Arc;

use restaurant_service::domain::{CreateLocationRequestBo, CreateRestaurantRequestBo, RestaurantBo};
use restaurant_service::orchestration::generate_id;
use restaurant_service::restaurants::{RestaurantDocument, StoreRestaurantRepository};
use restaurant_service::store::InMemoryStore;

pub type MemoryRepository = StoreRestaurantRepository<Arc<InMemoryStore>>;

pub fn memory_repository() -> MemoryRepository {
    StoreRestaurantRepository::with_store(Arc::new(InMemoryStore::new()))
}

pub fn create_request(name: &str, cuisine: &str) -> CreateRestaurantRequestBo {
    CreateRestaurantRequestBo {
        name: name.to_string(),
        cuisine_type: cuisine.to_string(),
        website: None,
        phone: "555-0100".to_string(),
        address: CreateLocationRequestBo {
            street: "1 Main St".to_string(),
            city: "Austin".to_string(),
            state: "TX".to_string(),
            country: "United States".to_string(),
            zip_code: "78701".to_string(),
        },
    }
}

pub fn restaurant(name: &str, cuisine: &str) -> RestaurantBo {
    create_request(name, cuisine).into_restaurant(generate_id())
}

pub fn document(name: &str, cuisine: &str) -> RestaurantDocument {
    restaurant(name, cuisine).into()
}
