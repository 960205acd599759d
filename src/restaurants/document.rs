use mongodb::bson::serde_helpers::hex_string_as_object_id;
use serde::{Deserialize, Serialize};

use crate::store::Document;

/// Country stored when a location document does not carry one.
pub const DEFAULT_COUNTRY: &str = "United States";

/// Stored form of a restaurant.
///
/// `id` is a hex string in memory and a BSON ObjectId in the collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantDocument {
    #[serde(rename = "_id", with = "hex_string_as_object_id")]
    pub id: String,
    pub name: String,
    pub cuisine_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    pub phone: String,
    pub address: LocationDocument,
}

/// Stored form of the embedded address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationDocument {
    pub street: String,
    pub city: String,
    pub state: String,
    #[serde(default = "default_country")]
    pub country: String,
    pub zip_code: String,
}

fn default_country() -> String {
    DEFAULT_COUNTRY.to_owned()
}

impl Document for RestaurantDocument {
    fn id(&self) -> &str {
        &self.id
    }
}
