use serde::{Deserialize, Serialize};
use url::Url;

use super::error::MapError;

/// A restaurant as seen by the business layer.
///
/// The `id` is assigned before persistence (see
/// [`CreateRestaurantRequestBo::into_restaurant`]) and never changes afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct RestaurantBo {
    pub id: String,
    pub name: String,
    pub cuisine_type: String,
    pub website: Option<Website>,
    pub phone: String,
    pub address: LocationBo,
}

/// Street address embedded in a [`RestaurantBo`].
#[derive(Debug, Clone, PartialEq)]
pub struct LocationBo {
    pub street: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub zip_code: String,
}

/// Payload for creating a new restaurant.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateRestaurantRequestBo {
    pub name: String,
    pub cuisine_type: String,
    pub website: Option<Website>,
    pub phone: String,
    pub address: CreateLocationRequestBo,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateLocationRequestBo {
    pub street: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub zip_code: String,
}

/// Payload for a partial update. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateRestaurantRequestBo {
    pub name: Option<String>,
    pub cuisine_type: Option<String>,
    pub website: Option<Website>,
    pub phone: Option<String>,
    pub address: Option<UpdateLocationRequestBo>,
}

/// Partial address update; each field is applied independently.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateLocationRequestBo {
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub zip_code: Option<String>,
}

impl CreateRestaurantRequestBo {
    /// Builds the full restaurant from the payload and a freshly generated id.
    pub fn into_restaurant(self, id: impl Into<String>) -> RestaurantBo {
        RestaurantBo {
            id: id.into(),
            name: self.name,
            cuisine_type: self.cuisine_type,
            website: self.website,
            phone: self.phone,
            address: self.address.into(),
        }
    }
}

impl From<CreateLocationRequestBo> for LocationBo {
    fn from(request: CreateLocationRequestBo) -> Self {
        Self {
            street: request.street,
            city: request.city,
            state: request.state,
            country: request.country,
            zip_code: request.zip_code,
        }
    }
}

/// An absolute URI, kept in the exact textual form it was given in.
///
/// Parsing validates the text with [`Url::parse`] but does not normalize it,
/// so a stored website string maps back to the identical string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Website(String);

impl Website {
    pub fn parse(raw: impl Into<String>) -> Result<Self, MapError> {
        let raw = raw.into();
        match Url::parse(&raw) {
            Ok(_) => Ok(Self(raw)),
            Err(e) => Err(MapError::invalid_format("website", raw, e.to_string())),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Website {
    type Error = MapError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::parse(raw)
    }
}

impl From<Website> for String {
    fn from(website: Website) -> Self {
        website.0
    }
}

impl std::fmt::Display for Website {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
