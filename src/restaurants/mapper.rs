//! Conversions between restaurant business objects and stored documents.
//!
//! BO → document never fails. Document → BO fails only when a stored website
//! string is not a valid URI.

use crate::domain::{LocationBo, MapError, RestaurantBo, Website};

use super::document::{LocationDocument, RestaurantDocument};

impl From<RestaurantBo> for RestaurantDocument {
    fn from(restaurant: RestaurantBo) -> Self {
        Self {
            id: restaurant.id,
            name: restaurant.name,
            cuisine_type: restaurant.cuisine_type,
            website: restaurant.website.map(String::from),
            phone: restaurant.phone,
            address: restaurant.address.into(),
        }
    }
}

impl From<LocationBo> for LocationDocument {
    fn from(location: LocationBo) -> Self {
        Self {
            street: location.street,
            city: location.city,
            state: location.state,
            country: location.country,
            zip_code: location.zip_code,
        }
    }
}

impl TryFrom<RestaurantDocument> for RestaurantBo {
    type Error = MapError;

    fn try_from(document: RestaurantDocument) -> Result<Self, Self::Error> {
        let website = document.website.map(Website::parse).transpose()?;
        Ok(Self {
            id: document.id,
            name: document.name,
            cuisine_type: document.cuisine_type,
            website,
            phone: document.phone,
            address: document.address.into(),
        })
    }
}

impl From<LocationDocument> for LocationBo {
    fn from(document: LocationDocument) -> Self {
        Self {
            street: document.street,
            city: document.city,
            state: document.state,
            country: document.country,
            zip_code: document.zip_code,
        }
    }
}
