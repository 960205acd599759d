//! Request and response bodies for the REST API.
//!
//! All bodies use camelCase field names.

use serde::{Deserialize, Serialize};

use crate::domain::{
    CreateLocationRequestBo, CreateRestaurantRequestBo, LocationBo, RestaurantBo,
    UpdateLocationRequestBo, UpdateRestaurantRequestBo, Website,
};
use crate::restaurants::DEFAULT_COUNTRY;

use super::validation::{Checks, Validate, ValidationError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRestaurantRequest {
    pub name: String,
    pub cuisine_type: String,
    #[serde(default)]
    pub website: Option<Website>,
    pub phone: String,
    pub address: CreateLocationRequest,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLocationRequest {
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

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRestaurantRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub cuisine_type: Option<String>,
    #[serde(default)]
    pub website: Option<Website>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<UpdateLocationRequest>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLocationRequest {
    #[serde(default)]
    pub street: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub zip_code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantResponse {
    pub id: String,
    pub name: String,
    pub cuisine_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    pub phone: String,
    pub address: LocationResponse,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationResponse {
    pub street: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub zip_code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

// =============================================================================
// Validation
// =============================================================================

impl Validate for CreateRestaurantRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        let mut checks = Checks::default();
        checks
            .required("name", &self.name, 50)
            .required("cuisineType", &self.cuisine_type, 30)
            .phone("phone", &self.phone)
            .nested("address", self.address.validate());
        checks.finish()
    }
}

impl Validate for CreateLocationRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        let mut checks = Checks::default();
        checks
            .required("street", &self.street, 150)
            .required("city", &self.city, 100)
            .exact_len("state", &self.state, 2)
            .required("country", &self.country, 100)
            .zip_code("zipCode", &self.zip_code);
        checks.finish()
    }
}

impl Validate for UpdateRestaurantRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        let mut checks = Checks::default();
        checks
            .optional(self.name.as_deref(), |c, v| {
                c.max_len("name", v, 50);
            })
            .optional(self.cuisine_type.as_deref(), |c, v| {
                c.max_len("cuisineType", v, 30);
            })
            .optional(self.phone.as_deref(), |c, v| {
                c.phone("phone", v);
            });
        if let Some(address) = &self.address {
            checks.nested("address", address.validate());
        }
        checks.finish()
    }
}

impl Validate for UpdateLocationRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        let mut checks = Checks::default();
        checks
            .optional(self.street.as_deref(), |c, v| {
                c.max_len("street", v, 150);
            })
            .optional(self.city.as_deref(), |c, v| {
                c.max_len("city", v, 100);
            })
            .optional(self.state.as_deref(), |c, v| {
                c.exact_len("state", v, 2);
            })
            .optional(self.country.as_deref(), |c, v| {
                c.max_len("country", v, 100);
            })
            .optional(self.zip_code.as_deref(), |c, v| {
                c.zip_code("zipCode", v);
            });
        checks.finish()
    }
}

// =============================================================================
// Conversions
// =============================================================================

impl From<CreateRestaurantRequest> for CreateRestaurantRequestBo {
    fn from(request: CreateRestaurantRequest) -> Self {
        Self {
            name: request.name,
            cuisine_type: request.cuisine_type,
            website: request.website,
            phone: request.phone,
            address: request.address.into(),
        }
    }
}

impl From<CreateLocationRequest> for CreateLocationRequestBo {
    fn from(request: CreateLocationRequest) -> Self {
        Self {
            street: request.street,
            city: request.city,
            state: request.state,
            country: request.country,
            zip_code: request.zip_code,
        }
    }
}

impl From<UpdateRestaurantRequest> for UpdateRestaurantRequestBo {
    fn from(request: UpdateRestaurantRequest) -> Self {
        Self {
            name: request.name,
            cuisine_type: request.cuisine_type,
            website: request.website,
            phone: request.phone,
            address: request.address.map(Into::into),
        }
    }
}

impl From<UpdateLocationRequest> for UpdateLocationRequestBo {
    fn from(request: UpdateLocationRequest) -> Self {
        Self {
            street: request.street,
            city: request.city,
            state: request.state,
            country: request.country,
            zip_code: request.zip_code,
        }
    }
}

impl From<RestaurantBo> for RestaurantResponse {
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

impl From<LocationBo> for LocationResponse {
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

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn create_request() -> CreateRestaurantRequest {
        serde_json::from_value(json!({
            "name": "Luigi's",
            "cuisineType": "Italian",
            "website": "https://luigis.example.com",
            "phone": "555-0100",
            "address": { "street": "1 Main St", "city": "Austin", "state": "TX", "zipCode": "78701" }
        }))
        .unwrap()
    }

    #[test]
    fn create_request_defaults_country() {
        assert_eq!(create_request().address.country, DEFAULT_COUNTRY);
    }

    #[test]
    fn valid_create_request_passes() {
        assert!(create_request().validate().is_ok());
    }

    #[test]
    fn invalid_create_request_reports_nested_fields() {
        let mut request = create_request();
        request.name = "x".repeat(51);
        request.address.zip_code = "7870".into();
        request.address.state = "Texas".into();

        let err = request.validate().unwrap_err();
        let fields: Vec<_> = err.errors.iter().map(|f| f.field.as_str()).collect();
        assert_eq!(fields, ["name", "address.state", "address.zipCode"]);
    }

    #[test]
    fn malformed_website_fails_to_deserialize() {
        let result = serde_json::from_value::<UpdateRestaurantRequest>(json!({ "website": "nope" }));
        assert!(result.is_err());
    }

    #[test]
    fn update_request_checks_only_present_fields() {
        let request = UpdateRestaurantRequest {
            address: Some(UpdateLocationRequest {
                zip_code: Some("abc".into()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let err = request.validate().unwrap_err();
        assert_eq!(err.errors[0].field, "address.zipCode");
        assert!(UpdateRestaurantRequest::default().validate().is_ok());
    }

    #[test]
    fn bulk_errors_are_indexed() {
        let mut bad = create_request();
        bad.phone = "call me".into();
        let err = vec![create_request(), bad].validate().unwrap_err();
        assert_eq!(err.errors[0].field, "[1].phone");
    }
}
