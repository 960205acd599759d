//! Partial update construction.
//!
//! Every present, non-blank field of an update request becomes one
//! [`UpdateOp::Set`]; address subfields are set independently through dotted
//! paths so untouched subfields keep their stored values.

use crate::domain::{UpdateLocationRequestBo, UpdateRestaurantRequestBo};
use crate::store::UpdateOp;

#[derive(Debug, Default)]
struct UpdateBuilder {
    ops: Vec<UpdateOp>,
}

impl UpdateBuilder {
    fn set_text(&mut self, path: &str, value: Option<&str>) -> &mut Self {
        if let Some(value) = value.filter(|v| !v.trim().is_empty()) {
            self.ops.push(UpdateOp::set(path, value));
        }
        self
    }

    fn build(self) -> Vec<UpdateOp> {
        self.ops
    }
}

/// Builds the combined update for `request`. Empty when nothing applies.
pub fn restaurant_updates(request: &UpdateRestaurantRequestBo) -> Vec<UpdateOp> {
    let mut builder = UpdateBuilder::default();
    builder
        .set_text("name", request.name.as_deref())
        .set_text("cuisineType", request.cuisine_type.as_deref())
        .set_text("website", request.website.as_ref().map(|w| w.as_str()))
        .set_text("phone", request.phone.as_deref());

    if let Some(address) = &request.address {
        location_updates(&mut builder, address);
    }
    builder.build()
}

fn location_updates(builder: &mut UpdateBuilder, address: &UpdateLocationRequestBo) {
    builder
        .set_text("address.street", address.street.as_deref())
        .set_text("address.city", address.city.as_deref())
        .set_text("address.state", address.state.as_deref())
        .set_text("address.country", address.country.as_deref())
        .set_text("address.zipCode", address.zip_code.as_deref());
}
