//! Request validation.
//!
//! Request DTOs implement [`Validate`]; handlers receive them through
//! [`ValidJson`], which rejects malformed or invalid bodies with a 400 before
//! any business logic runs.

use std::sync::LazyLock;

use axum::extract::{FromRequest, Request};
use axum::Json;
use regex::Regex;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::error::ApiErrorResponse;

static ZIP_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{5}(?:[-\s]\d{4})?$").expect("zip code pattern"));

static PHONE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\+?\s?(\(\d+\)|\d+)([\s.-]?(\(\d+\)|\d+))*(\s?(x|ext\.?)\s?\d+)?$")
        .expect("phone pattern")
});

/// Error for a single request field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// All field errors found in one request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Validation failed for {} field(s)", .errors.len())]
pub struct ValidationError {
    pub errors: Vec<FieldError>,
}

impl ValidationError {
    pub fn new(errors: Vec<FieldError>) -> Self {
        Self { errors }
    }

    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(vec![FieldError::new(field, message)])
    }
}

/// Field-level validation of a request body.
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

impl<T: Validate> Validate for Vec<T> {
    fn validate(&self) -> Result<(), ValidationError> {
        let errors: Vec<FieldError> = self
            .iter()
            .enumerate()
            .filter_map(|(index, item)| item.validate().err().map(|e| (index, e)))
            .flat_map(|(index, e)| {
                e.errors
                    .into_iter()
                    .map(move |f| FieldError::new(format!("[{index}].{}", f.field), f.message))
            })
            .collect();
        Checks { errors }.finish()
    }
}

/// Accumulates field errors for one request.
#[derive(Debug, Default)]
pub(crate) struct Checks {
    errors: Vec<FieldError>,
}

impl Checks {
    /// Non-blank and at most `max` characters.
    pub(crate) fn required(&mut self, field: &str, value: &str, max: usize) -> &mut Self {
        if value.trim().is_empty() {
            self.fail(field, "is required");
        } else {
            self.max_len(field, value, max);
        }
        self
    }

    pub(crate) fn max_len(&mut self, field: &str, value: &str, max: usize) -> &mut Self {
        if value.chars().count() > max {
            self.fail(field, format!("must be at most {max} characters"));
        }
        self
    }

    pub(crate) fn exact_len(&mut self, field: &str, value: &str, len: usize) -> &mut Self {
        if value.chars().count() != len {
            self.fail(field, format!("must be exactly {len} characters"));
        }
        self
    }

    pub(crate) fn zip_code(&mut self, field: &str, value: &str) -> &mut Self {
        if !ZIP_CODE.is_match(value) {
            self.fail(field, "must be a 5 digit zip code, optionally followed by a 4 digit extension");
        }
        self
    }

    pub(crate) fn phone(&mut self, field: &str, value: &str) -> &mut Self {
        if !PHONE.is_match(value.trim()) {
            self.fail(field, "must be a phone number");
        }
        self
    }

    /// Runs `check` only when `value` is present and non-blank.
    pub(crate) fn optional(
        &mut self,
        value: Option<&str>,
        check: impl FnOnce(&mut Self, &str),
    ) -> &mut Self {
        if let Some(value) = value.filter(|v| !v.trim().is_empty()) {
            check(self, value);
        }
        self
    }

    /// Merges the errors of a nested object under `prefix`.
    pub(crate) fn nested(&mut self, prefix: &str, result: Result<(), ValidationError>) -> &mut Self {
        if let Err(e) = result {
            self.errors.extend(
                e.errors
                    .into_iter()
                    .map(|f| FieldError::new(format!("{prefix}.{}", f.field), f.message)),
            );
        }
        self
    }

    fn fail(&mut self, field: &str, message: impl Into<String>) {
        self.errors.push(FieldError::new(field, message));
    }

    pub(crate) fn finish(self) -> Result<(), ValidationError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::new(self.errors))
        }
    }
}

/// JSON body extractor that also runs [`Validate`].
#[derive(Debug, Clone)]
pub struct ValidJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiErrorResponse;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiErrorResponse::bad_request("INVALID_BODY", rejection.body_text()))?;
        value.validate()?;
        Ok(Self(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zip_codes() {
        for ok in ["12345", "12345-6789", "12345 6789"] {
            assert!(ZIP_CODE.is_match(ok), "{ok}");
        }
        for bad in ["1234", "123456", "12345-678", "abcde"] {
            assert!(!ZIP_CODE.is_match(bad), "{bad}");
        }
    }

    #[test]
    fn phone_numbers() {
        for ok in ["555-0100", "(555) 010-0199", "+1 555 010 0199", "555.010.0199 ext. 12"] {
            assert!(PHONE.is_match(ok), "{ok}");
        }
        for bad in ["call me", "555-abc", ""] {
            assert!(!PHONE.is_match(bad), "{bad}");
        }
    }

    #[test]
    fn checks_collect_every_failure() {
        let mut checks = Checks::default();
        checks
            .required("name", "", 50)
            .exact_len("state", "Texas", 2)
            .optional(Some("  "), |c, v| {
                c.zip_code("zipCode", v);
            });
        let err = checks.finish().unwrap_err();
        let fields: Vec<_> = err.errors.iter().map(|f| f.field.as_str()).collect();
        assert_eq!(fields, ["name", "state"]);
    }
}
