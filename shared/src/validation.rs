//! Validation rules for variety records
//!
//! The service stores records as given by default. These rules back the
//! opt-in strict mode and the browser-side form checks.

use thiserror::Error;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::models::{field, parse_harvest_date, Variety};

/// The first rule a record breaks
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct FieldError {
    /// JSON (camelCase) name of the offending field
    pub field: String,
    pub message: String,
}

impl FieldError {
    fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

/// Typed view of a record, only built when every known field has the right type
#[derive(Debug, Validate)]
struct CheckedVariety {
    #[validate(length(min = 1, message = "Crop name is required"))]
    crop_name: String,
    #[validate(length(min = 1, message = "Variety name is required"))]
    variety_name: String,
    #[validate(range(min = 0.0, max = 100.0, message = "Expected yield must be between 0 and 100"))]
    expected_yield: f64,
    #[validate(custom = "validate_harvest_date")]
    estimated_harvest_date: String,
    #[validate(range(min = 0, max = 5, message = "Health rating must be between 0 and 5"))]
    health_rating: i64,
}

impl CheckedVariety {
    fn from_variety(variety: &Variety) -> Result<Self, FieldError> {
        let crop_name = variety
            .crop_name()
            .ok_or_else(|| FieldError::new(field::CROP_NAME, "Crop name is required"))?;
        let variety_name = variety
            .variety_name()
            .ok_or_else(|| FieldError::new(field::VARIETY_NAME, "Variety name is required"))?;
        let expected_yield = variety.expected_yield().ok_or_else(|| {
            FieldError::new(field::EXPECTED_YIELD, "Expected yield must be a number")
        })?;
        let estimated_harvest_date = variety.estimated_harvest_date().ok_or_else(|| {
            FieldError::new(
                field::ESTIMATED_HARVEST_DATE,
                "Estimated harvest date is required",
            )
        })?;
        let health_rating = variety
            .fields
            .get(field::HEALTH_RATING)
            .and_then(|v| v.as_i64())
            .ok_or_else(|| {
                FieldError::new(field::HEALTH_RATING, "Health rating must be a whole number")
            })?;

        Ok(Self {
            crop_name: crop_name.to_string(),
            variety_name: variety_name.to_string(),
            expected_yield,
            estimated_harvest_date: estimated_harvest_date.to_string(),
            health_rating,
        })
    }
}

/// Validate that a harvest date is an ISO 8601 calendar date
pub fn validate_harvest_date(value: &str) -> Result<(), ValidationError> {
    if parse_harvest_date(value).is_some() {
        return Ok(());
    }
    let mut error = ValidationError::new("harvest_date");
    error.message = Some("Estimated harvest date must be an ISO 8601 date".into());
    Err(error)
}

/// Check a record against every strict-mode rule
pub fn validate_variety(variety: &Variety) -> Result<(), FieldError> {
    CheckedVariety::from_variety(variety)?
        .validate()
        .map_err(first_field_error)
}

fn first_field_error(errors: ValidationErrors) -> FieldError {
    let field_errors = errors.field_errors();
    let mut fields: Vec<_> = field_errors.into_iter().collect();
    fields.sort_by_key(|(field, _)| *field);

    fields
        .into_iter()
        .find_map(|(field, errors)| {
            errors.first().map(|error| FieldError {
                field: camel_case(field),
                message: error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid value for {}", camel_case(field))),
            })
        })
        .unwrap_or_else(|| FieldError::new("variety", "Invalid variety"))
}

fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}
