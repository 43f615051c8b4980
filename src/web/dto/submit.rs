//! Submission form of the index page.

use serde::Deserialize;
use std::borrow::Cow;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::utils::url_normalizer::{UrlValidationError, validate_long_url};

const REQUIRED_MESSAGE: &str = "You can't shorten nothing, please enter a link :)";
const INVALID_MESSAGE: &str = "We're not sure this link is right :(";

/// `POST /` form body.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct SubmitForm {
    /// Raw URL as typed; a missing field reads as empty.
    #[serde(default)]
    #[validate(custom(function = "validate_submitted_url"))]
    pub long_url: String,
}

fn validate_submitted_url(value: &str) -> Result<(), ValidationError> {
    match validate_long_url(value) {
        Ok(_) => Ok(()),
        Err(UrlValidationError::Required) => {
            Err(ValidationError::new("required").with_message(Cow::Borrowed(REQUIRED_MESSAGE)))
        }
        Err(UrlValidationError::Invalid(_)) => {
            Err(ValidationError::new("invalid").with_message(Cow::Borrowed(INVALID_MESSAGE)))
        }
    }
}

/// Flattens validation errors into messages for the form.
pub fn form_errors(errors: &ValidationErrors) -> Vec<String> {
    errors
        .field_errors()
        .values()
        .flat_map(|field| field.iter())
        .map(|e| {
            e.message
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_else(|| e.code.to_string())
        })
        .collect()
}
