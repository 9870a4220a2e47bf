//! Request payload validation.

use std::borrow::Cow;

use salvo::prelude::StatusError;
use tracing::debug;
use validator::{Validate, ValidationError, ValidationErrors};

pub(crate) trait ValidateExt: Validate {
    /// Run the derived rules, mapping failures to a bad request naming the
    /// offending fields.
    fn validate_or_400(&self) -> Result<(), StatusError> {
        self.validate().map_err(|errors| {
            debug!("request validation failed: {errors}");

            StatusError::bad_request().brief(invalid_fields_brief(&errors))
        })
    }
}

impl<T: Validate> ValidateExt for T {}

fn invalid_fields_brief(errors: &ValidationErrors) -> String {
    let mut fields: Vec<String> = errors.errors().keys().map(ToString::to_string).collect();

    fields.sort_unstable();

    format!("Invalid fields: {}", fields.join(", "))
}

/// Rejects empty and whitespace-only strings.
pub(crate) fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message(Cow::from("must not be blank")));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[derive(Validate)]
    struct Payload {
        #[validate(custom(function = "not_blank"))]
        name: String,

        #[validate(email)]
        email: String,
    }

    #[test]
    fn blank_strings_fail() {
        assert!(not_blank("").is_err(), "empty");
        assert!(not_blank(" \t ").is_err(), "whitespace");
        assert!(not_blank(" a ").is_ok(), "has content");
    }

    #[test]
    fn failures_name_every_field_in_order() -> TestResult {
        let payload = Payload {
            name: " ".to_string(),
            email: "nope".to_string(),
        };

        let error = payload
            .validate_or_400()
            .err()
            .ok_or("payload should be rejected")?;

        assert_eq!(error.code, salvo::http::StatusCode::BAD_REQUEST);
        assert_eq!(error.brief, "Invalid fields: email, name");

        Ok(())
    }

    #[test]
    fn valid_payload_passes() {
        let payload = Payload {
            name: "Jane".to_string(),
            email: "jane@example.com".to_string(),
        };

        assert!(payload.validate_or_400().is_ok(), "valid payload");
    }
}
