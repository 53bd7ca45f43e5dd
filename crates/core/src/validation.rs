//! Field-level validation failures.
//!
//! Request DTOs derive [`validator::Validate`]; the resulting
//! [`validator::ValidationErrors`] are flattened into [`FieldError`]s so the
//! API can report every violated field in one response.

use std::borrow::Cow;

use serde::Serialize;
use validator::{ValidationError, ValidationErrors};

/// A single violated field and a human-readable reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
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

/// Render a list of field errors as `field: message; field: message`.
pub fn describe(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Flatten validator output into field errors, sorted by field name.
///
/// Rules without an explicit message get one derived from the rule code.
pub fn flatten(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut out: Vec<FieldError> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            let field = field.to_string();
            errs.iter().map(move |err| {
                let message = err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| fallback_message(err));
                FieldError::new(field.clone(), message)
            })
        })
        .collect();
    out.sort_by(|a, b| a.field.cmp(&b.field).then_with(|| a.message.cmp(&b.message)));
    out
}

fn fallback_message(err: &ValidationError) -> String {
    match (err.code.as_ref(), err.params.get("max")) {
        ("length", Some(max)) => format!("must be at most {max} characters"),
        _ => format!("failed '{}' check", err.code),
    }
}

/// Custom rule: text must contain at least one non-whitespace character.
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message(Cow::Borrowed("must not be empty")));
    }
    Ok(())
}
