//! Maps any `Failure` to the canonical `ResponseError`.
//!
//! This is the only place where raised failures become wire errors. Rules,
//! first match wins:
//! 1. a body that is not valid JSON becomes a `ServerError`;
//! 2. field validation failures become a `field_errors` validation error,
//!    keyed by the lower camel case field name, with one `FieldError` per
//!    violated rule carrying the rule's tag as code and message. Violations
//!    inside nested structs and lists are keyed by their own field name;
//! 3. anything else becomes a `ServerError`.
//!
//! Errors that are already canonical pass through unchanged.

use convert_case::{Case, Casing};
use fapi_core::{FieldError, FieldErrorsMap, ResponseError};
use validator::{ValidationErrors, ValidationErrorsKind};

use crate::error::Failure;

pub fn translate(failure: Failure) -> ResponseError {
    match failure {
        Failure::Response(err) => err,
        // Reported as a server fault, not a client error. See DESIGN.md.
        Failure::Syntax(err) => ResponseError::server_error(err),
        Failure::Validation(errors) => {
            ResponseError::validation_with_field_errors(field_errors(&errors))
        }
        Failure::Internal(err) => ResponseError::server_error(err),
    }
}

/// Group violations by field, keeping the order rules were evaluated in.
pub fn field_errors(errors: &ValidationErrors) -> FieldErrorsMap {
    let mut fields = FieldErrorsMap::new();
    collect_field_errors(errors, &mut fields);
    fields
}

fn collect_field_errors(errors: &ValidationErrors, fields: &mut FieldErrorsMap) {
    for (field, kind) in errors.errors() {
        match kind {
            ValidationErrorsKind::Field(violations) => fields
                .entry(field.to_case(Case::Camel))
                .or_default()
                .extend(violations.iter().map(|v| FieldError::from_tag(&v.code))),
            ValidationErrorsKind::Struct(nested) => collect_field_errors(nested, fields),
            ValidationErrorsKind::List(items) => {
                for nested in items.values() {
                    collect_field_errors(nested, fields);
                }
            }
        }
    }
}
