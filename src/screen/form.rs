//! Checks a submitted form against a resource's schema and builds the JSON
//! payload for the API.
//!
//! Validation happens here, in the dashboard, before any network call: a
//! form that fails the schema never reaches the API.

use std::collections::HashMap;

use serde_json::{Map, Number, Value};

use crate::{
    api::Record,
    error::FieldErrors,
    filters::parse_date,
    screen::resource::{Field, FieldKind, Resource},
};

/// Validate `form` against `R`'s schema and produce the mutation payload.
///
/// Empty optional fields are omitted from the payload. After the per-field
/// checks pass, the resource's own [Resource::validate] hook runs for
/// cross-field rules.
pub fn validate_form<R: Resource>(
    form: &HashMap<String, String>,
) -> Result<Map<String, Value>, FieldErrors> {
    let mut errors = FieldErrors::default();
    let mut payload = Map::new();

    for field in R::fields() {
        let raw = form
            .get(field.name)
            .map(|value| value.trim())
            .unwrap_or_default();

        if raw.is_empty() {
            if field.required {
                errors.insert(field.name, format!("{} is required.", field.label));
            }
            continue;
        }

        match field.kind {
            FieldKind::Text => {
                payload.insert(field.name.to_owned(), Value::String(raw.to_owned()));
            }
            FieldKind::Number => match raw.parse::<f64>().ok().and_then(Number::from_f64) {
                Some(number) => {
                    payload.insert(field.name.to_owned(), Value::Number(number));
                }
                None => {
                    errors.insert(field.name, format!("{} must be a number.", field.label));
                }
            },
            FieldKind::Date => match parse_date(raw) {
                Some(_) => {
                    payload.insert(field.name.to_owned(), Value::String(raw.to_owned()));
                }
                None => {
                    errors.insert(
                        field.name,
                        format!("{} must be a date in YYYY-MM-DD format.", field.label),
                    );
                }
            },
            FieldKind::Select(options) => {
                if options.iter().any(|&(value, _)| value == raw) {
                    payload.insert(field.name.to_owned(), Value::String(raw.to_owned()));
                } else {
                    errors.insert(field.name, format!("{} is not a valid choice.", field.label));
                }
            }
        }
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    R::validate(&payload)?;

    Ok(payload)
}

/// The form values for editing `record`: one entry per schema field that the
/// record has a value for.
pub fn form_values_from_record(fields: &[Field], record: &Record) -> HashMap<String, String> {
    fields
        .iter()
        .filter_map(|field| {
            let value = record.display(field.name);
            if value.is_empty() {
                None
            } else {
                Some((field.name.to_owned(), value))
            }
        })
        .collect()
}

impl From<FieldErrors> for crate::Error {
    fn from(errors: FieldErrors) -> Self {
        crate::Error::Validation(errors)
    }
}
