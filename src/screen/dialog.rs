//! The create/edit form dialog.
//!
//! The dialog is a modal fragment swapped into the `#dialog` container of
//! the base layout. It opens empty (create) or pre-populated (edit),
//! submits over htmx, and closes on success or cancel. Closing while a
//! submission is in flight is rejected: both the submit and cancel buttons
//! sit inside the form and are disabled for the duration of the request. A
//! failed submission re-renders the dialog with the submitted values
//! intact.

use std::collections::HashMap;

use axum::http::StatusCode;
use maud::{Markup, html};

use crate::{
    endpoints,
    error::FieldErrors,
    html::{
        BUTTON_PRIMARY_STYLE, BUTTON_SECONDARY_STYLE, FORM_ERROR_STYLE, FORM_LABEL_STYLE,
        FORM_TEXT_INPUT_STYLE, loading_spinner,
    },
    screen::resource::{Field, FieldKind, Resource},
};

/// Whether the dialog creates a new record or edits an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogMode {
    /// Creating; fields start at their defaults.
    Create,
    /// Editing the record with this ID; fields are pre-populated.
    Edit {
        /// The record being edited.
        id: i64,
    },
}

/// Render the dialog for resource `R`.
///
/// `values` holds the current field values (from the target record in edit
/// mode, or the rejected submission when re-rendering after a validation or
/// server failure) and `errors` the per-field validation messages.
pub fn dialog_view<R: Resource>(
    mode: DialogMode,
    values: &HashMap<String, String>,
    errors: &FieldErrors,
) -> Markup {
    let (title, action_label) = match mode {
        DialogMode::Create => (format!("New {}", R::NOUN), "Create"),
        DialogMode::Edit { .. } => (format!("Edit {}", R::NOUN), "Save"),
    };

    html!(
        div class="fixed inset-0 z-50 flex items-center justify-center bg-gray-900/50 p-4"
        {
            div class="w-full max-w-md rounded-lg bg-white p-6 shadow dark:bg-gray-800 text-gray-900 dark:text-white"
            {
                h2 class="mb-4 text-lg font-bold" { (title) }

                @match mode {
                    DialogMode::Create => {
                        form
                            hx-post=(endpoints::collection_api(R::SLUG))
                            hx-target="#dialog"
                            hx-swap="innerHTML"
                            hx-target-error="#dialog"
                            hx-disabled-elt="find button"
                            class="space-y-4"
                        {
                            (form_fields(R::fields(), values, errors))
                            (dialog_buttons(action_label))
                        }
                    }
                    DialogMode::Edit { id } => {
                        form
                            hx-put=(endpoints::item_api(R::SLUG, id))
                            hx-target="#dialog"
                            hx-swap="innerHTML"
                            hx-target-error="#dialog"
                            hx-disabled-elt="find button"
                            class="space-y-4"
                        {
                            (form_fields(R::fields(), values, errors))
                            (dialog_buttons(action_label))
                        }
                    }
                }
            }
        }
    )
}

fn form_fields(fields: &[Field], values: &HashMap<String, String>, errors: &FieldErrors) -> Markup {
    html!(
        @for field in fields {
            div
            {
                label for=(field.name) class=(FORM_LABEL_STYLE)
                {
                    (field.label)
                }

                @match field.kind {
                    FieldKind::Text => {
                        input
                            type="text"
                            name=(field.name)
                            id=(field.name)
                            class=(FORM_TEXT_INPUT_STYLE)
                            required[field.required]
                            value=(field_value(values, field.name));
                    }
                    FieldKind::Number => {
                        input
                            type="number"
                            step="any"
                            name=(field.name)
                            id=(field.name)
                            class=(FORM_TEXT_INPUT_STYLE)
                            required[field.required]
                            value=(field_value(values, field.name));
                    }
                    FieldKind::Date => {
                        input
                            type="date"
                            name=(field.name)
                            id=(field.name)
                            class=(FORM_TEXT_INPUT_STYLE)
                            required[field.required]
                            value=(field_value(values, field.name));
                    }
                    FieldKind::Select(options) => {
                        select
                            name=(field.name)
                            id=(field.name)
                            class=(FORM_TEXT_INPUT_STYLE)
                        {
                            @if !field.required {
                                option value="" { "—" }
                            }

                            @for &(value, label) in options {
                                option
                                    value=(value)
                                    selected[field_value(values, field.name) == value]
                                {
                                    (label)
                                }
                            }
                        }
                    }
                }

                @if let Some(message) = errors.get(field.name) {
                    p class=(FORM_ERROR_STYLE) { (message) }
                }
            }
        }
    )
}

fn field_value<'a>(values: &'a HashMap<String, String>, name: &str) -> &'a str {
    values.get(name).map(String::as_str).unwrap_or_default()
}

fn dialog_buttons(action_label: &str) -> Markup {
    html!(
        div class="flex justify-end gap-2 pt-2"
        {
            // Both buttons are locked by hx-disabled-elt while a submission
            // is pending, so the dialog cannot be dismissed mid-submit.
            button
                type="button"
                class=(BUTTON_SECONDARY_STYLE)
                hx-get=(endpoints::CLOSE_DIALOG)
                hx-target="#dialog"
                hx-swap="innerHTML"
            {
                "Cancel"
            }

            button type="submit" class=(BUTTON_PRIMARY_STYLE)
            {
                (loading_spinner("dialog-indicator"))
                (action_label)
            }
        }
    )
}

/// Dismiss the open dialog: clears the `#dialog` container.
pub async fn close_dialog_endpoint() -> (StatusCode, Markup) {
    (StatusCode::OK, html!())
}

/// The response for a failed create or update: the dialog re-rendered with
/// the submitted values so nothing the user typed is lost, plus an
/// out-of-band alert describing the failure.
///
/// Validation failures also annotate the offending fields in place.
pub(crate) fn mutation_failure_response<R: Resource>(
    mode: DialogMode,
    submitted: &HashMap<String, String>,
    error: crate::Error,
) -> axum::response::Response {
    use axum::response::IntoResponse;

    let field_errors = match &error {
        crate::Error::Validation(field_errors) => field_errors.clone(),
        _ => FieldErrors::default(),
    };
    let (status, alert) = error.into_alert();

    (
        status,
        html!(
            (dialog_view::<R>(mode, submitted, &field_errors))
            (alert.into_html())
        ),
    )
        .into_response()
}
