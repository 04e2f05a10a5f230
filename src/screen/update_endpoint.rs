//! Updates a record from a submitted edit dialog form.

use std::collections::HashMap;

use axum::{
    Extension,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::{Form, PrivateCookieJar};
use axum_htmx::HxRedirect;

use crate::{
    Error, endpoints,
    screen::{
        dialog::{DialogMode, mutation_failure_response},
        form::validate_form,
        list_page::ScreenState,
        resource::Resource,
    },
    session::{Session, expired_session_response_hx},
};

/// A handler that validates the edit form and, if it passes, asks the API to
/// update the record with `id`.
///
/// Mirrors [create_record](crate::screen::create_record):
/// validation failures stay local, success invalidates the resource's cached
/// pages and redirects to the listing, failures re-render the dialog with
/// the submitted values intact.
pub async fn update_record<R: Resource>(
    State(state): State<ScreenState>,
    Extension(session): Extension<Session>,
    jar: PrivateCookieJar,
    Path(id): Path<i64>,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    let mode = DialogMode::Edit { id };

    let payload = match validate_form::<R>(&form) {
        Ok(payload) => payload,
        Err(errors) => {
            return mutation_failure_response::<R>(mode, &form, Error::Validation(errors));
        }
    };

    match state.backend.update(&session, R::SLUG, id, payload).await {
        Ok(envelope) => {
            state.cache.invalidate(R::SLUG);

            let message = envelope
                .message
                .unwrap_or_else(|| format!("The {} was updated.", R::NOUN));
            tracing::info!(resource = R::SLUG, id, "record updated");

            (
                HxRedirect(endpoints::list_view_with_notice(R::SLUG, &message)),
                StatusCode::OK,
            )
                .into_response()
        }
        Err(Error::AuthExpired) => expired_session_response_hx(jar),
        Err(error) => {
            tracing::error!(resource = R::SLUG, id, "update failed: {error}");
            mutation_failure_response::<R>(mode, &form, error)
        }
    }
}
