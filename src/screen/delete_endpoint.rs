//! Deletes a record from the listing's delete button.

use axum::{
    Extension,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::PrivateCookieJar;
use axum_htmx::HxRedirect;

use crate::{
    Error, endpoints,
    screen::{list_page::ScreenState, resource::Resource},
    session::{Session, expired_session_response_hx},
};

/// A handler that asks the API to delete the record with `id`.
///
/// On success the resource's cached pages are invalidated and the client is
/// redirected to the listing, whose re-fetch is what makes the deletion
/// visible; nothing is spliced out of cached pages locally. On failure the
/// listing is left untouched and an alert describes the problem.
pub async fn delete_record<R: Resource>(
    State(state): State<ScreenState>,
    Extension(session): Extension<Session>,
    jar: PrivateCookieJar,
    Path(id): Path<i64>,
) -> Response {
    match state.backend.delete(&session, R::SLUG, id).await {
        Ok(envelope) => {
            state.cache.invalidate(R::SLUG);

            let message = envelope
                .message
                .unwrap_or_else(|| format!("The {} was deleted.", R::NOUN));
            tracing::info!(resource = R::SLUG, id, "record deleted");

            (
                HxRedirect(endpoints::list_view_with_notice(R::SLUG, &message)),
                StatusCode::OK,
            )
                .into_response()
        }
        Err(Error::AuthExpired) => expired_session_response_hx(jar),
        Err(error) => {
            tracing::error!(resource = R::SLUG, id, "delete failed: {error}");
            error.into_alert_response()
        }
    }
}
