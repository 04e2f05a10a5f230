//! Opens the edit dialog for one record.

use axum::{
    Extension,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use axum_extra::extract::PrivateCookieJar;

use crate::{
    Error,
    error::FieldErrors,
    screen::{
        dialog::{DialogMode, dialog_view},
        form::form_values_from_record,
        list_page::ScreenState,
        resource::Resource,
    },
    session::{Session, expired_session_response_hx},
};

/// A handler that fetches the record with `id` and renders the edit dialog
/// for it, pre-populated with the record's current values.
pub async fn get_edit_dialog<R: Resource>(
    State(state): State<ScreenState>,
    Extension(session): Extension<Session>,
    jar: PrivateCookieJar,
    Path(id): Path<i64>,
) -> Response {
    let record = match state.backend.get(&session, R::SLUG, id).await {
        Ok(record) => record,
        Err(Error::AuthExpired) => return expired_session_response_hx(jar),
        Err(error) => {
            tracing::error!(resource = R::SLUG, id, "could not load record for editing: {error}");
            return error.into_alert_response();
        }
    };

    let values = form_values_from_record(R::fields(), &record);

    dialog_view::<R>(DialogMode::Edit { id }, &values, &FieldErrors::default()).into_response()
}
