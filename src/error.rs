//! Defines the app level error type and conversions to rendered HTML pages and alerts.

use std::{collections::BTreeMap, fmt};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{alert::Alert, html::error_view};

/// Per-field validation messages, keyed by the form field name.
///
/// Collected while checking a submitted form against the resource's schema.
/// A non-empty set of field errors blocks submission before any network call
/// is made.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct FieldErrors(BTreeMap<&'static str, String>);

impl FieldErrors {
    /// Record a validation message for `field`.
    pub fn insert(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    /// The message for `field`, if it failed validation.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    /// Whether every field passed validation.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The number of fields that failed validation.
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} field(s) failed validation", self.0.len())
    }
}

/// The errors that may occur in the application.
///
/// Everything here is scoped to the triggering interaction: page handlers
/// convert errors into an inline error panel, htmx endpoints into alert
/// fragments. No error is fatal to the process.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum Error {
    /// The user provided an email and password the API did not accept.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// The request carried no valid session cookie.
    #[error("no session cookie in the request")]
    SessionMissing,

    /// The API answered 401 outside the sign-in endpoint.
    ///
    /// Handlers must respond by clearing the session cookie and redirecting
    /// to the sign-in screen. Never shown to the user as a message.
    #[error("the session has expired")]
    AuthExpired,

    /// The bookkeeping API could not be reached at all (no response).
    #[error("could not reach the bookkeeping API: {0}")]
    Network(String),

    /// The bookkeeping API answered with a 4xx/5xx status.
    ///
    /// `message` is the API's error envelope message when one was present,
    /// otherwise a generic fallback. It is surfaced to the user verbatim.
    #[error("the bookkeeping API returned {status}: {message}")]
    Server {
        /// The HTTP status code of the response.
        status: u16,
        /// The message from the error envelope, or a generic fallback.
        message: String,
    },

    /// The API answered with a success status but an undecodable body.
    #[error("could not decode the API response: {0}")]
    InvalidResponse(String),

    /// A submitted form failed schema validation.
    ///
    /// Raised before any network call; the dialog is re-rendered with the
    /// offending fields annotated.
    #[error("{0}")]
    Validation(FieldErrors),
}

impl Error {
    /// Convert the error into an HTTP response with an HTML alert fragment.
    ///
    /// Used by the htmx mutation endpoints: the alert is non-blocking and the
    /// open dialog is left as-is so the user can correct input and resubmit.
    pub fn into_alert_response(self) -> Response {
        let (status_code, alert) = self.into_alert();

        (status_code, alert.into_html()).into_response()
    }

    /// The status code and alert this error shows the user.
    pub fn into_alert(self) -> (StatusCode, Alert) {
        match self {
            Error::Network(_) => (
                StatusCode::BAD_GATEWAY,
                Alert::error(
                    "Could not reach the server",
                    "Check your connection and try again. Nothing was saved.",
                ),
            ),
            Error::Server { status, message } => (
                StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY),
                Alert::error("The server rejected the request", &message),
            ),
            Error::InvalidResponse(_) => (
                StatusCode::BAD_GATEWAY,
                Alert::error(
                    "Unexpected response",
                    "The server sent a response this app could not understand.",
                ),
            ),
            Error::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                Alert::error("Sign in failed", "Invalid email or password."),
            ),
            Error::Validation(field_errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Alert::error("Check the form", &field_errors.to_string()),
            ),
            // AuthExpired and SessionMissing are handled by redirecting to
            // the sign-in screen before this conversion is reached.
            error => {
                tracing::error!("An unexpected error occurred: {error}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Alert::error(
                        "Something went wrong",
                        "An unexpected error occurred, check the server logs for more details.",
                    ),
                )
            }
        }
    }

    /// A short heading plus detail line for the inline error panel shown in
    /// place of a listing when the page itself cannot load.
    pub fn panel_text(&self) -> (&'static str, String) {
        match self {
            Error::Network(_) => (
                "Could not reach the server",
                "Check your connection and reload the page.".to_owned(),
            ),
            Error::Server { message, .. } => ("The server returned an error", message.clone()),
            Error::InvalidResponse(_) => (
                "Unexpected response",
                "The server sent a response this app could not understand.".to_owned(),
            ),
            _ => (
                "Something went wrong",
                "An unexpected error occurred, check the server logs for more details.".to_owned(),
            ),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (header, detail) = self.panel_text();
        tracing::error!("rendering error page: {self}");

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            error_view("Error", header, &detail),
        )
            .into_response()
    }
}
