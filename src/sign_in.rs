//! The sign-in screen and the endpoint that exchanges credentials for a
//! session.

use std::sync::Arc;

use axum::{
    Form,
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::{PrivateCookieJar, cookie::Key};
use axum_htmx::HxRedirect;
use maud::{Markup, html};
use serde::Deserialize;

use crate::{
    AppState, Error,
    api::Backend,
    endpoints,
    html::{BUTTON_PRIMARY_STYLE, FORM_ERROR_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, base, loading_spinner},
    session::{Session, store_session},
};

/// The screen the client lands on after signing in.
const HOME_SLUG: &str = "transactions";

/// The state needed to sign a user in.
#[derive(Clone)]
pub struct SignInState {
    /// The bookkeeping API client.
    pub backend: Arc<dyn Backend>,
    /// The key for the session cookie jar.
    pub cookie_key: Key,
}

impl FromRef<AppState> for SignInState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            backend: state.backend.clone(),
            cookie_key: state.cookie_key.clone(),
        }
    }
}

impl FromRef<SignInState> for Key {
    fn from_ref(state: &SignInState) -> Self {
        state.cookie_key.clone()
    }
}

/// The credentials submitted by the sign-in form.
#[derive(Debug, Deserialize)]
pub struct Credentials {
    /// The account email address.
    pub email: String,
    /// The account password.
    pub password: String,
}

fn sign_in_form(email: &str, error_message: Option<&str>) -> Markup {
    html! {
        form
            hx-post=(endpoints::SIGN_IN_API)
            hx-target="#sign-in-form"
            hx-swap="outerHTML"
            hx-target-error="#sign-in-form"
            hx-disabled-elt="find button"
            id="sign-in-form"
            class="space-y-4"
        {
            div
            {
                label for="email" class=(FORM_LABEL_STYLE) { "Email" }
                input
                    type="email"
                    name="email"
                    id="email"
                    value=(email)
                    required
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="password" class=(FORM_LABEL_STYLE) { "Password" }
                input
                    type="password"
                    name="password"
                    id="password"
                    required
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            @if let Some(message) = error_message {
                p class=(FORM_ERROR_STYLE) { (message) }
            }

            button type="submit" class={ "w-full " (BUTTON_PRIMARY_STYLE) }
            {
                (loading_spinner("sign-in-indicator"))
                "Sign in"
            }
        }
    }
}

/// Display the sign-in page.
pub async fn get_sign_in_page() -> Markup {
    let content = html!(
        section class="flex flex-col items-center justify-center min-h-screen px-6 py-8 mx-auto"
        {
            div class="w-full max-w-md rounded-lg bg-white p-6 shadow dark:bg-gray-800 text-gray-900 dark:text-white"
            {
                h1 class="mb-4 text-xl font-bold" { "Sign in to Manasik" }

                (sign_in_form("", None))
            }
        }
    );

    base("Sign In", &content)
}

/// Exchange the submitted credentials for a bearer token and store it in the
/// session cookie.
///
/// Rejected credentials re-render the form with the email kept and the
/// password cleared. A 401 here means bad credentials, never an expired
/// session.
pub async fn post_sign_in(
    State(state): State<SignInState>,
    jar: PrivateCookieJar,
    Form(credentials): Form<Credentials>,
) -> Response {
    match state
        .backend
        .sign_in(&credentials.email, &credentials.password)
        .await
    {
        Ok(token) => {
            let jar = store_session(jar, &Session::new(token));
            tracing::info!("user signed in");

            (
                jar,
                HxRedirect(endpoints::list_view(HOME_SLUG)),
                StatusCode::OK,
            )
                .into_response()
        }
        Err(Error::InvalidCredentials) => (
            StatusCode::UNAUTHORIZED,
            sign_in_form(&credentials.email, Some("Invalid email or password.")),
        )
            .into_response(),
        Err(error) => {
            tracing::error!("sign-in failed: {error}");
            let (_, detail) = error.panel_text();

            (
                StatusCode::BAD_GATEWAY,
                sign_in_form(&credentials.email, Some(&detail)),
            )
                .into_response()
        }
    }
}

#[cfg(test)]
mod sign_in_tests {
    use std::sync::Arc;

    use axum_htmx::HX_REDIRECT;

    use crate::{
        Error,
        session::SESSION_COOKIE,
        test_utils::{FakeBackend, caravan_server},
    };

    #[tokio::test]
    async fn valid_credentials_set_the_session_cookie_and_redirect() {
        let server = caravan_server(Arc::new(FakeBackend::new()));

        let response = server
            .post(crate::endpoints::SIGN_IN_API)
            .form(&[("email", "admin@example.com"), ("password", "hunter2")])
            .await;

        response.assert_status_ok();
        assert_eq!(response.header(HX_REDIRECT), "/transactions");
        assert!(!response.cookie(SESSION_COOKIE).value().is_empty());
    }

    #[tokio::test]
    async fn rejected_credentials_rerender_the_form_with_the_email() {
        let backend = Arc::new(FakeBackend::new());
        backend.fail_next(Error::InvalidCredentials);
        let server = caravan_server(backend);

        let response = server
            .post(crate::endpoints::SIGN_IN_API)
            .form(&[("email", "admin@example.com"), ("password", "wrong")])
            .await;

        response.assert_status(axum::http::StatusCode::UNAUTHORIZED);
        response.assert_text_contains("Invalid email or password.");
        response.assert_text_contains("value=\"admin@example.com\"");
    }

    #[tokio::test]
    async fn unreachable_api_is_reported_on_the_form() {
        let backend = Arc::new(FakeBackend::new());
        backend.fail_next(Error::Network("connection refused".to_owned()));
        let server = caravan_server(backend);

        let response = server
            .post(crate::endpoints::SIGN_IN_API)
            .form(&[("email", "admin@example.com"), ("password", "hunter2")])
            .await;

        response.assert_status(axum::http::StatusCode::BAD_GATEWAY);
        response.assert_text_contains("Check your connection");
    }

    #[tokio::test]
    async fn sign_in_page_renders_the_form() {
        let server = caravan_server(Arc::new(FakeBackend::new()));

        let response = server.get(crate::endpoints::SIGN_IN_VIEW).await;

        response.assert_status_ok();
        response.assert_text_contains("Sign in to Manasik");
        response.assert_text_contains("name=\"password\"");
    }
}
