//! Creates a record from a submitted dialog form.

use std::collections::HashMap;

use axum::{
    Extension,
    extract::State,
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

/// A handler that validates the create form and, if it passes, asks the API
/// to create the record.
///
/// Validation failures never reach the network: the dialog is re-rendered
/// with the offending fields annotated. On success every cached page of the
/// resource is invalidated and the client is redirected to the listing,
/// which re-fetches fresh data.
pub async fn create_record<R: Resource>(
    State(state): State<ScreenState>,
    Extension(session): Extension<Session>,
    jar: PrivateCookieJar,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    let payload = match validate_form::<R>(&form) {
        Ok(payload) => payload,
        Err(errors) => {
            return mutation_failure_response::<R>(
                DialogMode::Create,
                &form,
                Error::Validation(errors),
            );
        }
    };

    match state.backend.create(&session, R::SLUG, payload).await {
        Ok(envelope) => {
            state.cache.invalidate(R::SLUG);

            let message = envelope
                .message
                .unwrap_or_else(|| format!("The {} was created.", R::NOUN));
            tracing::info!(resource = R::SLUG, id = envelope.data.id, "record created");

            (
                HxRedirect(endpoints::list_view_with_notice(R::SLUG, &message)),
                StatusCode::CREATED,
            )
                .into_response()
        }
        Err(Error::AuthExpired) => expired_session_response_hx(jar),
        Err(error) => {
            tracing::error!(resource = R::SLUG, "create failed: {error}");
            mutation_failure_response::<R>(DialogMode::Create, &form, error)
        }
    }
}

#[cfg(test)]
mod create_endpoint_tests {
    use std::sync::Arc;

    use axum_htmx::HX_REDIRECT;

    use crate::{
        Error,
        test_utils::{FakeBackend, caravan_server, sign_in},
    };

    #[tokio::test]
    async fn valid_form_creates_the_record_and_redirects() {
        let backend = Arc::new(FakeBackend::new());
        let server = caravan_server(backend.clone());
        let cookie = sign_in(&server).await;

        let response = server
            .post("/api/caravans")
            .form(&[("name", "Dhul Hijjah group"), ("seats", "40")])
            .add_cookie(cookie)
            .await;

        response.assert_status(axum::http::StatusCode::CREATED);
        assert!(response.header(HX_REDIRECT).to_str().unwrap().starts_with("/caravans?notice="));
        assert_eq!(backend.count("caravans"), 1);
    }

    #[tokio::test]
    async fn invalid_form_never_reaches_the_network() {
        let backend = Arc::new(FakeBackend::new());
        let server = caravan_server(backend.clone());
        let cookie = sign_in(&server).await;

        let response = server
            .post("/api/caravans")
            .form(&[("seats", "40")])
            .add_cookie(cookie)
            .await;

        response.assert_status(axum::http::StatusCode::UNPROCESSABLE_ENTITY);
        // The dialog is re-rendered with the error, keeping what was typed.
        response.assert_text_contains("Name is required.");
        response.assert_text_contains("value=\"40\"");

        assert!(backend.calls().iter().all(|call| !call.starts_with("create")));
        assert_eq!(backend.count("caravans"), 0);
    }

    #[tokio::test]
    async fn server_rejection_keeps_the_dialog_open_with_an_alert() {
        let backend = Arc::new(FakeBackend::new());
        backend.fail_next(Error::Server {
            status: 409,
            message: "A caravan with this name already exists.".to_owned(),
        });
        let server = caravan_server(backend);
        let cookie = sign_in(&server).await;

        let response = server
            .post("/api/caravans")
            .form(&[("name", "Dhul Hijjah group")])
            .add_cookie(cookie)
            .await;

        response.assert_status(axum::http::StatusCode::CONFLICT);
        response.assert_text_contains("A caravan with this name already exists.");
        response.assert_text_contains("value=\"Dhul Hijjah group\"");
        // The response still contains the form so the user can retry.
        response.assert_text_contains("hx-post=\"/api/caravans\"");
    }

    #[tokio::test]
    async fn resubmitting_after_a_transient_failure_succeeds() {
        let backend = Arc::new(FakeBackend::new());
        backend.fail_next(Error::Network("connection reset".to_owned()));
        let server = caravan_server(backend.clone());
        let cookie = sign_in(&server).await;
        let form = [("name", "Dhul Hijjah group"), ("seats", "40")];

        let first = server
            .post("/api/caravans")
            .form(&form)
            .add_cookie(cookie.clone())
            .await;
        first.assert_status(axum::http::StatusCode::BAD_GATEWAY);
        assert_eq!(backend.count("caravans"), 0);

        // Nothing about the failure should poison a retry of the same input.
        let second = server.post("/api/caravans").form(&form).add_cookie(cookie).await;
        second.assert_status(axum::http::StatusCode::CREATED);
        assert_eq!(backend.count("caravans"), 1);
    }

    #[tokio::test]
    async fn expired_session_redirects_to_sign_in() {
        let backend = Arc::new(FakeBackend::new());
        backend.fail_next(Error::AuthExpired);
        let server = caravan_server(backend);
        let cookie = sign_in(&server).await;

        let response = server
            .post("/api/caravans")
            .form(&[("name", "Dhul Hijjah group")])
            .add_cookie(cookie)
            .await;

        response.assert_status_ok();
        assert_eq!(response.header(HX_REDIRECT), "/");
    }

    #[tokio::test]
    async fn successful_create_invalidates_cached_listings() {
        let backend = Arc::new(FakeBackend::new());
        let server = caravan_server(backend.clone());
        let cookie = sign_in(&server).await;

        // Prime the cache, mutate, then list again: the second listing must
        // come from the API, not the cache.
        server.get("/caravans").add_cookie(cookie.clone()).await.assert_status_ok();
        server
            .post("/api/caravans")
            .form(&[("name", "Dhul Hijjah group")])
            .add_cookie(cookie.clone())
            .await
            .assert_status(axum::http::StatusCode::CREATED);
        let response = server.get("/caravans").add_cookie(cookie).await;
        response.assert_status_ok();
        response.assert_text_contains("Dhul Hijjah group");

        let list_calls = backend
            .calls()
            .iter()
            .filter(|call| call.starts_with("list caravans"))
            .count();
        assert_eq!(list_calls, 2);
    }
}
