//! Signing out: tear down the session cookie and return to the sign-in
//! screen.

use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::PrivateCookieJar;

use crate::{endpoints, session::clear_session};

/// Remove the session cookie and redirect to the sign-in page.
///
/// The bearer token is simply forgotten; the API has no revocation endpoint
/// and the token expires on its own upstream.
pub async fn get_sign_out(jar: PrivateCookieJar) -> Response {
    let jar = clear_session(jar);

    (jar, Redirect::to(endpoints::SIGN_IN_VIEW)).into_response()
}

#[cfg(test)]
mod sign_out_tests {
    use std::sync::Arc;

    use crate::{
        endpoints,
        session::SESSION_COOKIE,
        test_utils::{FakeBackend, caravan_server, sign_in},
    };

    #[tokio::test]
    async fn sign_out_clears_the_cookie_and_redirects() {
        let server = caravan_server(Arc::new(FakeBackend::new()));
        let cookie = sign_in(&server).await;

        let response = server.get(endpoints::SIGN_OUT).add_cookie(cookie).await;

        response.assert_status_see_other();
        assert_eq!(response.header("location"), endpoints::SIGN_IN_VIEW);
        assert!(response.cookie(SESSION_COOKIE).value().is_empty());
    }
}
