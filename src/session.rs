//! The session lifecycle: created at sign-in, carried in a private cookie,
//! torn down at sign-out or when the API reports the token expired.
//!
//! Handlers never read token storage themselves. The guard middleware is the
//! single place a session is reconstructed from the request; it inserts a
//! [Session] into the request extensions and every API call takes it
//! explicitly from there.

use axum::{
    extract::{FromRef, FromRequestParts, Request, State},
    http::{StatusCode, header::SET_COOKIE},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::{
    PrivateCookieJar,
    cookie::{Cookie, Key, SameSite},
};
use axum_htmx::HxRedirect;
use sha2::{Digest, Sha512};
use time::Duration;

use crate::{AppState, Error, endpoints};

/// The name of the private cookie holding the bearer token.
pub const SESSION_COOKIE: &str = "manasik_session";

/// How long a session cookie lives before the browser drops it.
///
/// The API may expire the token earlier; that path goes through
/// [expired_session_response] instead.
const SESSION_COOKIE_DURATION: Duration = Duration::hours(12);

/// The request-scoped authentication context for one signed-in user.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    token: String,
}

impl Session {
    /// Wrap a bearer token obtained from the sign-in endpoint.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    /// The bearer token to attach to API requests.
    pub fn token(&self) -> &str {
        &self.token
    }
}

/// Derive the cookie signing/encryption key from a secret string.
pub fn create_cookie_key(secret: &str) -> Key {
    let hash = Sha512::digest(secret);

    Key::from(&hash)
}

/// Store `session` in the cookie jar. Called once, at sign-in.
pub fn store_session(jar: PrivateCookieJar, session: &Session) -> PrivateCookieJar {
    jar.add(
        Cookie::build((SESSION_COOKIE, session.token.clone()))
            .max_age(SESSION_COOKIE_DURATION)
            .path("/")
            .http_only(true)
            .same_site(SameSite::Strict)
            .secure(true),
    )
}

/// Remove the session cookie. Called at sign-out and on token expiry.
pub fn clear_session(jar: PrivateCookieJar) -> PrivateCookieJar {
    jar.remove(
        Cookie::build((SESSION_COOKIE, ""))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Strict)
            .secure(true),
    )
}

/// Reconstruct the session from the cookie jar.
pub fn session_from_cookies(jar: &PrivateCookieJar) -> Result<Session, Error> {
    jar.get(SESSION_COOKIE)
        .map(|cookie| Session::new(cookie.value()))
        .ok_or(Error::SessionMissing)
}

/// The response for an [Error::AuthExpired] from the API: tear down the
/// session cookie and send the client back to the sign-in screen.
pub fn expired_session_response(jar: PrivateCookieJar) -> Response {
    tracing::info!("session expired upstream, clearing cookie and redirecting to sign-in");
    let jar = clear_session(jar);

    (jar, Redirect::to(endpoints::SIGN_IN_VIEW)).into_response()
}

/// Like [expired_session_response] but for htmx-initiated requests, which
/// need the `HX-Redirect` header to navigate.
pub fn expired_session_response_hx(jar: PrivateCookieJar) -> Response {
    tracing::info!("session expired upstream, clearing cookie and redirecting to sign-in");
    let jar = clear_session(jar);

    (
        jar,
        HxRedirect(endpoints::SIGN_IN_VIEW.to_owned()),
        StatusCode::OK,
    )
        .into_response()
}

/// The state needed by the session guard middleware.
#[derive(Clone)]
pub struct SessionGuardState {
    /// The key for decrypting and verifying the session cookie.
    pub cookie_key: Key,
}

impl FromRef<AppState> for SessionGuardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            cookie_key: state.cookie_key.clone(),
        }
    }
}

// this impl tells `PrivateCookieJar` how to access the key from our state
impl FromRef<SessionGuardState> for Key {
    fn from_ref(state: &SessionGuardState) -> Self {
        state.cookie_key.clone()
    }
}

#[inline]
async fn guard_internal(
    state: SessionGuardState,
    request: Request,
    next: Next,
    get_redirect: impl Fn() -> Response,
) -> Response {
    let (mut parts, body) = request.into_parts();
    let jar = match PrivateCookieJar::from_request_parts(&mut parts, &state).await {
        Ok(jar) => jar,
        Err(error) => {
            tracing::error!("could not read cookie jar: {error:?}, redirecting to sign-in");
            return get_redirect();
        }
    };

    let session = match session_from_cookies(&jar) {
        Ok(session) => session,
        Err(_) => return get_redirect(),
    };

    parts.extensions.insert(session);
    let request = Request::from_parts(parts, body);
    let response = next.run(request).await;

    // Preserve any cookie changes handlers made via their own jar.
    let (mut parts, body) = response.into_parts();
    for (key, value) in jar.into_response().headers() {
        if key == SET_COOKIE {
            parts.headers.append(key, value.to_owned());
        }
    }

    Response::from_parts(parts, body)
}

/// Middleware that requires a session cookie on page routes.
///
/// Valid sessions are inserted into the request extensions; handlers receive
/// them with `Extension(session): Extension<Session>`. Requests without one
/// are redirected to the sign-in screen.
pub async fn session_guard(
    State(state): State<SessionGuardState>,
    request: Request,
    next: Next,
) -> Response {
    guard_internal(state, request, next, || {
        Redirect::to(endpoints::SIGN_IN_VIEW).into_response()
    })
    .await
}

/// Middleware that requires a session cookie on htmx API routes, redirecting
/// via the `HX-Redirect` header so the browser navigates rather than swaps.
pub async fn session_guard_hx(
    State(state): State<SessionGuardState>,
    request: Request,
    next: Next,
) -> Response {
    guard_internal(state, request, next, || {
        (
            HxRedirect(endpoints::SIGN_IN_VIEW.to_owned()),
            StatusCode::OK,
        )
            .into_response()
    })
    .await
}
