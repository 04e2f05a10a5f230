//! The state shared across the application's route handlers.

use std::sync::Arc;

use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;

use crate::{
    api::Backend, cache::QueryCache, pagination::PaginationConfig, session::create_cookie_key,
};

/// The state of the application.
///
/// Handlers never take this directly; each declares a narrow sub-state
/// (e.g. [ScreenState](crate::screen::ScreenState)) extracted from it via
/// `FromRef`, so a handler's dependencies are visible in its signature.
#[derive(Clone)]
pub struct AppState {
    /// The key for signing and encrypting the session cookie.
    pub cookie_key: Key,
    /// The client for the bookkeeping API that owns all data.
    pub backend: Arc<dyn Backend>,
    /// The cache of listing pages, shared by every screen.
    pub cache: Arc<QueryCache>,
    /// Page defaults for the listing screens.
    pub pagination: PaginationConfig,
}

impl AppState {
    /// Create the app state, deriving the cookie key from `cookie_secret`.
    pub fn new(
        backend: Arc<dyn Backend>,
        cookie_secret: &str,
        pagination: PaginationConfig,
    ) -> Self {
        Self {
            cookie_key: create_cookie_key(cookie_secret),
            backend,
            cache: Arc::new(QueryCache::new()),
            pagination,
        }
    }
}

// this impl tells `PrivateCookieJar` how to access the key from our state
impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.cookie_key.clone()
    }
}
