//! The trait describing the bookkeeping API this dashboard is a client of.

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::{
    Error,
    api::envelope::{ListEnvelope, MessageEnvelope, Record, RecordEnvelope},
    filters::Filters,
    session::Session,
};

/// The remote REST API that owns all entity state.
///
/// The dashboard never owns canonical data; everything it shows is a
/// disposable projection of what these calls return. The production
/// implementation is [HttpBackend](crate::api::HttpBackend); tests use an
/// in-memory fake.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Exchange credentials for a bearer token.
    ///
    /// # Errors
    /// Returns [Error::InvalidCredentials] when the API rejects the
    /// credentials; a 401 here is not a session expiry.
    async fn sign_in(&self, email: &str, password: &str) -> Result<String, Error>;

    /// Fetch one page of `resource`, filtered by `filters`.
    ///
    /// Requesting a page past the last valid one yields an empty page, not
    /// an error.
    async fn list(
        &self,
        session: &Session,
        resource: &'static str,
        page: u64,
        per_page: u64,
        filters: &Filters,
    ) -> Result<ListEnvelope, Error>;

    /// Fetch a single record by ID.
    async fn get(&self, session: &Session, resource: &'static str, id: i64)
    -> Result<Record, Error>;

    /// Create a record; the server assigns the ID.
    async fn create(
        &self,
        session: &Session,
        resource: &'static str,
        payload: Map<String, Value>,
    ) -> Result<RecordEnvelope, Error>;

    /// Update an existing record.
    async fn update(
        &self,
        session: &Session,
        resource: &'static str,
        id: i64,
        payload: Map<String, Value>,
    ) -> Result<RecordEnvelope, Error>;

    /// Delete a record. The local view catches up on the next fetch; nothing
    /// is spliced out of cached pages.
    async fn delete(
        &self,
        session: &Session,
        resource: &'static str,
        id: i64,
    ) -> Result<MessageEnvelope, Error>;
}
