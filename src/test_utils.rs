//! Shared helpers for tests: an in-memory backend, a throwaway entity type
//! and a pre-wired test server.

use std::{
    collections::HashMap,
    sync::{
        Mutex,
        atomic::{AtomicI64, Ordering},
    },
};

use async_trait::async_trait;
use axum::{
    Router,
    extract::FromRef,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use axum_extra::extract::PrivateCookieJar;
use axum_test::TestServer;
use serde_json::{Map, Value};

use crate::{
    AppState, Error, endpoints,
    api::{Backend, ListEnvelope, MessageEnvelope, PageMeta, Record, RecordEnvelope},
    filters::Filters,
    pagination::PaginationConfig,
    routing::resource_routes,
    screen::close_dialog_endpoint,
    session::{Session, SessionGuardState, store_session},
};

/// A route that signs the client in without going through the API, so tests
/// can obtain a valid session cookie cheaply.
pub const STUB_SIGN_IN_ROUTE: &str = "/test_sign_in";

/// Build a [Record] from a JSON object literal.
///
/// # Panics
/// Panics when `attributes` is not a JSON object.
pub fn record(id: i64, attributes: Value) -> Record {
    match attributes {
        Value::Object(attributes) => Record { id, attributes },
        other => panic!("record attributes must be a JSON object, got {other}"),
    }
}

/// An in-memory [Backend] that records every call made to it.
///
/// Failures are injected with [FakeBackend::fail_next]; the injected error
/// is returned by the next API call, whatever it is.
#[derive(Default)]
pub struct FakeBackend {
    records: Mutex<HashMap<&'static str, Vec<Record>>>,
    next_id: AtomicI64,
    calls: Mutex<Vec<String>>,
    next_error: Mutex<Option<Error>>,
}

impl FakeBackend {
    /// An empty backend.
    pub fn new() -> Self {
        Self {
            next_id: AtomicI64::new(1),
            ..Default::default()
        }
    }

    /// Add a record to `resource`'s collection.
    pub fn seed(&self, resource: &'static str, record: Record) {
        self.next_id.fetch_max(record.id + 1, Ordering::SeqCst);
        self.records
            .lock()
            .unwrap()
            .entry(resource)
            .or_default()
            .push(record);
    }

    /// Make the next API call fail with `error`.
    pub fn fail_next(&self, error: Error) {
        *self.next_error.lock().unwrap() = Some(error);
    }

    /// Every call made so far, e.g. `"list caravans page=2"`.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// The number of records in `resource`'s collection.
    pub fn count(&self, resource: &str) -> usize {
        self.records
            .lock()
            .unwrap()
            .get(resource)
            .map_or(0, Vec::len)
    }

    /// The record with `id` in `resource`'s collection, if any.
    pub fn find(&self, resource: &str, id: i64) -> Option<Record> {
        self.records
            .lock()
            .unwrap()
            .get(resource)?
            .iter()
            .find(|record| record.id == id)
            .cloned()
    }

    fn log(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn injected_error(&self) -> Option<Error> {
        self.next_error.lock().unwrap().take()
    }

    fn not_found(resource: &str, id: i64) -> Error {
        Error::Server {
            status: 404,
            message: format!("No record {id} in {resource}."),
        }
    }
}

fn matches_search(record: &Record, search: &str) -> bool {
    let needle = search.to_lowercase();

    record
        .attributes
        .values()
        .filter_map(Value::as_str)
        .any(|value| value.to_lowercase().contains(&needle))
}

#[async_trait]
impl Backend for FakeBackend {
    async fn sign_in(&self, email: &str, _password: &str) -> Result<String, Error> {
        self.log(format!("sign_in {email}"));
        if let Some(error) = self.injected_error() {
            return Err(error);
        }

        Ok("test-token".to_owned())
    }

    async fn list(
        &self,
        _session: &Session,
        resource: &'static str,
        page: u64,
        per_page: u64,
        filters: &Filters,
    ) -> Result<ListEnvelope, Error> {
        self.log(format!("list {resource} page={page}"));
        if let Some(error) = self.injected_error() {
            return Err(error);
        }

        let records = self.records.lock().unwrap();
        let mut matching: Vec<Record> = records
            .get(resource)
            .map(Vec::as_slice)
            .unwrap_or_default()
            .iter()
            .filter(|record| {
                filters
                    .search
                    .as_deref()
                    .is_none_or(|search| matches_search(record, search))
            })
            .cloned()
            .collect();
        matching.sort_by_key(|record| record.id);

        let total = matching.len() as u64;
        let start = (page.saturating_sub(1) * per_page).min(total);
        let end = (start + per_page).min(total);
        let data = matching[start as usize..end as usize].to_vec();

        let (from, to) = if data.is_empty() {
            (None, None)
        } else {
            (Some(start + 1), Some(end))
        };

        Ok(ListEnvelope {
            data,
            meta: PageMeta {
                from,
                to,
                total,
                per_page_options: None,
            },
        })
    }

    async fn get(
        &self,
        _session: &Session,
        resource: &'static str,
        id: i64,
    ) -> Result<Record, Error> {
        self.log(format!("get {resource} {id}"));
        if let Some(error) = self.injected_error() {
            return Err(error);
        }

        self.find(resource, id)
            .ok_or_else(|| Self::not_found(resource, id))
    }

    async fn create(
        &self,
        _session: &Session,
        resource: &'static str,
        payload: Map<String, Value>,
    ) -> Result<RecordEnvelope, Error> {
        self.log(format!("create {resource}"));
        if let Some(error) = self.injected_error() {
            return Err(error);
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let created = Record {
            id,
            attributes: payload,
        };
        self.records
            .lock()
            .unwrap()
            .entry(resource)
            .or_default()
            .push(created.clone());

        Ok(RecordEnvelope {
            data: created,
            message: None,
        })
    }

    async fn update(
        &self,
        _session: &Session,
        resource: &'static str,
        id: i64,
        payload: Map<String, Value>,
    ) -> Result<RecordEnvelope, Error> {
        self.log(format!("update {resource} {id}"));
        if let Some(error) = self.injected_error() {
            return Err(error);
        }

        let mut records = self.records.lock().unwrap();
        let record = records
            .get_mut(resource)
            .and_then(|records| records.iter_mut().find(|record| record.id == id))
            .ok_or_else(|| Self::not_found(resource, id))?;
        record.attributes = payload;

        Ok(RecordEnvelope {
            data: record.clone(),
            message: None,
        })
    }

    async fn delete(
        &self,
        _session: &Session,
        resource: &'static str,
        id: i64,
    ) -> Result<MessageEnvelope, Error> {
        self.log(format!("delete {resource} {id}"));
        if let Some(error) = self.injected_error() {
            return Err(error);
        }

        let mut records = self.records.lock().unwrap();
        let collection = records
            .get_mut(resource)
            .ok_or_else(|| Self::not_found(resource, id))?;
        let before = collection.len();
        collection.retain(|record| record.id != id);

        if collection.len() == before {
            return Err(Self::not_found(resource, id));
        }

        Ok(MessageEnvelope { message: None })
    }
}

/// A throwaway entity type for exercising the generic screen code without
/// depending on any real screen's schema.
pub mod caravans {
    use maud::{Markup, html};

    use crate::{
        api::Record,
        screen::{Column, Field, FieldKind, Resource},
    };

    /// A made-up entity: a travel caravan with a name and a seat count.
    pub struct Caravans;

    impl Resource for Caravans {
        const SLUG: &'static str = "caravans";
        const TITLE: &'static str = "Caravans";
        const NOUN: &'static str = "caravan";

        fn columns() -> &'static [Column] {
            const COLUMNS: &[Column] = &[Column::text("Name"), Column::numeric("Seats")];

            COLUMNS
        }

        fn cells(record: &Record) -> Vec<Markup> {
            vec![
                html!( (record.text("name")) ),
                html!( (record.display("seats")) ),
            ]
        }

        fn fields() -> &'static [Field] {
            const FIELDS: &[Field] = &[
                Field::required("name", "Name", FieldKind::Text),
                Field::optional("seats", "Seats", FieldKind::Number),
                Field::optional("departs_on", "Departs on", FieldKind::Date),
            ];

            FIELDS
        }
    }
}

async fn stub_sign_in(jar: PrivateCookieJar) -> Response {
    let jar = store_session(jar, &Session::new("test-token"));

    (jar, "signed in").into_response()
}

/// The stub sign-in route as a mergeable router.
pub fn stub_sign_in_route() -> Router<AppState> {
    Router::new().route(STUB_SIGN_IN_ROUTE, post(stub_sign_in))
}

/// A test server with the full set of caravan screen routes, the real
/// sign-in/out chrome and the stub sign-in route, backed by `backend`.
pub fn caravan_server(backend: std::sync::Arc<FakeBackend>) -> TestServer {
    let state = AppState::new(backend, "test-secret", PaginationConfig::default());
    let guard_state = SessionGuardState::from_ref(&state);

    let app = Router::new()
        .merge(resource_routes::<caravans::Caravans>(guard_state))
        .route(endpoints::CLOSE_DIALOG, get(close_dialog_endpoint))
        .route(endpoints::SIGN_IN_VIEW, get(crate::sign_in::get_sign_in_page))
        .route(endpoints::SIGN_IN_API, post(crate::sign_in::post_sign_in))
        .route(endpoints::SIGN_OUT, get(crate::log_out::get_sign_out))
        .merge(stub_sign_in_route())
        .with_state(state);

    TestServer::new(app)
}

/// Sign in through the stub route and return the session cookie.
pub async fn sign_in(server: &TestServer) -> axum_extra::extract::cookie::Cookie<'static> {
    let response = server.post(STUB_SIGN_IN_ROUTE).await;
    response.assert_status_ok();

    response.cookie(crate::session::SESSION_COOKIE)
}
