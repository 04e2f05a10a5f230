//! The reqwest-backed implementation of [Backend].

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde_json::{Map, Value, json};

use crate::{
    Error,
    api::{
        Backend,
        envelope::{ErrorEnvelope, ListEnvelope, MessageEnvelope, Record, RecordEnvelope,
            TokenEnvelope},
    },
    filters::Filters,
    session::Session,
};

/// Talks to the bookkeeping API over JSON/HTTP.
///
/// Every request except sign-in carries the session's bearer token. Failures
/// are mapped onto the app error taxonomy: transport failures become
/// [Error::Network], a 401 becomes [Error::AuthExpired], and any other
/// 4xx/5xx becomes [Error::Server] carrying the envelope's message when one
/// was present.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    /// Create a backend client for the API at `base_url`.
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }

    fn authorized(&self, builder: RequestBuilder, session: &Session) -> RequestBuilder {
        builder.bearer_auth(session.token())
    }
}

/// The query pairs for a list request, pagination first then filters.
fn list_query(page: u64, per_page: u64, filters: &Filters) -> Vec<(&'static str, String)> {
    let mut pairs = vec![("page", page.to_string()), ("per_page", per_page.to_string())];
    pairs.extend(filters.query_pairs());
    pairs
}

fn transport_error(error: reqwest::Error) -> Error {
    Error::Network(error.to_string())
}

fn decode_error(error: reqwest::Error) -> Error {
    Error::InvalidResponse(error.to_string())
}

/// Map a non-success response onto the error taxonomy.
async fn read_error(response: Response) -> Error {
    let status = response.status();

    if status == StatusCode::UNAUTHORIZED {
        return Error::AuthExpired;
    }

    let message = response
        .json::<ErrorEnvelope>()
        .await
        .ok()
        .and_then(|envelope| envelope.message)
        .unwrap_or_else(|| "The server returned an unexpected error.".to_owned());

    Error::Server {
        status: status.as_u16(),
        message,
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn sign_in(&self, email: &str, password: &str) -> Result<String, Error> {
        let response = self
            .client
            .post(self.url("login"))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(transport_error)?;

        // A 401 on the sign-in endpoint means bad credentials, not an
        // expired session.
        if response.status() == StatusCode::UNAUTHORIZED {
            return Err(Error::InvalidCredentials);
        }
        if !response.status().is_success() {
            return Err(read_error(response).await);
        }

        let envelope: TokenEnvelope = response.json().await.map_err(decode_error)?;
        Ok(envelope.data.token)
    }

    async fn list(
        &self,
        session: &Session,
        resource: &'static str,
        page: u64,
        per_page: u64,
        filters: &Filters,
    ) -> Result<ListEnvelope, Error> {
        let request = self
            .client
            .get(self.url(resource))
            .query(&list_query(page, per_page, filters));
        let response = self
            .authorized(request, session)
            .send()
            .await
            .map_err(transport_error)?;

        if !response.status().is_success() {
            return Err(read_error(response).await);
        }

        response.json().await.map_err(decode_error)
    }

    async fn get(
        &self,
        session: &Session,
        resource: &'static str,
        id: i64,
    ) -> Result<Record, Error> {
        let request = self.client.get(self.url(&format!("{resource}/{id}")));
        let response = self
            .authorized(request, session)
            .send()
            .await
            .map_err(transport_error)?;

        if !response.status().is_success() {
            return Err(read_error(response).await);
        }

        let envelope: RecordEnvelope = response.json().await.map_err(decode_error)?;
        Ok(envelope.data)
    }

    async fn create(
        &self,
        session: &Session,
        resource: &'static str,
        payload: Map<String, Value>,
    ) -> Result<RecordEnvelope, Error> {
        let request = self.client.post(self.url(resource)).json(&payload);
        let response = self
            .authorized(request, session)
            .send()
            .await
            .map_err(transport_error)?;

        if !response.status().is_success() {
            return Err(read_error(response).await);
        }

        response.json().await.map_err(decode_error)
    }

    async fn update(
        &self,
        session: &Session,
        resource: &'static str,
        id: i64,
        payload: Map<String, Value>,
    ) -> Result<RecordEnvelope, Error> {
        let request = self
            .client
            .put(self.url(&format!("{resource}/{id}")))
            .json(&payload);
        let response = self
            .authorized(request, session)
            .send()
            .await
            .map_err(transport_error)?;

        if !response.status().is_success() {
            return Err(read_error(response).await);
        }

        response.json().await.map_err(decode_error)
    }

    async fn delete(
        &self,
        session: &Session,
        resource: &'static str,
        id: i64,
    ) -> Result<MessageEnvelope, Error> {
        let request = self.client.delete(self.url(&format!("{resource}/{id}")));
        let response = self
            .authorized(request, session)
            .send()
            .await
            .map_err(transport_error)?;

        if !response.status().is_success() {
            return Err(read_error(response).await);
        }

        response.json().await.map_err(decode_error)
    }
}

#[cfg(test)]
mod http_backend_tests {
    use time::macros::date;

    use crate::filters::Filters;

    use super::{HttpBackend, list_query};

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let backend = HttpBackend::new("https://api.example.test/");

        assert_eq!(backend.url("transactions"), "https://api.example.test/transactions");
        assert_eq!(backend.url("transactions/7"), "https://api.example.test/transactions/7");
    }

    #[test]
    fn list_query_puts_pagination_before_filters() {
        let filters = Filters {
            search: Some("flight".to_owned()),
            date: Some(date!(2026 - 04 - 02)),
            ..Default::default()
        };

        let query = serde_urlencoded::to_string(list_query(2, 25, &filters)).unwrap();

        assert_eq!(query, "page=2&per_page=25&search=flight&date=2026-04-02");
    }

    #[test]
    fn list_query_without_filters_is_pagination_only() {
        let query = serde_urlencoded::to_string(list_query(1, 10, &Filters::default())).unwrap();

        assert_eq!(query, "page=1&per_page=10");
    }
}
