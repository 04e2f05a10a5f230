//! The JSON envelopes the bookkeeping API wraps its responses in.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One backend-owned entity instance.
///
/// Beyond the stable `id`, a record is an opaque bag of attributes; the
/// client only reads the keys a given table or form needs and never
/// interprets further structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Server-assigned identifier, unique within the record's entity type.
    pub id: i64,
    /// Everything else the server sent.
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl Record {
    /// The string attribute `key`, or `""` when absent or not a string.
    pub fn text(&self, key: &str) -> &str {
        self.attributes
            .get(key)
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    /// The numeric attribute `key`, if present and a number.
    pub fn number(&self, key: &str) -> Option<f64> {
        self.attributes.get(key).and_then(Value::as_f64)
    }

    /// The attribute `key` rendered for display: strings verbatim, numbers
    /// via their shortest representation, anything else empty.
    pub fn display(&self, key: &str) -> String {
        match self.attributes.get(key) {
            Some(Value::String(text)) => text.clone(),
            Some(Value::Number(number)) => number.to_string(),
            Some(Value::Bool(flag)) => flag.to_string(),
            _ => String::new(),
        }
    }
}

/// The pagination metadata attached to a list response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageMeta {
    /// 1-based index of the first record on this page, absent when empty.
    #[serde(default)]
    pub from: Option<u64>,
    /// 1-based index of the last record on this page, absent when empty.
    #[serde(default)]
    pub to: Option<u64>,
    /// Total record count across all pages.
    pub total: u64,
    /// Page sizes the server suggests offering, when it has an opinion.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per_page_options: Option<Vec<u64>>,
}

/// A page-bounded slice of records plus page metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListEnvelope {
    /// The records on this page, in server-defined order.
    pub data: Vec<Record>,
    /// Pagination metadata.
    pub meta: PageMeta,
}

/// A single-record response, e.g. from create/update/detail endpoints.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RecordEnvelope {
    /// The record the server acted on.
    pub data: Record,
    /// An optional human-readable confirmation.
    #[serde(default)]
    pub message: Option<String>,
}

/// A response carrying only a confirmation message, e.g. from delete.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MessageEnvelope {
    /// An optional human-readable confirmation.
    #[serde(default)]
    pub message: Option<String>,
}

/// The error envelope the API sends with 4xx/5xx statuses.
#[derive(Debug, Deserialize)]
pub struct ErrorEnvelope {
    /// The message to surface verbatim to the user, when present.
    #[serde(default)]
    pub message: Option<String>,
}

/// The body of a successful sign-in response.
#[derive(Debug, Deserialize)]
pub struct TokenEnvelope {
    /// The token payload.
    pub data: TokenData,
}

/// The token payload of a sign-in response.
#[derive(Debug, Deserialize)]
pub struct TokenData {
    /// The bearer token for subsequent requests.
    pub token: String,
}
