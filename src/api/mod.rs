//! The client boundary to the bookkeeping REST API.

mod backend;
mod envelope;
mod http;

pub use backend::Backend;
pub use envelope::{ListEnvelope, MessageEnvelope, PageMeta, Record, RecordEnvelope};
pub use http::HttpBackend;
