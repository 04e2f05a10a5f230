//! Manasik is a web app for a Hajj & Umrah travel agency's bookkeeping.
//!
//! It serves HTML screens for the agency's transactions, bills, loans,
//! packages, bank accounts, pilgrim pre-registrations and umrah bookings.
//! All data lives in a separate bookkeeping REST API; this app is a client
//! of that API and keeps no state of its own beyond a session cookie and a
//! disposable cache of listing pages.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum_server::Handle;
use tokio::signal;

mod alert;
mod api;
mod app_state;
mod cache;
mod endpoints;
mod error;
mod filters;
mod html;
mod log_out;
mod navigation;
mod not_found;
mod pagination;
mod resources;
mod routing;
mod screen;
mod session;
mod sign_in;

#[cfg(test)]
mod test_utils;

pub use api::{Backend, HttpBackend};
pub use app_state::AppState;
pub use error::Error;
pub use pagination::PaginationConfig;
pub use routing::build_router;

/// An async task that waits for either the ctrl+c or terminate signal,
/// whichever comes first, and then signals the server to shut down
/// gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}
