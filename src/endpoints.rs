//! The application's route URIs.
//!
//! Fixed routes are constants. Routes that exist once per resource screen
//! (listing pages, dialogs, mutation endpoints) are built from the resource's
//! collection slug with the helper functions below.

/// The sign-in page. Also where the client is sent when a session expires.
pub const SIGN_IN_VIEW: &str = "/";
/// The route for signing in.
pub const SIGN_IN_API: &str = "/api/sign_in";
/// The route for signing out the current user.
pub const SIGN_OUT: &str = "/api/sign_out";
/// The route that closes the currently open form dialog.
pub const CLOSE_DIALOG: &str = "/api/dialog/close";
/// The route for static files.
pub const STATIC: &str = "/static";

/// The listing page for a resource, e.g. `/transactions`.
pub fn list_view(slug: &str) -> String {
    format!("/{slug}")
}

/// The route that opens the create dialog for a resource.
pub fn new_view(slug: &str) -> String {
    format!("/{slug}/new")
}

/// The route that opens the edit dialog for one record.
pub fn edit_view(slug: &str, id: i64) -> String {
    format!("/{slug}/{id}/edit")
}

/// The axum route template matching [edit_view] for any record ID.
pub fn edit_view_route(slug: &str) -> String {
    format!("/{slug}/{{id}}/edit")
}

/// The listing page for a resource with a one-off success notice attached,
/// e.g. `/bills?notice=The+bill+was+created.`.
pub fn list_view_with_notice(slug: &str, notice: &str) -> String {
    // Serializing a single string pair cannot fail.
    let query = serde_urlencoded::to_string([("notice", notice)]).unwrap_or_default();

    format!("/{slug}?{query}")
}

/// The route for creating a record, e.g. `POST /api/transactions`.
pub fn collection_api(slug: &str) -> String {
    format!("/api/{slug}")
}

/// The route for updating or deleting one record.
pub fn item_api(slug: &str, id: i64) -> String {
    format!("/api/{slug}/{id}")
}

/// The axum route template matching [item_api] for any record ID.
pub fn item_api_route(slug: &str) -> String {
    format!("/api/{slug}/{{id}}")
}
