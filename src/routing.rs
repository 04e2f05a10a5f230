//! Assembles the application's router: one set of screen routes per entity
//! type, the sign-in/out chrome, static files and the 404 fallback.

use axum::{
    Router,
    extract::FromRef,
    middleware,
    routing::{get, post, put},
};
use tower_http::services::ServeDir;

use crate::{
    AppState, endpoints,
    log_out::get_sign_out,
    not_found::get_404_not_found,
    resources::{BankAccounts, Bills, Loans, Packages, Pilgrims, Transactions, Umrah},
    screen::{
        Resource, close_dialog_endpoint, create_record, delete_record, get_edit_dialog,
        get_list_page, get_new_dialog, update_record,
    },
    session::{SessionGuardState, session_guard, session_guard_hx},
    sign_in::{get_sign_in_page, post_sign_in},
};

/// The routes for one entity's screen: the listing page behind the page
/// guard, and the dialog and mutation endpoints behind the htmx guard.
pub(crate) fn resource_routes<R: Resource>(guard_state: SessionGuardState) -> Router<AppState> {
    let pages = Router::new()
        .route(&endpoints::list_view(R::SLUG), get(get_list_page::<R>))
        .route_layer(middleware::from_fn_with_state(
            guard_state.clone(),
            session_guard,
        ));

    let fragments = Router::new()
        .route(&endpoints::new_view(R::SLUG), get(get_new_dialog::<R>))
        .route(&endpoints::edit_view_route(R::SLUG), get(get_edit_dialog::<R>))
        .route(&endpoints::collection_api(R::SLUG), post(create_record::<R>))
        .route(
            &endpoints::item_api_route(R::SLUG),
            put(update_record::<R>).delete(delete_record::<R>),
        )
        .route_layer(middleware::from_fn_with_state(
            guard_state,
            session_guard_hx,
        ));

    pages.merge(fragments)
}

/// Create the axum router for the application.
pub fn build_router(state: AppState) -> Router {
    let guard_state = SessionGuardState::from_ref(&state);

    let dialog = Router::new()
        .route(endpoints::CLOSE_DIALOG, get(close_dialog_endpoint))
        .route_layer(middleware::from_fn_with_state(
            guard_state.clone(),
            session_guard_hx,
        ));

    Router::new()
        .merge(resource_routes::<Transactions>(guard_state.clone()))
        .merge(resource_routes::<Bills>(guard_state.clone()))
        .merge(resource_routes::<Loans>(guard_state.clone()))
        .merge(resource_routes::<Packages>(guard_state.clone()))
        .merge(resource_routes::<BankAccounts>(guard_state.clone()))
        .merge(resource_routes::<Pilgrims>(guard_state.clone()))
        .merge(resource_routes::<Umrah>(guard_state))
        .merge(dialog)
        .route(endpoints::SIGN_IN_VIEW, get(get_sign_in_page))
        .route(endpoints::SIGN_IN_API, post(post_sign_in))
        .route(endpoints::SIGN_OUT, get(get_sign_out))
        .nest_service(endpoints::STATIC, ServeDir::new("static/"))
        .fallback(get_404_not_found)
        .with_state(state)
}
