//! The listing screen, generic over the entity type.
//!
//! One handler serves every entity's screen: the table, filter bar,
//! pagination strip and page-size selector are all driven by the
//! [Resource] implementation. Navigation between pages happens through
//! htmx requests that re-select the `#listing` fragment out of the full
//! page response, so plain browser navigation to the same URL works too.

use std::{collections::HashMap, sync::Arc};

use axum::{
    Extension,
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use axum_extra::extract::PrivateCookieJar;
use axum_extra::extract::cookie::Key;
use maud::{Markup, html};
use serde::Deserialize;

use crate::{
    AppState, Error,
    alert::Alert,
    api::{Backend, ListEnvelope, PageMeta, Record},
    cache::{QueryCache, QueryKey},
    endpoints,
    filters::{FilterKind, Filters, format_date, parse_date},
    html::{
        BUTTON_DELETE_STYLE, BUTTON_PRIMARY_STYLE, LINK_STYLE, PAGE_CONTAINER_STYLE,
        TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, base, loading_spinner,
    },
    navigation::nav_bar,
    pagination::{PageControl, PaginationConfig, last_page, page_controls},
    screen::resource::Resource,
    session::{Session, expired_session_response},
};

/// The page sizes offered when the API does not suggest its own.
const DEFAULT_PER_PAGE_OPTIONS: &[u64] = &[10, 25, 50];

/// The state needed by the listing screen handlers.
#[derive(Clone)]
pub struct ScreenState {
    /// The bookkeeping API client.
    pub backend: Arc<dyn Backend>,
    /// The shared listing query cache.
    pub cache: Arc<QueryCache>,
    /// Page defaults and indicator limits.
    pub pagination: PaginationConfig,
    /// The key for the session cookie jar.
    pub cookie_key: Key,
}

impl FromRef<AppState> for ScreenState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            backend: state.backend.clone(),
            cache: state.cache.clone(),
            pagination: state.pagination,
            cookie_key: state.cookie_key.clone(),
        }
    }
}

impl FromRef<ScreenState> for Key {
    fn from_ref(state: &ScreenState) -> Self {
        state.cookie_key.clone()
    }
}

/// The query parameters a listing page accepts.
///
/// Everything is optional; missing or malformed values fall back to the
/// defaults rather than erroring, so stale bookmarked URLs keep working.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    /// 1-based page number.
    pub page: Option<u64>,
    /// Records per page.
    pub per_page: Option<u64>,
    /// Free-text search filter.
    pub search: Option<String>,
    /// Exact-date filter.
    pub date: Option<String>,
    /// Start of a date-range filter.
    pub start_date: Option<String>,
    /// End of a date-range filter.
    pub end_date: Option<String>,
    /// A success message to show once, set by mutation redirects.
    pub notice: Option<String>,
}

impl ListParams {
    /// The filters these parameters describe. Blank and malformed values
    /// count as "no filter".
    pub fn filters(&self) -> Filters {
        Filters {
            search: self
                .search
                .as_deref()
                .map(str::trim)
                .filter(|search| !search.is_empty())
                .map(str::to_owned),
            date: self.date.as_deref().and_then(parse_date),
            start_date: self.start_date.as_deref().and_then(parse_date),
            end_date: self.end_date.as_deref().and_then(parse_date),
        }
    }
}

/// A handler that renders the listing page for resource `R`.
///
/// Pages are served from the query cache when possible. On a miss the
/// fetch is registered with the cache first, so a result that another,
/// newer query has since superseded is discarded instead of installed.
pub async fn get_list_page<R: Resource>(
    State(state): State<ScreenState>,
    Extension(session): Extension<Session>,
    jar: PrivateCookieJar,
    Query(params): Query<ListParams>,
) -> Response {
    let page = params.page.unwrap_or(state.pagination.default_page).max(1);
    let per_page = params
        .per_page
        .unwrap_or(state.pagination.default_per_page)
        .max(1);
    let filters = params.filters();

    let key = QueryKey {
        resource: R::SLUG,
        page,
        per_page,
        filters: filters.clone(),
    };

    let envelope = match state.cache.lookup(&key) {
        Some(envelope) => envelope,
        None => {
            let ticket = state.cache.issue(key);
            match state
                .backend
                .list(&session, R::SLUG, page, per_page, &filters)
                .await
            {
                Ok(envelope) => {
                    state.cache.complete(ticket, envelope.clone());
                    envelope
                }
                Err(Error::AuthExpired) => return expired_session_response(jar),
                Err(error) => {
                    tracing::error!(resource = R::SLUG, "could not load listing: {error}");
                    return render_page::<R>(&error_panel(&error)).into_response();
                }
            }
        }
    };

    let notice = params
        .notice
        .as_deref()
        .map(str::trim)
        .filter(|notice| !notice.is_empty());
    let content = listing::<R>(&envelope, page, per_page, &filters, &state.pagination, notice);

    render_page::<R>(&content).into_response()
}

fn render_page<R: Resource>(content: &Markup) -> Markup {
    let body = html!(
        (nav_bar(R::SLUG))

        main class=(PAGE_CONTAINER_STYLE)
        {
            (content)
        }
    );

    base(R::TITLE, &body)
}

fn error_panel(error: &Error) -> Markup {
    let (header, detail) = error.panel_text();

    html!(
        div id="listing"
        {
            div class="p-6 text-center"
            {
                h2 class="mb-2 text-xl font-bold" { (header) }
                p { (detail) }
            }
        }
    )
}

/// The `#listing` fragment: heading, filter bar, table and pagination.
fn listing<R: Resource>(
    envelope: &ListEnvelope,
    page: u64,
    per_page: u64,
    filters: &Filters,
    config: &PaginationConfig,
    notice: Option<&str>,
) -> Markup {
    html!(
        div id="listing"
        {
            div class="flex items-center justify-between mb-4"
            {
                h1 class="text-2xl font-bold" { (R::TITLE) }

                button
                    class=(BUTTON_PRIMARY_STYLE)
                    hx-get=(endpoints::new_view(R::SLUG))
                    hx-target="#dialog"
                    hx-swap="innerHTML"
                {
                    "New " (R::NOUN)
                }
            }

            @if let Some(notice) = notice {
                div class="mb-4" { (Alert::success(notice, "").into_inline_html()) }
            }

            (filter_bar::<R>(filters, per_page))
            (loading_spinner("listing-indicator"))
            (table_view::<R>(&envelope.data))
            (pagination_strip::<R>(page, per_page, filters, &envelope.meta, config))
        }
    )
}

/// The listing URL for `page` of a resource with the given page size and
/// filters. `page: None` omits the parameter, which the handler treats as
/// page 1; the page-size links use this so changing the size restarts from
/// the first page.
fn listing_url(slug: &str, page: Option<u64>, per_page: u64, filters: &Filters) -> String {
    let mut pairs: Vec<(&'static str, String)> = Vec::new();

    if let Some(page) = page {
        pairs.push(("page", page.to_string()));
    }
    pairs.push(("per_page", per_page.to_string()));
    pairs.extend(filters.query_pairs());

    // Serializing string pairs cannot fail.
    let query = serde_urlencoded::to_string(&pairs).unwrap_or_default();

    format!("{}?{query}", endpoints::list_view(slug))
}

fn listing_link(url: &str, label: Markup) -> Markup {
    html!(
        a
            href=(url)
            class=(LINK_STYLE)
            hx-get=(url)
            hx-select="#listing"
            hx-target="#listing"
            hx-swap="outerHTML"
            hx-push-url="true"
            hx-indicator="#listing-indicator"
        {
            (label)
        }
    )
}

/// The search and date filter controls for resource `R`.
///
/// Submitting the form omits the page parameter, so a filter change always
/// lands on the first page of the filtered listing.
fn filter_bar<R: Resource>(filters: &Filters, per_page: u64) -> Markup {
    let search = filters.search.as_deref().unwrap_or_default();

    html!(
        form
            class="flex flex-wrap items-end gap-2 mb-4"
            hx-get=(endpoints::list_view(R::SLUG))
            hx-select="#listing"
            hx-target="#listing"
            hx-swap="outerHTML"
            hx-push-url="true"
            hx-indicator="#listing-indicator"
        {
            input type="hidden" name="per_page" value=(per_page);

            input
                type="search"
                name="search"
                placeholder="Search"
                value=(search)
                class="p-2 rounded border border-gray-300 dark:border-gray-600 \
                    bg-gray-50 dark:bg-gray-700 text-sm";

            @match R::filter() {
                FilterKind::Search => {}
                FilterKind::SearchWithDate => {
                    (date_input("date", "Date", filters.date))
                }
                FilterKind::SearchWithDateRange => {
                    (date_input("start_date", "From", filters.start_date))
                    (date_input("end_date", "To", filters.end_date))
                }
            }

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Filter" }
        }
    )
}

fn date_input(name: &str, label: &str, value: Option<time::Date>) -> Markup {
    html!(
        label class="text-sm"
        {
            (label)
            input
                type="date"
                name=(name)
                value=(value.map(format_date).unwrap_or_default())
                class="block p-2 rounded border border-gray-300 dark:border-gray-600 \
                    bg-gray-50 dark:bg-gray-700 text-sm";
        }
    )
}

/// The listing table for resource `R`, one row per record plus an actions
/// column with the edit and delete controls.
pub fn table_view<R: Resource>(records: &[Record]) -> Markup {
    let columns = R::columns();

    html!(
        div class="relative overflow-x-auto shadow-md rounded"
        {
            table class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
            {
                thead class=(TABLE_HEADER_STYLE)
                {
                    tr
                    {
                        @for column in columns {
                            th scope="col" class=(TABLE_CELL_STYLE) { (column.label) }
                        }

                        th scope="col" class=(TABLE_CELL_STYLE) { "Actions" }
                    }
                }

                tbody
                {
                    @if records.is_empty() {
                        tr class=(TABLE_ROW_STYLE)
                        {
                            td class=(TABLE_CELL_STYLE) colspan=(columns.len() + 1)
                            {
                                "Nothing here yet."
                            }
                        }
                    }

                    @for record in records {
                        tr class=(TABLE_ROW_STYLE)
                        {
                            @for (cell, column) in R::cells(record).iter().zip(columns) {
                                @if column.numeric {
                                    td class={ (TABLE_CELL_STYLE) " text-right" } { (cell) }
                                } @else {
                                    td class=(TABLE_CELL_STYLE) { (cell) }
                                }
                            }

                            td class=(TABLE_CELL_STYLE)
                            {
                                div class="flex gap-3"
                                {
                                    button
                                        class=(LINK_STYLE)
                                        hx-get=(endpoints::edit_view(R::SLUG, record.id))
                                        hx-target="#dialog"
                                        hx-swap="innerHTML"
                                        hx-target-error="#alert-container"
                                    {
                                        "Edit"
                                    }

                                    button
                                        class=(BUTTON_DELETE_STYLE)
                                        hx-delete=(endpoints::item_api(R::SLUG, record.id))
                                        hx-confirm={ "Delete this " (R::NOUN) "?" }
                                        hx-swap="none"
                                        hx-target-error="#alert-container"
                                    {
                                        "Delete"
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    )
}

fn pagination_strip<R: Resource>(
    page: u64,
    per_page: u64,
    filters: &Filters,
    meta: &PageMeta,
    config: &PaginationConfig,
) -> Markup {
    let last = last_page(meta.total, per_page);
    let controls = page_controls(page, last, config.max_indicators);
    let link = |page: u64, label: Markup| {
        listing_link(&listing_url(R::SLUG, Some(page), per_page, filters), label)
    };

    let summary = match (meta.from, meta.to) {
        (Some(from), Some(to)) => format!("Showing {from}-{to} of {}", meta.total),
        _ => format!("Showing 0 of {}", meta.total),
    };

    let options = meta
        .per_page_options
        .as_deref()
        .unwrap_or(DEFAULT_PER_PAGE_OPTIONS);

    html!(
        div class="flex flex-wrap items-center justify-between gap-4 mt-4 text-sm"
        {
            span { (summary) }

            nav class="flex items-center gap-2" aria-label="Pagination"
            {
                @for control in &controls {
                    @match control {
                        PageControl::First => { (link(1, html!("First"))) }
                        PageControl::Back(target) => { (link(*target, html!("Prev"))) }
                        PageControl::Page(target) => { (link(*target, html!((target)))) }
                        PageControl::Current(current) => {
                            span class="font-bold" aria-current="page" { (current) }
                        }
                        PageControl::Ellipsis => { span { "…" } }
                        PageControl::Next(target) => { (link(*target, html!("Next"))) }
                        PageControl::Last(target) => { (link(*target, html!("Last"))) }
                    }
                }
            }

            span class="flex items-center gap-2"
            {
                "Per page:"

                @for &option in options {
                    @if option == per_page {
                        span class="font-bold" { (option) }
                    } @else {
                        (listing_link(
                            &listing_url(R::SLUG, None, option, filters),
                            html!((option)),
                        ))
                    }
                }
            }
        }
    )
}

#[cfg(test)]
mod listing_url_tests {
    use time::macros::date;

    use crate::filters::Filters;

    use super::listing_url;

    #[test]
    fn page_and_size_come_first() {
        let url = listing_url("bills", Some(2), 25, &Filters::default());

        assert_eq!(url, "/bills?page=2&per_page=25");
    }

    #[test]
    fn filters_are_appended() {
        let filters = Filters {
            search: Some("office rent".to_owned()),
            date: Some(date!(2026 - 04 - 01)),
            ..Default::default()
        };

        let url = listing_url("bills", Some(1), 10, &filters);

        assert_eq!(
            url,
            "/bills?page=1&per_page=10&search=office+rent&date=2026-04-01"
        );
    }

    #[test]
    fn page_size_links_omit_the_page() {
        // Changing the page size restarts from the first page.
        let url = listing_url("bills", None, 50, &Filters::default());

        assert_eq!(url, "/bills?per_page=50");
    }
}
