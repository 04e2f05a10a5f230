//! Listing filters: free-text search plus the date filters some screens use.

use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

/// Dates in query strings and form fields use the HTML date input format.
pub const DATE_FORMAT: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");

/// Which filter controls a listing screen shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    /// A free-text search box only.
    Search,
    /// Search plus a single date.
    SearchWithDate,
    /// Search plus a start/end date range.
    SearchWithDateRange,
}

/// The filter values applied to a listing query.
///
/// Part of the query cache key, so two screens filtered differently never
/// share a cached page.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Filters {
    /// Free-text search.
    pub search: Option<String>,
    /// Exact-date filter.
    pub date: Option<Date>,
    /// Start of a date-range filter, inclusive.
    pub start_date: Option<Date>,
    /// End of a date-range filter, inclusive.
    pub end_date: Option<Date>,
}

impl Filters {
    /// Whether no filter is applied at all.
    pub fn is_empty(&self) -> bool {
        self.search.is_none()
            && self.date.is_none()
            && self.start_date.is_none()
            && self.end_date.is_none()
    }

    /// The filter's query string pairs, in the order the API expects them.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();

        if let Some(search) = &self.search {
            pairs.push(("search", search.clone()));
        }
        if let Some(date) = self.date {
            pairs.push(("date", format_date(date)));
        }
        if let Some(start) = self.start_date {
            pairs.push(("start_date", format_date(start)));
        }
        if let Some(end) = self.end_date {
            pairs.push(("end_date", format_date(end)));
        }

        pairs
    }
}

/// Format a date the way the API and the date inputs expect it.
pub fn format_date(date: Date) -> String {
    // The format has no component that can fail to format.
    date.format(DATE_FORMAT)
        .unwrap_or_else(|_| date.to_string())
}

/// Parse a date from a query param or form field. Empty and malformed
/// strings are treated as "no filter".
pub fn parse_date(raw: &str) -> Option<Date> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    Date::parse(raw, DATE_FORMAT)
        .inspect_err(|error| tracing::debug!("ignoring unparsable date {raw:?}: {error}"))
        .ok()
}
