//! Page arithmetic and the pagination controls shared by every listing screen.

/// The config for pagination.
#[derive(Debug, Clone, Copy)]
pub struct PaginationConfig {
    /// The page number to default to when not specified in a request.
    pub default_page: u64,
    /// The records to show per page when not specified in a request.
    pub default_per_page: u64,
    /// The maximum number of page indicators to show at once.
    pub max_indicators: u64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page: 1,
            default_per_page: 25,
            max_indicators: 5,
        }
    }
}

/// The number of the last valid page for `total` records at `per_page`
/// records per page.
///
/// An empty collection still has one (empty) page, so this is never zero.
pub fn last_page(total: u64, per_page: u64) -> u64 {
    total.div_ceil(per_page.max(1)).max(1)
}

/// Clamp `page` into the valid range `[1, last_page]`.
pub fn clamp_page(page: u64, last_page: u64) -> u64 {
    page.clamp(1, last_page.max(1))
}

/// One element of the pagination control strip.
#[derive(Debug, PartialEq, Eq)]
pub enum PageControl {
    /// Jump to page 1. Only present when not already there.
    First,
    /// Go to the previous page.
    Back(u64),
    /// A direct link to a page.
    Page(u64),
    /// The page currently shown, not a link.
    Current(u64),
    /// A gap in the page window.
    Ellipsis,
    /// Go to the next page. Absent on the last page.
    Next(u64),
    /// Jump to the last page.
    Last(u64),
}

/// Build the control strip for `curr_page` of `last_page` pages, showing at
/// most `window` page indicators.
///
/// Every page a control points at is within `[1, last_page]`: back/next are
/// dropped rather than clamped at the edges, and a `curr_page` past the end
/// is treated as the last page.
pub fn page_controls(curr_page: u64, last_page: u64, window: u64) -> Vec<PageControl> {
    let window = window.max(1);
    let curr = clamp_page(curr_page, last_page);
    let half = window / 2;

    let (start, end) = if last_page <= window {
        (1, last_page)
    } else if curr <= half + 1 {
        (1, window)
    } else if curr + half >= last_page {
        (last_page - window + 1, last_page)
    } else {
        (curr - half, curr + half)
    };

    let mut controls = Vec::new();

    if curr > 1 {
        controls.push(PageControl::First);
        controls.push(PageControl::Back(curr - 1));
    }

    if start > 1 {
        controls.push(PageControl::Ellipsis);
    }

    for page in start..=end {
        if page == curr {
            controls.push(PageControl::Current(page));
        } else {
            controls.push(PageControl::Page(page));
        }
    }

    if end < last_page {
        controls.push(PageControl::Ellipsis);
    }

    if curr < last_page {
        controls.push(PageControl::Next(curr + 1));
        controls.push(PageControl::Last(last_page));
    }

    controls
}
