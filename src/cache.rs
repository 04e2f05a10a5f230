//! The query cache backing every listing screen.
//!
//! Cached pages are keyed by a structured tuple rather than an ad hoc
//! string, so queries for different entity types can never collide. A
//! mutation invalidates every cached page of its resource; consistency is
//! re-established by the re-fetch that follows, never by editing cached
//! pages in place.
//!
//! Fetches are raced deliberately loosely: issuing a query hands out a
//! ticket, and a completed fetch is only installed when its ticket is still
//! the most recently issued one for that resource's screen. A superseded
//! result is discarded on arrival (the request itself is not aborted; list
//! fetches are idempotent GETs, so letting them finish is harmless).

use std::{
    collections::{HashMap, VecDeque},
    sync::{Mutex, MutexGuard},
};

use crate::{api::ListEnvelope, filters::Filters};

/// How many pages one resource may hold in the cache at once.
///
/// Distinct filter values (user-typed searches in particular) produce
/// distinct keys, so without a cap a rarely mutated resource would
/// accumulate pages indefinitely. When the cap is hit the resource's oldest
/// page is dropped and simply re-fetched if it is ever wanted again.
const MAX_PAGES_PER_RESOURCE: usize = 32;

/// Identifies one cached listing query.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    /// The collection slug, e.g. "transactions".
    pub resource: &'static str,
    /// 1-based page number.
    pub page: u64,
    /// Records per page.
    pub per_page: u64,
    /// The filters applied to the listing.
    pub filters: Filters,
}

/// Proof that a fetch was issued; required to install its result.
#[derive(Debug)]
pub struct Ticket {
    key: QueryKey,
    seq: u64,
}

#[derive(Debug, Default)]
struct Inner {
    pages: HashMap<QueryKey, ListEnvelope>,
    // Keys of `pages` oldest-first, for eviction at the per-resource cap.
    insertion_order: VecDeque<QueryKey>,
    latest_issued: HashMap<&'static str, u64>,
    next_seq: u64,
}

/// An invalidation-driven cache of listing pages.
#[derive(Debug, Default)]
pub struct QueryCache {
    inner: Mutex<Inner>,
}

impl QueryCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    // The lock is only held for map operations, never across an await. A
    // poisoned lock means a panic mid-map-operation; the map itself is still
    // a valid cache, so carry on with it.
    fn lock(&self) -> MutexGuard<'_, Inner> {
        match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// The cached page for `key`, if any.
    pub fn lookup(&self, key: &QueryKey) -> Option<ListEnvelope> {
        self.lock().pages.get(key).cloned()
    }

    /// Register that a fetch for `key` is starting.
    ///
    /// The returned ticket supersedes every ticket previously issued for the
    /// same resource.
    pub fn issue(&self, key: QueryKey) -> Ticket {
        let mut inner = self.lock();
        inner.next_seq += 1;
        let seq = inner.next_seq;
        inner.latest_issued.insert(key.resource, seq);

        Ticket { key, seq }
    }

    /// Install a completed fetch, unless a newer fetch for the same resource
    /// was issued in the meantime.
    ///
    /// Returns whether the page was installed; `false` means the result was
    /// superseded and discarded (last-issued-wins).
    pub fn complete(&self, ticket: Ticket, page: ListEnvelope) -> bool {
        let mut inner = self.lock();

        match inner.latest_issued.get(ticket.key.resource) {
            Some(&latest) if latest == ticket.seq => {
                if !inner.pages.contains_key(&ticket.key) {
                    evict_at_cap(&mut inner, ticket.key.resource);
                    inner.insertion_order.push_back(ticket.key.clone());
                }
                inner.pages.insert(ticket.key, page);
                true
            }
            _ => {
                tracing::debug!(
                    resource = ticket.key.resource,
                    page = ticket.key.page,
                    "discarding superseded query result"
                );
                false
            }
        }
    }

    /// Drop every cached page of `resource`. Other resources' entries are
    /// untouched.
    pub fn invalidate(&self, resource: &str) {
        let mut inner = self.lock();
        inner.pages.retain(|key, _| key.resource != resource);
        inner
            .insertion_order
            .retain(|key| key.resource != resource);
    }
}

/// Make room for one more page of `resource`, dropping its oldest cached
/// page if the resource is at its cap.
fn evict_at_cap(inner: &mut Inner, resource: &str) {
    let count = inner
        .insertion_order
        .iter()
        .filter(|key| key.resource == resource)
        .count();
    if count < MAX_PAGES_PER_RESOURCE {
        return;
    }

    if let Some(position) = inner
        .insertion_order
        .iter()
        .position(|key| key.resource == resource)
    {
        let oldest = inner.insertion_order.remove(position);
        if let Some(oldest) = oldest {
            tracing::debug!(
                resource = oldest.resource,
                page = oldest.page,
                "evicting oldest cached page at the per-resource cap"
            );
            inner.pages.remove(&oldest);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        api::{ListEnvelope, PageMeta, Record},
        filters::Filters,
    };

    use super::{MAX_PAGES_PER_RESOURCE, QueryCache, QueryKey};

    fn key(resource: &'static str, page: u64) -> QueryKey {
        QueryKey {
            resource,
            page,
            per_page: 25,
            filters: Filters::default(),
        }
    }

    fn page_of(ids: &[i64]) -> ListEnvelope {
        ListEnvelope {
            data: ids
                .iter()
                .map(|&id| Record {
                    id,
                    attributes: serde_json::Map::new(),
                })
                .collect(),
            meta: PageMeta {
                from: None,
                to: None,
                total: ids.len() as u64,
                per_page_options: None,
            },
        }
    }

    #[test]
    fn lookup_misses_until_a_fetch_completes() {
        let cache = QueryCache::new();
        let wanted = key("bills", 1);

        assert_eq!(cache.lookup(&wanted), None);

        let ticket = cache.issue(wanted.clone());
        assert!(cache.complete(ticket, page_of(&[1, 2])));

        assert_eq!(cache.lookup(&wanted), Some(page_of(&[1, 2])));
    }

    #[test]
    fn stale_result_does_not_overwrite_a_newer_query() {
        let cache = QueryCache::new();

        // Page 1 is requested, then page 2, then page 1's response arrives
        // late. The screen must keep page 2's data.
        let page_one_ticket = cache.issue(key("transactions", 1));
        let page_two_ticket = cache.issue(key("transactions", 2));

        assert!(cache.complete(page_two_ticket, page_of(&[26, 27])));
        assert!(!cache.complete(page_one_ticket, page_of(&[1, 2])));

        assert_eq!(cache.lookup(&key("transactions", 2)), Some(page_of(&[26, 27])));
        assert_eq!(cache.lookup(&key("transactions", 1)), None);
    }

    #[test]
    fn invalidate_only_touches_the_named_resource() {
        let cache = QueryCache::new();

        let bills = cache.issue(key("bills", 1));
        cache.complete(bills, page_of(&[1]));
        let loans = cache.issue(key("loans", 1));
        cache.complete(loans, page_of(&[2]));

        cache.invalidate("bills");

        assert_eq!(cache.lookup(&key("bills", 1)), None);
        assert_eq!(cache.lookup(&key("loans", 1)), Some(page_of(&[2])));
    }

    #[test]
    fn keys_distinguish_page_size_and_filters() {
        let cache = QueryCache::new();
        let plain = key("bills", 1);
        let filtered = QueryKey {
            filters: Filters {
                search: Some("rent".to_owned()),
                ..Default::default()
            },
            ..key("bills", 1)
        };

        let ticket = cache.issue(filtered.clone());
        cache.complete(ticket, page_of(&[9]));

        assert_eq!(cache.lookup(&plain), None);
        assert_eq!(cache.lookup(&filtered), Some(page_of(&[9])));
    }

    #[test]
    fn distinct_searches_evict_the_resources_oldest_page_at_the_cap() {
        let cache = QueryCache::new();
        let search_key = |n: usize| QueryKey {
            filters: Filters {
                search: Some(format!("search {n}")),
                ..Default::default()
            },
            ..key("bills", 1)
        };

        let loans = cache.issue(key("loans", 1));
        cache.complete(loans, page_of(&[99]));

        // One page over the cap: the oldest bills page must go, the rest and
        // the other resource's page must stay.
        for n in 0..=MAX_PAGES_PER_RESOURCE {
            let ticket = cache.issue(search_key(n));
            cache.complete(ticket, page_of(&[n as i64]));
        }

        assert_eq!(cache.lookup(&search_key(0)), None);
        assert_eq!(cache.lookup(&search_key(1)), Some(page_of(&[1])));
        assert_eq!(
            cache.lookup(&search_key(MAX_PAGES_PER_RESOURCE)),
            Some(page_of(&[MAX_PAGES_PER_RESOURCE as i64]))
        );
        assert_eq!(cache.lookup(&key("loans", 1)), Some(page_of(&[99])));
    }

    #[test]
    fn queries_for_different_resources_do_not_supersede_each_other() {
        let cache = QueryCache::new();

        let bills_ticket = cache.issue(key("bills", 1));
        let loans_ticket = cache.issue(key("loans", 1));

        // Issuing a loans query must not discard the in-flight bills fetch.
        assert!(cache.complete(bills_ticket, page_of(&[1])));
        assert!(cache.complete(loans_ticket, page_of(&[2])));
    }
}
