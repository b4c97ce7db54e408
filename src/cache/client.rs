use super::key::QueryKey;
use crate::api::ApiError;
use crate::models::NotesPage;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct QueryOptions {
    /// Age after which a successful entry is re-fetched on next observation.
    pub stale_time_ms: i64,
    /// Automatic retries after a failed attempt.
    pub retry: u32,
    pub refetch_on_window_focus: bool,
}

impl QueryOptions {
    /// Options for the one-shot bootstrap cache: exactly one network call.
    pub fn prefetch() -> Self {
        Self {
            stale_time_ms: 0,
            retry: 0,
            refetch_on_window_focus: false,
        }
    }
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            stale_time_ms: 60_000,
            retry: 1,
            refetch_on_window_focus: false,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub(crate) enum QueryStatus {
    Pending,
    Success,
    Error,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct QueryEntry {
    pub status: QueryStatus,
    pub data: Option<NotesPage>,
    pub error: Option<String>,
    /// When `data` (or `error`) was last written, in epoch ms.
    pub updated_ms: i64,
    pub failure_count: u32,
    pub invalidated: bool,
    /// Request id of the fetch this entry is waiting on.
    pub(crate) in_flight: Option<u64>,
}

impl QueryEntry {
    fn pending() -> Self {
        Self {
            status: QueryStatus::Pending,
            data: None,
            error: None,
            updated_ms: 0,
            failure_count: 0,
            invalidated: false,
            in_flight: None,
        }
    }

    pub fn is_fetching(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn is_fresh(&self, now_ms: i64, stale_time_ms: i64) -> bool {
        self.status == QueryStatus::Success
            && !self.invalidated
            && now_ms.saturating_sub(self.updated_ms) < stale_time_ms
    }
}

/// What an observer should do for a key right now.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum FetchPlan {
    /// Cached data is fresh; no network call.
    UseCached,
    /// A request for this key is already running.
    AlreadyFetching,
    /// Start a network call tagged with this request id.
    Start(u64),
}

/// Outcome of feeding a response back into the cache.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Resolution {
    /// Stored; the request is finished.
    Settled,
    /// Failed but retries remain; call again with the same request id.
    Retry,
    /// A newer request replaced this one; the response was dropped.
    Superseded,
}

/// In-memory query cache scoped to one component tree.
///
/// All methods take `now_ms` explicitly so the cache has no clock of its own.
#[derive(Clone, Debug, Default)]
pub(crate) struct QueryClient {
    options: QueryOptions,
    entries: HashMap<QueryKey, QueryEntry>,
    next_request_id: u64,
}

impl QueryClient {
    pub fn new(options: QueryOptions) -> Self {
        Self {
            options,
            entries: HashMap::new(),
            next_request_id: 0,
        }
    }

    pub fn options(&self) -> QueryOptions {
        self.options
    }

    pub fn get(&self, key: &QueryKey) -> Option<&QueryEntry> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn entries(&self) -> impl Iterator<Item = (&QueryKey, &QueryEntry)> {
        self.entries.iter()
    }

    /// Decides whether observing `key` needs a network call, and if so
    /// registers the request.
    pub fn plan_fetch(&mut self, key: &QueryKey, now_ms: i64) -> FetchPlan {
        let stale_time_ms = self.options.stale_time_ms;
        let entry = self
            .entries
            .entry(key.clone())
            .or_insert_with(QueryEntry::pending);

        if entry.is_fetching() {
            return FetchPlan::AlreadyFetching;
        }
        if entry.is_fresh(now_ms, stale_time_ms) {
            return FetchPlan::UseCached;
        }

        self.next_request_id = self.next_request_id.saturating_add(1);
        let request_id = self.next_request_id;

        entry.in_flight = Some(request_id);
        entry.failure_count = 0;
        if entry.data.is_none() {
            entry.status = QueryStatus::Pending;
            entry.error = None;
        }

        debug!("event=fetch_start key={} request_id={}", key, request_id);
        FetchPlan::Start(request_id)
    }

    /// Stores the outcome of request `request_id` for `key`.
    pub fn resolve(
        &mut self,
        key: &QueryKey,
        request_id: u64,
        result: Result<NotesPage, ApiError>,
        now_ms: i64,
    ) -> Resolution {
        let retry = self.options.retry;
        let Some(entry) = self.entries.get_mut(key) else {
            return Resolution::Superseded;
        };
        if entry.in_flight != Some(request_id) {
            debug!("event=fetch_superseded key={} request_id={}", key, request_id);
            return Resolution::Superseded;
        }

        match result {
            Ok(page) => {
                entry.status = QueryStatus::Success;
                entry.data = Some(page);
                entry.error = None;
                entry.updated_ms = now_ms;
                entry.failure_count = 0;
                entry.invalidated = false;
                entry.in_flight = None;
                Resolution::Settled
            }
            Err(e) => {
                entry.failure_count = entry.failure_count.saturating_add(1);
                if entry.failure_count <= retry {
                    warn!(
                        "event=fetch_retry key={} attempt={} error={}",
                        key, entry.failure_count, e
                    );
                    return Resolution::Retry;
                }

                warn!("event=fetch_failed key={} error={}", key, e);
                entry.status = QueryStatus::Error;
                entry.error = Some(e.to_string());
                entry.updated_ms = now_ms;
                entry.in_flight = None;
                Resolution::Settled
            }
        }
    }

    /// Marks every entry of `resource` stale. Running requests are superseded
    /// so their responses cannot overwrite data written after the mutation.
    pub fn invalidate(&mut self, resource: &str) -> usize {
        let mut count = 0;
        for (key, entry) in self.entries.iter_mut() {
            if key.resource == resource {
                entry.invalidated = true;
                entry.in_flight = None;
                count += 1;
            }
        }
        debug!("event=cache_invalidate resource={} entries={}", resource, count);
        count
    }

    /// Inserts a settled entry unless a newer one is already cached.
    pub(crate) fn seed(&mut self, key: QueryKey, entry: QueryEntry) -> bool {
        match self.entries.get(&key) {
            Some(existing) if existing.updated_ms >= entry.updated_ms => false,
            _ => {
                self.entries.insert(key, entry);
                true
            }
        }
    }

    pub(crate) fn settled_entry(
        status: QueryStatus,
        data: Option<NotesPage>,
        error: Option<String>,
        updated_ms: i64,
    ) -> QueryEntry {
        QueryEntry {
            status,
            data,
            error,
            updated_ms,
            failure_count: 0,
            invalidated: false,
            in_flight: None,
        }
    }
}
