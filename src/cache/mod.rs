mod client;
mod key;
mod snapshot;

pub(crate) use client::{FetchPlan, QueryClient, QueryEntry, QueryOptions, QueryStatus, Resolution};
pub(crate) use key::{QueryKey, NOTES_RESOURCE, PER_PAGE};
pub(crate) use snapshot::{DehydratedQuery, DehydratedState, SnapshotError};
