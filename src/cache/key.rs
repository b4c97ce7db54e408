use crate::api::FetchNotesParams;
use serde::{Deserialize, Serialize};

pub(crate) const NOTES_RESOURCE: &str = "notes";

/// Fixed listing page size.
pub(crate) const PER_PAGE: u32 = 12;

/// Identity of a cached request: `(resource, page, search)`.
///
/// Equal keys share one cache entry. An empty `search` means "unfiltered".
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) struct QueryKey {
    pub resource: String,
    pub page: u32,
    pub search: String,
}

impl QueryKey {
    pub fn notes(page: u32, search: impl Into<String>) -> Self {
        Self {
            resource: NOTES_RESOURCE.to_string(),
            page: page.max(1),
            search: search.into(),
        }
    }

    pub fn fetch_params(&self) -> FetchNotesParams {
        FetchNotesParams {
            page: self.page,
            per_page: PER_PAGE,
            search: if self.search.is_empty() {
                None
            } else {
                Some(self.search.clone())
            },
        }
    }
}

impl std::fmt::Display for QueryKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}, {:?}]", self.resource, self.page, self.search)
    }
}
