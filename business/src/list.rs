//! List loader: fills a table body from a filtered collection request.
//!
//! Each load synchronously swaps the body to a loading placeholder, issues
//! exactly one list request with the current filter snapshot and then shows
//! either the rows (server order), an empty placeholder or a failure
//! placeholder. Errors stop here: they are logged and rendered inline.
//!
//! Overlapping loads are tolerated because every load rewrites the whole
//! body. With [`LoadOrdering::LastResolved`] the response that arrives last
//! wins even if it belongs to an older load. [`LoadOrdering::LatestIssued`]
//! discards responses from superseded loads instead.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use serde::Deserialize;

use crate::filter::{FilterForm, SharedFilters};
use crate::http::{Client, RequestError};
use crate::locked;
use crate::resource::{LOADING_TEXT, Resource};
use crate::view::{SharedTable, TableBody};

/// How overlapping loads of the same table are reconciled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LoadOrdering {
    /// The last response to resolve wins.
    #[default]
    LastResolved,
    /// Only the most recently issued load may write the table.
    LatestIssued,
}

/// What a single load did to the table.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    Rows(usize),
    Empty,
    Failed(RequestError),
    /// The response belonged to a superseded load and was dropped.
    Stale,
}

pub struct ListLoader<R: Resource> {
    client: Client,
    table: SharedTable<R>,
    filters: SharedFilters,
    ordering: LoadOrdering,
    generation: AtomicU64,
    total: Mutex<Option<u64>>,
    applied: Mutex<FilterForm>,
}

impl<R: Resource> ListLoader<R> {
    pub fn new(client: Client, ordering: LoadOrdering) -> Self {
        Self {
            client,
            table: TableBody::shared(R::COLUMNS),
            filters: Arc::new(Mutex::new(R::filter_form())),
            ordering,
            generation: AtomicU64::new(0),
            total: Mutex::new(None),
            applied: Mutex::new(R::filter_form()),
        }
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn table(&self) -> SharedTable<R> {
        Arc::clone(&self.table)
    }

    pub fn filters(&self) -> SharedFilters {
        Arc::clone(&self.filters)
    }

    pub fn ordering(&self) -> LoadOrdering {
        self.ordering
    }

    /// Copy of the current table body.
    pub fn snapshot(&self) -> TableBody<R> {
        locked(&self.table).clone()
    }

    /// Server-reported total of the last successful envelope response.
    pub fn total(&self) -> Option<u64> {
        *locked(&self.total)
    }

    /// Filters of the load whose result the table currently shows.
    ///
    /// Unlike [`ListLoader::filters`] this ignores input typed since then.
    pub fn applied_filters(&self) -> FilterForm {
        locked(&self.applied).clone()
    }

    fn request_path(form: &FilterForm) -> String {
        let query = form.build_query();
        if query.is_empty() {
            R::LIST_PATH.to_owned()
        } else {
            format!("{}?{query}", R::LIST_PATH)
        }
    }

    pub async fn load(&self) -> LoadOutcome {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        locked(&self.table).show_placeholder(LOADING_TEXT);

        let form = locked(&self.filters).clone();
        let path = Self::request_path(&form);
        let result = self.client.list::<R>(&path).await;

        if self.ordering == LoadOrdering::LatestIssued
            && generation != self.generation.load(Ordering::SeqCst)
        {
            log::debug!("dropping stale response for {path} (generation {generation})");
            return LoadOutcome::Stale;
        }

        *locked(&self.applied) = form;
        let mut table = locked(&self.table);
        match result {
            Ok(listing) if listing.is_empty() => {
                *locked(&self.total) = listing.total;
                table.show_placeholder(R::EMPTY_TEXT);
                LoadOutcome::Empty
            }
            Ok(listing) => {
                *locked(&self.total) = listing.total;
                let count = listing.len();
                table.set_rows(listing.items);
                LoadOutcome::Rows(count)
            }
            Err(err) => {
                log::error!("failed to load {path}: {err} (status {:?})", err.status);
                table.show_placeholder(R::FAILED_TEXT);
                LoadOutcome::Failed(err)
            }
        }
    }
}
