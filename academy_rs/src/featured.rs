//! Featured content loading.
//!
//! A section fetches its promotional rows once when it mounts. A failed fetch
//! is logged and the section behaves as if the list were empty; an empty list
//! hides the section entirely.

use std::cell::{Cell, RefCell};

use tracing::{debug, error};

use crate::schema::{SpecialLecture, TableRow, columns};
use crate::table::{Select, TableClient, fetch_rows};

/// Lifecycle of a one-shot fetch.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    Loading,
    Loaded(Vec<T>),
    Failed(String),
}

impl<T> LoadState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    /// Items to render. Empty while loading and after a failure.
    pub fn items(&self) -> &[T] {
        match self {
            LoadState::Loaded(items) => items,
            LoadState::Loading | LoadState::Failed(_) => &[],
        }
    }

    /// Whether the enclosing section renders at all.
    ///
    /// Loading shows a placeholder; a loaded but empty list and a failure both
    /// render nothing.
    pub fn renders_section(&self) -> bool {
        match self {
            LoadState::Loading => true,
            LoadState::Loaded(items) => !items.is_empty(),
            LoadState::Failed(_) => false,
        }
    }
}

/// Featured and upcoming lectures, soonest first.
pub fn featured_lectures_query() -> Select {
    Select::rows::<SpecialLecture>()
        .eq(columns::IS_FEATURED, true)
        .eq(columns::IS_UPCOMING, true)
        .order_by(columns::LECTURE_DATE, true)
}

/// Fetches one list per instance.
pub struct FeaturedLoader<R> {
    client: TableClient,
    query: Select,
    started: Cell<bool>,
    state: RefCell<LoadState<R>>,
}

impl FeaturedLoader<SpecialLecture> {
    /// Loader for the special lectures strip.
    pub fn lectures(client: TableClient) -> Self {
        Self::new(client, featured_lectures_query())
    }
}

impl<R: TableRow + Clone> FeaturedLoader<R> {
    pub fn new(client: TableClient, query: Select) -> Self {
        Self {
            client,
            query,
            started: Cell::new(false),
            state: RefCell::new(LoadState::Loading),
        }
    }

    pub fn state(&self) -> LoadState<R> {
        self.state.borrow().clone()
    }

    /// Issue the fetch. Only the first call does any work; later calls return `None`.
    pub async fn load(&self) -> Option<LoadState<R>> {
        if self.started.replace(true) {
            debug!(table = self.query.table, "featured content already requested");
            return None;
        }
        let state = match fetch_rows::<R>(self.client.as_ref(), &self.query).await {
            Ok(items) => {
                debug!(table = self.query.table, count = items.len(), "featured content loaded");
                LoadState::Loaded(items)
            }
            Err(err) => {
                error!(table = self.query.table, error = %err, "error fetching featured content");
                LoadState::Failed(err.to_string())
            }
        };
        *self.state.borrow_mut() = state.clone();
        Some(state)
    }
}
