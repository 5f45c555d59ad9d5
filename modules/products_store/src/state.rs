//! Listing state and the reducer that is its only writer.

use products::contract::model::{PaginationMeta, Product, ProductPage};
use tracing::debug;
use uuid::Uuid;

use crate::view::{categories, derive_view, SortKey, ViewSummary};

/// Monotonic tag carried by each load request.
pub type Generation = u64;

const DEFAULT_ITEMS_PER_PAGE: u64 = 10;

/// Ephemeral UI inputs; never sent to the server except page/limit on load.
#[derive(Debug, Clone, PartialEq)]
pub struct UiState {
    pub search_term: String,
    pub category_filter: String,
    pub sort_key: SortKey,
    pub current_page: u64,
    pub items_per_page: u64,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            search_term: String::new(),
            category_filter: String::new(),
            sort_key: SortKey::default(),
            current_page: 1,
            items_per_page: DEFAULT_ITEMS_PER_PAGE,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListingState {
    /// Current page exactly as the server returned it, adjusted by local edits.
    pub items: Vec<Product>,
    pub pagination: PaginationMeta,
    /// Product opened for detail/edit.
    pub current: Option<Product>,
    pub loading: bool,
    pub error: Option<String>,
    pub ui: UiState,
    latest_load: Generation,
}

impl Default for ListingState {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            pagination: PaginationMeta {
                total_items: 0,
                total_pages: 1,
                current_page: 1,
                items_per_page: DEFAULT_ITEMS_PER_PAGE,
            },
            current: None,
            loading: false,
            error: None,
            ui: UiState::default(),
            latest_load: 0,
        }
    }
}

/// Every transition the state can make.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    LoadPending { generation: Generation },
    LoadFulfilled { generation: Generation, page: ProductPage },
    LoadRejected { generation: Generation, error: String },

    CreatePending,
    CreateFulfilled(Product),
    CreateRejected(String),

    UpdatePending,
    UpdateFulfilled(Product),
    UpdateRejected(String),

    DeletePending,
    DeleteFulfilled(Uuid),
    DeleteRejected(String),

    DetailPending,
    DetailFulfilled(Product),
    DetailRejected(String),

    SetSearchTerm(String),
    SetCategoryFilter(String),
    SetSortKey(SortKey),
    SetPage(u64),
    /// Also moves back to page 1.
    SetItemsPerPage(u64),
    ClearFilters,
    DismissError,
}

impl ListingState {
    /// Latest load generation seen by the reducer.
    pub fn latest_load(&self) -> Generation {
        self.latest_load
    }

    /// Apply one transition. Returns `false` when the action was discarded
    /// as a stale load response.
    pub fn apply(&mut self, action: Action) -> bool {
        match action {
            Action::LoadPending { generation } => {
                self.latest_load = self.latest_load.max(generation);
                self.start();
            }
            Action::LoadFulfilled { generation, page } => {
                if !self.is_latest(generation) {
                    return false;
                }
                self.loading = false;
                self.items = page.items;
                self.pagination = page.pagination;
            }
            Action::LoadRejected { generation, error } => {
                if !self.is_latest(generation) {
                    return false;
                }
                // Stale-but-visible: keep whatever was loaded before
                self.fail(error);
            }

            Action::CreatePending
            | Action::UpdatePending
            | Action::DeletePending
            | Action::DetailPending => self.start(),

            Action::CreateFulfilled(product) => {
                self.loading = false;
                self.items.insert(0, product);
                self.pagination = self
                    .pagination
                    .with_total(self.pagination.total_items.saturating_add(1));
            }
            Action::UpdateFulfilled(product) => {
                self.loading = false;
                if let Some(slot) = self.items.iter_mut().find(|p| p.id == product.id) {
                    *slot = product.clone();
                }
                if self.current.as_ref().is_some_and(|c| c.id == product.id) {
                    self.current = Some(product);
                }
            }
            Action::DeleteFulfilled(id) => {
                self.loading = false;
                // The server removed one row whether or not it was on this page
                self.items.retain(|p| p.id != id);
                self.pagination = self
                    .pagination
                    .with_total(self.pagination.total_items.saturating_sub(1));
                if self.current.as_ref().is_some_and(|c| c.id == id) {
                    self.current = None;
                }
            }
            Action::DetailFulfilled(product) => {
                self.loading = false;
                self.current = Some(product);
            }

            Action::CreateRejected(error)
            | Action::UpdateRejected(error)
            | Action::DeleteRejected(error)
            | Action::DetailRejected(error) => self.fail(error),

            Action::SetSearchTerm(term) => self.ui.search_term = term,
            Action::SetCategoryFilter(category) => self.ui.category_filter = category,
            Action::SetSortKey(key) => self.ui.sort_key = key,
            Action::SetPage(page) => self.ui.current_page = page.max(1),
            Action::SetItemsPerPage(n) => {
                self.ui.items_per_page = n.max(1);
                self.ui.current_page = 1;
            }
            Action::ClearFilters => {
                self.ui.search_term.clear();
                self.ui.category_filter.clear();
            }
            Action::DismissError => self.error = None,
        }
        true
    }

    fn is_latest(&self, generation: Generation) -> bool {
        if generation == self.latest_load {
            return true;
        }
        debug!(
            generation,
            latest = self.latest_load,
            "discarding stale load response"
        );
        false
    }

    fn start(&mut self) {
        self.loading = true;
        self.error = None;
    }

    fn fail(&mut self, error: String) {
        self.loading = false;
        self.error = Some(error);
    }

    /// Filtered and sorted projection of the loaded page.
    pub fn view(&self) -> Vec<Product> {
        derive_view(
            &self.items,
            &self.ui.search_term,
            &self.ui.category_filter,
            self.ui.sort_key,
        )
    }

    pub fn categories(&self) -> Vec<String> {
        categories(&self.items)
    }

    pub fn summary(&self) -> ViewSummary {
        ViewSummary {
            on_page: self.items.len(),
            filtered: self.view().len(),
            categories: self.categories().len(),
        }
    }

    /// True when search or category filtering is active.
    pub fn is_filtered(&self) -> bool {
        !self.ui.search_term.is_empty() || !self.ui.category_filter.is_empty()
    }
}
