//! Async front of the listing state: issues requests through `ProductsApi`
//! and feeds pending/fulfilled/rejected actions into the reducer.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use products::contract::{
    client::ProductsApi,
    model::{PageRequest, Product},
};
use tracing::{debug, instrument, warn};
use uuid::Uuid;

use crate::error::StoreError;
use crate::state::{Action, ListingState};
use crate::validation::{validate_form, ProductForm};
use crate::view::{SortKey, ViewSummary};

const LOAD_FAILED: &str = "Failed to fetch products";
const CREATE_FAILED: &str = "Failed to create product";
const UPDATE_FAILED: &str = "Failed to update product";
const DELETE_FAILED: &str = "Failed to delete product";
const DETAIL_FAILED: &str = "Failed to load product";

/// Whether a finished load reached the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Applied,
    /// A newer load was issued meanwhile; this response was dropped.
    Stale,
}

pub struct ListingStore {
    api: Arc<dyn ProductsApi>,
    // Never held across an await
    state: Mutex<ListingState>,
    generation: AtomicU64,
}

impl ListingStore {
    pub fn new(api: Arc<dyn ProductsApi>) -> Self {
        Self {
            api,
            state: Mutex::new(ListingState::default()),
            generation: AtomicU64::new(0),
        }
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> ListingState {
        self.state.lock().clone()
    }

    pub fn dispatch(&self, action: Action) -> bool {
        self.state.lock().apply(action)
    }

    /// Fetch one page and replace the loaded items with it.
    #[instrument(name = "products_store.load", skip(self))]
    pub async fn load(&self, page: u64, limit: u64) -> Result<LoadOutcome, StoreError> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.dispatch(Action::LoadPending { generation });

        let req = PageRequest::new(to_i64(page), to_i64(limit));
        match self.api.list_products(req).await {
            Ok(page) => {
                debug!(generation, items = page.items.len(), "load finished");
                Ok(self.outcome(self.dispatch(Action::LoadFulfilled { generation, page })))
            }
            Err(e) => {
                let err = StoreError::from(e);
                warn!(generation, error = %err, "load failed");
                let applied = self.dispatch(Action::LoadRejected {
                    generation,
                    error: err.banner(LOAD_FAILED),
                });
                if applied {
                    Err(err)
                } else {
                    Ok(LoadOutcome::Stale)
                }
            }
        }
    }

    /// Reload using the page and page size held in the UI state.
    pub async fn reload(&self) -> Result<LoadOutcome, StoreError> {
        let (page, limit) = {
            let s = self.state.lock();
            (s.ui.current_page, s.ui.items_per_page)
        };
        self.load(page, limit).await
    }

    fn outcome(&self, applied: bool) -> LoadOutcome {
        if applied {
            LoadOutcome::Applied
        } else {
            LoadOutcome::Stale
        }
    }

    /// Create from form input. A form failing the pre-flight check is
    /// reported without any request being made.
    #[instrument(name = "products_store.create", skip(self, form))]
    pub async fn create(&self, form: ProductForm) -> Result<Product, StoreError> {
        validate_form(&form)?;
        self.dispatch(Action::CreatePending);
        match self.api.create_product(form.into()).await {
            Ok(product) => {
                self.dispatch(Action::CreateFulfilled(product.clone()));
                Ok(product)
            }
            Err(e) => Err(self.reject(e.into(), CREATE_FAILED, Action::CreateRejected)),
        }
    }

    #[instrument(name = "products_store.update", skip(self, form), fields(product_id = %id))]
    pub async fn update(&self, id: Uuid, form: ProductForm) -> Result<Product, StoreError> {
        validate_form(&form)?;
        self.dispatch(Action::UpdatePending);
        match self.api.update_product(id, form.into()).await {
            Ok(product) => {
                self.dispatch(Action::UpdateFulfilled(product.clone()));
                Ok(product)
            }
            Err(e) => Err(self.reject(e.into(), UPDATE_FAILED, Action::UpdateRejected)),
        }
    }

    #[instrument(name = "products_store.delete", skip(self), fields(product_id = %id))]
    pub async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        self.dispatch(Action::DeletePending);
        match self.api.delete_product(id).await {
            Ok(()) => {
                self.dispatch(Action::DeleteFulfilled(id));
                Ok(())
            }
            Err(e) => Err(self.reject(e.into(), DELETE_FAILED, Action::DeleteRejected)),
        }
    }

    /// Fetch one product into `current` (edit screen).
    #[instrument(name = "products_store.load_detail", skip(self), fields(product_id = %id))]
    pub async fn load_detail(&self, id: Uuid) -> Result<Product, StoreError> {
        self.dispatch(Action::DetailPending);
        match self.api.get_product(id).await {
            Ok(product) => {
                self.dispatch(Action::DetailFulfilled(product.clone()));
                Ok(product)
            }
            Err(e) => Err(self.reject(e.into(), DETAIL_FAILED, Action::DetailRejected)),
        }
    }

    fn reject(&self, err: StoreError, fallback: &str, action: fn(String) -> Action) -> StoreError {
        warn!(error = %err, "{fallback}");
        self.dispatch(action(err.banner(fallback)));
        err
    }

    // --- UI inputs ---

    pub fn set_search_term(&self, term: impl Into<String>) {
        self.dispatch(Action::SetSearchTerm(term.into()));
    }

    pub fn set_category_filter(&self, category: impl Into<String>) {
        self.dispatch(Action::SetCategoryFilter(category.into()));
    }

    pub fn set_sort_key(&self, key: SortKey) {
        self.dispatch(Action::SetSortKey(key));
    }

    pub fn set_page(&self, page: u64) {
        self.dispatch(Action::SetPage(page));
    }

    pub fn set_items_per_page(&self, n: u64) {
        self.dispatch(Action::SetItemsPerPage(n));
    }

    pub fn clear_filters(&self) {
        self.dispatch(Action::ClearFilters);
    }

    pub fn dismiss_error(&self) {
        self.dispatch(Action::DismissError);
    }

    // --- derived reads ---

    pub fn view(&self) -> Vec<Product> {
        self.state.lock().view()
    }

    pub fn categories(&self) -> Vec<String> {
        self.state.lock().categories()
    }

    pub fn summary(&self) -> ViewSummary {
        self.state.lock().summary()
    }
}

fn to_i64(n: u64) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}
