//! Client-side listing store for the product catalog.
//!
//! Holds the currently fetched page as explicit state, updated only through
//! [`ListingState::apply`], and derives the filtered/sorted view from it
//! without touching the network. All backend traffic goes through the
//! `products::contract::ProductsApi` trait.

pub mod error;
pub mod state;
pub mod store;
pub mod validation;
pub mod view;

pub use error::StoreError;
pub use state::{Action, Generation, ListingState, UiState};
pub use store::{ListingStore, LoadOutcome};
pub use validation::{validate_form, ProductForm, FORM_ERROR};
pub use view::{categories, derive_view, SortKey, ViewSummary};
