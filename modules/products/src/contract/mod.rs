pub mod client;
pub mod error;
pub mod model;

pub use client::ProductsApi;
pub use error::ProductsError;
pub use model::{NewProduct, PageRequest, PaginationMeta, Product, ProductPage, ProductPatch};
