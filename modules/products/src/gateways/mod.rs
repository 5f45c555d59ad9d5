pub mod local;
pub mod rest;

pub use local::ProductsLocalClient;
pub use rest::RestProductsClient;
