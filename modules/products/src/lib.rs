// === PUBLIC CONTRACT ===
pub mod contract;

// Re-export the public contract components
pub use contract::{client, error, model};

// === ERROR CATALOG ===
pub mod errors;

// === MODULE DEFINITION ===
pub mod module;
pub use module::Products;

pub mod config;
pub use config::ProductsConfig;

// === GATEWAYS ===
// The REST gateway is how out-of-process clients reach the service.
pub mod gateways;
pub use gateways::{ProductsLocalClient, RestProductsClient};

// === INTERNAL MODULES ===
// Exposed only for tests; use `contract` and the gateways from other crates.
#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod infra;
