pub mod error;
pub mod pagination;
pub mod repo;
pub mod service;
