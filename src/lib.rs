pub mod catalog;
pub mod config;
pub mod generator;
pub mod indexer;
pub mod model;
pub mod normalizer;
pub mod search;
pub mod server;
pub mod states;
pub mod templates;

// Re-export main types
pub use catalog::{Catalog, CatalogCache};
pub use search::SearchEngine;
