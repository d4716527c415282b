//! Domain services behind the HTTP handlers

pub mod catalog;
pub mod gallery;
pub mod site_config;

pub use catalog::{CatalogError, CatalogResult, CatalogService};
pub use site_config::ConfigService;
