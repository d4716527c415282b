//! HTTP backend for the dealership website
//!
//! Serves the vehicle catalog and site settings, staff login and user
//! administration, image migration and payment checkout links.

pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod payments;
pub mod repositories;
pub mod routes;
pub mod seed;
pub mod services;
pub mod state;

#[cfg(test)]
mod testing;

pub use routes::create_router;
pub use state::AppState;
