//! Application state shared across handlers

use auth::AuthService;
use std::sync::Arc;

use crate::payments::PaymentLinkIssuer;
use crate::services::{CatalogService, ConfigService};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub auth: AuthService,
    pub catalog: CatalogService,
    pub site_config: ConfigService,
    pub payments: Arc<dyn PaymentLinkIssuer>,
}
