pub mod config;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;

use services::DocumentQuery;
use std::sync::Arc;

/// Shared application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub document_query: Arc<dyn DocumentQuery>,
}

impl AppState {
    pub fn new(document_query: Arc<dyn DocumentQuery>) -> Self {
        Self { document_query }
    }
}
