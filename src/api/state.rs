//! Application state for shared services

use std::sync::Arc;

use crate::infrastructure::services::KeyValidationService;

/// Application state shared by both listeners
#[derive(Clone)]
pub struct AppState {
    pub validation_service: Arc<KeyValidationService>,
}

impl AppState {
    pub fn new(validation_service: Arc<KeyValidationService>) -> Self {
        Self { validation_service }
    }
}
