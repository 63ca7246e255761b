//! Application services

mod validation_service;

pub use validation_service::KeyValidationService;
