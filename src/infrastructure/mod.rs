//! Infrastructure layer - External service implementations

pub mod identity;
pub mod key_cache;
pub mod logging;
pub mod observability;
pub mod services;
