//! Domain layer - Core validation types and collaborator traits

pub mod error;
pub mod identity;
pub mod key_cache;
pub mod validation;

pub use error::DomainError;
pub use identity::IdentityProvider;
pub use key_cache::{KeyCache, KeyCacheEntry};
pub use validation::{ValidationOutcome, ValidationResult};
