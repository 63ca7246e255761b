//! Validation decision types

use std::fmt;

/// Decision returned for a single validation request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationResult {
    Valid,
    Invalid,
}

impl ValidationResult {
    pub fn is_valid(self) -> bool {
        matches!(self, Self::Valid)
    }
}

/// How a decision was reached
///
/// Only used for logging and metrics; each outcome maps to exactly one
/// `ValidationResult`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationOutcome {
    /// Served from the key cache without contacting the identity provider
    CacheHit,
    /// Accepted by the identity provider and admitted into the cache
    Confirmed,
    /// Explicitly rejected by the identity provider
    Rejected,
    /// The identity provider could not be consulted
    ProviderError,
}

impl ValidationOutcome {
    pub fn result(self) -> ValidationResult {
        match self {
            Self::CacheHit | Self::Confirmed => ValidationResult::Valid,
            Self::Rejected | Self::ProviderError => ValidationResult::Invalid,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::CacheHit => "cache_hit",
            Self::Confirmed => "confirmed",
            Self::Rejected => "rejected",
            Self::ProviderError => "provider_error",
        }
    }
}

impl fmt::Display for ValidationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
