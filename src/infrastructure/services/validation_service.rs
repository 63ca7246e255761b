//! Key validation service
//!
//! Decides whether an (account, API key) pair is valid: the key cache is
//! consulted first, the identity provider only on a miss, and only accepted
//! credentials are admitted into the cache.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::{IdentityProvider, KeyCache, ValidationOutcome, ValidationResult};
use crate::infrastructure::observability::record_validation;

/// Validation procedure shared by all request handlers
pub struct KeyValidationService {
    cache: Arc<dyn KeyCache>,
    provider: Arc<dyn IdentityProvider>,
}

impl KeyValidationService {
    pub fn new(cache: Arc<dyn KeyCache>, provider: Arc<dyn IdentityProvider>) -> Self {
        Self { cache, provider }
    }

    pub fn cache(&self) -> &Arc<dyn KeyCache> {
        &self.cache
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    /// Validate a credential. Callers must reject empty inputs beforehand.
    pub async fn validate(&self, account: &str, api_key: &str) -> ValidationResult {
        self.validate_detailed(account, api_key).await.result()
    }

    /// Same decision as [`validate`](Self::validate), reporting how it was reached
    pub async fn validate_detailed(&self, account: &str, api_key: &str) -> ValidationOutcome {
        let outcome = self.decide(account, api_key).await;
        record_validation(outcome);
        outcome
    }

    async fn decide(&self, account: &str, api_key: &str) -> ValidationOutcome {
        if self.cache.contains(account, api_key).await {
            info!(account = %account, "Cached API key successfully validated.");
            return ValidationOutcome::CacheHit;
        }

        match self.provider.authenticate(account, api_key).await {
            Ok(true) => {
                self.cache.add(account, api_key).await;
                info!(account = %account, "API key successfully validated and cached.");
                ValidationOutcome::Confirmed
            }
            Ok(false) => {
                info!(
                    account = %account,
                    provider = self.provider.name(),
                    "Identity provider rejected API key."
                );
                ValidationOutcome::Rejected
            }
            Err(e) => {
                // Fail closed: an unreachable provider is indistinguishable from a rejection
                warn!(
                    account = %account,
                    provider = self.provider.name(),
                    error = %e,
                    "Identity provider error."
                );
                ValidationOutcome::ProviderError
            }
        }
    }
}
