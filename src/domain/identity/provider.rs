//! Identity provider trait

use async_trait::async_trait;

use crate::domain::DomainError;

#[cfg(test)]
use mockall::automock;

/// Authority that decides whether an API key belongs to an account
///
/// `Ok(true)` means the credential was accepted, `Ok(false)` an explicit
/// rejection. `Err` covers transport and protocol failures; callers fail
/// closed on it.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Authenticates the account with the given API key
    async fn authenticate(&self, account: &str, api_key: &str) -> Result<bool, DomainError>;

    /// Short provider name used in logs
    fn name(&self) -> &'static str;
}
