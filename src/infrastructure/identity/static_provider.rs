//! Fixed-answer identity provider for tests and local development

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::domain::{DomainError, IdentityProvider};

#[derive(Debug, Clone)]
enum StaticAnswer {
    Accept,
    Reject,
    Fail(String),
}

/// Identity provider that gives the same answer to every credential
///
/// Counts calls so tests can assert whether a request reached the provider.
#[derive(Debug)]
pub struct StaticIdentityProvider {
    answer: StaticAnswer,
    calls: AtomicUsize,
}

impl StaticIdentityProvider {
    fn with_answer(answer: StaticAnswer) -> Self {
        Self {
            answer,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn accept_all() -> Self {
        Self::with_answer(StaticAnswer::Accept)
    }

    pub fn reject_all() -> Self {
        Self::with_answer(StaticAnswer::Reject)
    }

    /// Every call fails as if the provider were unreachable
    pub fn failing(message: impl Into<String>) -> Self {
        Self::with_answer(StaticAnswer::Fail(message.into()))
    }

    /// Number of `authenticate` calls served so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IdentityProvider for StaticIdentityProvider {
    async fn authenticate(&self, _account: &str, _api_key: &str) -> Result<bool, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        match &self.answer {
            StaticAnswer::Accept => Ok(true),
            StaticAnswer::Reject => Ok(false),
            StaticAnswer::Fail(message) => Err(DomainError::provider("static", message.clone())),
        }
    }

    fn name(&self) -> &'static str {
        "static"
    }
}
