//! Identity domain - the remote authority that accepts or rejects credentials

mod provider;

pub use provider::IdentityProvider;

#[cfg(test)]
pub use provider::MockIdentityProvider;
