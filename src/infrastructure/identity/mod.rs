//! Identity provider implementations

pub mod http_client;
mod rackspace;
mod static_provider;

pub use http_client::{HttpClient, HttpClientTrait};
pub use rackspace::{DEFAULT_IDENTITY_ENDPOINT, RackspaceIdentityProvider};
pub use static_provider::StaticIdentityProvider;
