//! Remote service clients (ports)

pub mod identity_client;

pub use identity_client::IdentityClient;

#[cfg(test)]
pub use identity_client::MockIdentityClient;
