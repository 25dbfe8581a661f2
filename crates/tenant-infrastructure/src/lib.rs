//! # Tenant Infrastructure
//! 
//! PostgreSQL, identity service, and secret store adapters.

pub mod database;
pub mod identity;
pub mod secrets;

pub use database::{create_pool, run_migrations, PgTenantStore};
pub use identity::HttpIdentityClient;
pub use secrets::{EnvSecretProvider, SecretError, SecretProvider, VaultSecretProvider};
