//! PostgreSQL repository implementations

pub mod tenant_queries;
pub mod role_queries;
pub mod tenant_store_impl;

pub use tenant_store_impl::PgTenantStore;
