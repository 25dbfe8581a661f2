//! Repository traits (ports)

pub mod tenant_store;

pub use tenant_store::TenantStore;

#[cfg(test)]
pub use tenant_store::MockTenantStore;
