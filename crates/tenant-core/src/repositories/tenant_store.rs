//! Tenant store trait (port)

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{NewTenant, Role, Tenant};
use crate::error::TenantError;

/// Relational persistence for tenants and their roles.
///
/// `create_tenant_and_default_roles` is one atomic unit: either the tenant
/// and both default roles are committed, or nothing is. A duplicate name is
/// reported as `TenantError::Conflict`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TenantStore: Send + Sync {
    async fn create_tenant_and_default_roles(&self, new_tenant: &NewTenant) -> Result<Tenant, TenantError>;

    /// Misses are `TenantError::NotFound`, never a storage failure.
    async fn get_tenant_by_name(&self, name: &str) -> Result<Tenant, TenantError>;

    async fn list_roles(&self, tenant_id: &Uuid) -> Result<Vec<Role>, TenantError>;

    async fn ping(&self) -> Result<(), TenantError>;
}
