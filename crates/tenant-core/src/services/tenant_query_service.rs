//! Read-only tenant lookups

use std::sync::Arc;

use tracing::debug;

use crate::domain::{Role, Tenant};
use crate::error::TenantError;
use crate::repositories::TenantStore;

pub struct TenantQueryService {
    store: Arc<dyn TenantStore>,
}

impl TenantQueryService {
    pub fn new(store: Arc<dyn TenantStore>) -> Self {
        Self { store }
    }

    /// GetTenantByName. Blank names never reach the store.
    pub async fn get_tenant_by_name(&self, name: &str) -> Result<Tenant, TenantError> {
        let name = Self::require_name(name)?;
        debug!("Looking up tenant by name: {}", name);
        self.store.get_tenant_by_name(name).await
    }

    pub async fn get_tenant_roles(&self, name: &str) -> Result<(Tenant, Vec<Role>), TenantError> {
        let tenant = self.get_tenant_by_name(name).await?;
        let roles = self.store.list_roles(&tenant.tenant_id).await?;
        Ok((tenant, roles))
    }

    /// Readiness probe of the underlying store.
    pub async fn check_store(&self) -> Result<(), TenantError> {
        self.store.ping().await
    }

    fn require_name(name: &str) -> Result<&str, TenantError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(TenantError::InvalidInput("Tenant name is required".to_string()));
        }
        Ok(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{is_default_role_set, NewTenant};
    use crate::error::StoreOperation;
    use crate::repositories::MockTenantStore;
    use crate::testing::InMemoryTenantStore;

    #[tokio::test]
    async fn test_get_tenant_by_name_returns_recorded_values() {
        let store = Arc::new(InMemoryTenantStore::new());
        let created = store
            .create_tenant_and_default_roles(&NewTenant::new("Acme", Some("acme.com")))
            .await
            .unwrap();
        let service = TenantQueryService::new(store);

        let found = service.get_tenant_by_name("Acme").await.unwrap();
        assert_eq!(found, created);

        let again = service.get_tenant_by_name("Acme").await.unwrap();
        assert_eq!(again, found);
    }

    #[tokio::test]
    async fn test_get_tenant_by_name_not_found() {
        let service = TenantQueryService::new(Arc::new(InMemoryTenantStore::new()));
        let err = service.get_tenant_by_name("does-not-exist").await.unwrap_err();
        assert!(matches!(err, TenantError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_blank_name_never_reaches_store() {
        let mut store = MockTenantStore::new();
        store.expect_get_tenant_by_name().never();
        let service = TenantQueryService::new(Arc::new(store));

        let err = service.get_tenant_by_name("  ").await.unwrap_err();
        assert!(matches!(err, TenantError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_storage_failure_is_distinct_from_not_found() {
        let mut store = MockTenantStore::new();
        store
            .expect_get_tenant_by_name()
            .returning(|_| Err(TenantError::storage(StoreOperation::FindByName, "pool timed out")));
        let service = TenantQueryService::new(Arc::new(store));

        let err = service.get_tenant_by_name("Acme").await.unwrap_err();
        assert!(matches!(
            err,
            TenantError::StorageFailure {
                operation: StoreOperation::FindByName,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_get_tenant_roles() {
        let store = Arc::new(InMemoryTenantStore::new());
        let created = store
            .create_tenant_and_default_roles(&NewTenant::new("Acme", None))
            .await
            .unwrap();
        let service = TenantQueryService::new(store);

        let (tenant, roles) = service.get_tenant_roles("Acme").await.unwrap();
        assert_eq!(tenant.tenant_id, created.tenant_id);
        assert!(is_default_role_set(created.tenant_id, &roles));
    }
}
