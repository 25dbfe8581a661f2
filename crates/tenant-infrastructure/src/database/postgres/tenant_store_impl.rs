// ============================================================================
// Tenant Infrastructure - PostgreSQL Tenant Store
// File: crates/tenant-infrastructure/src/database/postgres/tenant_store_impl.rs
// ============================================================================

use async_trait::async_trait;
use sqlx::{PgConnection, PgPool};
use tracing::{error, info, warn};
use uuid::Uuid;

use tenant_core::domain::{DefaultRole, NewTenant, Role, Tenant};
use tenant_core::error::{StoreOperation, TenantError};
use tenant_core::repositories::TenantStore;

use super::{role_queries, tenant_queries};

pub struct PgTenantStore {
    pool: PgPool,
}

impl PgTenantStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Maps a failed statement to the domain taxonomy. Only a unique violation
/// on the tenant insert is a conflict; everything else is a storage failure.
fn classify(operation: StoreOperation, name: &str, e: sqlx::Error) -> TenantError {
    if operation == StoreOperation::InsertTenant {
        if let sqlx::Error::Database(db_err) = &e {
            if db_err.is_unique_violation() {
                return TenantError::Conflict(name.to_string());
            }
        }
    }
    error!("Database error during {}: {}", operation, e);
    TenantError::storage(operation, e)
}

/// Both inserts on the same connection of an open transaction.
async fn write_tenant_with_roles(
    conn: &mut PgConnection,
    new_tenant: &NewTenant,
) -> Result<Tenant, TenantError> {
    let tenant: Tenant = tenant_queries::insert_tenant(
        &mut *conn,
        &new_tenant.name,
        new_tenant.domain.as_deref(),
    )
    .await
    .map_err(|e| classify(StoreOperation::InsertTenant, &new_tenant.name, e))?
    .into();

    let roles = role_queries::insert_default_roles(&mut *conn, tenant.tenant_id)
        .await
        .map_err(|e| classify(StoreOperation::InsertRoles, &new_tenant.name, e))?;

    if roles.len() != DefaultRole::ALL.len() {
        return Err(TenantError::storage(
            StoreOperation::InsertRoles,
            format!("expected {} default roles, inserted {}", DefaultRole::ALL.len(), roles.len()),
        ));
    }

    Ok(tenant)
}

#[async_trait]
impl TenantStore for PgTenantStore {
    async fn create_tenant_and_default_roles(&self, new_tenant: &NewTenant) -> Result<Tenant, TenantError> {
        info!("Creating tenant: {}", new_tenant.name);

        // Dropping `tx` without commit (cancellation, panic) rolls back as well.
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| classify(StoreOperation::Begin, &new_tenant.name, e))?;

        match write_tenant_with_roles(&mut *tx, new_tenant).await {
            Ok(tenant) => {
                tx.commit()
                    .await
                    .map_err(|e| classify(StoreOperation::Commit, &new_tenant.name, e))?;
                info!("Tenant created successfully: {}", tenant.tenant_id);
                Ok(tenant)
            }
            Err(err) => {
                if let Err(rollback_err) = tx.rollback().await {
                    warn!(
                        "Rollback after failed tenant creation also failed ({}): {}",
                        StoreOperation::Rollback,
                        rollback_err
                    );
                }
                Err(err)
            }
        }
    }

    async fn get_tenant_by_name(&self, name: &str) -> Result<Tenant, TenantError> {
        tenant_queries::find_tenant_by_name(&self.pool, name)
            .await
            .map_err(|e| classify(StoreOperation::FindByName, name, e))?
            .map(Tenant::from)
            .ok_or_else(|| TenantError::NotFound(name.to_string()))
    }

    async fn list_roles(&self, tenant_id: &Uuid) -> Result<Vec<Role>, TenantError> {
        let rows = role_queries::list_roles_for_tenant(&self.pool, *tenant_id)
            .await
            .map_err(|e| classify(StoreOperation::ListRoles, &tenant_id.to_string(), e))?;
        Ok(rows.into_iter().map(Role::from).collect())
    }

    async fn ping(&self) -> Result<(), TenantError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(|e| classify(StoreOperation::Ping, "", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_database_error_is_storage_failure() {
        let err = classify(StoreOperation::InsertTenant, "Acme", sqlx::Error::PoolTimedOut);
        assert!(matches!(
            err,
            TenantError::StorageFailure {
                operation: StoreOperation::InsertTenant,
                ..
            }
        ));
    }

    #[test]
    fn test_commit_error_keeps_operation() {
        let err = classify(StoreOperation::Commit, "Acme", sqlx::Error::PoolClosed);
        match err {
            TenantError::StorageFailure { operation, source } => {
                assert_eq!(operation, StoreOperation::Commit);
                assert!(source.to_string().contains("closed"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
