// ============================================================================
// Tenant Infrastructure - Tenant Queries
// File: crates/tenant-infrastructure/src/database/postgres/tenant_queries.rs
// ============================================================================
//! Tenant statements, generic over the executor.
//!
//! Every function accepts any `PgExecutor`: `&PgPool` for plain reads or
//! `&mut PgConnection` borrowed from an open transaction for writes.

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgExecutor};
use uuid::Uuid;

use tenant_core::domain::Tenant;

// Internal row type for SQLx mapping
#[derive(Debug, FromRow)]
pub struct TenantRow {
    pub tenant_id: Uuid,
    pub name: String,
    pub domain: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<TenantRow> for Tenant {
    fn from(row: TenantRow) -> Self {
        Tenant {
            tenant_id: row.tenant_id,
            name: row.name,
            domain: row.domain,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

pub async fn insert_tenant<'e, E>(
    executor: E,
    name: &str,
    domain: Option<&str>,
) -> Result<TenantRow, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query_as::<_, TenantRow>(
        r#"
        INSERT INTO tenants (name, domain)
        VALUES ($1, $2)
        RETURNING tenant_id, name, domain, created_at, updated_at
        "#,
    )
    .bind(name)
    .bind(domain)
    .fetch_one(executor)
    .await
}

pub async fn find_tenant_by_name<'e, E>(executor: E, name: &str) -> Result<Option<TenantRow>, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query_as::<_, TenantRow>(
        r#"
        SELECT tenant_id, name, domain, created_at, updated_at
        FROM tenants
        WHERE name = $1
        "#,
    )
    .bind(name)
    .fetch_optional(executor)
    .await
}
