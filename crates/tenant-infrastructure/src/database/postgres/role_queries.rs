//! Role statements, generic over the executor.

use sqlx::{FromRow, PgExecutor};
use uuid::Uuid;

use tenant_core::domain::{DefaultRole, Role};

#[derive(Debug, FromRow)]
pub struct RoleRow {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub tenant_id: Uuid,
}

impl From<RoleRow> for Role {
    fn from(row: RoleRow) -> Self {
        Role {
            id: row.id,
            name: row.name,
            description: row.description,
            tenant_id: row.tenant_id,
        }
    }
}

/// Inserts every [`DefaultRole`] for `tenant_id` in a single statement.
pub async fn insert_default_roles<'e, E>(executor: E, tenant_id: Uuid) -> Result<Vec<RoleRow>, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    let names: Vec<String> = DefaultRole::ALL.iter().map(|r| r.as_str().to_string()).collect();
    let descriptions: Vec<String> = DefaultRole::ALL
        .iter()
        .map(|r| r.description().to_string())
        .collect();

    sqlx::query_as::<_, RoleRow>(
        r#"
        INSERT INTO roles (name, description, tenant_id)
        SELECT r.name, r.description, $3
        FROM UNNEST($1::text[], $2::text[]) AS r(name, description)
        RETURNING id, name, description, tenant_id
        "#,
    )
    .bind(names)
    .bind(descriptions)
    .bind(tenant_id)
    .fetch_all(executor)
    .await
}

pub async fn list_roles_for_tenant<'e, E>(executor: E, tenant_id: Uuid) -> Result<Vec<RoleRow>, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query_as::<_, RoleRow>(
        r#"
        SELECT id, name, description, tenant_id
        FROM roles
        WHERE tenant_id = $1
        ORDER BY name
        "#,
    )
    .bind(tenant_id)
    .fetch_all(executor)
    .await
}
