//! Request and response payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use tenant_core::domain::{AdministratorAccount, ProvisionTenantRequest, ProvisionedTenant, Role, Tenant};

/// Body of `POST /api/v1/tenants`. Missing fields default to empty and are
/// rejected by validation rather than by the JSON extractor.
#[derive(Deserialize)]
pub struct CreateTenantRequest {
    #[serde(default)]
    pub organization_name: String,
    #[serde(default)]
    pub organization_domain: Option<String>,
    #[serde(default)]
    pub admin_email: String,
    #[serde(default)]
    pub password_hash: String,
    #[serde(default)]
    pub admin_first_name: String,
    #[serde(default)]
    pub admin_last_name: String,
}

impl From<CreateTenantRequest> for ProvisionTenantRequest {
    fn from(req: CreateTenantRequest) -> Self {
        ProvisionTenantRequest {
            organization_name: req.organization_name,
            organization_domain: req.organization_domain,
            admin_email: req.admin_email,
            password_hash: req.password_hash,
            admin_first_name: req.admin_first_name,
            admin_last_name: req.admin_last_name,
        }
    }
}

/// Administrator projection as returned by the identity service. Echoed to
/// the caller of the create call only; never logged or persisted here.
#[derive(Serialize)]
pub struct AdminUserDto {
    pub id: String,
    pub email: String,
    pub password_hash: String,
    pub role_name: String,
    pub status: String,
    pub is_2fa_enabled: bool,
    pub totp_secret: String,
    pub tenant_id: String,
}

impl From<AdministratorAccount> for AdminUserDto {
    fn from(account: AdministratorAccount) -> Self {
        Self {
            id: account.id,
            email: account.email,
            password_hash: account.password_hash,
            role_name: account.role_name,
            status: account.status,
            is_2fa_enabled: account.is_2fa_enabled,
            totp_secret: account.totp_secret,
            tenant_id: account.tenant_id,
        }
    }
}

#[derive(Serialize)]
pub struct CreateTenantResponse {
    pub tenant_id: Uuid,
    pub user_id: String,
    pub admin_user: AdminUserDto,
}

impl From<ProvisionedTenant> for CreateTenantResponse {
    fn from(provisioned: ProvisionedTenant) -> Self {
        Self {
            tenant_id: provisioned.tenant_id(),
            user_id: provisioned.user_id().to_string(),
            admin_user: provisioned.administrator.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TenantDto {
    pub tenant_id: Uuid,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Tenant> for TenantDto {
    fn from(tenant: Tenant) -> Self {
        Self {
            tenant_id: tenant.tenant_id,
            name: tenant.name,
            domain: tenant.domain,
            created_at: tenant.created_at,
            updated_at: tenant.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RoleDto {
    pub id: Uuid,
    pub name: String,
    pub description: String,
}

impl From<Role> for RoleDto {
    fn from(role: Role) -> Self {
        Self {
            id: role.id,
            name: role.name,
            description: role.description,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TenantRolesResponse {
    pub tenant_id: Uuid,
    pub roles: Vec<RoleDto>,
}
