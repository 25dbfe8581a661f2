// ============================================================================
// Tenant Core - Provisioning Types
// File: crates/tenant-core/src/domain/provisioning.rs
// Description: Request, result, and state of a tenant + administrator provisioning
// ============================================================================

use std::borrow::Cow;
use std::fmt;

use uuid::Uuid;
use validator::{Validate, ValidationError};

use super::administrator::{AdministratorAccount, NewAdministrator};
use super::tenant::{NewTenant, Tenant};

const MAX_ORGANIZATION_NAME_CHARS: usize = 255;

/// Lifecycle of a single provisioning call.
///
/// `Init -> LocalCommitted -> Completed` on success,
/// `Init -> LocalCommitted -> Inconsistent` when the identity service fails,
/// `Init -> Aborted` when validation or the local write fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProvisioningState {
    Init,
    LocalCommitted,
    Completed,
    Inconsistent,
    Aborted,
}

impl ProvisioningState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProvisioningState::Init => "init",
            ProvisioningState::LocalCommitted => "local_committed",
            ProvisioningState::Completed => "completed",
            ProvisioningState::Inconsistent => "inconsistent",
            ProvisioningState::Aborted => "aborted",
        }
    }
}

impl fmt::Display for ProvisioningState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Checks the name as it will be stored, i.e. trimmed.
fn organization_name(value: &str) -> Result<(), ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new("blank").with_message(Cow::Borrowed("Organization name is required")));
    }
    if trimmed.chars().count() > MAX_ORGANIZATION_NAME_CHARS {
        return Err(ValidationError::new("length").with_message(Cow::Borrowed(
            "Organization name must be at most 255 characters",
        )));
    }
    Ok(())
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Input of `CreateTenantWithAdmin`.
#[derive(Clone, Validate)]
pub struct ProvisionTenantRequest {
    #[validate(custom(function = "organization_name"))]
    pub organization_name: String,

    #[validate(length(max = 255, message = "Organization domain must be at most 255 characters"))]
    pub organization_domain: Option<String>,

    #[validate(email(message = "Admin email must be a valid email address"))]
    pub admin_email: String,

    #[validate(custom(function = "not_blank", message = "Password hash is required"))]
    pub password_hash: String,

    pub admin_first_name: String,
    pub admin_last_name: String,
}

impl ProvisionTenantRequest {
    pub fn new_tenant(&self) -> NewTenant {
        NewTenant::new(&self.organization_name, self.organization_domain.as_deref())
    }

    pub fn new_administrator(&self, tenant_id: Uuid) -> NewAdministrator {
        NewAdministrator {
            tenant_id,
            email: self.admin_email.trim().to_string(),
            password_hash: self.password_hash.clone(),
            first_name: self.admin_first_name.trim().to_string(),
            last_name: self.admin_last_name.trim().to_string(),
        }
    }
}

impl fmt::Debug for ProvisionTenantRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProvisionTenantRequest")
            .field("organization_name", &self.organization_name)
            .field("organization_domain", &self.organization_domain)
            .field("admin_email", &self.admin_email)
            .field("password_hash", &"<redacted>")
            .field("admin_first_name", &self.admin_first_name)
            .field("admin_last_name", &self.admin_last_name)
            .finish()
    }
}

/// Result of a completed provisioning.
#[derive(Debug, Clone)]
pub struct ProvisionedTenant {
    pub tenant: Tenant,
    pub administrator: AdministratorAccount,
}

impl ProvisionedTenant {
    pub fn tenant_id(&self) -> Uuid {
        self.tenant.tenant_id
    }

    pub fn user_id(&self) -> &str {
        &self.administrator.id
    }
}
