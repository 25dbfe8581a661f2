//! # Tenant Core - Domain Module
//! 
//! Entities owned by the tenant service plus the transient administrator projection.

pub mod tenant;
pub mod role;
pub mod administrator;
pub mod provisioning;

pub use tenant::{NewTenant, Tenant};
pub use role::{is_default_role_set, DefaultRole, Role};
pub use administrator::{AdministratorAccount, NewAdministrator, ADMIN_ROLE_NAME};
pub use provisioning::{ProvisionTenantRequest, ProvisionedTenant, ProvisioningState};
