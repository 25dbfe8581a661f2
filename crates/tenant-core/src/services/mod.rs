//! Domain services (business logic)

pub mod provisioning_service;
pub mod tenant_query_service;

pub use provisioning_service::ProvisioningService;
pub use tenant_query_service::TenantQueryService;
