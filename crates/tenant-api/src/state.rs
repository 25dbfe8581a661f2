use std::sync::Arc;

use tenant_core::services::{ProvisioningService, TenantQueryService};

#[derive(Clone)]
pub struct AppState {
    pub provisioning: Arc<ProvisioningService>,
    pub queries: Arc<TenantQueryService>,
}

impl AppState {
    pub fn new(provisioning: ProvisioningService, queries: TenantQueryService) -> Self {
        Self {
            provisioning: Arc::new(provisioning),
            queries: Arc::new(queries),
        }
    }
}
