// ============================================================================
// Tenant Core - Provisioning Service
// File: crates/tenant-core/src/services/provisioning_service.rs
// ============================================================================
//! Creates a tenant, its default roles, and its remote administrator.

use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info, warn};
use validator::Validate;

use tenant_shared::utils::mask_email;

use crate::clients::IdentityClient;
use crate::diagnostics::{DiagnosticSink, InconsistencyGuard, InconsistencyReason};
use crate::domain::{ProvisionTenantRequest, ProvisionedTenant, ProvisioningState};
use crate::error::{IdentityError, TenantError};
use crate::repositories::TenantStore;

/// Sequences the local transactional write and the remote administrator call.
///
/// The local write always commits before the remote call starts. A remote
/// failure leaves the tenant committed (no compensation) and is reported to
/// the diagnostic sink before the error is returned.
pub struct ProvisioningService {
    store: Arc<dyn TenantStore>,
    identity: Arc<dyn IdentityClient>,
    diagnostics: Arc<dyn DiagnosticSink>,
    remote_deadline: Duration,
}

impl ProvisioningService {
    pub fn new(
        store: Arc<dyn TenantStore>,
        identity: Arc<dyn IdentityClient>,
        diagnostics: Arc<dyn DiagnosticSink>,
        remote_deadline: Duration,
    ) -> Self {
        Self {
            store,
            identity,
            diagnostics,
            remote_deadline,
        }
    }

    /// CreateTenantWithAdmin
    pub async fn create_tenant_with_admin(
        &self,
        request: ProvisionTenantRequest,
    ) -> Result<ProvisionedTenant, TenantError> {
        info!(
            organization = %request.organization_name,
            admin_email = %mask_email(&request.admin_email),
            state = %ProvisioningState::Init,
            "Provisioning tenant"
        );

        // 1. Validate before any write
        if let Err(errors) = request.validate() {
            let err = TenantError::from(errors);
            warn!(state = %ProvisioningState::Aborted, "Provisioning rejected: {}", err);
            return Err(err);
        }

        // 2. Tenant + default roles in one transaction
        let tenant = match self
            .store
            .create_tenant_and_default_roles(&request.new_tenant())
            .await
        {
            Ok(tenant) => tenant,
            Err(err) => {
                warn!(
                    state = %ProvisioningState::Aborted,
                    error_kind = err.kind(),
                    "Local tenant write failed, identity service not called: {}",
                    err
                );
                return Err(err);
            }
        };

        info!(
            tenant_id = %tenant.tenant_id,
            state = %ProvisioningState::LocalCommitted,
            "Tenant and default roles committed"
        );

        // 3. Remote administrator, strictly after the commit
        let guard = InconsistencyGuard::arm(self.diagnostics.clone(), &tenant, &request.admin_email);
        let admin = request.new_administrator(tenant.tenant_id);
        let outcome = match tokio::time::timeout(
            self.remote_deadline,
            self.identity.create_administrator(&admin),
        )
        .await
        {
            Ok(outcome) => outcome,
            Err(_) => Err(IdentityError::Timeout),
        };

        match outcome {
            // 4. Completed
            Ok(administrator) => {
                guard.resolve();
                info!(
                    tenant_id = %tenant.tenant_id,
                    user_id = %administrator.id,
                    state = %ProvisioningState::Completed,
                    "Tenant provisioned with administrator"
                );
                Ok(ProvisionedTenant {
                    tenant,
                    administrator,
                })
            }
            // 5. Inconsistent: tenant stays committed
            Err(source) => {
                error!(
                    tenant_id = %tenant.tenant_id,
                    state = %ProvisioningState::Inconsistent,
                    "Failed to create administrator for committed tenant: {}",
                    source
                );
                guard.report(InconsistencyReason::RemoteFailure, source.to_string());
                Err(TenantError::RemoteProvisioningFailure {
                    tenant_id: tenant.tenant_id,
                    source,
                })
            }
        }
    }
}
