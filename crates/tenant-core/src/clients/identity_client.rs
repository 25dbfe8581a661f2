//! Identity service client trait (port)

use async_trait::async_trait;

use crate::domain::{AdministratorAccount, NewAdministrator};
use crate::error::IdentityError;

/// Creates administrator accounts in the external identity service.
///
/// Implementations must attach `admin.tenant_id` to the call as metadata so
/// the identity service can enforce tenant scoping. The call is not
/// idempotent; callers must not retry it blindly.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityClient: Send + Sync {
    async fn create_administrator(&self, admin: &NewAdministrator) -> Result<AdministratorAccount, IdentityError>;
}
