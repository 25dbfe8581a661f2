//! Domain errors

use std::fmt;

use thiserror::Error;
use uuid::Uuid;

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Step of the store interaction that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOperation {
    Begin,
    InsertTenant,
    InsertRoles,
    Commit,
    Rollback,
    FindByName,
    ListRoles,
    Ping,
}

impl StoreOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreOperation::Begin => "begin transaction",
            StoreOperation::InsertTenant => "insert tenant",
            StoreOperation::InsertRoles => "insert default roles",
            StoreOperation::Commit => "commit transaction",
            StoreOperation::Rollback => "rollback transaction",
            StoreOperation::FindByName => "find tenant by name",
            StoreOperation::ListRoles => "list roles",
            StoreOperation::Ping => "ping",
        }
    }
}

impl fmt::Display for StoreOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failures of the identity service call, kept for diagnostics.
#[derive(Error, Debug)]
pub enum IdentityError {
    #[error("Identity service unreachable: {0}")]
    Transport(#[source] BoxError),

    #[error("Identity service call timed out")]
    Timeout,

    #[error("Identity service rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Identity service internal error ({status}): {message}")]
    Remote { status: u16, message: String },

    #[error("Malformed identity service response: {0}")]
    Decode(#[source] BoxError),
}

#[derive(Error, Debug)]
pub enum TenantError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Tenant name already exists: {0}")]
    Conflict(String),

    #[error("Tenant not found: {0}")]
    NotFound(String),

    #[error("Storage failure during {operation}")]
    StorageFailure {
        operation: StoreOperation,
        #[source]
        source: BoxError,
    },

    /// The tenant and its roles are committed; only the administrator is missing.
    #[error("Administrator provisioning failed for tenant {tenant_id}")]
    RemoteProvisioningFailure {
        tenant_id: Uuid,
        #[source]
        source: IdentityError,
    },
}

impl TenantError {
    pub fn storage<E>(operation: StoreOperation, source: E) -> Self
    where
        E: Into<BoxError>,
    {
        TenantError::StorageFailure {
            operation,
            source: source.into(),
        }
    }

    /// Stable, protocol-neutral name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            TenantError::InvalidInput(_) => "invalid_input",
            TenantError::Conflict(_) => "conflict",
            TenantError::NotFound(_) => "not_found",
            TenantError::StorageFailure { .. } => "storage_failure",
            TenantError::RemoteProvisioningFailure { .. } => "remote_provisioning_failure",
        }
    }
}

impl From<validator::ValidationErrors> for TenantError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| match &e.message {
                    Some(message) => message.to_string(),
                    None => format!("{} is invalid", field),
                })
            })
            .collect();
        messages.sort();
        TenantError::InvalidInput(messages.join("; "))
    }
}
