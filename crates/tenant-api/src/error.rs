//! Domain error to HTTP response mapping

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::error;

use tenant_core::error::TenantError;

use crate::response::ApiResponse;

pub struct ApiError(pub TenantError);

impl From<TenantError> for ApiError {
    fn from(err: TenantError) -> Self {
        ApiError(err)
    }
}

impl ApiError {
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match &self.0 {
            TenantError::InvalidInput(_) => (StatusCode::BAD_REQUEST, "INVALID_ARGUMENT"),
            TenantError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            TenantError::Conflict(_) => (StatusCode::INTERNAL_SERVER_ERROR, "TENANT_ALREADY_EXISTS"),
            TenantError::StorageFailure { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL"),
            TenantError::RemoteProvisioningFailure { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, "ADMIN_PROVISIONING_FAILED")
            }
        }
    }

    fn message(&self) -> String {
        match &self.0 {
            TenantError::StorageFailure { .. } => "Internal storage error".to_string(),
            TenantError::RemoteProvisioningFailure { tenant_id, .. } => format!(
                "Tenant {} was created but its administrator could not be provisioned",
                tenant_id
            ),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        if status.is_server_error() {
            error!(error_kind = self.0.kind(), "Request failed: {:?}", self.0);
        }
        (status, Json(ApiResponse::failure(code, self.message()))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tenant_core::error::{IdentityError, StoreOperation};
    use uuid::Uuid;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (TenantError::InvalidInput("x".into()), StatusCode::BAD_REQUEST, "INVALID_ARGUMENT"),
            (TenantError::NotFound("x".into()), StatusCode::NOT_FOUND, "NOT_FOUND"),
            (
                TenantError::Conflict("x".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
                "TENANT_ALREADY_EXISTS",
            ),
            (
                TenantError::storage(StoreOperation::Commit, "boom"),
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL",
            ),
            (
                TenantError::RemoteProvisioningFailure {
                    tenant_id: Uuid::new_v4(),
                    source: IdentityError::Timeout,
                },
                StatusCode::INTERNAL_SERVER_ERROR,
                "ADMIN_PROVISIONING_FAILED",
            ),
        ];

        for (err, status, code) in cases {
            assert_eq!(ApiError(err).status_and_code(), (status, code));
        }
    }

    #[test]
    fn test_remote_failure_message_hides_identity_body() {
        let tenant_id = Uuid::new_v4();
        let err = ApiError(TenantError::RemoteProvisioningFailure {
            tenant_id,
            source: IdentityError::Remote {
                status: 500,
                message: "pq: relation \"users\" does not exist".to_string(),
            },
        });
        let message = err.message();
        assert!(message.contains(&tenant_id.to_string()));
        assert!(!message.contains("users"));
    }

    #[test]
    fn test_storage_message_hides_cause() {
        let err = ApiError(TenantError::storage(StoreOperation::InsertTenant, "password=hunter2"));
        assert!(!err.message().contains("hunter2"));
    }
}
