// ============================================================================
// Tenant API - Tenant Handlers
// File: crates/tenant-api/src/handlers/tenants.rs
// ============================================================================
//! Tenant provisioning and lookup handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::dto::{CreateTenantRequest, CreateTenantResponse, TenantDto, TenantRolesResponse};
use crate::error::ApiError;
use crate::response::ApiResponse;
use crate::state::AppState;

/// POST /api/v1/tenants
pub async fn create_tenant(
    State(state): State<AppState>,
    Json(payload): Json<CreateTenantRequest>,
) -> Result<(StatusCode, Json<ApiResponse<CreateTenantResponse>>), ApiError> {
    let provisioned = state
        .provisioning
        .create_tenant_with_admin(payload.into())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(provisioned.into())),
    ))
}

/// GET /api/v1/tenants/by-name/{name}
pub async fn get_tenant_by_name(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<ApiResponse<TenantDto>>, ApiError> {
    let tenant = state.queries.get_tenant_by_name(&name).await?;
    Ok(Json(ApiResponse::success(tenant.into())))
}

/// GET /api/v1/tenants/by-name/ (no name segment)
pub async fn get_tenant_by_empty_name(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<TenantDto>>, ApiError> {
    let tenant = state.queries.get_tenant_by_name("").await?;
    Ok(Json(ApiResponse::success(tenant.into())))
}

/// GET /api/v1/tenants/by-name/{name}/roles
pub async fn get_tenant_roles(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<ApiResponse<TenantRolesResponse>>, ApiError> {
    let (tenant, roles) = state.queries.get_tenant_roles(&name).await?;
    Ok(Json(ApiResponse::success(TenantRolesResponse {
        tenant_id: tenant.tenant_id,
        roles: roles.into_iter().map(Into::into).collect(),
    })))
}
