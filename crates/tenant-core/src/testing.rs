//! In-memory ports for tests.
//!
//! Compiled for this crate's unit tests and, through the `testing` feature,
//! for downstream crates that need a working store without PostgreSQL.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::clients::IdentityClient;
use crate::diagnostics::{DiagnosticSink, InconsistencyReport};
use crate::domain::{AdministratorAccount, DefaultRole, NewAdministrator, NewTenant, Role, Tenant};
use crate::error::{IdentityError, StoreOperation, TenantError};
use crate::repositories::TenantStore;

pub fn sample_tenant(name: &str) -> Tenant {
    let now = Utc::now();
    Tenant {
        tenant_id: Uuid::new_v4(),
        name: name.to_string(),
        domain: None,
        created_at: now,
        updated_at: now,
    }
}

pub fn sample_account(admin: &NewAdministrator) -> AdministratorAccount {
    AdministratorAccount {
        id: Uuid::new_v4().to_string(),
        email: admin.email.clone(),
        password_hash: admin.password_hash.clone(),
        role_name: admin.role().to_string(),
        status: "active".to_string(),
        is_2fa_enabled: false,
        totp_secret: String::new(),
        tenant_id: admin.tenant_id.to_string(),
    }
}

#[derive(Default)]
struct StoreState {
    tenants: HashMap<String, Tenant>,
    roles: Vec<Role>,
}

/// Store whose single mutex plays the role of transaction isolation.
#[derive(Default)]
pub struct InMemoryTenantStore {
    state: Mutex<StoreState>,
    fail_next: Mutex<Option<StoreOperation>>,
}

impl InMemoryTenantStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the next write fail at `operation`. Nothing from that write is kept.
    pub fn fail_next_write(&self, operation: StoreOperation) {
        *self.fail_next.lock().unwrap() = Some(operation);
    }

    pub fn tenant_count(&self) -> usize {
        self.state.lock().unwrap().tenants.len()
    }

    pub fn role_count(&self) -> usize {
        self.state.lock().unwrap().roles.len()
    }

    fn injected_failure(&self, at: StoreOperation) -> Result<(), TenantError> {
        let mut fail_next = self.fail_next.lock().unwrap();
        if *fail_next == Some(at) {
            *fail_next = None;
            return Err(TenantError::storage(at, format!("injected failure at {}", at)));
        }
        Ok(())
    }
}

#[async_trait]
impl TenantStore for InMemoryTenantStore {
    async fn create_tenant_and_default_roles(&self, new_tenant: &NewTenant) -> Result<Tenant, TenantError> {
        self.injected_failure(StoreOperation::Begin)?;
        let mut state = self.state.lock().unwrap();

        self.injected_failure(StoreOperation::InsertTenant)?;
        if state.tenants.contains_key(&new_tenant.name) {
            return Err(TenantError::Conflict(new_tenant.name.clone()));
        }
        let now = Utc::now();
        let tenant = Tenant {
            tenant_id: Uuid::new_v4(),
            name: new_tenant.name.clone(),
            domain: new_tenant.domain.clone(),
            created_at: now,
            updated_at: now,
        };

        self.injected_failure(StoreOperation::InsertRoles)?;
        let roles: Vec<Role> = DefaultRole::ALL
            .iter()
            .map(|role| Role {
                id: Uuid::new_v4(),
                name: role.as_str().to_string(),
                description: role.description().to_string(),
                tenant_id: tenant.tenant_id,
            })
            .collect();

        self.injected_failure(StoreOperation::Commit)?;
        state.tenants.insert(tenant.name.clone(), tenant.clone());
        state.roles.extend(roles);
        Ok(tenant)
    }

    async fn get_tenant_by_name(&self, name: &str) -> Result<Tenant, TenantError> {
        self.state
            .lock()
            .unwrap()
            .tenants
            .get(name)
            .cloned()
            .ok_or_else(|| TenantError::NotFound(name.to_string()))
    }

    async fn list_roles(&self, tenant_id: &Uuid) -> Result<Vec<Role>, TenantError> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .roles
            .iter()
            .filter(|r| &r.tenant_id == tenant_id)
            .cloned()
            .collect())
    }

    async fn ping(&self) -> Result<(), TenantError> {
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub enum StubBehavior {
    Succeed,
    Reject { status: u16, message: String },
    Unavailable,
    /// Sleeps before succeeding, for deadline and cancellation tests.
    Delay(Duration),
}

/// Identity client answering from a fixed behavior and recording every call.
pub struct StubIdentityClient {
    behavior: StubBehavior,
    calls: Mutex<Vec<NewAdministrator>>,
}

impl StubIdentityClient {
    pub fn new(behavior: StubBehavior) -> Self {
        Self {
            behavior,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn succeeding() -> Self {
        Self::new(StubBehavior::Succeed)
    }

    pub fn calls(&self) -> Vec<NewAdministrator> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl IdentityClient for StubIdentityClient {
    async fn create_administrator(&self, admin: &NewAdministrator) -> Result<AdministratorAccount, IdentityError> {
        self.calls.lock().unwrap().push(admin.clone());
        match &self.behavior {
            StubBehavior::Succeed => Ok(sample_account(admin)),
            StubBehavior::Reject { status, message } => Err(IdentityError::Rejected {
                status: *status,
                message: message.clone(),
            }),
            StubBehavior::Unavailable => Err(IdentityError::Transport("connection refused".into())),
            StubBehavior::Delay(delay) => {
                tokio::time::sleep(*delay).await;
                Ok(sample_account(admin))
            }
        }
    }
}

#[derive(Default)]
pub struct RecordingDiagnosticSink {
    reports: Mutex<Vec<InconsistencyReport>>,
}

impl RecordingDiagnosticSink {
    pub fn reports(&self) -> Vec<InconsistencyReport> {
        self.reports.lock().unwrap().clone()
    }
}

impl DiagnosticSink for RecordingDiagnosticSink {
    fn report_inconsistency(&self, report: &InconsistencyReport) {
        self.reports.lock().unwrap().push(report.clone());
    }
}
