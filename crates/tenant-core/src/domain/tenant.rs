//! Tenant domain entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A committed tenant row. Identifier and timestamps are generated by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tenant {
    pub tenant_id: Uuid,
    pub name: String,
    pub domain: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Values supplied by the caller when a tenant is created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTenant {
    pub name: String,
    pub domain: Option<String>,
}

impl NewTenant {
    pub fn new(name: &str, domain: Option<&str>) -> Self {
        Self {
            name: name.trim().to_string(),
            domain: tenant_shared::utils::non_blank(domain),
        }
    }
}
