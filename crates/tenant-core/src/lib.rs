//! # Tenant Core
//! 
//! Domain entities, ports, and the provisioning workflow for the tenant service.

pub mod domain;
pub mod services;
pub mod repositories;
pub mod clients;
pub mod diagnostics;
pub mod error;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

// Re-export domain entities
pub use domain::*;
pub use error::{IdentityError, StoreOperation, TenantError};
