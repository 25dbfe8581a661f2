//! Administrator account projection
//!
//! The identity service owns administrator accounts. This crate only carries
//! the request sent to it and the projection it returns; neither is persisted.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const ADMIN_ROLE_NAME: &str = "admin";

/// Account returned by the identity service after creation.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdministratorAccount {
    pub id: String,
    pub email: String,
    pub password_hash: String,
    pub role_name: String,
    pub status: String,
    pub is_2fa_enabled: bool,
    pub totp_secret: String,
    pub tenant_id: String,
}

/// Administrator to be created for a freshly committed tenant.
#[derive(Clone, PartialEq, Eq)]
pub struct NewAdministrator {
    pub tenant_id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
}

impl NewAdministrator {
    /// Always "admin"; the identity service is never asked for another role here.
    pub fn role(&self) -> &'static str {
        ADMIN_ROLE_NAME
    }
}

impl fmt::Debug for AdministratorAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdministratorAccount")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("password_hash", &"<redacted>")
            .field("role_name", &self.role_name)
            .field("status", &self.status)
            .field("is_2fa_enabled", &self.is_2fa_enabled)
            .field("totp_secret", &"<redacted>")
            .field("tenant_id", &self.tenant_id)
            .finish()
    }
}

impl fmt::Debug for NewAdministrator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewAdministrator")
            .field("tenant_id", &self.tenant_id)
            .field("email", &self.email)
            .field("password_hash", &"<redacted>")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_secrets() {
        let account = AdministratorAccount {
            id: "u-1".to_string(),
            email: "a@acme.com".to_string(),
            password_hash: "$argon2id$secret".to_string(),
            role_name: "admin".to_string(),
            status: "active".to_string(),
            is_2fa_enabled: false,
            totp_secret: "JBSWY3DPEHPK3PXP".to_string(),
            tenant_id: Uuid::nil().to_string(),
        };
        let rendered = format!("{:?}", account);
        assert!(!rendered.contains("$argon2id$secret"));
        assert!(!rendered.contains("JBSWY3DPEHPK3PXP"));
        assert!(rendered.contains("a@acme.com"));
    }

    #[test]
    fn test_new_administrator_role_is_fixed() {
        let admin = NewAdministrator {
            tenant_id: Uuid::new_v4(),
            email: "a@acme.com".to_string(),
            password_hash: "$argon2id$s3cr3t".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
        };
        assert_eq!(admin.role(), "admin");
        assert!(!format!("{:?}", admin).contains("s3cr3t"));
    }
}
