//! Role domain entity

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub tenant_id: Uuid,
}

/// The roles written in the same unit of work as every tenant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultRole {
    Admin,
    User,
}

impl DefaultRole {
    pub const ALL: [DefaultRole; 2] = [DefaultRole::Admin, DefaultRole::User];

    pub fn as_str(&self) -> &'static str {
        match self {
            DefaultRole::Admin => "admin",
            DefaultRole::User => "user",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            DefaultRole::Admin => "Administrator with all permissions",
            DefaultRole::User => "Standard user with basic permissions",
        }
    }
}

/// Returns true when `roles` is exactly the default set for `tenant_id`.
pub fn is_default_role_set(tenant_id: Uuid, roles: &[Role]) -> bool {
    roles.len() == DefaultRole::ALL.len()
        && DefaultRole::ALL.iter().all(|default| {
            roles
                .iter()
                .filter(|r| r.tenant_id == tenant_id && r.name == default.as_str())
                .count()
                == 1
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn role(name: &str, tenant_id: Uuid) -> Role {
        Role {
            id: Uuid::new_v4(),
            name: name.to_string(),
            description: String::new(),
            tenant_id,
        }
    }

    #[test]
    fn test_default_role_names() {
        assert_eq!(DefaultRole::Admin.as_str(), "admin");
        assert_eq!(DefaultRole::User.as_str(), "user");
        assert_eq!(DefaultRole::ALL, [DefaultRole::Admin, DefaultRole::User]);
    }

    #[test]
    fn test_default_role_set() {
        let tenant_id = Uuid::new_v4();
        let roles = vec![role("user", tenant_id), role("admin", tenant_id)];
        assert!(is_default_role_set(tenant_id, &roles));

        assert!(!is_default_role_set(tenant_id, &roles[..1]));
        assert!(!is_default_role_set(Uuid::new_v4(), &roles));

        let duplicated = vec![role("admin", tenant_id), role("admin", tenant_id)];
        assert!(!is_default_role_set(tenant_id, &duplicated));
    }
}
