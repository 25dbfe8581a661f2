//! Secret resolution
//!
//! Startup secrets (the database URL above all) come from Vault when it is
//! configured and from the process environment otherwise.

pub mod env;
pub mod vault;

use async_trait::async_trait;
use thiserror::Error;

pub use env::EnvSecretProvider;
pub use vault::VaultSecretProvider;

#[derive(Error, Debug)]
pub enum SecretError {
    #[error("Secret not found: {0}")]
    Missing(String),

    #[error("Secret store request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Secret store returned {status} for {path}")]
    Status { status: u16, path: String },

    #[error("Secret {key} is not a string")]
    InvalidValue { key: String },
}

#[async_trait]
pub trait SecretProvider: Send + Sync {
    /// `Ok(None)` when the store answered but holds no value for `key`.
    async fn get(&self, key: &str) -> Result<Option<String>, SecretError>;

    fn name(&self) -> &'static str;
}

pub async fn resolve_required(provider: &dyn SecretProvider, key: &str) -> Result<String, SecretError> {
    match provider.get(key).await? {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(SecretError::Missing(key.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(Option<&'static str>);

    #[async_trait]
    impl SecretProvider for Fixed {
        async fn get(&self, _key: &str) -> Result<Option<String>, SecretError> {
            Ok(self.0.map(str::to_string))
        }

        fn name(&self) -> &'static str {
            "fixed"
        }
    }

    #[tokio::test]
    async fn test_resolve_required() {
        let value = resolve_required(&Fixed(Some("postgres://db")), "database_url").await.unwrap();
        assert_eq!(value, "postgres://db");

        let err = resolve_required(&Fixed(None), "database_url").await.unwrap_err();
        assert!(matches!(err, SecretError::Missing(key) if key == "database_url"));

        let err = resolve_required(&Fixed(Some("  ")), "database_url").await.unwrap_err();
        assert!(matches!(err, SecretError::Missing(_)));
    }
}
