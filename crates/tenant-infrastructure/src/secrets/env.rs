use async_trait::async_trait;

use super::{SecretError, SecretProvider};

/// Reads `key` upper-cased from the environment: `database_url` -> `DATABASE_URL`.
#[derive(Debug, Default, Clone, Copy)]
pub struct EnvSecretProvider;

impl EnvSecretProvider {
    fn var_name(key: &str) -> String {
        key.to_ascii_uppercase()
    }
}

#[async_trait]
impl SecretProvider for EnvSecretProvider {
    async fn get(&self, key: &str) -> Result<Option<String>, SecretError> {
        Ok(std::env::var(Self::var_name(key)).ok())
    }

    fn name(&self) -> &'static str {
        "environment"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_var_name() {
        assert_eq!(EnvSecretProvider::var_name("database_url"), "DATABASE_URL");
    }

    #[tokio::test]
    async fn test_missing_variable_is_none() {
        let value = EnvSecretProvider
            .get("tenant_service_test_unset_secret_7f3a")
            .await
            .unwrap();
        assert!(value.is_none());
    }
}
