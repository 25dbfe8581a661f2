// ============================================================================
// Tenant Infrastructure - Vault KV v2 Secret Provider
// File: crates/tenant-infrastructure/src/secrets/vault.rs
// ============================================================================

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, error};

use super::{SecretError, SecretProvider};

const VAULT_TOKEN_HEADER: &str = "X-Vault-Token";

#[derive(Debug, Deserialize)]
struct KvV2Response {
    data: KvV2Data,
}

#[derive(Debug, Deserialize)]
struct KvV2Data {
    #[serde(default)]
    data: Map<String, Value>,
}

/// Reads a single KV v2 secret, e.g. `secret/data/tenant-service`.
pub struct VaultSecretProvider {
    client: Client,
    addr: String,
    token: String,
    secret_path: String,
}

impl VaultSecretProvider {
    pub fn new(addr: &str, token: &str, secret_path: &str) -> Result<Self, SecretError> {
        let client = Client::builder().build()?;
        Ok(Self {
            client,
            addr: addr.trim_end_matches('/').to_string(),
            token: token.to_string(),
            secret_path: secret_path.trim_matches('/').to_string(),
        })
    }

    fn url(&self) -> String {
        format!("{}/v1/{}", self.addr, self.secret_path)
    }
}

#[async_trait]
impl SecretProvider for VaultSecretProvider {
    async fn get(&self, key: &str) -> Result<Option<String>, SecretError> {
        debug!("Reading {} from vault path {}", key, self.secret_path);

        let response = self
            .client
            .get(self.url())
            .header(VAULT_TOKEN_HEADER, &self.token)
            .send()
            .await?;

        match response.status() {
            StatusCode::NOT_FOUND => return Ok(None),
            status if !status.is_success() => {
                error!("Vault returned {} for {}", status, self.secret_path);
                return Err(SecretError::Status {
                    status: status.as_u16(),
                    path: self.secret_path.clone(),
                });
            }
            _ => {}
        }

        let body: KvV2Response = response.json().await?;
        match body.data.data.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(value)) => Ok(Some(value.clone())),
            Some(_) => Err(SecretError::InvalidValue { key: key.to_string() }),
        }
    }

    fn name(&self) -> &'static str {
        "vault"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn vault_with(status: u16, body: Value) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/secret/data/tenant-service"))
            .and(header(VAULT_TOKEN_HEADER, "root-token"))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .mount(&server)
            .await;
        server
    }

    fn provider(server: &MockServer) -> VaultSecretProvider {
        VaultSecretProvider::new(&server.uri(), "root-token", "/secret/data/tenant-service/").unwrap()
    }

    #[tokio::test]
    async fn test_reads_key_from_kv_v2_payload() {
        let server = vault_with(
            200,
            json!({ "data": { "data": { "database_url": "postgres://vault/db" }, "metadata": { "version": 3 } } }),
        )
        .await;

        let value = provider(&server).get("database_url").await.unwrap();
        assert_eq!(value.as_deref(), Some("postgres://vault/db"));
    }

    #[tokio::test]
    async fn test_absent_key_is_none() {
        let server = vault_with(200, json!({ "data": { "data": { "other": "x" } } })).await;
        assert!(provider(&server).get("database_url").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_non_string_value_is_invalid() {
        let server = vault_with(200, json!({ "data": { "data": { "database_url": 42 } } })).await;
        let err = provider(&server).get("database_url").await.unwrap_err();
        assert!(matches!(err, SecretError::InvalidValue { .. }));
    }

    #[tokio::test]
    async fn test_forbidden_is_status_error() {
        let server = vault_with(403, json!({ "errors": ["permission denied"] })).await;
        let err = provider(&server).get("database_url").await.unwrap_err();
        assert!(matches!(err, SecretError::Status { status: 403, .. }));
    }

    #[tokio::test]
    async fn test_missing_path_is_none() {
        let server = vault_with(404, json!({ "errors": [] })).await;
        assert!(provider(&server).get("database_url").await.unwrap().is_none());
    }
}
