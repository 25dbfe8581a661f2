// ============================================================================
// Tenant Infrastructure - Identity Service HTTP Client
// File: crates/tenant-infrastructure/src/identity/http_client.rs
// ============================================================================

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use tenant_core::clients::IdentityClient;
use tenant_core::domain::{AdministratorAccount, NewAdministrator};
use tenant_core::error::IdentityError;
use tenant_shared::constants::TENANT_ID_HEADER;
use tenant_shared::utils::mask_email;

/// Longest slice of a remote error body kept in `IdentityError` messages.
const MAX_ERROR_BODY: usize = 512;

#[derive(Debug, Serialize)]
struct CreateUserRequest<'a> {
    email: &'a str,
    password: &'a str,
    first_name: &'a str,
    last_name: &'a str,
    role: &'a str,
    tenant_id: String,
}

#[derive(Debug, Deserialize)]
struct UserResponse {
    id: String,
    email: String,
    #[serde(default)]
    password_hash: String,
    #[serde(default)]
    role_name: String,
    #[serde(default)]
    status: String,
    #[serde(default)]
    is_2fa_enabled: bool,
    #[serde(default)]
    totp_secret: String,
    #[serde(default)]
    tenant_id: String,
}

impl From<UserResponse> for AdministratorAccount {
    fn from(user: UserResponse) -> Self {
        AdministratorAccount {
            id: user.id,
            email: user.email,
            password_hash: user.password_hash,
            role_name: user.role_name,
            status: user.status,
            is_2fa_enabled: user.is_2fa_enabled,
            totp_secret: user.totp_secret,
            tenant_id: user.tenant_id,
        }
    }
}

/// JSON-over-HTTP binding of the identity service's CreateUser call.
#[derive(Clone)]
pub struct HttpIdentityClient {
    client: Client,
    base_url: String,
}

impl HttpIdentityClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, IdentityError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| IdentityError::Transport(Box::new(e)))?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn users_url(&self) -> String {
        format!("{}/api/v1/users", self.base_url)
    }
}

fn classify_send_error(e: reqwest::Error) -> IdentityError {
    if e.is_timeout() {
        IdentityError::Timeout
    } else {
        IdentityError::Transport(Box::new(e))
    }
}

fn truncate(mut body: String) -> String {
    if body.len() > MAX_ERROR_BODY {
        let mut end = MAX_ERROR_BODY;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        body.truncate(end);
    }
    body
}

#[async_trait]
impl IdentityClient for HttpIdentityClient {
    async fn create_administrator(&self, admin: &NewAdministrator) -> Result<AdministratorAccount, IdentityError> {
        debug!(
            tenant_id = %admin.tenant_id,
            "Creating administrator {} in identity service",
            mask_email(&admin.email)
        );

        let body = CreateUserRequest {
            email: &admin.email,
            password: &admin.password_hash,
            first_name: &admin.first_name,
            last_name: &admin.last_name,
            role: admin.role(),
            tenant_id: admin.tenant_id.to_string(),
        };

        let response = self
            .client
            .post(self.users_url())
            .header(TENANT_ID_HEADER, admin.tenant_id.to_string())
            .json(&body)
            .send()
            .await
            .map_err(classify_send_error)?;

        let status = response.status();
        if !status.is_success() {
            let message = truncate(response.text().await.unwrap_or_default());
            warn!(
                tenant_id = %admin.tenant_id,
                "Identity service returned {}: {}",
                status,
                message
            );
            return Err(if status.is_client_error() {
                IdentityError::Rejected {
                    status: status.as_u16(),
                    message,
                }
            } else {
                IdentityError::Remote {
                    status: status.as_u16(),
                    message,
                }
            });
        }

        let user: UserResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                IdentityError::Timeout
            } else {
                IdentityError::Decode(Box::new(e))
            }
        })?;

        Ok(user.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::faker::internet::en::SafeEmail;
    use fake::faker::name::en::{FirstName, LastName};
    use fake::Fake;
    use serde_json::json;
    use uuid::Uuid;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn new_admin() -> NewAdministrator {
        NewAdministrator {
            tenant_id: Uuid::new_v4(),
            email: SafeEmail().fake(),
            password_hash: "$argon2id$v=19$hash".to_string(),
            first_name: FirstName().fake(),
            last_name: LastName().fake(),
        }
    }

    fn client_for(server: &MockServer) -> HttpIdentityClient {
        HttpIdentityClient::new(server.uri(), Duration::from_secs(2)).unwrap()
    }

    #[tokio::test]
    async fn test_create_administrator_success() {
        let server = MockServer::start().await;
        let admin = new_admin();
        let tenant_id = admin.tenant_id.to_string();

        Mock::given(method("POST"))
            .and(path("/api/v1/users"))
            .and(header(TENANT_ID_HEADER, tenant_id.as_str()))
            .and(body_partial_json(json!({
                "email": admin.email,
                "role": "admin",
                "tenant_id": tenant_id,
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": "user-42",
                "email": admin.email,
                "password_hash": admin.password_hash,
                "role_name": "admin",
                "status": "active",
                "is_2fa_enabled": false,
                "totp_secret": "",
                "tenant_id": tenant_id,
            })))
            .expect(1)
            .mount(&server)
            .await;

        let account = client_for(&server).create_administrator(&admin).await.unwrap();
        assert_eq!(account.id, "user-42");
        assert_eq!(account.email, admin.email);
        assert_eq!(account.role_name, "admin");
        assert_eq!(account.tenant_id, tenant_id);
    }

    #[tokio::test]
    async fn test_client_error_is_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/users"))
            .respond_with(ResponseTemplate::new(409).set_body_string("email already registered"))
            .mount(&server)
            .await;

        let err = client_for(&server).create_administrator(&new_admin()).await.unwrap_err();
        match err {
            IdentityError::Rejected { status, message } => {
                assert_eq!(status, 409);
                assert_eq!(message, "email already registered");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_server_error_is_remote() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let err = client_for(&server).create_administrator(&new_admin()).await.unwrap_err();
        assert!(matches!(err, IdentityError::Remote { status: 503, .. }));
    }

    #[tokio::test]
    async fn test_slow_service_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(201).set_delay(Duration::from_secs(2)))
            .mount(&server)
            .await;

        let client = HttpIdentityClient::new(server.uri(), Duration::from_millis(100)).unwrap();
        let err = client.create_administrator(&new_admin()).await.unwrap_err();
        assert!(matches!(err, IdentityError::Timeout));
    }

    #[tokio::test]
    async fn test_malformed_body_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(201).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = client_for(&server).create_administrator(&new_admin()).await.unwrap_err();
        assert!(matches!(err, IdentityError::Decode(_)));
    }

    #[tokio::test]
    async fn test_unreachable_service_is_transport_error() {
        let client = HttpIdentityClient::new("http://127.0.0.1:1", Duration::from_secs(1)).unwrap();
        let err = client.create_administrator(&new_admin()).await.unwrap_err();
        assert!(matches!(err, IdentityError::Transport(_)));
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let client = HttpIdentityClient::new("http://user-service:9001/", Duration::from_secs(1)).unwrap();
        assert_eq!(client.users_url(), "http://user-service:9001/api/v1/users");
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        let body = "é".repeat(MAX_ERROR_BODY);
        let truncated = truncate(body);
        assert!(truncated.len() <= MAX_ERROR_BODY);
        assert!(truncated.chars().all(|c| c == 'é'));
    }
}
