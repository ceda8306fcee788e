use crate::DEFAULT_TIMEOUT_SECS;

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use cm_config::BackendConfig;
use cm_core::{Identity, IdentityError, IdentityProvider, Role};
use reqwest::{Client as ReqwestClient, Method, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Client for the managed backend's auth API.
pub struct AuthApi {
    base_url: String,
    publishable_key: String,
    timeout: Duration,
    client: ReqwestClient,
}

impl AuthApi {
    /// Create a new client
    ///
    /// # Arguments
    /// * `base_url` - Backend URL (e.g., "https://api.campus.example")
    /// * `publishable_key` - API key sent in the `apikey` header
    pub fn new(base_url: &str, publishable_key: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            publishable_key: publishable_key.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            client: ReqwestClient::new(),
        }
    }

    pub fn from_config(config: &BackendConfig) -> Self {
        let mut api = Self::new(&config.base_url, &config.publishable_key);
        api.timeout = Duration::from_secs(config.request_timeout_secs);
        api
    }

    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.client
            .request(method, &url)
            .timeout(self.timeout)
            .header("apikey", &self.publishable_key)
    }
}

/// Identity record as the auth API serializes it.
#[derive(Debug, Deserialize)]
struct IdentityPayload {
    id: Uuid,
    email: String,
    created_at: DateTime<Utc>,
}

impl From<IdentityPayload> for Identity {
    fn from(payload: IdentityPayload) -> Self {
        Identity {
            id: payload.id,
            email: payload.email,
            created_at: payload.created_at,
        }
    }
}

fn failure_message(body: &Value) -> String {
    body.get("msg")
        .or_else(|| body.get("message"))
        .and_then(|v| v.as_str())
        .unwrap_or("no details")
        .to_string()
}

fn classify_failure(status: StatusCode, body: &Value) -> IdentityError {
    match status.as_u16() {
        409 => IdentityError::email_taken(),
        400 | 422 => IdentityError::credentials_rejected(failure_message(body)),
        401 | 403 => IdentityError::unauthorized(),
        429 => IdentityError::service_unavailable(429),
        s if s >= 500 => IdentityError::service_unavailable(s),
        s => IdentityError::invalid_response(format!("unexpected status {s}")),
    }
}

#[async_trait]
impl IdentityProvider for AuthApi {
    async fn create_identity(
        &self,
        email: &str,
        password: &str,
        declared_role: Role,
    ) -> Result<Identity, IdentityError> {
        #[derive(Serialize)]
        struct SignupMetadata<'a> {
            declared_role: &'a str,
        }

        #[derive(Serialize)]
        struct SignupRequest<'a> {
            email: &'a str,
            password: &'a str,
            data: SignupMetadata<'a>,
        }

        let body = SignupRequest {
            email,
            password,
            data: SignupMetadata {
                declared_role: declared_role.as_str(),
            },
        };

        let response = self
            .request(Method::POST, "/auth/v1/signup")
            .json(&body)
            .send()
            .await
            .map_err(|e| IdentityError::transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body: Value = response.json().await.unwrap_or(Value::Null);
            return Err(classify_failure(status, &body));
        }

        let payload: IdentityPayload = response
            .json()
            .await
            .map_err(|e| IdentityError::invalid_response(e.to_string()))?;

        Ok(payload.into())
    }

    async fn current_identity(&self, access_token: &str) -> Result<Identity, IdentityError> {
        let response = self
            .request(Method::GET, "/auth/v1/user")
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| IdentityError::transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body: Value = response.json().await.unwrap_or(Value::Null);
            return Err(classify_failure(status, &body));
        }

        let payload: IdentityPayload = response
            .json()
            .await
            .map_err(|e| IdentityError::invalid_response(e.to_string()))?;

        Ok(payload.into())
    }
}
