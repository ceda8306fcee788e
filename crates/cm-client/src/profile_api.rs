use crate::DEFAULT_TIMEOUT_SECS;

use std::time::Duration;

use async_trait::async_trait;
use cm_config::BackendConfig;
use cm_core::{Profile, ProfileStore, ProfileStoreError, ProfileUpsert, Role};
use reqwest::{Client as ReqwestClient, Method, StatusCode};
use serde::Serialize;
use uuid::Uuid;

/// Client for the `profiles` table behind the managed backend's data API.
///
/// Two channels:
/// - standard: `apikey` is the publishable key; the bearer credential is
///   the session token when one is attached, else the publishable key.
///   Row-level rules apply.
/// - elevated: both headers carry the secret key. Only used for the
///   trusted assignment routine, and only when a secret key exists.
pub struct ProfileApi {
    base_url: String,
    publishable_key: String,
    secret_key: Option<String>,
    session_token: Option<String>,
    timeout: Duration,
    client: ReqwestClient,
}

impl ProfileApi {
    /// Create a new client
    ///
    /// # Arguments
    /// * `base_url` - Backend URL (e.g., "https://api.campus.example")
    /// * `publishable_key` - API key for the standard channel
    /// * `secret_key` - Optional key enabling the elevated channel
    pub fn new(base_url: &str, publishable_key: &str, secret_key: Option<&str>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            publishable_key: publishable_key.to_string(),
            secret_key: secret_key.map(String::from),
            session_token: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            client: ReqwestClient::new(),
        }
    }

    pub fn from_config(config: &BackendConfig) -> Self {
        let mut api = Self::new(
            &config.base_url,
            &config.publishable_key,
            config.secret_key.as_deref(),
        );
        api.timeout = Duration::from_secs(config.request_timeout_secs);
        api
    }

    /// Scope the standard channel to a user session. Row-level rules then
    /// see that user instead of the anonymous caller.
    pub fn with_session_token(mut self, access_token: &str) -> Self {
        self.session_token = Some(access_token.to_string());
        self
    }

    fn request(&self, method: Method, path_and_query: &str, elevated: bool) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path_and_query);
        let builder = self.client.request(method, &url).timeout(self.timeout);

        if elevated {
            // Callers check for the secret key before taking this branch
            let key = self.secret_key.as_deref().unwrap_or(&self.publishable_key);
            builder.header("apikey", key).bearer_auth(key)
        } else {
            let bearer = self
                .session_token
                .as_deref()
                .unwrap_or(&self.publishable_key);
            builder
                .header("apikey", &self.publishable_key)
                .bearer_auth(bearer)
        }
    }
}

fn classify_failure(operation: &str, status: StatusCode) -> ProfileStoreError {
    match status.as_u16() {
        401 | 403 => ProfileStoreError::permission_denied(operation),
        429 => ProfileStoreError::unavailable(429),
        s if s >= 500 => ProfileStoreError::unavailable(s),
        s => ProfileStoreError::invalid_response(format!("unexpected status {s} from {operation}")),
    }
}

#[async_trait]
impl ProfileStore for ProfileApi {
    async fn fetch(&self, id: Uuid) -> Result<Option<Profile>, ProfileStoreError> {
        let path = format!("/rest/v1/profiles?id=eq.{}&select=*", id);
        let response = self
            .request(Method::GET, &path, false)
            .send()
            .await
            .map_err(|e| ProfileStoreError::transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(classify_failure("fetch", status));
        }

        let mut rows: Vec<Profile> = response
            .json()
            .await
            .map_err(|e| ProfileStoreError::invalid_response(e.to_string()))?;

        if rows.len() > 1 {
            return Err(ProfileStoreError::invalid_response(format!(
                "{} rows returned for one profile id",
                rows.len()
            )));
        }

        Ok(rows.pop())
    }

    async fn update_role(&self, id: Uuid, role: Role) -> Result<(), ProfileStoreError> {
        #[derive(Serialize)]
        struct UpdateRoleRequest {
            role: Role,
        }

        let path = format!("/rest/v1/profiles?id=eq.{}", id);
        let response = self
            .request(Method::PATCH, &path, false)
            .header("Prefer", "return=minimal")
            .json(&UpdateRoleRequest { role })
            .send()
            .await
            .map_err(|e| ProfileStoreError::transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(classify_failure("update_role", status));
        }

        Ok(())
    }

    async fn upsert(&self, row: &ProfileUpsert) -> Result<(), ProfileStoreError> {
        let response = self
            .request(Method::POST, "/rest/v1/profiles?on_conflict=id", false)
            .header("Prefer", "resolution=merge-duplicates,return=minimal")
            .json(row)
            .send()
            .await
            .map_err(|e| ProfileStoreError::transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(classify_failure("upsert", status));
        }

        Ok(())
    }

    async fn assign_role_elevated(&self, id: Uuid, role: Role) -> Result<(), ProfileStoreError> {
        if self.secret_key.is_none() {
            // No elevated channel in this deployment; report it the same
            // way the backend would so the caller falls through cleanly.
            return Err(ProfileStoreError::permission_denied("assign_role_elevated"));
        }

        #[derive(Serialize)]
        struct AssignRoleRequest<'a> {
            profile_id: Uuid,
            new_role: &'a str,
        }

        let body = AssignRoleRequest {
            profile_id: id,
            new_role: role.as_str(),
        };

        let response = self
            .request(Method::POST, "/rest/v1/rpc/assign_profile_role", true)
            .json(&body)
            .send()
            .await
            .map_err(|e| ProfileStoreError::transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(classify_failure("assign_role_elevated", status));
        }

        Ok(())
    }
}
