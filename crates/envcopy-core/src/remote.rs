//! HTTP client for the remote copy service.
//!
//! Two operator-configured GET endpoints: one lists candidate destination
//! environments, the other performs the copy. Both are reached through the
//! `CopyService` trait so the dialog controller can be tested with fakes.

use anyhow::Context;
use reqwest::StatusCode;
use url::Url;

use crate::error::WorkflowError;
use crate::types::{CopyTarget, Credentials};

/// Parameters of a copy invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyRequest {
    /// The entry being replicated.
    pub entry_id: String,
    /// The environment it is copied from.
    pub source_env: String,
    /// The chosen destination.
    pub target: CopyTarget,
    /// Basic-auth credentials, present only in the credential-requiring
    /// deployment variant.
    pub credentials: Option<Credentials>,
}

/// Remote operations the copy workflow invokes.
///
/// Endpoint URLs are passed per call: resolving them from the installation
/// config (and failing when they are absent) is the controller's job and
/// must happen before any request is attempted.
pub trait CopyService {
    /// Fetch the ordered catalog of candidate destination environments.
    fn list_environments(
        &self,
        endpoint: &str,
        entry_id: &str,
        source_env: &str,
    ) -> impl Future<Output = Result<Vec<String>, WorkflowError>>;

    /// Ask the remote service to copy the entry into the selected target.
    /// Any 2xx response counts as success; the body is ignored.
    fn copy_entry(
        &self,
        endpoint: &str,
        request: &CopyRequest,
    ) -> impl Future<Output = Result<(), WorkflowError>>;
}

/// reqwest-backed implementation of [`CopyService`].
#[derive(Debug, Clone)]
pub struct HttpCopyService {
    client: reqwest::Client,
}

impl HttpCopyService {
    pub fn new() -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("envcopy/0.1.0")
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client })
    }
}

impl CopyService for HttpCopyService {
    async fn list_environments(
        &self,
        endpoint: &str,
        entry_id: &str,
        source_env: &str,
    ) -> Result<Vec<String>, WorkflowError> {
        let url = catalog_url(endpoint, entry_id, source_env)
            .map_err(WorkflowError::catalog)?;

        tracing::debug!(%url, "requesting environment catalog");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| WorkflowError::catalog(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(WorkflowError::catalog(failure_message(status, &body)));
        }

        response
            .json::<Vec<String>>()
            .await
            .map_err(|e| WorkflowError::catalog(format!("malformed catalog payload: {e}")))
    }

    async fn copy_entry(&self, endpoint: &str, request: &CopyRequest) -> Result<(), WorkflowError> {
        let url = copy_url(endpoint, request).map_err(WorkflowError::copy)?;

        tracing::debug!(target_env = request.target.as_query_value(), "requesting entry copy");
        let mut builder = self.client.get(url);
        if let Some(credentials) = &request.credentials {
            builder = builder.basic_auth(&credentials.username, Some(&credentials.password));
        }

        let response = builder
            .send()
            .await
            .map_err(|e| WorkflowError::copy(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(WorkflowError::copy(failure_message(status, &body)));
        }

        Ok(())
    }
}

/// Build the listing URL with `entryId` and `sourceEnv` query parameters.
fn catalog_url(endpoint: &str, entry_id: &str, source_env: &str) -> Result<Url, String> {
    Url::parse_with_params(endpoint, [("entryId", entry_id), ("sourceEnv", source_env)])
        .map_err(|e| format!("invalid endpoint URL {endpoint}: {e}"))
}

/// Build the copy URL with `entryId`, `sourceEnv` and `targetEnv` parameters.
fn copy_url(endpoint: &str, request: &CopyRequest) -> Result<Url, String> {
    Url::parse_with_params(
        endpoint,
        [
            ("entryId", request.entry_id.as_str()),
            ("sourceEnv", request.source_env.as_str()),
            ("targetEnv", request.target.as_query_value()),
        ],
    )
    .map_err(|e| format!("invalid endpoint URL {endpoint}: {e}"))
}

/// Pick the most specific failure text available: the server-supplied
/// `message` field of a JSON error body wins over the bare status line.
fn failure_message(status: StatusCode, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body)
        && let Some(message) = value.get("message").and_then(serde_json::Value::as_str)
        && !message.is_empty()
    {
        return message.to_string();
    }
    format!("HTTP {status}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_url_carries_query_parameters() {
        let url = catalog_url("https://x/list", "e1", "master").unwrap();
        assert_eq!(url.as_str(), "https://x/list?entryId=e1&sourceEnv=master");
    }

    #[test]
    fn copy_url_includes_target() {
        let request = CopyRequest {
            entry_id: "e1".to_string(),
            source_env: "master".to_string(),
            target: CopyTarget::Environment("staging".to_string()),
            credentials: None,
        };
        let url = copy_url("https://x/copy", &request).unwrap();
        assert_eq!(
            url.as_str(),
            "https://x/copy?entryId=e1&sourceEnv=master&targetEnv=staging"
        );
    }

    #[test]
    fn copy_url_uses_all_sentinel() {
        let request = CopyRequest {
            entry_id: "e1".to_string(),
            source_env: "master".to_string(),
            target: CopyTarget::AllEnvironments,
            credentials: None,
        };
        let url = copy_url("https://x/copy", &request).unwrap();
        assert!(url.as_str().ends_with("targetEnv=ALL"));
    }

    #[test]
    fn invalid_endpoint_url_is_reported() {
        let result = catalog_url("not a url", "e1", "master");
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("not a url"));
    }

    #[test]
    fn failure_message_prefers_server_message() {
        let message = failure_message(
            StatusCode::INTERNAL_SERVER_ERROR,
            r#"{"message":"lock conflict"}"#,
        );
        assert_eq!(message, "lock conflict");
    }

    #[test]
    fn failure_message_falls_back_to_status() {
        assert_eq!(
            failure_message(StatusCode::INTERNAL_SERVER_ERROR, "<html>oops</html>"),
            "HTTP 500 Internal Server Error"
        );
        assert_eq!(
            failure_message(StatusCode::BAD_GATEWAY, ""),
            "HTTP 502 Bad Gateway"
        );
    }

    #[test]
    fn failure_message_ignores_non_string_message() {
        let message = failure_message(StatusCode::INTERNAL_SERVER_ERROR, r#"{"message":42}"#);
        assert_eq!(message, "HTTP 500 Internal Server Error");
    }
}
