use std::time::Duration;

use thiserror::Error;

/// Header the API server checks on admin routes.
pub const ADMIN_AUTH_HEADER: &str = "Admin-Authorization";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("network support is not compiled in (enable the `network` feature)")]
    NetworkDisabled,

    #[error("admin auth token is not set")]
    MissingAdminToken,

    #[cfg(feature = "network")]
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Status and body of a finished request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: String,
    pub body: String,
}

/// Blocking client for the cp-api server.
pub struct ApiClient {
    base_url: String,
    admin_token: Option<String>,
    #[cfg(feature = "network")]
    http: reqwest::blocking::Client,
}

impl ApiClient {
    #[cfg(feature = "network")]
    pub fn new(base_url: &str, timeout: Duration, admin_token: Option<String>) -> Self {
        let http = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("falling back to default http client: {e}");
                reqwest::blocking::Client::new()
            });
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            admin_token,
            http,
        }
    }

    #[cfg(not(feature = "network"))]
    pub fn new(base_url: &str, _timeout: Duration, admin_token: Option<String>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            admin_token,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub fn has_admin_token(&self) -> bool {
        self.admin_token.is_some()
    }

    /// POST to an admin route with the admin auth header.
    pub fn admin_post(&self, path: &str) -> Result<ApiResponse, ApiError> {
        let token = self.admin_token.as_deref().ok_or(ApiError::MissingAdminToken)?;
        self.send(path, Some(token), None)
    }

    /// POST a JSON body to a public route.
    pub fn post_json(&self, path: &str, body: &serde_json::Value) -> Result<ApiResponse, ApiError> {
        self.send(path, None, Some(body.to_string()))
    }

    #[cfg(feature = "network")]
    fn send(
        &self,
        path: &str,
        admin_token: Option<&str>,
        json_body: Option<String>,
    ) -> Result<ApiResponse, ApiError> {
        let url = self.url(path);
        tracing::debug!(%url, "POST");

        let mut request = self.http.post(&url);
        if let Some(token) = admin_token {
            request = request.header(ADMIN_AUTH_HEADER, token);
        }
        if let Some(body) = json_body {
            request = request
                .header(reqwest::header::CONTENT_TYPE, "application/json")
                .body(body);
        }

        let wrap = |source| ApiError::Request {
            url: url.clone(),
            source,
        };
        let response = request.send().map_err(wrap)?;
        let status = response.status().to_string();
        let body = response.text().map_err(wrap)?;
        tracing::info!(%url, %status, "response received");
        Ok(ApiResponse { status, body })
    }

    #[cfg(not(feature = "network"))]
    fn send(
        &self,
        _path: &str,
        _admin_token: Option<&str>,
        _json_body: Option<String>,
    ) -> Result<ApiResponse, ApiError> {
        Err(ApiError::NetworkDisabled)
    }
}
