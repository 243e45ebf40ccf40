//! HTTP transport for the backend gateway
//!
//! Every request the portal makes goes through [`ApiClient`], which gives one
//! chokepoint for the cross-cutting behavior the gateway expects:
//!
//! - cookies ride along (`credentials: include`); there is no token header
//! - before each request the sliding session renewal runs ([`crate::core::session::touch_session`])
//! - a 401 response purges the cached user record
//! - failures map onto [`ApiFailure`] and surface immediately; nothing retries
//!
//! The gateway wraps every body in the `{error, data, message}` envelope,
//! modeled by [`ApiResponse`].

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

#[cfg(not(feature = "ssr"))]
use crate::core::session::{BrowserSessionStore, forget_user, now_ms, touch_session};

/// Response envelope used by every gateway endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub error: bool,
    #[serde(default = "Option::default")]
    pub data: Option<T>,
    #[serde(default)]
    pub message: String,
}

impl<T> ApiResponse<T> {
    /// Successful envelope, as the backend emits on the happy path.
    pub fn success(data: T) -> Self {
        Self {
            error: false,
            data: Some(data),
            message: String::new(),
        }
    }

    /// Failure envelope carrying a human-readable message.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            error: true,
            data: None,
            message: message.into(),
        }
    }

    /// Unwraps the payload. The error flag and a missing payload are both
    /// failures even on an HTTP 2xx.
    pub fn into_result(self) -> Result<T, ApiFailure> {
        if self.error {
            return Err(ApiFailure::Rejected(self.message));
        }
        match self.data {
            Some(data) => Ok(data),
            None => Err(ApiFailure::Rejected(if self.message.is_empty() {
                "response carried no data".to_string()
            } else {
                self.message
            })),
        }
    }
}

/// Classified request failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiFailure {
    /// No response at all: offline, DNS, CORS, aborted.
    #[error("network error: {0}")]
    Network(String),
    /// 401: the backend no longer recognizes the session.
    #[error("authentication required")]
    Unauthorized,
    /// 403: authenticated but not allowed.
    #[error("you don't have permission to perform this action")]
    Forbidden,
    /// 404.
    #[error("resource not found")]
    NotFound,
    /// Any other non-2xx, message taken from the envelope when present.
    #[error("request failed with status {status}: {message}")]
    Status { status: u16, message: String },
    /// HTTP 2xx whose envelope flags an error or carries no data.
    #[error("request rejected: {0}")]
    Rejected(String),
    /// Body was not the expected envelope.
    #[error("malformed response: {0}")]
    Decode(String),
}

/// Maps a non-2xx status (plus the envelope message, when one parsed) onto
/// the failure taxonomy.
pub fn classify_status(status: u16, message: Option<String>) -> ApiFailure {
    match status {
        401 => ApiFailure::Unauthorized,
        403 => ApiFailure::Forbidden,
        404 => ApiFailure::NotFound,
        _ => ApiFailure::Status {
            status,
            message: message.unwrap_or_else(|| "request failed".to_string()),
        },
    }
}

#[cfg(feature = "ssr")]
const SSR_UNAVAILABLE: &str = "not available during server rendering";

/// Thin client over `gloo-net` bound to the gateway base URL.
///
/// On the server the portal never talks to the gateway; every method is a
/// stub that reports the transport as unavailable.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url }
    }

    /// Joins the base URL with an absolute path like `/api/auth/user`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<ApiResponse<T>, ApiFailure> {
        #[cfg(not(feature = "ssr"))]
        {
            self.touch();
            let response = gloo_net::http::Request::get(&self.endpoint(path))
                .credentials(web_sys::RequestCredentials::Include)
                .send()
                .await
                .map_err(|e| ApiFailure::Network(e.to_string()))?;
            Self::read(response).await
        }
        #[cfg(feature = "ssr")]
        {
            let _ = path;
            Err(ApiFailure::Network(SSR_UNAVAILABLE.to_string()))
        }
    }

    /// POST without a body (the logout endpoint takes none).
    pub async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<ApiResponse<T>, ApiFailure> {
        #[cfg(not(feature = "ssr"))]
        {
            self.touch();
            let response = gloo_net::http::Request::post(&self.endpoint(path))
                .credentials(web_sys::RequestCredentials::Include)
                .send()
                .await
                .map_err(|e| ApiFailure::Network(e.to_string()))?;
            Self::read(response).await
        }
        #[cfg(feature = "ssr")]
        {
            let _ = path;
            Err(ApiFailure::Network(SSR_UNAVAILABLE.to_string()))
        }
    }

    pub async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<ApiResponse<T>, ApiFailure> {
        #[cfg(not(feature = "ssr"))]
        {
            self.touch();
            let response = gloo_net::http::Request::post(&self.endpoint(path))
                .credentials(web_sys::RequestCredentials::Include)
                .json(body)
                .map_err(|e| ApiFailure::Decode(e.to_string()))?
                .send()
                .await
                .map_err(|e| ApiFailure::Network(e.to_string()))?;
            Self::read(response).await
        }
        #[cfg(feature = "ssr")]
        {
            let _ = (path, body);
            Err(ApiFailure::Network(SSR_UNAVAILABLE.to_string()))
        }
    }

    /// Sliding renewal before an outbound request.
    #[cfg(not(feature = "ssr"))]
    fn touch(&self) {
        if touch_session(&BrowserSessionStore, now_ms()) {
            leptos::logging::log!("session expiry window extended");
        }
    }

    #[cfg(not(feature = "ssr"))]
    async fn read<T: DeserializeOwned>(
        response: gloo_net::http::Response,
    ) -> Result<ApiResponse<T>, ApiFailure> {
        let status = response.status();
        if !response.ok() {
            // Error bodies usually still carry the envelope; salvage its message.
            let message = response
                .json::<ApiResponse<serde_json::Value>>()
                .await
                .ok()
                .map(|envelope| envelope.message)
                .filter(|message| !message.is_empty());
            let failure = classify_status(status, message);
            if matches!(failure, ApiFailure::Unauthorized) {
                forget_user(&BrowserSessionStore);
            }
            return Err(failure);
        }
        response
            .json::<ApiResponse<T>>()
            .await
            .map_err(|e| ApiFailure::Decode(e.to_string()))
    }
}
