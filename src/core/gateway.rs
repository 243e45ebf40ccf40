//! Backend auth gateway
//!
//! Three endpoints own the whole authentication story; everything else in the
//! portal rides the session cookie they establish. [`AuthGateway`] is the
//! seam the lifecycle logic talks to, so tests can swap the HTTP
//! implementation for a scripted one.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::core::api::{ApiClient, ApiFailure, ApiResponse};
use crate::core::user::{UnknownRole, User};

/// Google's OAuth 2.0 authorization endpoint.
pub const GOOGLE_AUTH_ENDPOINT: &str = "https://accounts.google.com/o/oauth2/v2/auth";

/// Scopes the portal asks for. Identity only; there is no API access.
pub const OAUTH_SCOPES: &str = "openid email profile";

/// User payload as the gateway serializes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDto {
    pub email: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub picture: String,
    pub role: String,
}

impl TryFrom<UserDto> for User {
    type Error = UnknownRole;

    fn try_from(dto: UserDto) -> Result<Self, Self::Error> {
        let role = dto.role.parse()?;
        Ok(User::from_verified(dto.email, dto.name, dto.picture, role))
    }
}

/// Turns a gateway user envelope into a domain [`User`].
///
/// A payload with an unknown role is as good as no payload: the caller
/// treats both as an authentication failure.
pub fn verified_user(envelope: ApiResponse<UserDto>) -> Result<User, ApiFailure> {
    let dto = envelope.into_result()?;
    User::try_from(dto).map_err(|e| ApiFailure::Decode(e.to_string()))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CallbackRequest<'a> {
    code: &'a str,
    redirect_uri: &'a str,
}

/// The three session endpoints of the backend gateway.
#[async_trait(?Send)]
pub trait AuthGateway {
    /// `POST /api/auth/google/callback` - exchange an authorization code.
    async fn exchange_code(
        &self,
        code: &str,
        redirect_uri: &str,
    ) -> Result<ApiResponse<UserDto>, ApiFailure>;

    /// `GET /api/auth/user` - who does the session cookie belong to.
    async fn current_user(&self) -> Result<ApiResponse<UserDto>, ApiFailure>;

    /// `POST /api/auth/logout` - invalidate the backend session.
    async fn logout(&self) -> Result<ApiResponse<serde_json::Value>, ApiFailure>;
}

/// Production gateway over [`ApiClient`].
#[derive(Debug, Clone)]
pub struct HttpAuthGateway {
    client: ApiClient,
}

impl HttpAuthGateway {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait(?Send)]
impl AuthGateway for HttpAuthGateway {
    async fn exchange_code(
        &self,
        code: &str,
        redirect_uri: &str,
    ) -> Result<ApiResponse<UserDto>, ApiFailure> {
        let request = CallbackRequest { code, redirect_uri };
        self.client
            .post_json("/api/auth/google/callback", &request)
            .await
    }

    async fn current_user(&self) -> Result<ApiResponse<UserDto>, ApiFailure> {
        self.client.get("/api/auth/user").await
    }

    async fn logout(&self) -> Result<ApiResponse<serde_json::Value>, ApiFailure> {
        self.client.post("/api/auth/logout").await
    }
}

/// Builds the Google authorization URL the login button navigates to.
/// `access_type=offline` keeps the backend able to refresh on its side.
pub fn authorize_url(client_id: &str, redirect_uri: &str) -> String {
    let query = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("client_id", client_id)
        .append_pair("redirect_uri", redirect_uri)
        .append_pair("response_type", "code")
        .append_pair("scope", OAUTH_SCOPES)
        .append_pair("access_type", "offline")
        .finish();
    format!("{GOOGLE_AUTH_ENDPOINT}?{query}")
}
