//! Runtime configuration
//!
//! Two sources, one shape: the server binary reads the process environment at
//! startup (`from_env`), while the wasm bundle captures the same variables at
//! compile time (`from_build_env`) because the browser has no process
//! environment. The resolved config is provided as Leptos context so pages
//! and the auth wrappers share a single copy.
//!
//! Variables:
//! - `PROCTOR_API_URL` - backend gateway origin (default `http://localhost:8000`)
//! - `PROCTOR_GOOGLE_CLIENT_ID` - OAuth client id; sign-in is inert without it
//! - `PROCTOR_OAUTH_REDIRECT_URI` - registered redirect; defaults to
//!   `{window origin}/authenticate` in the browser

use leptos::prelude::*;

/// Fallback gateway origin for local development.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

/// Environment-derived settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_base_url: String,
    pub google_client_id: Option<String>,
    pub oauth_redirect_uri: Option<String>,
}

impl Config {
    /// Reads the process environment. Server side only; the wasm bundle uses
    /// [`Config::from_build_env`].
    ///
    /// Call `dotenvy::dotenv()` before this to load from a `.env` file.
    pub fn from_env() -> Self {
        Self {
            api_base_url: std::env::var("PROCTOR_API_URL")
                .ok()
                .filter(|value| !value.is_empty())
                .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
            google_client_id: std::env::var("PROCTOR_GOOGLE_CLIENT_ID")
                .ok()
                .filter(|value| !value.is_empty()),
            oauth_redirect_uri: std::env::var("PROCTOR_OAUTH_REDIRECT_URI")
                .ok()
                .filter(|value| !value.is_empty()),
        }
    }

    /// Compile-time capture of the same variables for the browser bundle.
    pub fn from_build_env() -> Self {
        Self {
            api_base_url: option_env!("PROCTOR_API_URL")
                .filter(|value| !value.is_empty())
                .unwrap_or(DEFAULT_API_BASE_URL)
                .to_string(),
            google_client_id: option_env!("PROCTOR_GOOGLE_CLIENT_ID")
                .filter(|value| !value.is_empty())
                .map(str::to_string),
            oauth_redirect_uri: option_env!("PROCTOR_OAUTH_REDIRECT_URI")
                .filter(|value| !value.is_empty())
                .map(str::to_string),
        }
    }

    /// Check if an OAuth client id is configured
    pub fn has_google_client_id(&self) -> bool {
        self.google_client_id.is_some()
    }

    /// Check if an explicit redirect URI is configured
    pub fn has_oauth_redirect_uri(&self) -> bool {
        self.oauth_redirect_uri.is_some()
    }
}

/// Makes the config available to the component tree.
pub fn provide_config(config: Config) {
    provide_context(config);
}

/// Panics without a provider above; a missing config is a programming error,
/// not a runtime condition to recover from.
pub fn use_config() -> Config {
    expect_context::<Config>()
}

#[cfg(test)]
mod tests {
    use super::*;

    // Tests construct Config explicitly instead of mutating the process
    // environment (no env var dependencies - thread safe).

    fn full_config() -> Config {
        Config {
            api_base_url: "https://api.portal.example.edu".to_string(),
            google_client_id: Some("12345.apps.googleusercontent.com".to_string()),
            oauth_redirect_uri: Some("https://portal.example.edu/authenticate".to_string()),
        }
    }

    // ========================================================================
    // Presence helpers
    // ========================================================================

    #[test]
    fn test_presence_helpers_with_everything_set() {
        let config = full_config();
        assert!(config.has_google_client_id());
        assert!(config.has_oauth_redirect_uri());
    }

    #[test]
    fn test_presence_helpers_with_nothing_set() {
        let bare = Config {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            google_client_id: None,
            oauth_redirect_uri: None,
        };
        assert!(!bare.has_google_client_id());
        assert!(!bare.has_oauth_redirect_uri());
    }

    // ========================================================================
    // Build-time capture
    // ========================================================================

    #[test]
    fn test_build_env_always_has_a_gateway_origin() {
        // Whatever was or wasn't set when this test binary was compiled, the
        // default backstops the base URL; it never comes out empty.
        assert!(!Config::from_build_env().api_base_url.is_empty());
    }

    #[test]
    fn test_config_clones_for_context() {
        let config = full_config();
        assert_eq!(config.clone(), config);
    }
}
