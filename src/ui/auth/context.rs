//! Session context for the portal's authentication lifecycle
//!
//! This module provides the reactive session context that:
//! - Holds the verified user, the startup `loading` flag, and the
//!   logging-out flag as signals
//! - Restores the cached user optimistically, then verifies with the gateway
//! - Exchanges the Google authorization code after the OAuth redirect
//! - Clears everything on logout, backend reachable or not
//!
//! The transitions are generic over [`AuthGateway`] and [`SessionStore`];
//! production wiring binds the HTTP gateway and localStorage, tests bind a
//! scripted gateway and an in-memory store.
//!
//! The context carries a disposal flag flipped at teardown (`on_cleanup`).
//! Every transition re-checks it after suspending, so a gateway response
//! that resolves after the context is gone cannot write stale state.

use leptos::logging::log;
use leptos::prelude::*;
#[cfg(not(feature = "ssr"))]
use leptos::task::spawn_local;

use crate::core::config::Config;
use crate::core::gateway::{AuthGateway, authorize_url, verified_user};
use crate::core::session::{SessionStore, clear_session, now_ms, restore_user, save_session};
use crate::core::user::{Role, User};

#[cfg(not(feature = "ssr"))]
use crate::core::api::ApiClient;
#[cfg(not(feature = "ssr"))]
use crate::core::gateway::HttpAuthGateway;
#[cfg(not(feature = "ssr"))]
use crate::core::session::BrowserSessionStore;

/// Route that receives the provider redirect carrying `?code`.
const CALLBACK_ROUTE: &str = "/authenticate";

/// Reactive session state shared through the component tree.
#[derive(Clone, Copy)]
pub struct SessionContext {
    /// Verified user, `None` while signed out.
    user: RwSignal<Option<User>>,
    /// True from construction until the startup verification resolves.
    /// Never goes back to true.
    loading: RwSignal<bool>,
    /// True while a logout is being played out.
    logging_out: RwSignal<bool>,
    /// Guards the startup verification so it runs once per context.
    started: RwSignal<bool>,
    /// Set at teardown. Every transition re-checks it after suspending, so a
    /// response that resolves after teardown writes nothing.
    disposed: RwSignal<bool>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self {
            user: RwSignal::new(None),
            loading: RwSignal::new(true),
            logging_out: RwSignal::new(false),
            started: RwSignal::new(false),
            disposed: RwSignal::new(false),
        }
    }

    /// Marks the context torn down. In-flight transitions drop their writes
    /// when they resolve; new ones return immediately.
    pub fn dispose(&self) {
        self.disposed.set(true);
    }

    fn is_disposed(&self) -> bool {
        self.disposed.get_untracked()
    }

    /// Current user (reactive).
    pub fn user(&self) -> Option<User> {
        self.user.get()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.with(|user| user.is_some())
    }

    /// True until the startup verification has resolved once.
    pub fn loading(&self) -> bool {
        self.loading.get()
    }

    pub fn is_logging_out(&self) -> bool {
        self.logging_out.get()
    }

    /// Membership check against an allow-list. Always false while signed out.
    pub fn has_role(&self, allowed: &[Role]) -> bool {
        self.user.with(|user| {
            user.as_ref()
                .map(|user| allowed.contains(&user.role))
                .unwrap_or(false)
        })
    }

    /// Startup verification: optimistic restore from the cache, then the
    /// authoritative `current_user` round-trip. Runs once per context; later
    /// calls return immediately so a mount issues exactly one request.
    pub async fn initialize<G: AuthGateway, S: SessionStore>(&self, gateway: &G, store: &S) {
        if self.is_disposed() || self.started.get_untracked() {
            return;
        }
        self.started.set(true);

        if let Some(cached) = restore_user(store, now_ms()) {
            self.user.set(Some(cached));
        }

        let outcome = gateway.current_user().await.and_then(verified_user);
        if self.is_disposed() {
            return;
        }

        match outcome {
            Ok(user) => {
                save_session(store, &user, now_ms());
                self.user.set(Some(user));
            }
            Err(failure) => {
                log!("session verification failed: {failure}");
                clear_session(store);
                self.user.set(None);
            }
        }

        self.loading.set(false);
    }

    /// Exchanges the authorization code from the provider redirect for a
    /// session. Returns whether the portal is now signed in.
    pub async fn handle_callback<G: AuthGateway, S: SessionStore>(
        &self,
        gateway: &G,
        store: &S,
        code: &str,
        redirect_uri: &str,
    ) -> bool {
        if self.is_disposed() {
            return false;
        }

        let outcome = gateway
            .exchange_code(code, redirect_uri)
            .await
            .and_then(verified_user);
        if self.is_disposed() {
            return false;
        }

        match outcome {
            Ok(user) => {
                save_session(store, &user, now_ms());
                self.user.set(Some(user));
                true
            }
            Err(failure) => {
                log!("code exchange failed: {failure}");
                clear_session(store);
                self.user.set(None);
                false
            }
        }
    }

    /// Hands the browser to Google's consent screen. Synchronous: the whole
    /// page navigates away, nothing here awaits a response.
    pub fn login(&self, config: &Config) {
        let Some(client_id) = config.google_client_id.clone() else {
            leptos::logging::warn!("PROCTOR_GOOGLE_CLIENT_ID is not set; sign-in is disabled");
            return;
        };
        let redirect_uri = config
            .oauth_redirect_uri
            .clone()
            .unwrap_or_else(default_redirect_uri);
        navigate_out(&authorize_url(&client_id, &redirect_uri));
    }

    /// Ends the session. The gateway call is best-effort; the local session
    /// is cleared no matter what, then the whole page navigates to `/login`
    /// so every piece of transient state resets. Safe to call repeatedly.
    pub async fn logout<G: AuthGateway, S: SessionStore>(&self, gateway: &G, store: &S) {
        if self.is_disposed() {
            return;
        }
        self.logging_out.set(true);

        match gateway.logout().await {
            Ok(envelope) if envelope.error => {
                log!("logout rejected by the gateway: {}", envelope.message);
            }
            Err(failure) => {
                log!("logout call failed (clearing the local session anyway): {failure}");
            }
            Ok(_) => {}
        }
        if self.is_disposed() {
            return;
        }

        clear_session(store);
        self.user.set(None);

        // Hold the overlay briefly so it doesn't flash. Nothing is pending
        // during the wait.
        linger().await;
        self.logging_out.set(false);

        navigate_out("/login");
    }
}

/// Redirect URI when none is configured: current origin + callback route.
fn default_redirect_uri() -> String {
    #[cfg(not(feature = "ssr"))]
    {
        if let Some(window) = web_sys::window() {
            if let Ok(origin) = window.location().origin() {
                return format!("{origin}{CALLBACK_ROUTE}");
            }
        }
    }
    CALLBACK_ROUTE.to_string()
}

/// Full-page navigation, leaving the SPA entirely.
#[cfg(not(feature = "ssr"))]
fn navigate_out(url: &str) {
    if let Some(window) = web_sys::window() {
        if window.location().set_href(url).is_err() {
            log!("navigation to {url} failed");
        }
    }
}

#[cfg(feature = "ssr")]
fn navigate_out(_url: &str) {}

#[cfg(not(feature = "ssr"))]
async fn linger() {
    gloo_timers::future::TimeoutFuture::new(crate::core::session::LOGOUT_LINGER_MS).await;
}

#[cfg(feature = "ssr")]
async fn linger() {}

/// Provide the session context to the component tree and, on the client,
/// kick off the startup verification after hydration.
pub fn provide_session_context(config: &Config) -> SessionContext {
    let session = SessionContext::new();
    provide_context(session);
    on_cleanup(move || session.dispose());

    #[cfg(not(feature = "ssr"))]
    {
        let config = config.clone();
        Effect::new(move |_| {
            let config = config.clone();
            spawn_local(async move {
                let gateway = HttpAuthGateway::new(ApiClient::new(config.api_base_url.clone()));
                session.initialize(&gateway, &BrowserSessionStore).await;
            });
        });
    }
    #[cfg(feature = "ssr")]
    {
        let _ = config;
    }

    session
}

/// Get the session context from the component tree.
pub fn use_session() -> SessionContext {
    expect_context::<SessionContext>()
}

/// Exchange the `?code` from the provider redirect. Client-side only; the
/// server render of the callback page never talks to the gateway.
pub async fn complete_callback(session: SessionContext, config: &Config, code: &str) -> bool {
    #[cfg(not(feature = "ssr"))]
    {
        let gateway = HttpAuthGateway::new(ApiClient::new(config.api_base_url.clone()));
        let redirect_uri = config
            .oauth_redirect_uri
            .clone()
            .unwrap_or_else(default_redirect_uri);
        session
            .handle_callback(&gateway, &BrowserSessionStore, code, &redirect_uri)
            .await
    }
    #[cfg(feature = "ssr")]
    {
        let _ = (session, config, code);
        false
    }
}

/// Sign out against the production gateway and storage.
pub async fn sign_out(session: SessionContext, config: &Config) {
    #[cfg(not(feature = "ssr"))]
    {
        let gateway = HttpAuthGateway::new(ApiClient::new(config.api_base_url.clone()));
        session.logout(&gateway, &BrowserSessionStore).await;
    }
    #[cfg(feature = "ssr")]
    {
        let _ = (session, config);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use async_trait::async_trait;
    use leptos::reactive::owner::Owner;

    use super::*;
    use crate::core::api::{ApiFailure, ApiResponse};
    use crate::core::gateway::UserDto;
    use crate::core::session::{
        MemorySessionStore, SESSION_TTL_MS, load_stamps, restore_user, save_session,
    };
    use crate::core::session::store::USER_KEY;

    fn student_dto() -> UserDto {
        UserDto {
            email: "sam@example.edu".to_string(),
            name: "Sam Student".to_string(),
            picture: String::new(),
            role: "STUDENT".to_string(),
        }
    }

    fn student() -> User {
        User::try_from(student_dto()).unwrap()
    }

    /// Scripted gateway: fixed responses plus call counters.
    struct MockGateway {
        user_response: Result<ApiResponse<UserDto>, ApiFailure>,
        exchange_response: Result<ApiResponse<UserDto>, ApiFailure>,
        logout_response: Result<ApiResponse<serde_json::Value>, ApiFailure>,
        user_calls: Cell<usize>,
        exchange_calls: Cell<usize>,
        logout_calls: Cell<usize>,
    }

    impl Default for MockGateway {
        fn default() -> Self {
            Self {
                user_response: Err(ApiFailure::Network("unscripted".to_string())),
                exchange_response: Err(ApiFailure::Network("unscripted".to_string())),
                logout_response: Ok(ApiResponse {
                    error: false,
                    data: None,
                    message: "Logged out successfully".to_string(),
                }),
                user_calls: Cell::new(0),
                exchange_calls: Cell::new(0),
                logout_calls: Cell::new(0),
            }
        }
    }

    impl MockGateway {
        fn verifying(dto: UserDto) -> Self {
            Self {
                user_response: Ok(ApiResponse::success(dto)),
                ..Self::default()
            }
        }

        fn exchanging(dto: UserDto) -> Self {
            Self {
                exchange_response: Ok(ApiResponse::success(dto)),
                ..Self::default()
            }
        }
    }

    #[async_trait(?Send)]
    impl AuthGateway for MockGateway {
        async fn exchange_code(
            &self,
            _code: &str,
            _redirect_uri: &str,
        ) -> Result<ApiResponse<UserDto>, ApiFailure> {
            self.exchange_calls.set(self.exchange_calls.get() + 1);
            self.exchange_response.clone()
        }

        async fn current_user(&self) -> Result<ApiResponse<UserDto>, ApiFailure> {
            self.user_calls.set(self.user_calls.get() + 1);
            self.user_response.clone()
        }

        async fn logout(&self) -> Result<ApiResponse<serde_json::Value>, ApiFailure> {
            self.logout_calls.set(self.logout_calls.get() + 1);
            self.logout_response.clone()
        }
    }

    /// Signals need a live owner; keep it bound for the test duration.
    fn session_under_owner() -> (SessionContext, Owner) {
        let owner = Owner::new();
        let session = owner.with(SessionContext::new);
        (session, owner)
    }

    /// Wraps a gateway and tears the context down while the call is in
    /// flight, simulating a response that lands after teardown.
    struct DisposingGateway {
        inner: MockGateway,
        session: SessionContext,
    }

    #[async_trait(?Send)]
    impl AuthGateway for DisposingGateway {
        async fn exchange_code(
            &self,
            code: &str,
            redirect_uri: &str,
        ) -> Result<ApiResponse<UserDto>, ApiFailure> {
            self.session.dispose();
            self.inner.exchange_code(code, redirect_uri).await
        }

        async fn current_user(&self) -> Result<ApiResponse<UserDto>, ApiFailure> {
            self.session.dispose();
            self.inner.current_user().await
        }

        async fn logout(&self) -> Result<ApiResponse<serde_json::Value>, ApiFailure> {
            self.session.dispose();
            self.inner.logout().await
        }
    }

    // ========================================================================
    // has_role
    // ========================================================================

    #[test]
    fn test_has_role_is_false_while_signed_out() {
        let (session, _owner) = session_under_owner();
        assert!(!session.has_role(&[Role::Admin, Role::Teacher, Role::Student]));
        assert!(!session.has_role(&[]));
    }

    #[test]
    fn test_has_role_checks_the_allow_list() {
        let (session, _owner) = session_under_owner();
        session.user.set(Some(student()));

        assert!(session.has_role(&[Role::Student]));
        assert!(session.has_role(&[Role::Teacher, Role::Student]));
        assert!(!session.has_role(&[Role::Admin]));
        assert!(!session.has_role(&[]));
    }

    // ========================================================================
    // initialize
    // ========================================================================

    #[tokio::test]
    async fn test_initialize_verifies_and_persists() {
        let (session, _owner) = session_under_owner();
        let gateway = MockGateway::verifying(student_dto());
        let store = MemorySessionStore::new();

        assert!(session.loading());
        session.initialize(&gateway, &store).await;

        assert_eq!(session.user(), Some(student()));
        assert!(!session.loading());
        assert!(session.is_authenticated());
        assert_eq!(restore_user(&store, now_ms()), Some(student()));
        assert_eq!(gateway.user_calls.get(), 1);
    }

    #[tokio::test]
    async fn test_initialize_runs_once_per_context() {
        let (session, _owner) = session_under_owner();
        let gateway = MockGateway::verifying(student_dto());
        let store = MemorySessionStore::new();

        session.initialize(&gateway, &store).await;
        session.initialize(&gateway, &store).await;

        assert_eq!(gateway.user_calls.get(), 1);
        // loading resolved once and stayed resolved
        assert!(!session.loading());
    }

    #[tokio::test]
    async fn test_initialize_failure_leaves_signed_out() {
        let (session, _owner) = session_under_owner();
        let gateway = MockGateway::default(); // network failure
        let store = MemorySessionStore::new();

        session.initialize(&gateway, &store).await;

        assert_eq!(session.user(), None);
        assert!(!session.loading());
        assert_eq!(store.get(USER_KEY), None);
    }

    #[tokio::test]
    async fn test_initialize_rejected_envelope_clears_cached_session() {
        let (session, _owner) = session_under_owner();
        let gateway = MockGateway {
            user_response: Ok(ApiResponse::failure("Not authenticated")),
            ..MockGateway::default()
        };
        let store = MemorySessionStore::new();
        save_session(&store, &student(), now_ms());

        session.initialize(&gateway, &store).await;

        // The optimistic restore got overruled by the gateway.
        assert_eq!(session.user(), None);
        assert_eq!(load_stamps(&store), None);
    }

    #[tokio::test]
    async fn test_initialize_replaces_stale_cache_with_fresh_identity() {
        let (session, _owner) = session_under_owner();

        let mut renamed = student_dto();
        renamed.name = "Sam S. Student".to_string();
        let gateway = MockGateway::verifying(renamed);

        let store = MemorySessionStore::new();
        let stamped_at = now_ms() - 1000;
        save_session(&store, &student(), stamped_at);

        session.initialize(&gateway, &store).await;

        let user = session.user().unwrap();
        assert_eq!(user.name, "Sam S. Student");
        // Fresh verification restarts the 30-day window.
        let stamps = load_stamps(&store).unwrap();
        assert!(stamps.expiry_ms > stamped_at + SESSION_TTL_MS);
    }

    #[tokio::test]
    async fn test_initialize_rejects_unknown_role() {
        let (session, _owner) = session_under_owner();
        let mut dto = student_dto();
        dto.role = "PRINCIPAL".to_string();
        let gateway = MockGateway::verifying(dto);
        let store = MemorySessionStore::new();

        session.initialize(&gateway, &store).await;

        assert_eq!(session.user(), None);
        assert!(!session.loading());
    }

    // ========================================================================
    // handle_callback
    // ========================================================================

    #[tokio::test]
    async fn test_callback_success_signs_in_and_persists() {
        let (session, _owner) = session_under_owner();
        let gateway = MockGateway::exchanging(student_dto());
        let store = MemorySessionStore::new();

        let ok = session
            .handle_callback(
                &gateway,
                &store,
                "4/0Adeu5q",
                "http://localhost:3000/authenticate",
            )
            .await;

        assert!(ok);
        assert_eq!(session.user(), Some(student()));
        assert_eq!(restore_user(&store, now_ms()), Some(student()));
        assert_eq!(gateway.exchange_calls.get(), 1);
    }

    #[tokio::test]
    async fn test_callback_bad_code_leaves_signed_out() {
        let (session, _owner) = session_under_owner();
        let gateway = MockGateway {
            exchange_response: Err(ApiFailure::Status {
                status: 400,
                message: "Authentication failed".to_string(),
            }),
            ..MockGateway::default()
        };
        let store = MemorySessionStore::new();

        let ok = session
            .handle_callback(
                &gateway,
                &store,
                "bad-code",
                "http://localhost:3000/authenticate",
            )
            .await;

        assert!(!ok);
        assert_eq!(session.user(), None);
        assert_eq!(load_stamps(&store), None);
    }

    #[tokio::test]
    async fn test_callback_rejected_envelope_counts_as_failure() {
        let (session, _owner) = session_under_owner();
        let gateway = MockGateway {
            exchange_response: Ok(ApiResponse::failure("Authentication failed")),
            ..MockGateway::default()
        };
        let store = MemorySessionStore::new();

        let ok = session
            .handle_callback(
                &gateway,
                &store,
                "4/0Adeu5q",
                "http://localhost:3000/authenticate",
            )
            .await;

        assert!(!ok);
        assert!(!session.is_authenticated());
    }

    // ========================================================================
    // logout
    // ========================================================================

    #[tokio::test]
    async fn test_logout_clears_session_and_resets_flag() {
        let (session, _owner) = session_under_owner();
        let gateway = MockGateway::default();
        let store = MemorySessionStore::new();

        session.user.set(Some(student()));
        save_session(&store, &student(), now_ms());

        session.logout(&gateway, &store).await;

        assert_eq!(session.user(), None);
        assert!(!session.is_logging_out());
        assert_eq!(load_stamps(&store), None);
        assert_eq!(gateway.logout_calls.get(), 1);
    }

    #[tokio::test]
    async fn test_logout_clears_even_when_gateway_is_down() {
        let (session, _owner) = session_under_owner();
        let gateway = MockGateway {
            logout_response: Err(ApiFailure::Network("connection refused".to_string())),
            ..MockGateway::default()
        };
        let store = MemorySessionStore::new();

        session.user.set(Some(student()));
        save_session(&store, &student(), now_ms());

        session.logout(&gateway, &store).await;

        assert_eq!(session.user(), None);
        assert_eq!(store.get(USER_KEY), None);
        assert!(!session.is_logging_out());
    }

    #[tokio::test]
    async fn test_logout_twice_in_a_row_is_harmless() {
        let (session, _owner) = session_under_owner();
        let gateway = MockGateway::default();
        let store = MemorySessionStore::new();

        session.logout(&gateway, &store).await;
        session.logout(&gateway, &store).await;

        assert_eq!(session.user(), None);
        assert!(!session.is_logging_out());
        assert_eq!(gateway.logout_calls.get(), 2);
    }

    // ========================================================================
    // Disposal
    // ========================================================================

    #[tokio::test]
    async fn test_disposed_context_starts_nothing() {
        let (session, _owner) = session_under_owner();
        let gateway = MockGateway::verifying(student_dto());
        let store = MemorySessionStore::new();

        session.dispose();
        session.initialize(&gateway, &store).await;

        assert_eq!(gateway.user_calls.get(), 0);
        assert_eq!(session.user(), None);
        // Nobody observes a torn-down context; loading stays wherever it was.
        assert!(session.loading());
    }

    #[tokio::test]
    async fn test_verification_resolving_after_teardown_writes_nothing() {
        let (session, _owner) = session_under_owner();
        let gateway = DisposingGateway {
            inner: MockGateway::verifying(student_dto()),
            session,
        };
        let store = MemorySessionStore::new();

        session.initialize(&gateway, &store).await;

        assert_eq!(session.user(), None);
        assert!(session.loading());
        assert_eq!(load_stamps(&store), None);
    }

    #[tokio::test]
    async fn test_callback_resolving_after_teardown_reports_failure() {
        let (session, _owner) = session_under_owner();
        let gateway = DisposingGateway {
            inner: MockGateway::exchanging(student_dto()),
            session,
        };
        let store = MemorySessionStore::new();

        let ok = session
            .handle_callback(
                &gateway,
                &store,
                "4/0Adeu5q",
                "http://localhost:3000/authenticate",
            )
            .await;

        assert!(!ok);
        assert_eq!(session.user(), None);
        assert_eq!(store.get(USER_KEY), None);
    }
}
