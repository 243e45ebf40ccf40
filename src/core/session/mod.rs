//! Client-side session mirror: persistence plus timing policy.

pub mod policy;
pub mod store;

pub use policy::{LOGOUT_LINGER_MS, REFRESH_WINDOW_MS, SESSION_TTL_MS};
pub use store::{
    BrowserSessionStore, MemorySessionStore, SessionStamps, SessionStore, clear_session,
    forget_user, load_stamps, restore_user, save_session, touch_session,
};

/// Milliseconds since the Unix epoch from the platform clock.
pub fn now_ms() -> i64 {
    #[cfg(not(feature = "ssr"))]
    {
        js_sys::Date::now() as i64
    }
    #[cfg(feature = "ssr")]
    {
        use std::time::{SystemTime, UNIX_EPOCH};
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_millis() as i64)
            .unwrap_or(0)
    }
}
