//! Session persistence
//!
//! The session mirror lives in three localStorage entries: the serialized
//! user plus two epoch-millisecond stamps (expiry, last refresh). Everything
//! here goes through the [`SessionStore`] trait so the lifecycle logic runs
//! unchanged against the browser in production and an in-memory map in tests.

use std::cell::RefCell;
use std::collections::HashMap;

use super::policy;
use crate::core::user::User;

/// Cached user record.
pub const USER_KEY: &str = "proctor_user";
/// Epoch-ms stamp after which the mirrored session is considered dead.
pub const EXPIRY_KEY: &str = "proctor_session_expiry";
/// Epoch-ms stamp of the last time the window was (re)stamped.
pub const REFRESHED_AT_KEY: &str = "proctor_session_refreshed_at";

/// Minimal string key-value surface over the session cache.
pub trait SessionStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// localStorage-backed store.
///
/// Storage can be unavailable (privacy mode, server render); every operation
/// degrades to a no-op read or write in that case.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserSessionStore;

impl SessionStore for BrowserSessionStore {
    fn get(&self, key: &str) -> Option<String> {
        #[cfg(not(feature = "ssr"))]
        {
            if let Some(window) = web_sys::window() {
                if let Ok(Some(storage)) = window.local_storage() {
                    return storage.get_item(key).ok().flatten();
                }
            }
            None
        }
        #[cfg(feature = "ssr")]
        {
            let _ = key;
            None
        }
    }

    fn set(&self, key: &str, value: &str) {
        #[cfg(not(feature = "ssr"))]
        {
            if let Some(window) = web_sys::window() {
                if let Ok(Some(storage)) = window.local_storage() {
                    let _ = storage.set_item(key, value);
                }
            }
        }
        #[cfg(feature = "ssr")]
        {
            let _ = (key, value);
        }
    }

    fn remove(&self, key: &str) {
        #[cfg(not(feature = "ssr"))]
        {
            if let Some(window) = web_sys::window() {
                if let Ok(Some(storage)) = window.local_storage() {
                    let _ = storage.remove_item(key);
                }
            }
        }
        #[cfg(feature = "ssr")]
        {
            let _ = key;
        }
    }
}

/// HashMap-backed store for tests and host-side tooling.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }
}

/// Timing stamps of the mirrored session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionStamps {
    pub expiry_ms: i64,
    pub refreshed_ms: i64,
}

/// Reads both stamps; `None` if either is missing or unparsable.
pub fn load_stamps<S: SessionStore>(store: &S) -> Option<SessionStamps> {
    let expiry_ms = store.get(EXPIRY_KEY)?.parse().ok()?;
    let refreshed_ms = store.get(REFRESHED_AT_KEY)?.parse().ok()?;
    Some(SessionStamps {
        expiry_ms,
        refreshed_ms,
    })
}

/// Persists a verified user and stamps a fresh 30-day window.
pub fn save_session<S: SessionStore>(store: &S, user: &User, now_ms: i64) {
    if let Ok(raw) = serde_json::to_string(user) {
        store.set(USER_KEY, &raw);
    }
    store.set(EXPIRY_KEY, &(now_ms + policy::SESSION_TTL_MS).to_string());
    store.set(REFRESHED_AT_KEY, &now_ms.to_string());
}

/// Cached user for the optimistic restore on startup.
///
/// Only returns a user whose stamps exist and have not expired; a stale or
/// corrupt cache reads as "no session" and is left for the verification
/// round-trip to clear.
pub fn restore_user<S: SessionStore>(store: &S, now_ms: i64) -> Option<User> {
    let stamps = load_stamps(store)?;
    if policy::is_expired(stamps.expiry_ms, now_ms) {
        return None;
    }
    let raw = store.get(USER_KEY)?;
    serde_json::from_str(&raw).ok()
}

/// Removes the user and both stamps.
pub fn clear_session<S: SessionStore>(store: &S) {
    store.remove(USER_KEY);
    store.remove(EXPIRY_KEY);
    store.remove(REFRESHED_AT_KEY);
}

/// Removes only the cached user record. The 401 interceptor path: identity is
/// gone but the stamps stay, matching the backend having dropped the session.
pub fn forget_user<S: SessionStore>(store: &S) {
    store.remove(USER_KEY);
}

/// Applies the sliding renewal rule before an outbound request.
/// Returns true when the window was extended.
pub fn touch_session<S: SessionStore>(store: &S, now_ms: i64) -> bool {
    let Some(stamps) = load_stamps(store) else {
        return false;
    };
    match policy::renewed_expiry(stamps.expiry_ms, now_ms) {
        Some(new_expiry) => {
            store.set(EXPIRY_KEY, &new_expiry.to_string());
            store.set(REFRESHED_AT_KEY, &now_ms.to_string());
            true
        }
        None => false,
    }
}
