//! Session timing policy
//!
//! The backend keeps the authoritative session; the client mirrors its
//! lifetime with two epoch-millisecond stamps (expiry, last refresh) and
//! slides the window on outbound traffic:
//!
//! - A session lives 30 days from the last time it was (re)stamped.
//! - When a request goes out and less than 7 days remain, the stamp is
//!   extended to a fresh 30 days. Already-expired stamps are never revived.

/// Full session lifetime stamped on login, verification, and renewal.
pub const SESSION_TTL_MS: i64 = 30 * 24 * 60 * 60 * 1000;

/// Remaining-validity threshold under which outbound traffic renews the stamp.
pub const REFRESH_WINDOW_MS: i64 = 7 * 24 * 60 * 60 * 1000;

/// How long the logging-out overlay stays up after the session is cleared.
/// Purely presentational; nothing is pending during the wait.
pub const LOGOUT_LINGER_MS: u32 = 800;

/// True once the expiry stamp is no longer in the future.
pub fn is_expired(expiry_ms: i64, now_ms: i64) -> bool {
    expiry_ms <= now_ms
}

/// Sliding renewal rule. Returns the new expiry stamp when the session is
/// still valid but has less than [`REFRESH_WINDOW_MS`] left; `None` leaves
/// the stamp untouched (plenty of time left, or already expired).
pub fn renewed_expiry(expiry_ms: i64, now_ms: i64) -> Option<i64> {
    let remaining = expiry_ms - now_ms;
    if remaining > 0 && remaining < REFRESH_WINDOW_MS {
        Some(now_ms + SESSION_TTL_MS)
    } else {
        None
    }
}
