//! Authentication UI module
//!
//! Session context plus the route guard that enforces it.

mod context;
mod route_guard;

pub use context::{
    SessionContext, complete_callback, provide_session_context, sign_out, use_session,
};
pub use route_guard::{GuardOutcome, RequireAuth, evaluate_guard};
