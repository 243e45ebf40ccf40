pub mod auth;
pub mod common;
pub mod icon;
pub mod layout;
pub mod pages;

pub use auth::{RequireAuth, SessionContext, provide_session_context, use_session};
pub use icon::{Icon, icons};
pub use layout::PortalLayout;
