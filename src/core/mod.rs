//! Core domain logic: configuration, identity, session mirror, gateway transport.

pub mod api;
pub mod config;
pub mod gateway;
pub mod session;
pub mod user;

pub use user::{Role, User};
