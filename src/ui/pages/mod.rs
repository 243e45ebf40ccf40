//! Application pages module
//!
//! This module contains all the page components for the portal:
//! - Home (role dispatch)
//! - Login and the OAuth callback
//! - Unauthorized (role mismatch)
//! - Role dashboards (admin, teacher, student)
//! - Not found

mod admin;
mod auth_callback;
mod home;
mod login;
mod not_found;
mod student;
mod teacher;
mod unauthorized;

pub use admin::AdminDashboardPage;
pub use auth_callback::AuthCallbackPage;
pub use home::HomePage;
pub use login::LoginPage;
pub use not_found::NotFoundPage;
pub use student::StudentDashboardPage;
pub use teacher::TeacherDashboardPage;
pub use unauthorized::UnauthorizedPage;
