//! Route authorization
//!
//! [`RequireAuth`] wraps a routed page and renders it only for a permitted
//! session. Everything it decides funnels through [`evaluate_guard`], a pure
//! function over (loading, user, requirements), so the decision table is
//! testable without a router.
//!
//! Redirects use replace-navigation: the page the visitor never saw must not
//! land in browser history, and Back keeps working.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::core::user::{Role, User};
use crate::ui::auth::use_session;
use crate::ui::common::LoadingSpinner;

/// What the guard decided for the current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardOutcome {
    /// Startup verification still pending; show the loading indicator.
    Loading,
    /// Session satisfies the route's requirements.
    Allow,
    /// Authentication required and nobody is signed in.
    RedirectLogin,
    /// Signed in, but the role is not on the allow-list.
    RedirectUnauthorized,
}

/// Decision table for route access.
///
/// The checks run in order: pending verification wins, then the
/// authentication requirement, then the role allow-list. The role check
/// applies only when someone is signed in; a route that sets an allow-list
/// but opts out of `require_auth` renders for anonymous visitors.
pub fn evaluate_guard(
    loading: bool,
    user: Option<&User>,
    require_auth: bool,
    allowed_roles: Option<&[Role]>,
) -> GuardOutcome {
    if loading {
        return GuardOutcome::Loading;
    }
    if require_auth && user.is_none() {
        return GuardOutcome::RedirectLogin;
    }
    if let (Some(allowed), Some(user)) = (allowed_roles, user) {
        if !allowed.contains(&user.role) {
            return GuardOutcome::RedirectUnauthorized;
        }
    }
    GuardOutcome::Allow
}

fn replace_nav() -> NavigateOptions {
    NavigateOptions {
        replace: true,
        ..Default::default()
    }
}

/// Guarded route wrapper.
///
/// Re-evaluates on every session change: a page can flip from allowed to
/// redirected mid-visit when the session resolves differently (say, a 401
/// wiped the user).
#[component]
pub fn RequireAuth(
    /// Roles allowed through; `None` skips the role check.
    #[prop(optional)]
    allowed_roles: Option<Vec<Role>>,
    /// Whether a signed-in session is required at all.
    #[prop(default = true)]
    require_auth: bool,
    children: ChildrenFn,
) -> impl IntoView {
    let session = use_session();
    let navigate = use_navigate();

    let roles_for_redirect = allowed_roles.clone();
    Effect::new(move |_| {
        let user = session.user();
        match evaluate_guard(
            session.loading(),
            user.as_ref(),
            require_auth,
            roles_for_redirect.as_deref(),
        ) {
            GuardOutcome::RedirectLogin => navigate("/login", replace_nav()),
            GuardOutcome::RedirectUnauthorized => navigate("/unauthorized", replace_nav()),
            GuardOutcome::Loading | GuardOutcome::Allow => {}
        }
    });

    move || {
        let user = session.user();
        match evaluate_guard(
            session.loading(),
            user.as_ref(),
            require_auth,
            allowed_roles.as_deref(),
        ) {
            GuardOutcome::Allow => children().into_any(),
            // Loading, or a redirect about to land: never flash the page.
            _ => view! { <LoadingSpinner message="Checking your session...".to_string() /> }
                .into_any(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_with(role: Role) -> User {
        User::from_verified(
            "ada@example.edu".to_string(),
            "Ada Lovelace".to_string(),
            String::new(),
            role,
        )
    }

    // ========================================================================
    // Decision table
    // ========================================================================

    #[test]
    fn test_loading_wins_over_everything() {
        assert_eq!(
            evaluate_guard(true, None, true, Some(&[Role::Admin])),
            GuardOutcome::Loading
        );
        let admin = user_with(Role::Admin);
        assert_eq!(
            evaluate_guard(true, Some(&admin), true, None),
            GuardOutcome::Loading
        );
    }

    #[test]
    fn test_signed_out_visitor_goes_to_login() {
        assert_eq!(evaluate_guard(false, None, true, None), GuardOutcome::RedirectLogin);
    }

    #[test]
    fn test_auth_check_precedes_role_check() {
        // Role-restricted route while logged out: login, not unauthorized.
        assert_eq!(
            evaluate_guard(false, None, true, Some(&[Role::Admin])),
            GuardOutcome::RedirectLogin
        );
    }

    #[test]
    fn test_wrong_role_goes_to_unauthorized() {
        let student = user_with(Role::Student);
        assert_eq!(
            evaluate_guard(false, Some(&student), true, Some(&[Role::Teacher])),
            GuardOutcome::RedirectUnauthorized
        );
        assert_eq!(
            evaluate_guard(false, Some(&student), true, Some(&[Role::Admin])),
            GuardOutcome::RedirectUnauthorized
        );
    }

    #[test]
    fn test_matching_role_is_allowed() {
        let teacher = user_with(Role::Teacher);
        assert_eq!(
            evaluate_guard(false, Some(&teacher), true, Some(&[Role::Teacher])),
            GuardOutcome::Allow
        );
        assert_eq!(
            evaluate_guard(false, Some(&teacher), true, Some(&[Role::Admin, Role::Teacher])),
            GuardOutcome::Allow
        );
    }

    #[test]
    fn test_no_role_list_means_any_signed_in_user() {
        let student = user_with(Role::Student);
        assert_eq!(
            evaluate_guard(false, Some(&student), true, None),
            GuardOutcome::Allow
        );
    }

    #[test]
    fn test_public_route_renders_for_everyone() {
        assert_eq!(evaluate_guard(false, None, false, None), GuardOutcome::Allow);
        let admin = user_with(Role::Admin);
        assert_eq!(
            evaluate_guard(false, Some(&admin), false, None),
            GuardOutcome::Allow
        );
    }

    #[test]
    fn test_role_list_without_auth_requirement_skips_anonymous() {
        // No user to check a role against; the route opted out of requiring one.
        assert_eq!(
            evaluate_guard(false, None, false, Some(&[Role::Admin])),
            GuardOutcome::Allow
        );
    }

    #[test]
    fn test_empty_allow_list_blocks_every_role() {
        let admin = user_with(Role::Admin);
        assert_eq!(
            evaluate_guard(false, Some(&admin), true, Some(&[])),
            GuardOutcome::RedirectUnauthorized
        );
    }
}
