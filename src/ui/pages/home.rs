//! Home page component
//!
//! `/` and `/dashboard` both land here. The page never renders real
//! content: once the session settles it forwards the visitor to the
//! workspace matching their role.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::core::user::Role;
use crate::ui::auth::use_session;
use crate::ui::common::LoadingSpinner;

/// Home page component
#[component]
pub fn HomePage() -> impl IntoView {
    let session = use_session();

    Effect::new(move |_| {
        if session.loading() {
            return;
        }

        let target = match session.user().map(|user| user.role) {
            None => "/login",
            Some(Role::Admin) => "/admin",
            Some(Role::Teacher) => "/teacher",
            Some(Role::Student) => "/student",
        };

        let navigate = use_navigate();
        navigate(
            target,
            NavigateOptions {
                replace: true,
                ..Default::default()
            },
        );
    });

    view! {
        <div class="min-h-screen bg-theme-primary flex items-center justify-center">
            <LoadingSpinner message="Loading your workspace...".to_string()/>
        </div>
    }
}
