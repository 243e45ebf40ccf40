//! Unauthorized page component
//!
//! Shown when a signed-in user opens a route their role does not
//! grant. Offers a way back home or to a different account.

use leptos::prelude::*;

use crate::ui::icon::{Icon, icons};

/// Unauthorized page component
#[component]
pub fn UnauthorizedPage() -> impl IntoView {
    view! {
        <div class="min-h-screen bg-theme-primary flex items-center justify-center p-4">
            <div class="w-full max-w-md bg-theme-secondary border border-theme rounded-xl shadow-sm p-8 text-center">
                <div class="w-12 h-12 mx-auto mb-4 bg-error-muted rounded-xl flex items-center justify-center">
                    <Icon name=icons::SHIELD class="w-7 h-7 text-error"/>
                </div>
                <h1 class="text-xl font-semibold text-theme-primary mb-2">"Access denied"</h1>
                <p class="text-sm text-theme-secondary mb-6">
                    "You don't have permission to access this page."
                </p>
                <div class="flex items-center justify-center gap-3">
                    <a
                        href="/"
                        class="px-4 py-2 rounded-lg bg-accent-primary text-white font-medium hover:opacity-90 transition-opacity"
                    >
                        "Go home"
                    </a>
                    <a
                        href="/login"
                        class="px-4 py-2 rounded-lg border border-theme text-theme-primary font-medium hover:bg-theme-tertiary transition-colors"
                    >
                        "Switch account"
                    </a>
                </div>
            </div>
        </div>
    }
}
