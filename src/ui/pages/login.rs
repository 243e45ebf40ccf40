//! Login page component
//!
//! A standalone page offering Google sign-in, redirects signed-in
//! visitors straight to their dashboard.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::core::config::use_config;
use crate::ui::auth::use_session;
use crate::ui::common::InlineSpinner;
use crate::ui::icon::{Icon, icons};

/// Login page component
#[component]
pub fn LoginPage() -> impl IntoView {
    let session = use_session();
    let config = use_config();

    // Redirect if already authenticated
    Effect::new(move |_| {
        if !session.loading() && session.user().is_some() {
            let navigate = use_navigate();
            navigate(
                "/dashboard",
                NavigateOptions {
                    replace: true,
                    ..Default::default()
                },
            );
        }
    });

    // login() leaves the page via a full navigation, so the flag only
    // has to survive until the browser tears this view down.
    let redirecting = RwSignal::new(false);
    let sign_in_configured = config.has_google_client_id();

    let on_google_click = {
        let config = config.clone();
        move |_| {
            redirecting.set(true);
            session.login(&config);
        }
    };

    view! {
        <div class="min-h-screen bg-theme-primary flex flex-col">
            <main class="flex-1 flex items-center justify-center p-4">
                <div class="w-full max-w-md bg-theme-secondary border border-theme rounded-xl shadow-sm p-8">
                    <div class="flex flex-col items-center gap-3 mb-8">
                        <div class="w-12 h-12 bg-accent-primary rounded-xl flex items-center justify-center">
                            <Icon name=icons::GRADUATION_CAP class="w-7 h-7 text-white"/>
                        </div>
                        <h1 class="text-2xl font-bold text-theme-primary">"Proctor"</h1>
                        <p class="text-sm text-theme-secondary text-center">
                            "Sign in with your school Google account to continue."
                        </p>
                    </div>

                    <button
                        class="w-full flex items-center justify-center gap-3 px-4 py-3 rounded-lg border border-theme bg-theme-primary hover:bg-theme-tertiary transition-colors text-theme-primary font-medium disabled:opacity-50 disabled:cursor-not-allowed"
                        disabled=move || redirecting.get() || !sign_in_configured
                        on:click=on_google_click
                    >
                        <Show
                            when=move || redirecting.get()
                            fallback=move || {
                                view! {
                                    <Icon name=icons::GOOGLE/>
                                    <span>"Continue with Google"</span>
                                }
                            }
                        >
                            <InlineSpinner/>
                            <span>"Redirecting to Google..."</span>
                        </Show>
                    </button>

                    <Show when=move || !sign_in_configured>
                        <p class="mt-4 text-sm text-warning text-center">
                            "Google sign-in is not configured for this deployment."
                        </p>
                    </Show>
                </div>
            </main>

            <footer class="py-4 border-t border-theme">
                <p class="text-center text-sm text-theme-tertiary">
                    "Access is limited to accounts registered by your school."
                </p>
            </footer>
        </div>
    }
}
