//! OAuth callback page component
//!
//! Google redirects here with `?code=...` after consent. The page
//! exchanges the code for a session and then moves on to the
//! dashboard, or shows what went wrong.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_navigate, use_query_map};

use crate::core::config::use_config;
use crate::ui::auth::{complete_callback, use_session};
use crate::ui::common::LoadingSpinner;

/// OAuth callback page component
#[component]
pub fn AuthCallbackPage() -> impl IntoView {
    let session = use_session();
    let config = use_config();
    let query = use_query_map();

    let processing = RwSignal::new(true);
    let error_message: RwSignal<Option<String>> = RwSignal::new(None);

    let navigate = use_navigate();

    // Query params are fixed for the lifetime of this page, so a
    // single untracked read is enough.
    Effect::new(move |_| {
        let params = query.get_untracked();

        if let Some(reason) = params.get("error") {
            processing.set(false);
            error_message.set(Some(format!("Google sign-in was cancelled: {reason}")));
            return;
        }

        let Some(code) = params.get("code") else {
            processing.set(false);
            error_message.set(Some(
                "The sign-in response is missing its authorization code.".to_string(),
            ));
            return;
        };

        let config = config.clone();
        let navigate = navigate.clone();
        leptos::task::spawn_local(async move {
            let signed_in = complete_callback(session, &config, &code).await;
            processing.set(false);
            if signed_in {
                navigate(
                    "/dashboard",
                    NavigateOptions {
                        replace: true,
                        ..Default::default()
                    },
                );
            } else {
                error_message.set(Some(
                    "We couldn't verify your account. Please try signing in again.".to_string(),
                ));
            }
        });
    });

    view! {
        <div class="min-h-screen bg-theme-primary flex items-center justify-center p-4">
            <Show
                when=move || processing.get()
                fallback=move || {
                    view! {
                        <div class="w-full max-w-md bg-theme-secondary border border-theme rounded-xl shadow-sm p-8 text-center">
                            <h1 class="text-xl font-semibold text-theme-primary mb-2">
                                "Sign-in failed"
                            </h1>
                            <p class="text-sm text-theme-secondary mb-6">
                                {move || error_message.get().unwrap_or_default()}
                            </p>
                            <a
                                href="/login"
                                class="inline-block px-4 py-2 rounded-lg bg-accent-primary text-white font-medium hover:opacity-90 transition-opacity"
                            >
                                "Back to sign-in"
                            </a>
                        </div>
                    }
                }
            >
                <LoadingSpinner message="Finishing sign-in...".to_string()/>
            </Show>
        </div>
    }
}
