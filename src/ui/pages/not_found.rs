//! Not found page component
//!
//! A 404 error page displayed when a route is not found.

use leptos::prelude::*;
use leptos_router::components::A;

/// Not found (404) page component
#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <div class="min-h-screen bg-theme-primary flex flex-col items-center justify-center p-4">
            <div class="text-center">
                // Error code
                <h1 class="text-6xl font-bold text-theme-primary mb-4">"404"</h1>

                // Title
                <h2 class="text-2xl font-semibold text-theme-primary mb-2">
                    "Page Not Found"
                </h2>

                // Description
                <p class="text-theme-secondary mb-8 max-w-md mx-auto">
                    "The page you're looking for doesn't exist or has been moved."
                </p>

                // Actions
                <div class="flex flex-col sm:flex-row items-center justify-center gap-4">
                    <A
                        href="/"
                        attr:class="px-6 py-3 bg-accent-primary hover:bg-accent-primary-hover text-white font-medium rounded-lg transition-colors"
                    >
                        "Go Home"
                    </A>
                    <A
                        href="/login"
                        attr:class="px-6 py-3 border border-theme text-theme-primary hover:bg-theme-secondary font-medium rounded-lg transition-colors"
                    >
                        "Sign In"
                    </A>
                </div>
            </div>

            // Footer
            <div class="absolute bottom-8 text-center">
                <p class="text-sm text-theme-tertiary">
                    "© 2026 Proctor"
                </p>
            </div>
        </div>
    }
}
