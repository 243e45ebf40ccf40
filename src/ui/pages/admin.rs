//! Admin dashboard page component

use leptos::prelude::*;

use crate::ui::auth::use_session;
use crate::ui::layout::PortalLayout;

/// Admin dashboard page component
#[component]
pub fn AdminDashboardPage() -> impl IntoView {
    let session = use_session();
    let greeting = move || {
        session
            .user()
            .map(|user| format!("Welcome back, {}.", user.name))
            .unwrap_or_default()
    };

    view! {
        <PortalLayout>
            <div class="max-w-5xl mx-auto">
                <h1 class="text-2xl font-bold text-theme-primary mb-1">"Administration"</h1>
                <p class="text-sm text-theme-secondary mb-8">{greeting}</p>

                <div class="grid grid-cols-1 md:grid-cols-3 gap-4">
                    <div class="bg-theme-secondary border border-theme rounded-xl p-6">
                        <h2 class="font-semibold text-theme-primary mb-2">"Accounts"</h2>
                        <p class="text-sm text-theme-secondary">
                            "Register teachers and students and assign their roles."
                        </p>
                    </div>
                    <div class="bg-theme-secondary border border-theme rounded-xl p-6">
                        <h2 class="font-semibold text-theme-primary mb-2">"Classes"</h2>
                        <p class="text-sm text-theme-secondary">
                            "Create classes and enroll students for the current term."
                        </p>
                    </div>
                    <div class="bg-theme-secondary border border-theme rounded-xl p-6">
                        <h2 class="font-semibold text-theme-primary mb-2">"Exam schedule"</h2>
                        <p class="text-sm text-theme-secondary">
                            "Review the school-wide exam calendar and resolve conflicts."
                        </p>
                    </div>
                </div>
            </div>
        </PortalLayout>
    }
}
