//! Student dashboard page component

use leptos::prelude::*;

use crate::ui::auth::use_session;
use crate::ui::layout::PortalLayout;

/// Student dashboard page component
#[component]
pub fn StudentDashboardPage() -> impl IntoView {
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
                <h1 class="text-2xl font-bold text-theme-primary mb-1">"My studies"</h1>
                <p class="text-sm text-theme-secondary mb-8">{greeting}</p>

                <div class="grid grid-cols-1 md:grid-cols-3 gap-4">
                    <div class="bg-theme-secondary border border-theme rounded-xl p-6">
                        <h2 class="font-semibold text-theme-primary mb-2">"Upcoming exams"</h2>
                        <p class="text-sm text-theme-secondary">
                            "Exams scheduled for your classes over the next two weeks."
                        </p>
                    </div>
                    <div class="bg-theme-secondary border border-theme rounded-xl p-6">
                        <h2 class="font-semibold text-theme-primary mb-2">"Results"</h2>
                        <p class="text-sm text-theme-secondary">
                            "Scores and feedback for the exams you have taken."
                        </p>
                    </div>
                    <div class="bg-theme-secondary border border-theme rounded-xl p-6">
                        <h2 class="font-semibold text-theme-primary mb-2">"Practice"</h2>
                        <p class="text-sm text-theme-secondary">
                            "Past papers your teachers have shared for revision."
                        </p>
                    </div>
                </div>
            </div>
        </PortalLayout>
    }
}
