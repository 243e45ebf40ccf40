//! Teacher dashboard page component

use leptos::prelude::*;

use crate::ui::auth::use_session;
use crate::ui::layout::PortalLayout;

/// Teacher dashboard page component
#[component]
pub fn TeacherDashboardPage() -> impl IntoView {
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
                <h1 class="text-2xl font-bold text-theme-primary mb-1">"Teaching"</h1>
                <p class="text-sm text-theme-secondary mb-8">{greeting}</p>

                <div class="grid grid-cols-1 md:grid-cols-3 gap-4">
                    <div class="bg-theme-secondary border border-theme rounded-xl p-6">
                        <h2 class="font-semibold text-theme-primary mb-2">"My classes"</h2>
                        <p class="text-sm text-theme-secondary">
                            "See the groups you teach and who is enrolled in each."
                        </p>
                    </div>
                    <div class="bg-theme-secondary border border-theme rounded-xl p-6">
                        <h2 class="font-semibold text-theme-primary mb-2">"Exams"</h2>
                        <p class="text-sm text-theme-secondary">
                            "Draft new exams and schedule sittings for your classes."
                        </p>
                    </div>
                    <div class="bg-theme-secondary border border-theme rounded-xl p-6">
                        <h2 class="font-semibold text-theme-primary mb-2">"Grading queue"</h2>
                        <p class="text-sm text-theme-secondary">
                            "Submissions waiting for review, oldest first."
                        </p>
                    </div>
                </div>
            </div>
        </PortalLayout>
    }
}
