use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::core::config::{Config, provide_config};
use crate::core::user::Role;
use crate::ui::auth::{RequireAuth, provide_session_context};
use crate::ui::pages::{
    AdminDashboardPage, AuthCallbackPage, HomePage, LoginPage, NotFoundPage,
    StudentDashboardPage, TeacherDashboardPage, UnauthorizedPage,
};

pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone() />
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

#[component]
pub fn App() -> impl IntoView {
    // Provides context that manages stylesheets, titles, meta tags, etc.
    provide_meta_context();

    // Client configuration is baked in at compile time; the session context
    // kicks off cache restore + verification once the app is hydrated.
    let config = Config::from_build_env();
    let _session = provide_session_context(&config);
    provide_config(config);

    view! {
        // injects a stylesheet into the document <head>
        // id=leptos means cargo-leptos will hot-reload this stylesheet
        <Stylesheet id="leptos" href="/pkg/proctor.css"/>

        // sets the document title
        <Title text="Proctor - Exam Portal"/>

        <Router>
            <Routes fallback=NotFoundPage>
                <Route path=StaticSegment("") view=HomePage/>
                <Route path=StaticSegment("dashboard") view=HomePage/>
                <Route path=StaticSegment("login") view=LoginPage/>
                <Route path=StaticSegment("authenticate") view=AuthCallbackPage/>
                <Route path=StaticSegment("unauthorized") view=UnauthorizedPage/>
                <Route
                    path=StaticSegment("admin")
                    view=|| {
                        view! {
                            <RequireAuth allowed_roles=vec![Role::Admin]>
                                <AdminDashboardPage/>
                            </RequireAuth>
                        }
                    }
                />
                <Route
                    path=StaticSegment("teacher")
                    view=|| {
                        view! {
                            <RequireAuth allowed_roles=vec![Role::Teacher]>
                                <TeacherDashboardPage/>
                            </RequireAuth>
                        }
                    }
                />
                <Route
                    path=StaticSegment("student")
                    view=|| {
                        view! {
                            <RequireAuth allowed_roles=vec![Role::Student]>
                                <StudentDashboardPage/>
                            </RequireAuth>
                        }
                    }
                />
            </Routes>
        </Router>
    }
}
