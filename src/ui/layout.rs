//! Portal chrome
//!
//! Shared frame for the signed-in pages: header with the brand, the current
//! user, and the sign-out control, plus the full-screen overlay shown while a
//! logout plays out. The sign-out button disables itself as soon as the
//! logout starts so it cannot be fired twice.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;

use crate::core::config::use_config;
use crate::core::user::User;
use crate::ui::auth::{sign_out, use_session};
use crate::ui::common::{InlineSpinner, LoadingOverlay};
use crate::ui::icon::{Icon, icons};

/// Layout wrapper for authenticated pages.
#[component]
pub fn PortalLayout(children: Children) -> impl IntoView {
    let session = use_session();
    let config = use_config();

    view! {
        <div class="min-h-screen bg-theme-primary flex flex-col">
            <header class="border-b border-theme">
                <div class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8">
                    <div class="flex items-center justify-between h-16">
                        <A href="/" attr:class="flex items-center gap-3 hover:opacity-80 transition-opacity">
                            <Icon name=icons::GRADUATION_CAP class="w-8 h-8" />
                            <span class="text-xl font-bold text-theme-primary">"Proctor"</span>
                        </A>

                        {move || {
                            let config = config.clone();
                            session.user().map(|user| view! {
                                <div class="flex items-center gap-3">
                                    <UserAvatar user=user.clone() size=32 />
                                    <div class="hidden sm:block text-right">
                                        <p class="text-sm font-medium text-theme-primary truncate max-w-[160px]">
                                            {user.name.clone()}
                                        </p>
                                        <p class="text-xs text-theme-tertiary truncate max-w-[160px]">
                                            {user.email.clone()}
                                        </p>
                                    </div>
                                    <button
                                        class="flex items-center gap-2 px-3 py-1.5 text-sm font-medium text-red-500
                                               hover:bg-red-50 rounded-lg transition-colors disabled:opacity-50"
                                        disabled=move || session.is_logging_out()
                                        on:click={
                                            let config = config.clone();
                                            move |_| {
                                                let config = config.clone();
                                                spawn_local(async move {
                                                    sign_out(session, &config).await;
                                                });
                                            }
                                        }
                                    >
                                        <Show
                                            when=move || session.is_logging_out()
                                            fallback=move || view! {
                                                <span class="flex items-center gap-2">
                                                    <Icon name=icons::LOGOUT class="w-4 h-4" />
                                                    "Sign out"
                                                </span>
                                            }
                                        >
                                            <span class="flex items-center gap-2">
                                                <InlineSpinner />
                                                "Signing out..."
                                            </span>
                                        </Show>
                                    </button>
                                </div>
                            })
                        }}
                    </div>
                </div>
            </header>

            <main class="flex-1">
                {children()}
            </main>

            <Show when=move || session.is_logging_out()>
                <LoadingOverlay message="Signing you out...".to_string() />
            </Show>
        </div>
    }
}

/// Round avatar: the Google profile picture when present, initials otherwise.
#[component]
pub fn UserAvatar(
    /// User data
    user: User,
    /// Avatar size in pixels
    #[prop(default = 32)]
    size: u32,
) -> impl IntoView {
    let size_style = format!(
        "width: {}px; height: {}px; min-width: {}px; min-height: {}px;",
        size, size, size, size
    );

    if !user.picture.is_empty() {
        view! {
            <img
                src=user.picture.clone()
                alt=format!("{}'s avatar", user.name)
                class="rounded-full object-cover"
                style=size_style
            />
        }
        .into_any()
    } else {
        let initials = match user.initials() {
            i if i.is_empty() => "?".to_string(),
            i => i,
        };
        view! {
            <div
                class="bg-accent-primary rounded-full flex items-center justify-center text-white text-sm font-medium"
                style=size_style
            >
                {initials}
            </div>
        }
        .into_any()
    }
}
