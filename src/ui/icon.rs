use leptos::prelude::*;

#[component]
pub fn Icon(
    /// Icon name (without the .svg extension)
    name: &'static str,
    /// CSS classes for sizing and color
    #[prop(default = "w-5 h-5")]
    class: &'static str,
) -> impl IntoView {
    let icon_path = format!("/icons/{}.svg", name);

    view! {
        <img
            src=icon_path
            class=class
            alt=name
            draggable=false
        />
    }
}

/// Icon names with an asset under `public/icons/`.
pub mod icons {
    pub const GOOGLE: &str = "google";
    pub const LOGOUT: &str = "logout";
    pub const SHIELD: &str = "shield";
    pub const GRADUATION_CAP: &str = "graduation-cap";
}
