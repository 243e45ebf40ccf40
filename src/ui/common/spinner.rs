use leptos::prelude::*;

/// Spinner size options
#[derive(Clone, Copy, PartialEq)]
pub enum SpinnerSize {
    Small,
    Medium,
    Large,
}

impl SpinnerSize {
    fn class(&self) -> &'static str {
        match self {
            SpinnerSize::Small => "spinner-sm",
            SpinnerSize::Medium => "spinner-md",
            SpinnerSize::Large => "spinner-lg",
        }
    }
}

/// Circular loading spinner
#[component]
pub fn Spinner(
    /// Spinner size
    #[prop(default = SpinnerSize::Medium)]
    size: SpinnerSize,
    /// Additional CSS classes
    #[prop(default = String::new())]
    class: String,
    /// Optional label text
    #[prop(default = String::new())]
    label: String,
    /// Whether to center the spinner
    #[prop(default = false)]
    centered: bool,
) -> impl IntoView {
    let base_classes = format!("spinner spinner-circle {}", size.class());

    let full_classes = if class.is_empty() {
        base_classes
    } else {
        format!("{} {}", base_classes, class)
    };

    let container_class = if centered {
        "spinner-container spinner-centered"
    } else {
        "spinner-container"
    };

    view! {
        <div class=container_class>
            <div class=full_classes role="status" aria-live="polite">
                <div class="spinner-circle-inner"></div>
                <span class="sr-only">"Loading..."</span>
            </div>
            {(!label.is_empty()).then(|| view! {
                <div class="spinner-label">{label.clone()}</div>
            })}
        </div>
    }
}

/// Centered spinner with a message, for whole-page waits
#[component]
pub fn LoadingSpinner(
    /// Optional loading message
    #[prop(default = String::new())]
    message: String,
) -> impl IntoView {
    view! {
        <Spinner
            size=SpinnerSize::Medium
            label=message
            centered=true
        />
    }
}

/// Inline spinner for buttons or text
#[component]
pub fn InlineSpinner(
    /// Additional CSS classes
    #[prop(default = String::new())]
    class: String,
) -> impl IntoView {
    view! {
        <Spinner
            size=SpinnerSize::Small
            class=format!("spinner-inline {}", class)
        />
    }
}

/// Full-page blocking overlay. Callers control visibility with `<Show>`.
#[component]
pub fn LoadingOverlay(
    /// Loading message
    #[prop(default = "Loading...".to_string())]
    message: String,
) -> impl IntoView {
    view! {
        <div class="loading-overlay">
            <div class="loading-overlay-content">
                <Spinner size=SpinnerSize::Large label=message />
            </div>
        </div>
    }
}
