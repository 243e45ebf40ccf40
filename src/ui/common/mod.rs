//! Common reusable UI components

pub mod spinner;

pub use spinner::{InlineSpinner, LoadingOverlay, LoadingSpinner, Spinner, SpinnerSize};
