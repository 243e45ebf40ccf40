//! Proctor - School Exam Portal
//!
//! A single-page portal for running classroom exams: Google sign-in,
//! role-aware routing for admins, teachers, and students, and a
//! 30-day sliding session kept in browser storage.
//! Built with Leptos and WebAssembly.

#![recursion_limit = "4096"]

pub mod app;
pub mod core;
pub mod ui;

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    use crate::app::*;
    console_error_panic_hook::set_once();
    leptos::mount::hydrate_body(App);
}
