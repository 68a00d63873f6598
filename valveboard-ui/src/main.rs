//! Valveboard Dashboard
//!
//! Heat-meter telemetry dashboard built with Leptos (WASM).
//!
//! # Architecture
//!
//! This is a client-side rendered (CSR) Leptos application that compiles to
//! WebAssembly. It fetches the hourly heatmap aggregation from the Valveboard
//! API and renders it with Plotly, loaded from a CDN in `index.html`.

use leptos::*;

mod api;
mod app;
mod components;
mod heatmap;
mod plot;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    // Mount the app to the document body
    mount_to_body(|| view! { <app::App /> });
}
