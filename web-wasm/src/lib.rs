//! Gait AI Web App (Leptos + WASM)

mod app;
mod components;
mod api;
mod host;
mod share_bridge;

use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default();

    tracing::info!("gait-ai web app starting");
    leptos::mount::mount_to_body(app::App);
}
