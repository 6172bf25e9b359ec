//! ytgallery UI entry point for WASM.

#![no_main]

use leptos::task::spawn_local;
use wasm_bindgen::prelude::wasm_bindgen;

/// Entry point for the WASM application.
/// This function is called automatically when the WASM module is loaded.
#[wasm_bindgen(start)]
pub fn start() {
    // Set up better panic messages in the browser console
    console_error_panic_hook::set_once();

    spawn_local(async {
        if let Err(e) = ytgallery_ui::bootstrap().await {
            leptos::logging::error!("Failed to start gallery: {}", e);
        }
    });
}
