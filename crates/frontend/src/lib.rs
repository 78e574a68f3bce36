pub mod app;
pub mod config;
pub mod pages;
pub mod routes;

use config::AppConfig;
use leptos::prelude::*;
use wasm_bindgen::prelude::wasm_bindgen;

#[wasm_bindgen]
pub fn hydrate() {
    let (config, config_error) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(err) => (AppConfig::default(), Some(err)),
    };

    // initializes logging using the `log` crate
    _ = console_log::init_with_level(config.level().unwrap_or(log::Level::Debug));
    console_error_panic_hook::set_once();

    if let Some(err) = config_error {
        log::warn!("falling back to default configuration: {}", err);
    }

    leptos::mount::mount_to_body(move || view! { <app::App config=config /> });
}

#[wasm_bindgen(start)]
pub fn start() {
    hydrate();
}
