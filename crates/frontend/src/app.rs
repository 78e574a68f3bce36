use crate::config::AppConfig;
use crate::routes::routes::AppRoutes;
use leptos::prelude::*;
use web_sys::window;

#[component]
pub fn App(config: AppConfig) -> impl IntoView {
    if let Some(document) = window().and_then(|w| w.document()) {
        document.set_title(&config.title);
    }

    // Shared with pages that need the configured title or log level.
    provide_context(config);

    view! {
        <AppRoutes />
    }
}
