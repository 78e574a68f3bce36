use crate::routes::route_table;
use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_location;

/// Fallback view for URLs that match no route.
#[component]
pub fn NotFound() -> impl IntoView {
    let location = use_location();

    Effect::new(move |_| {
        let path = location.pathname.get();
        if let Err(err) = route_table().resolve(&path) {
            log::warn!("{}", err);
        }
    });

    view! {
        <div class="not-found">
            <h1>"Page not found"</h1>
            <p>
                "Nothing is available at "
                <code>{move || location.pathname.get()}</code>
            </p>
            <A href="/">"Back to the dashboard"</A>
        </div>
    }
}
