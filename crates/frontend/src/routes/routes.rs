use crate::pages::dashboard::Dashboard;
use crate::pages::not_found::NotFound;
use crate::routes::table::{route_table, DASHBOARD_SEGMENT, TAB_PARAM};
use leptos::prelude::*;
use leptos_router::components::{Redirect, Route, Router, Routes};
use leptos_router::{OptionalParamSegment, StaticSegment};

/// Sends `/` to the redirect target declared in the route table.
#[component]
fn RootRedirect() -> impl IntoView {
    match route_table().root_redirect() {
        Some(target) => view! { <Redirect path=target /> }.into_any(),
        None => view! { <NotFound /> }.into_any(),
    }
}

/// Router path of the dashboard route, `/dashboard/:tab?`.
fn dashboard_path() -> (StaticSegment<&'static str>, OptionalParamSegment) {
    (
        StaticSegment(DASHBOARD_SEGMENT),
        OptionalParamSegment(TAB_PARAM),
    )
}

/// Navigation engine of the application: browser history plus the routes
/// declared in [`crate::routes::table::ROUTES`].
#[component]
pub fn AppRoutes() -> impl IntoView {
    view! {
        <Router>
            <Routes fallback=|| view! { <NotFound /> }>
                <Route path=StaticSegment("") view=RootRedirect />
                <Route path=dashboard_path() view=Dashboard />
            </Routes>
        </Router>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::table::{RouteTarget, Segment, ViewId};
    use leptos_router::PossibleRouteMatch;

    #[test]
    fn test_router_segments_follow_table() {
        let table = route_table();
        let views: Vec<_> = table
            .routes()
            .iter()
            .filter(|r| r.record().target == RouteTarget::View(ViewId::Dashboard))
            .collect();
        assert_eq!(views.len(), 1);
        assert_eq!(
            views[0].pattern().segments(),
            &[
                Segment::Literal(DASHBOARD_SEGMENT),
                Segment::OptionalParam(TAB_PARAM)
            ]
        );
        assert!(table.routes()[0].pattern().is_root());
    }

    /// Whether the router consumes the whole path with the dashboard segments.
    fn router_matches(path: &str) -> bool {
        dashboard_path()
            .test(path)
            .is_some_and(|m| m.remaining().is_empty() || m.remaining() == "/")
    }

    #[test]
    fn test_router_and_table_agree() {
        for path in [
            "/dashboard",
            "/dashboard/",
            "/dashboard/settings",
            "/dashboard/Settings",
            "/Dashboard",
            "/Dashboard/Settings",
            "/DASHBOARD/overview",
            "//dashboard//settings",
            "/dashboard//settings",
            "/dashboard/settings/extra",
            "/dashboards",
            "/reports",
        ] {
            let table_view = route_table()
                .resolve(path)
                .is_ok_and(|r| r.view == ViewId::Dashboard && r.redirected_from.is_none());
            assert_eq!(router_matches(path), table_view, "{path}");
        }
    }
}
