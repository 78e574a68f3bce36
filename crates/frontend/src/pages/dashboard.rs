//! Dashboard page.
//!
//! The page is bound to `/dashboard/:tab?`; the optional `tab` segment selects
//! the section shown in the content area.

use crate::routes::table::{route_table, DASHBOARD_ROUTE, TAB_PARAM};
use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_params_map;

/// Sections of the dashboard.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum DashboardTab {
    #[default]
    Overview,
    Planning,
    Settings,
}

impl DashboardTab {
    /// Path segment used for this tab.
    pub fn slug(&self) -> &'static str {
        match self {
            DashboardTab::Overview => "overview",
            DashboardTab::Planning => "planning",
            DashboardTab::Settings => "settings",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            DashboardTab::Overview => "Overview",
            DashboardTab::Planning => "Planning",
            DashboardTab::Settings => "Settings",
        }
    }

    pub fn summary(&self) -> &'static str {
        match self {
            DashboardTab::Overview => "Task counts and status breakdown.",
            DashboardTab::Planning => "Tasks laid out by start and end date.",
            DashboardTab::Settings => "Display preferences for the dashboard.",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::all()
            .into_iter()
            .find(|tab| tab.slug().eq_ignore_ascii_case(slug))
    }

    pub fn all() -> [DashboardTab; 3] {
        [
            DashboardTab::Overview,
            DashboardTab::Planning,
            DashboardTab::Settings,
        ]
    }

    /// Link to this tab, built from the named dashboard route.
    pub fn href(&self) -> String {
        route_table()
            .href(DASHBOARD_ROUTE, &[(TAB_PARAM, self.slug())])
            .unwrap_or_else(|err| {
                log::error!("{}", err);
                "/".to_string()
            })
    }
}

/// What the `tab` parameter asks the dashboard to show.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum TabSelection {
    Tab(DashboardTab),
    Unknown(String),
}

impl TabSelection {
    /// An absent or empty parameter selects the default tab.
    pub fn from_param(param: Option<&str>) -> Self {
        match param.filter(|p| !p.is_empty()) {
            None => TabSelection::Tab(DashboardTab::default()),
            Some(slug) => DashboardTab::from_slug(slug)
                .map(TabSelection::Tab)
                .unwrap_or_else(|| TabSelection::Unknown(slug.to_string())),
        }
    }

    pub fn is_active(&self, tab: DashboardTab) -> bool {
        *self == TabSelection::Tab(tab)
    }
}

#[component]
pub fn Dashboard() -> impl IntoView {
    let params = use_params_map();
    let selection =
        Memo::new(move |_| params.with(|p| TabSelection::from_param(p.get(TAB_PARAM).as_deref())));

    Effect::new(move |_| match selection.get() {
        TabSelection::Tab(tab) => log::info!("dashboard section: {}", tab.slug()),
        TabSelection::Unknown(slug) => log::warn!("unknown dashboard section '{}'", slug),
    });

    view! {
        <div class="dashboard">
            <nav class="dashboard-tabs">
                {DashboardTab::all()
                    .into_iter()
                    .map(|tab| {
                        view! {
                            <span
                                class="dashboard-tab"
                                class:active=move || selection.get().is_active(tab)
                            >
                                <A href=tab.href()>{tab.title()}</A>
                            </span>
                        }
                    })
                    .collect_view()}
            </nav>

            <section class="dashboard-content">
                {move || match selection.get() {
                    TabSelection::Tab(tab) => {
                        view! {
                            <h2>{tab.title()}</h2>
                            <p>{tab.summary()}</p>
                        }
                            .into_any()
                    }
                    TabSelection::Unknown(slug) => {
                        view! {
                            <div class="dashboard-unknown">
                                <h2>"Unknown section"</h2>
                                <p>"There is no dashboard section named " <code>{slug}</code></p>
                                <A href=DashboardTab::default().href()>"Open the overview"</A>
                            </div>
                        }
                            .into_any()
                    }
                }}
            </section>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_tab_selects_overview() {
        assert_eq!(
            TabSelection::from_param(None),
            TabSelection::Tab(DashboardTab::Overview)
        );
        assert_eq!(
            TabSelection::from_param(Some("")),
            TabSelection::Tab(DashboardTab::Overview)
        );
    }

    #[test]
    fn test_known_and_unknown_tabs() {
        assert_eq!(
            TabSelection::from_param(Some("settings")),
            TabSelection::Tab(DashboardTab::Settings)
        );
        assert_eq!(
            TabSelection::from_param(Some("Planning")),
            TabSelection::Tab(DashboardTab::Planning)
        );
        assert_eq!(
            TabSelection::from_param(Some("reports")),
            TabSelection::Unknown("reports".to_string())
        );
    }

    #[test]
    fn test_tab_links_resolve_back_to_tab() {
        for tab in DashboardTab::all() {
            let href = tab.href();
            assert_eq!(href, format!("/dashboard/{}", tab.slug()));
            let resolved = route_table().resolve(&href).unwrap();
            assert_eq!(
                TabSelection::from_param(resolved.param(TAB_PARAM)),
                TabSelection::Tab(tab)
            );
        }
    }

    #[test]
    fn test_root_lands_on_default_tab() {
        let resolved = route_table().resolve("/").unwrap();
        assert_eq!(
            TabSelection::from_param(resolved.param(TAB_PARAM)),
            TabSelection::Tab(DashboardTab::default())
        );
    }

    #[test]
    fn test_is_active() {
        let selection = TabSelection::Tab(DashboardTab::Planning);
        assert!(selection.is_active(DashboardTab::Planning));
        assert!(!selection.is_active(DashboardTab::Overview));
        assert!(!TabSelection::Unknown("x".into()).is_active(DashboardTab::Overview));
    }
}
