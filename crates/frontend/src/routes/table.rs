//! Route table of the application.
//!
//! The table is an ordered list of [`RouteRecord`]s. `leptos_router` performs
//! the actual navigation; [`RouteTable`] mirrors its matching rules so that
//! links, redirects and fallbacks can be computed (and tested) without a browser.
//! Like the router, literal segments match case-sensitively and an empty
//! segment (`//`) never matches; a single trailing slash is ignored.

use once_cell::sync::Lazy;
use std::collections::{BTreeMap, HashSet};
use thiserror::Error;

/// Symbolic name of the dashboard route.
pub const DASHBOARD_ROUTE: &str = "dashboard";
/// Literal path segment of the dashboard route.
pub const DASHBOARD_SEGMENT: &str = "dashboard";
/// Optional parameter carrying the dashboard section.
pub const TAB_PARAM: &str = "tab";

/// Upper bound on redirect hops followed by [`RouteTable::resolve`].
pub const MAX_REDIRECTS: usize = 8;

/// Routes in declaration order.
pub const ROUTES: &[RouteRecord] = &[
    RouteRecord {
        path: "/",
        target: RouteTarget::Redirect("/dashboard/overview"),
        name: None,
    },
    RouteRecord {
        path: "/dashboard/:tab?",
        target: RouteTarget::View(ViewId::Dashboard),
        name: Some(DASHBOARD_ROUTE),
    },
];

static ROUTE_TABLE: Lazy<RouteTable> =
    Lazy::new(|| RouteTable::new(ROUTES).expect("built-in route table is valid"));

/// The application's route table, compiled on first use.
pub fn route_table() -> &'static RouteTable {
    &ROUTE_TABLE
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error("invalid route pattern '{pattern}': {reason}")]
    InvalidPattern {
        pattern: &'static str,
        reason: &'static str,
    },
    #[error("route name '{0}' is declared more than once")]
    DuplicateName(&'static str),
    #[error("the root path is redirected more than once")]
    DuplicateRootRedirect,
    #[error("redirect from '{from}' points to '{to}', which matches no view")]
    DanglingRedirect {
        from: &'static str,
        to: &'static str,
    },
    #[error("no route matches '{0}'")]
    NotFound(String),
    #[error("too many redirects while resolving '{0}'")]
    RedirectLoop(String),
    #[error("unknown route name '{0}'")]
    UnknownRoute(String),
    #[error("route '{route}' requires parameter '{param}'")]
    MissingParam {
        route: &'static str,
        param: &'static str,
    },
}

/// Views a route can render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewId {
    Dashboard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteTarget {
    Redirect(&'static str),
    View(ViewId),
}

/// A single declared route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteRecord {
    pub path: &'static str,
    pub target: RouteTarget,
    pub name: Option<&'static str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    Literal(&'static str),
    Param(&'static str),
    OptionalParam(&'static str),
}

/// Parameters extracted from a matched path, keyed by parameter name.
pub type Params = BTreeMap<&'static str, String>;

/// Compiled form of a route pattern such as `/dashboard/:tab?`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePattern {
    segments: Vec<Segment>,
}

impl RoutePattern {
    pub fn parse(pattern: &'static str) -> Result<Self, RouteError> {
        let invalid = |reason| RouteError::InvalidPattern { pattern, reason };

        if !pattern.starts_with('/') {
            return Err(invalid("must start with '/'"));
        }

        let mut segments = Vec::new();
        for raw in pattern.split('/').filter(|s| !s.is_empty()) {
            if segments
                .last()
                .is_some_and(|s| matches!(s, Segment::OptionalParam(_)))
            {
                return Err(invalid("an optional parameter must be the last segment"));
            }

            let segment = match raw.strip_prefix(':') {
                Some(param) => {
                    let (name, optional) = match param.strip_suffix('?') {
                        Some(name) => (name, true),
                        None => (param, false),
                    };
                    if name.is_empty()
                        || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
                    {
                        return Err(invalid("parameter names must be alphanumeric"));
                    }
                    if optional {
                        Segment::OptionalParam(name)
                    } else {
                        Segment::Param(name)
                    }
                }
                None if raw.contains(|c: char| matches!(c, '?' | ':' | '#')) => {
                    return Err(invalid("literal segments cannot contain '?', ':' or '#'"));
                }
                None => Segment::Literal(raw),
            };
            segments.push(segment);
        }

        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    fn matches(&self, input: &[String]) -> Option<Params> {
        let mut params = Params::new();
        let mut input = input.iter();

        for segment in &self.segments {
            match *segment {
                Segment::Literal(literal) => match input.next() {
                    Some(s) if s == literal => {}
                    _ => return None,
                },
                Segment::Param(name) => {
                    params.insert(name, input.next()?.clone());
                }
                Segment::OptionalParam(name) => {
                    if let Some(value) = input.next() {
                        params.insert(name, value.clone());
                    }
                }
            }
        }

        if input.next().is_some() {
            return None;
        }
        Some(params)
    }
}

#[derive(Debug, Clone)]
pub struct CompiledRoute {
    record: RouteRecord,
    pattern: RoutePattern,
}

impl CompiledRoute {
    pub fn record(&self) -> &RouteRecord {
        &self.record
    }

    pub fn pattern(&self) -> &RoutePattern {
        &self.pattern
    }
}

/// First route matching a path, before redirects are followed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch<'a> {
    pub index: usize,
    pub record: &'a RouteRecord,
    pub params: Params,
}

/// Outcome of resolving a URL down to a view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Path of the rendered location without query, fragment or trailing
    /// slash. Segments are percent-encoded.
    pub path: String,
    pub view: ViewId,
    pub name: Option<&'static str>,
    pub params: Params,
    /// Path originally requested, when at least one redirect was applied.
    pub redirected_from: Option<String>,
}

impl Resolution {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }
}

#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<CompiledRoute>,
}

impl RouteTable {
    /// Compiles the records and checks that names are unique, the root is
    /// redirected at most once and every redirect lands on a view.
    pub fn new(records: &[RouteRecord]) -> Result<Self, RouteError> {
        let mut names = HashSet::new();
        let mut root_redirects = 0;
        let mut routes = Vec::with_capacity(records.len());

        for record in records {
            let pattern = RoutePattern::parse(record.path)?;
            if let Some(name) = record.name {
                if !names.insert(name) {
                    return Err(RouteError::DuplicateName(name));
                }
            }
            if pattern.is_root() && matches!(record.target, RouteTarget::Redirect(_)) {
                root_redirects += 1;
                if root_redirects > 1 {
                    return Err(RouteError::DuplicateRootRedirect);
                }
            }
            routes.push(CompiledRoute {
                record: *record,
                pattern,
            });
        }

        let table = Self { routes };
        for route in &table.routes {
            if let RouteTarget::Redirect(to) = route.record.target {
                match table.resolve(to) {
                    Ok(_) => {}
                    Err(RouteError::NotFound(_)) => {
                        return Err(RouteError::DanglingRedirect {
                            from: route.record.path,
                            to,
                        })
                    }
                    Err(err) => return Err(err),
                }
            }
        }

        Ok(table)
    }

    pub fn routes(&self) -> &[CompiledRoute] {
        &self.routes
    }

    pub fn records(&self) -> impl Iterator<Item = &RouteRecord> + '_ {
        self.routes.iter().map(|r| &r.record)
    }

    pub fn by_name(&self, name: &str) -> Option<&CompiledRoute> {
        self.routes.iter().find(|r| r.record.name == Some(name))
    }

    /// Returns the first route matching `url` without following redirects.
    pub fn match_path(&self, url: &str) -> Option<RouteMatch<'_>> {
        self.match_segments(&split_path(url)?)
    }

    fn match_segments(&self, segments: &[String]) -> Option<RouteMatch<'_>> {
        self.routes.iter().enumerate().find_map(|(index, route)| {
            route.pattern.matches(segments).map(|params| RouteMatch {
                index,
                record: &route.record,
                params,
            })
        })
    }

    pub fn redirect_for(&self, url: &str) -> Option<&'static str> {
        match self.match_path(url)?.record.target {
            RouteTarget::Redirect(to) => Some(to),
            RouteTarget::View(_) => None,
        }
    }

    pub fn root_redirect(&self) -> Option<&'static str> {
        self.redirect_for("/")
    }

    /// Resolves `url` to the view it renders, following redirects.
    ///
    /// Query string and fragment are ignored, segments are percent-decoded.
    pub fn resolve(&self, url: &str) -> Result<Resolution, RouteError> {
        let mut current = url.to_string();
        let mut redirected_from = None;

        for _ in 0..=MAX_REDIRECTS {
            let current_segments = split_path(&current)
                .ok_or_else(|| RouteError::NotFound(path_part(&current).to_string()))?;
            let Some(found) = self.match_segments(&current_segments) else {
                return Err(RouteError::NotFound(join_path(&current_segments)));
            };
            match found.record.target {
                RouteTarget::Redirect(to) => {
                    log::debug!("redirect {} -> {}", join_path(&current_segments), to);
                    redirected_from.get_or_insert_with(|| join_path(&current_segments));
                    current = to.to_string();
                }
                RouteTarget::View(view) => {
                    return Ok(Resolution {
                        path: join_path(&current_segments),
                        view,
                        name: found.record.name,
                        params: found.params,
                        redirected_from,
                    });
                }
            }
        }

        Err(RouteError::RedirectLoop(url.to_string()))
    }

    /// Builds the path of a named route. Optional parameters missing from
    /// `params` are left out.
    pub fn href(&self, name: &str, params: &[(&str, &str)]) -> Result<String, RouteError> {
        let route = self
            .by_name(name)
            .ok_or_else(|| RouteError::UnknownRoute(name.to_string()))?;
        let lookup = |param: &str| {
            params
                .iter()
                .find(|(key, _)| *key == param)
                .map(|(_, value)| *value)
        };

        let mut parts: Vec<String> = Vec::new();
        for segment in route.pattern.segments() {
            match *segment {
                Segment::Literal(literal) => parts.push(literal.to_string()),
                Segment::Param(param) => {
                    let value = lookup(param).ok_or(RouteError::MissingParam {
                        route: route.record.name.unwrap_or(route.record.path),
                        param,
                    })?;
                    parts.push(urlencoding::encode(value).into_owned());
                }
                Segment::OptionalParam(param) => {
                    if let Some(value) = lookup(param).filter(|v| !v.is_empty()) {
                        parts.push(urlencoding::encode(value).into_owned());
                    }
                }
            }
        }

        Ok(format!("/{}", parts.join("/")))
    }
}

fn path_part(url: &str) -> &str {
    url.split(|c: char| c == '?' || c == '#')
        .next()
        .unwrap_or_default()
}

/// Splits the path part of `url` into decoded segments. Returns `None` when the
/// path holds an empty segment, which no route can match.
fn split_path(url: &str) -> Option<Vec<String>> {
    let path = path_part(url);
    let path = path.strip_prefix('/').unwrap_or(path);
    let path = path.strip_suffix('/').unwrap_or(path);
    if path.is_empty() {
        return Some(Vec::new());
    }

    path.split('/')
        .map(|s| {
            (!s.is_empty()).then(|| {
                urlencoding::decode(s)
                    .map(|decoded| decoded.into_owned())
                    .unwrap_or_else(|_| s.to_string())
            })
        })
        .collect()
}

fn join_path(segments: &[String]) -> String {
    let encoded: Vec<_> = segments
        .iter()
        .map(|s| urlencoding::encode(s).into_owned())
        .collect();
    format!("/{}", encoded.join("/"))
}
