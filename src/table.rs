//! The route table.
//!
//! A [`RouteTable`] is an ordered, immutable list of [`Route`]s. It is built
//! once, validated, and then only read. Resolution walks the routes in
//! declaration order, takes the first match, and follows redirect entries
//! until a view route is reached.
//!
//! # Invariants checked by [`RouteTableBuilder::build`]
//!
//! - Route patterns are well formed (no bare `:` segment, no repeated
//!   parameter name).
//! - Normalized patterns are unique, ignoring parameter names
//!   (`/product/:id` and `/product/:pid` collide).
//! - The empty path has an entry, and that entry redirects.
//! - Every redirect reaches a view within the redirect depth limit.
//!
//! # Unmatched paths
//!
//! A table has no catch-all unless one is declared with
//! [`RouteTableBuilder::not_found`]. Without it an unmatched path resolves to
//! `Ok(None)`.
//!
//! ```
//! use guard_navigator::{Route, RouteTable};
//!
//! let table = RouteTable::builder()
//!     .route(Route::new("/home", "home"))
//!     .route(Route::new("/product/:id", "product"))
//!     .route(Route::redirect("", "/home"))
//!     .build()
//!     .unwrap();
//!
//! let resolved = table.resolve("/product/42").unwrap().unwrap();
//! assert_eq!(resolved.params.get("id"), Some("42"));
//!
//! let home = table.resolve("").unwrap().unwrap();
//! assert_eq!(home.path, "/home");
//! assert_eq!(home.redirected_from.as_deref(), Some("/"));
//!
//! assert!(table.resolve("/nowhere").unwrap().is_none());
//! ```

use crate::error::NavigationError;
use crate::matching::{extract_param_name, normalize_path, split_path};
use crate::params::RouteParams;
use crate::route::{Route, RouteTarget, ViewId};
use crate::{debug_log, error_log, info_log, trace_log};
use std::collections::HashSet;

/// Default maximum number of redirect hops followed during resolution.
pub const MAX_REDIRECT_DEPTH: usize = 5;

/// Pattern given to the not-found route.
pub const NOT_FOUND_PATTERN: &str = "**";

/// A path resolved to a view route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    /// Index of the route in the table.
    pub index: usize,
    /// Normalized path the route matched, after following redirects.
    pub path: String,
    /// Parameters extracted from `path`.
    pub params: RouteParams,
    /// The originally requested path, when a redirect was followed.
    pub redirected_from: Option<String>,
    /// `true` when the not-found route caught an unmatched path.
    pub is_fallback: bool,
}

/// Ordered, immutable list of routes.
#[derive(Debug)]
pub struct RouteTable {
    routes: Vec<Route>,
    fallback: Option<usize>,
    max_redirect_depth: usize,
}

impl RouteTable {
    /// Build and validate a table from `routes`, in order.
    pub fn new(routes: impl IntoIterator<Item = Route>) -> Result<Self, NavigationError> {
        routes
            .into_iter()
            .fold(Self::builder(), RouteTableBuilder::route)
            .build()
    }

    /// Start building a table.
    pub fn builder() -> RouteTableBuilder {
        RouteTableBuilder::new()
    }

    /// All routes, including the not-found route if declared.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Route at `index`.
    pub fn route(&self, index: usize) -> Option<&Route> {
        self.routes.get(index)
    }

    /// Number of routes, including the not-found route if declared.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Return `true` if the table holds no routes. A built table never is.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// The not-found route, if declared.
    pub fn not_found_route(&self) -> Option<&Route> {
        self.fallback.map(|index| &self.routes[index])
    }

    /// Maximum number of redirect hops followed by [`resolve`](Self::resolve).
    pub fn max_redirect_depth(&self) -> usize {
        self.max_redirect_depth
    }

    /// Resolve `path` to a view route.
    ///
    /// Returns `Ok(None)` when nothing matches and no not-found route exists.
    /// Fails only when redirects chain deeper than the limit.
    pub fn resolve(&self, path: &str) -> Result<Option<Resolved>, NavigationError> {
        let requested = normalize_path(path).into_owned();
        let mut current = requested.clone();

        for _ in 0..=self.max_redirect_depth {
            let Some((index, params)) = self.match_first(&current) else {
                return Ok(self.fallback.map(|index| {
                    trace_log!("'{}' unmatched, using not-found route", current);
                    Resolved {
                        index,
                        path: current.clone(),
                        params: RouteParams::new(),
                        redirected_from: (current != requested).then(|| requested.clone()),
                        is_fallback: true,
                    }
                }));
            };

            match self.routes[index].target() {
                RouteTarget::View { .. } => {
                    return Ok(Some(Resolved {
                        index,
                        redirected_from: (current != requested).then(|| requested.clone()),
                        path: current,
                        params,
                        is_fallback: false,
                    }));
                }
                RouteTarget::Redirect(to) => {
                    debug_log!("Route redirect '{}' -> '{}'", current, to);
                    current = normalize_path(to).into_owned();
                }
            }
        }

        error_log!("Redirect loop while resolving '{}'", requested);
        Err(NavigationError::RedirectLoop {
            path: requested,
            depth: self.max_redirect_depth,
        })
    }

    /// First non-fallback route matching the normalized `path`.
    fn match_first(&self, path: &str) -> Option<(usize, RouteParams)> {
        self.routes
            .iter()
            .enumerate()
            .filter(|(index, _)| Some(*index) != self.fallback)
            .find_map(|(index, route)| route.matches(path).map(|params| (index, params)))
    }
}

/// Builder for [`RouteTable`].
#[must_use]
pub struct RouteTableBuilder {
    routes: Vec<Route>,
    not_found: Option<ViewId>,
    max_redirect_depth: usize,
}

impl RouteTableBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self {
            routes: Vec::new(),
            not_found: None,
            max_redirect_depth: MAX_REDIRECT_DEPTH,
        }
    }

    /// Append a route. Order matters: the first match wins.
    pub fn route(mut self, route: Route) -> Self {
        self.routes.push(route);
        self
    }

    /// Declare a catch-all view for paths no route matches.
    pub fn not_found(mut self, view: impl Into<ViewId>) -> Self {
        self.not_found = Some(view.into());
        self
    }

    /// Change the redirect depth limit (default [`MAX_REDIRECT_DEPTH`]).
    pub fn max_redirect_depth(mut self, depth: usize) -> Self {
        self.max_redirect_depth = depth;
        self
    }

    /// Validate and build the table.
    pub fn build(self) -> Result<RouteTable, NavigationError> {
        let mut seen = HashSet::new();
        for route in &self.routes {
            validate_pattern(route.pattern())?;
            let normalized = route.normalized_pattern();
            if !seen.insert(pattern_shape(&normalized)) {
                return Err(NavigationError::DuplicateRoute {
                    pattern: normalized,
                });
            }
        }

        let default_route = self
            .routes
            .iter()
            .find(|route| route.normalized_pattern() == "/")
            .ok_or(NavigationError::MissingDefaultRoute)?;
        if let Some(view) = default_route.view() {
            return Err(NavigationError::InvalidDefaultRoute { view: view.clone() });
        }

        let mut routes = self.routes;
        let fallback = self.not_found.map(|view| {
            routes.push(Route::new(NOT_FOUND_PATTERN, view));
            routes.len() - 1
        });

        let table = RouteTable {
            routes,
            fallback,
            max_redirect_depth: self.max_redirect_depth,
        };

        for route in &table.routes {
            if let Some(to) = route.redirect_to() {
                let reaches_view = matches!(
                    table.resolve(to),
                    Ok(Some(ref resolved)) if !resolved.is_fallback
                );
                if !reaches_view {
                    return Err(NavigationError::InvalidRedirect {
                        from: route.normalized_pattern(),
                        to: to.to_string(),
                    });
                }
            }
        }

        for route in &table.routes {
            match route.target() {
                RouteTarget::View { id, .. } => info_log!(
                    "Registered route '{}' -> view '{}' ({} guards)",
                    route.pattern(),
                    id,
                    route.guards().len()
                ),
                RouteTarget::Redirect(to) => {
                    info_log!("Registered redirect '{}' -> '{}'", route.pattern(), to);
                }
            }
        }

        Ok(table)
    }
}

impl Default for RouteTableBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn validate_pattern(pattern: &str) -> Result<(), NavigationError> {
    let mut names = HashSet::new();
    for segment in split_path(pattern) {
        if !segment.starts_with(':') {
            continue;
        }
        let Some(name) = extract_param_name(segment) else {
            return Err(NavigationError::InvalidPattern {
                pattern: pattern.to_string(),
                message: "parameter segment without a name".to_string(),
            });
        };
        if !names.insert(name) {
            return Err(NavigationError::InvalidPattern {
                pattern: pattern.to_string(),
                message: format!("parameter '{}' declared twice", name),
            });
        }
    }
    Ok(())
}

/// Pattern with parameter names erased, so `/a/:x` and `/a/:y` compare equal.
fn pattern_shape(pattern: &str) -> String {
    let shape: Vec<&str> = split_path(pattern)
        .into_iter()
        .map(|segment| match extract_param_name(segment) {
            Some(_) => ":",
            None => segment,
        })
        .collect();
    format!("/{}", shape.join("/"))
}
