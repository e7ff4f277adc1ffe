//! Static route table mapping URL paths to views.
//!
//! Patterns are literal segments plus `:param` segments; a param segment
//! matches any single non-empty path segment and captures its
//! percent-decoded value. Resolution is first match in registration
//! order, and an unmatched path resolves to `None`.

use std::collections::HashMap;

/// Views the shell can activate. Rendering lives outside this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Landing,
    Chat,
}

#[derive(Debug, Clone)]
pub struct Route {
    /// Path pattern, e.g. "/chat/:name".
    pub path: String,
    /// Unique logical identifier, e.g. "chat".
    pub name: String,
    pub view: View,
    /// Forward captured params to the view as inputs.
    pub props: bool,
}

impl Route {
    pub fn new(path: &str, name: &str, view: View, props: bool) -> Self {
        Self {
            path: path.to_string(),
            name: name.to_string(),
            view,
            props,
        }
    }
}

/// A resolved path: which view to activate and its inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteMatch {
    pub name: String,
    pub view: View,
    pub params: HashMap<String, String>,
}

pub struct Router {
    routes: Vec<Route>,
}

impl Router {
    /// Route paths must be unique; earlier routes win on overlap.
    pub fn new(routes: Vec<Route>) -> Self {
        Self { routes }
    }

    /// Look up a route by its logical name.
    pub fn route(&self, name: &str) -> Option<&Route> {
        self.routes.iter().find(|route| route.name == name)
    }

    /// Resolve a request path, or `None` if no route applies.
    pub fn resolve(&self, path: &str) -> Option<RouteMatch> {
        let segments = split_path(path);

        for route in &self.routes {
            if let Some(params) = match_pattern(&route.path, &segments) {
                return Some(RouteMatch {
                    name: route.name.clone(),
                    view: route.view,
                    params: if route.props { params } else { HashMap::new() },
                });
            }
        }

        None
    }
}

impl Default for Router {
    /// The app's two routes: landing page and per-character chat.
    fn default() -> Self {
        Router::new(vec![
            Route::new("/", "landing", View::Landing, false),
            Route::new("/chat/:name", "chat", View::Chat, true),
        ])
    }
}

/// Split a path into segments, tolerating one trailing slash.
/// "/" yields no segments.
fn split_path(path: &str) -> Vec<&str> {
    let trimmed = path.strip_prefix('/').unwrap_or(path);
    let trimmed = trimmed.strip_suffix('/').unwrap_or(trimmed);

    if trimmed.is_empty() {
        Vec::new()
    } else {
        trimmed.split('/').collect()
    }
}

fn match_pattern(pattern: &str, segments: &[&str]) -> Option<HashMap<String, String>> {
    let pattern_segments = split_path(pattern);
    if pattern_segments.len() != segments.len() {
        return None;
    }

    let mut params = HashMap::new();
    for (pattern_segment, segment) in pattern_segments.iter().zip(segments) {
        if let Some(param_name) = pattern_segment.strip_prefix(':') {
            if segment.is_empty() {
                return None;
            }
            params.insert(param_name.to_string(), decode_segment(segment));
        } else if pattern_segment != segment {
            return None;
        }
    }

    Some(params)
}

fn decode_segment(segment: &str) -> String {
    urlencoding::decode(segment)
        .map(|decoded| decoded.into_owned())
        .unwrap_or_else(|_| segment.to_string())
}
