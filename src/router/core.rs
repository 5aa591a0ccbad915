//! Reference router: regex matching over `:name` templates.

use std::sync::Arc;

use http::Method;
use regex::Regex;
use serde_json::json;
use tracing::{debug, error, info, warn};

use super::interface::{Handler, Router, DEFAULT_METHODS};
use super::request::{HandlerRequest, HandlerResponse, ParamVec};
use crate::error::DispatchError;
use crate::path_template::{PathTemplate, Token};

struct MemoryRoute {
    /// Registration name (`"get"`)
    name: String,
    method: Method,
    template: String,
    regex: Regex,
    /// Shared with every request's `path_params`
    param_names: Vec<Arc<str>>,
    handler: Handler<HandlerRequest, HandlerResponse>,
}

/// In-process router over [`HandlerRequest`] and [`HandlerResponse`].
///
/// Routes are matched in registration order. Registering the same method and template
/// twice replaces the earlier handler in place.
pub struct MemoryRouter {
    methods: Vec<String>,
    routes: Vec<MemoryRoute>,
}

impl Default for MemoryRouter {
    fn default() -> Self {
        Self {
            methods: DEFAULT_METHODS.iter().map(|m| m.to_string()).collect(),
            routes: Vec::new(),
        }
    }
}

impl MemoryRouter {
    /// Router exposing `get`, `post`, `put`, `patch` and `delete`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Router exposing exactly `methods`.
    #[must_use]
    pub fn with_methods(methods: &[&str]) -> Self {
        Self {
            methods: methods.iter().map(|m| m.to_string()).collect(),
            routes: Vec::new(),
        }
    }

    /// Expose one more registration name (e.g. `"options"`).
    #[must_use]
    pub fn with_method(mut self, method: &str) -> Self {
        if !self.methods.iter().any(|m| m == method) {
            self.methods.push(method.to_string());
        }
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// `(registration name, template)` for every route, in registration order.
    #[must_use]
    pub fn routes(&self) -> Vec<(&str, &str)> {
        self.routes
            .iter()
            .map(|r| (r.name.as_str(), r.template.as_str()))
            .collect()
    }

    /// Convert a `:name` template to an anchored regex and extract parameter names
    ///
    /// `/users/:id` becomes `^/users/([^/]+)$` with params `["id"]`. Literal text is
    /// escaped; `:name?` makes the segment and its leading `/` optional; `*name` matches
    /// the rest of the path including slashes.
    pub(crate) fn path_to_regex(template: &PathTemplate) -> (Regex, Vec<Arc<str>>) {
        let source = template.as_str();
        if source.is_empty() || source == "/" {
            return (Self::compile(r"^/$", source), Vec::new());
        }

        let mut pattern = String::with_capacity(source.len() + 16);
        pattern.push('^');
        let mut param_names = Vec::with_capacity(template.tokens().len());

        for token in template.tokens() {
            match token {
                Token::Literal(text) => pattern.push_str(&regex::escape(text)),
                Token::Param {
                    name,
                    optional: false,
                } => {
                    pattern.push_str("([^/]+)");
                    param_names.push(Arc::from(name.as_str()));
                }
                Token::Param {
                    name,
                    optional: true,
                } => {
                    if pattern.ends_with('/') {
                        pattern.pop();
                        pattern.push_str("(?:/([^/]+))?");
                    } else {
                        pattern.push_str("([^/]+)?");
                    }
                    param_names.push(Arc::from(name.as_str()));
                }
                Token::Wildcard { name } => {
                    pattern.push_str("(.+)");
                    param_names.push(Arc::from(name.as_str()));
                }
            }
        }

        pattern.push('$');
        (Self::compile(&pattern, source), param_names)
    }

    fn compile(pattern: &str, template: &str) -> Regex {
        // Literal text is escaped and params are fixed groups, so the pattern is always valid.
        Regex::new(pattern)
            .unwrap_or_else(|e| panic!("Failed to compile path regex for {template}: {e}"))
    }

    fn find(&self, method: &Method, path: &str) -> Option<(&MemoryRoute, ParamVec)> {
        let path = if path.is_empty() { "/" } else { path };
        self.routes
            .iter()
            .filter(|route| route.method == *method)
            .find_map(|route| {
                let caps = route.regex.captures(path)?;
                let params = route
                    .param_names
                    .iter()
                    .enumerate()
                    .filter_map(|(i, name)| {
                        caps.get(i + 1).map(|m| {
                            let raw = m.as_str();
                            let value = urlencoding::decode(raw)
                                .map(|v| v.into_owned())
                                .unwrap_or_else(|_| raw.to_string());
                            (Arc::clone(name), value)
                        })
                    })
                    .collect();
                Some((route, params))
            })
    }

    /// Route `req` to the first matching handler and run it.
    ///
    /// Unmatched requests get a `404` JSON response. Handler errors are returned as-is.
    pub fn dispatch(&self, mut req: HandlerRequest) -> Result<HandlerResponse, DispatchError> {
        let mut res = HandlerResponse::default();
        let Some((route, params)) = self.find(&req.method, &req.path) else {
            warn!(method = %req.method, path = %req.path, "No route matched");
            res.set_json(404, json!({ "error": "Not Found", "path": req.path }));
            return Ok(res);
        };

        debug!(
            method = %req.method,
            path = %req.path,
            route_pattern = %route.template,
            path_params = ?params,
            "Route matched"
        );
        req.path_params = params;
        (route.handler)(&mut req, &mut res)?;
        Ok(res)
    }
}

impl Router for MemoryRouter {
    type Request = HandlerRequest;
    type Response = HandlerResponse;

    fn supports(&self, method: &str) -> bool {
        self.methods.iter().any(|m| m == method)
    }

    fn add(&mut self, method: &str, url: &str, handler: Handler<HandlerRequest, HandlerResponse>) {
        let http_method = match Method::from_bytes(method.to_ascii_uppercase().as_bytes()) {
            Ok(m) => m,
            Err(e) => {
                error!(method = %method, url = %url, error = %e, "Not an HTTP method token, route skipped");
                return;
            }
        };
        let template = PathTemplate::parse(url).unwrap_or_else(|e| {
            warn!(url = %url, error = %e, "Invalid route template, matching it literally");
            PathTemplate::literal(url)
        });
        let (regex, param_names) = Self::path_to_regex(&template);

        let route = MemoryRoute {
            name: method.to_string(),
            method: http_method,
            template: url.to_string(),
            regex,
            param_names,
            handler,
        };

        match self
            .routes
            .iter_mut()
            .find(|r| r.name == route.name && r.template == route.template)
        {
            Some(existing) => {
                debug!(method = %method, url = %url, "Route handler replaced");
                *existing = route;
            }
            None => {
                info!(method = %method, url = %url, routes_count = self.routes.len() + 1, "Route added");
                self.routes.push(route);
            }
        }
    }
}
