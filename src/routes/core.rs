use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::middleware::{Middleware, MiddlewareChain};

/// A string-action route and its middleware chain.
///
/// `middleware` always ends with the resolved controller action.
pub struct RouteBinding<Req, Res> {
    /// Router registration name (`"get"`)
    pub method: String,
    /// URL template, the table key
    pub url: String,
    /// Action reference as declared (`"Posts.show"`)
    pub action: String,
    /// Controller part of the reference, exactly as written (name or alias)
    pub controller_name: String,
    pub action_name: String,
    pub middleware: MiddlewareChain<Req, Res>,
}

impl<Req, Res> Clone for RouteBinding<Req, Res> {
    fn clone(&self) -> Self {
        Self {
            method: self.method.clone(),
            url: self.url.clone(),
            action: self.action.clone(),
            controller_name: self.controller_name.clone(),
            action_name: self.action_name.clone(),
            middleware: Arc::clone(&self.middleware),
        }
    }
}

impl<Req, Res> std::fmt::Debug for RouteBinding<Req, Res> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouteBinding")
            .field("method", &self.method)
            .field("url", &self.url)
            .field("action", &self.action)
            .field("controller_name", &self.controller_name)
            .field("action_name", &self.action_name)
            .field("middleware", &self.middleware.len())
            .finish()
    }
}

impl<Req, Res> RouteBinding<Req, Res> {
    /// Serializable view without the callables.
    #[must_use]
    pub fn summary(&self) -> RouteSummary {
        RouteSummary {
            url: self.url.clone(),
            method: self.method.clone(),
            action: self.action.clone(),
            controller_name: self.controller_name.clone(),
            action_name: self.action_name.clone(),
            middleware_count: self.middleware.len(),
        }
    }
}

/// A [`RouteBinding`] as data, for listings and dumps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteSummary {
    pub url: String,
    pub method: String,
    pub action: String,
    pub controller_name: String,
    pub action_name: String,
    /// Chain length including the terminal action
    pub middleware_count: usize,
}

/// Route bindings in insertion order, keyed by URL.
pub struct RouteTable<Req, Res> {
    routes: Vec<RouteBinding<Req, Res>>,
}

impl<Req, Res> Default for RouteTable<Req, Res> {
    fn default() -> Self {
        Self { routes: Vec::new() }
    }
}

impl<Req, Res> Clone for RouteTable<Req, Res> {
    fn clone(&self) -> Self {
        Self {
            routes: self.routes.clone(),
        }
    }
}

impl<Req, Res> RouteTable<Req, Res> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, url: &str) -> Option<&RouteBinding<Req, Res>> {
        self.routes.iter().find(|r| r.url == url)
    }

    /// Insert `binding`, or replace the binding with the same URL in place.
    ///
    /// Returns the replaced binding, if any.
    pub fn upsert(&mut self, binding: RouteBinding<Req, Res>) -> Option<RouteBinding<Req, Res>> {
        match self.routes.iter_mut().find(|r| r.url == binding.url) {
            Some(existing) => Some(std::mem::replace(existing, binding)),
            None => {
                self.routes.push(binding);
                None
            }
        }
    }

    /// Put `middleware` ahead of the chain bound to `url`, keeping its order.
    ///
    /// Returns the new chain length, or `None` when `url` has no binding.
    pub fn prepend_middleware(
        &mut self,
        url: &str,
        middleware: Vec<Middleware<Req, Res>>,
    ) -> Option<usize> {
        let binding = self.routes.iter_mut().find(|r| r.url == url)?;
        let chain: MiddlewareChain<Req, Res> = middleware
            .into_iter()
            .chain(binding.middleware.iter().map(Arc::clone))
            .collect();
        binding.middleware = chain;
        Some(binding.middleware.len())
    }

    pub fn iter(&self) -> impl Iterator<Item = &RouteBinding<Req, Res>> {
        self.routes.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
