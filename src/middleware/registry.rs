use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, warn};

use super::core::Middleware;
use crate::error::BindError;

/// One or more middleware names, as accepted by route attachment.
///
/// A single name normalizes to a one-element sequence; order is preserved otherwise.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MiddlewareNames(Vec<String>);

impl MiddlewareNames {
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for MiddlewareNames {
    fn from(name: &str) -> Self {
        Self(vec![name.to_string()])
    }
}

impl From<String> for MiddlewareNames {
    fn from(name: String) -> Self {
        Self(vec![name])
    }
}

impl From<&[&str]> for MiddlewareNames {
    fn from(names: &[&str]) -> Self {
        Self(names.iter().map(|n| n.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for MiddlewareNames {
    fn from(names: [&str; N]) -> Self {
        Self(names.iter().map(|n| n.to_string()).collect())
    }
}

impl From<Vec<&str>> for MiddlewareNames {
    fn from(names: Vec<&str>) -> Self {
        Self(names.into_iter().map(str::to_string).collect())
    }
}

impl From<Vec<String>> for MiddlewareNames {
    fn from(names: Vec<String>) -> Self {
        Self(names)
    }
}

/// Named middleware available for attachment to routes.
pub struct MiddlewareRegistry<Req, Res> {
    entries: HashMap<String, Middleware<Req, Res>>,
}

impl<Req, Res> Default for MiddlewareRegistry<Req, Res> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<Req, Res> MiddlewareRegistry<Req, Res> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `middleware` under `name`. A later registration replaces an earlier one.
    pub fn register(&mut self, name: &str, middleware: Middleware<Req, Res>) {
        if self.entries.insert(name.to_string(), middleware).is_some() {
            warn!(middleware = %name, "Middleware re-registered, previous entry replaced");
        } else {
            debug!(middleware = %name, "Middleware registered");
        }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Middleware<Req, Res>> {
        self.entries.get(name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve every name in order, failing on the first unknown one.
    pub fn resolve(&self, names: &MiddlewareNames) -> Result<Vec<Middleware<Req, Res>>, BindError> {
        names
            .as_slice()
            .iter()
            .map(|name| {
                self.entries
                    .get(name)
                    .map(Arc::clone)
                    .ok_or_else(|| BindError::MiddlewareNotFound { name: name.clone() })
            })
            .collect()
    }
}
