use std::sync::Arc;

use tracing::info;

use super::core::{Action, ControllerBinder};
use crate::error::BindError;
use crate::router::Router;

/// Conventional resource actions, in the order routes are declared.
///
/// Each entry is `(action, method, path suffix)`; `""` is the collection path.
pub const RESOURCE_ACTIONS: [(&str, &str, &str); 8] = [
    ("index", "get", ""),
    ("create", "get", "/new"),
    ("store", "post", ""),
    ("show", "get", "/:id"),
    ("edit", "get", "/:id/edit"),
    ("update", "put", "/:id"),
    ("update", "patch", "/:id"),
    ("destroy", "delete", "/:id"),
];

/// Strip trailing slashes and make sure the base starts with one.
///
/// The root resource normalizes to `""`, so suffixes append cleanly.
pub fn normalize_base(base: &str) -> String {
    let trimmed = base.trim_end_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}

impl<R: Router> ControllerBinder<R> {
    /// Declare the conventional CRUD routes for a registered controller.
    ///
    /// Only actions the controller defines are routed. The routes use the controller's
    /// action handlers directly, so they get no route binding: no middleware and no
    /// reverse routing.
    pub fn resource(&mut self, base: &str, controller_name: &str) -> Result<(), BindError> {
        let binding = Arc::clone(self.controller_binding(controller_name)?);
        let base = normalize_base(base);

        let mut declared = 0usize;
        for (action, method, suffix) in RESOURCE_ACTIONS {
            let Some(handler) = binding.action(action) else {
                continue;
            };
            let url = match format!("{base}{suffix}") {
                url if url.is_empty() => "/".to_string(),
                url => url,
            };
            self.add_route(method, &url, Action::Handler(Arc::clone(handler)))?;
            declared += 1;
        }

        let shown = if base.is_empty() { "/" } else { base.as_str() };
        info!(
            controller = %binding.name(),
            base = %shown,
            routes = declared,
            "Resource declared"
        );
        Ok(())
    }
}
