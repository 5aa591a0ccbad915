use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

use tracing::info;

use super::core::{Controller, RegisterOptions};
use crate::error::BindError;
use crate::router::Handler;

/// A registered controller: its names, the instance, and its bound actions.
///
/// The same binding is stored under the canonical name and, when present, the alias.
pub struct ControllerBinding<Req, Res> {
    name: String,
    alias: Option<String>,
    instance: Arc<dyn Any + Send + Sync>,
    actions: Vec<(String, Handler<Req, Res>)>,
}

impl<Req, Res> ControllerBinding<Req, Res> {
    /// Canonical name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    /// Whether `name` is this controller's canonical name or alias.
    #[must_use]
    pub fn answers_to(&self, name: &str) -> bool {
        self.name == name || self.alias.as_deref() == Some(name)
    }

    /// The type-erased controller instance.
    #[must_use]
    pub fn instance(&self) -> Arc<dyn Any + Send + Sync> {
        Arc::clone(&self.instance)
    }

    /// Handler for `action`, bound to this controller's instance.
    #[must_use]
    pub fn action(&self, action: &str) -> Option<&Handler<Req, Res>> {
        self.actions
            .iter()
            .find(|(name, _)| name == action)
            .map(|(_, handler)| handler)
    }

    #[must_use]
    pub fn has_action(&self, action: &str) -> bool {
        self.action(action).is_some()
    }

    /// Action names in declaration order.
    #[must_use]
    pub fn action_names(&self) -> Vec<&str> {
        self.actions.iter().map(|(n, _)| n.as_str()).collect()
    }
}

impl<Req, Res> std::fmt::Debug for ControllerBinding<Req, Res> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ControllerBinding")
            .field("name", &self.name)
            .field("alias", &self.alias)
            .field("actions", &self.action_names())
            .finish()
    }
}

/// Maps controller names and aliases to bindings.
pub struct ControllerRegistry<Req, Res> {
    bindings: HashMap<String, Arc<ControllerBinding<Req, Res>>>,
    /// Keys in insertion order, for diagnostics
    keys: Vec<String>,
}

impl<Req, Res> Default for ControllerRegistry<Req, Res> {
    fn default() -> Self {
        Self {
            bindings: HashMap::new(),
            keys: Vec::new(),
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

impl<Req: 'static, Res: 'static> ControllerRegistry<Req, Res> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a controller built by `make`.
    ///
    /// Names are resolved and checked before `make` runs, so a rejected registration never
    /// constructs the controller.
    pub fn register_with<C, F>(
        &mut self,
        make: F,
        options: RegisterOptions,
    ) -> Result<Arc<ControllerBinding<Req, Res>>, BindError>
    where
        C: Controller<Req, Res>,
        F: FnOnce() -> C,
    {
        let name = non_empty(options.name.as_deref())
            .or_else(|| non_empty(C::name()))
            .ok_or(BindError::NoName)?
            .to_string();
        if self.bindings.contains_key(&name) {
            return Err(BindError::NameAlreadyBound { name });
        }

        let alias = non_empty(options.alias.as_deref())
            .filter(|alias| *alias != name)
            .map(str::to_string);
        if let Some(alias) = &alias {
            if self.bindings.contains_key(alias) {
                return Err(BindError::NameAlreadyBound {
                    name: alias.clone(),
                });
            }
        }

        let table = C::actions().into_entries();
        for (i, (action, _)) in table.iter().enumerate() {
            let reason = if action.is_empty() {
                Some("action names may not be empty")
            } else if action.contains('.') {
                Some("action names may not contain `.`")
            } else if table[..i].iter().any(|(other, _)| other == action) {
                Some("action declared twice")
            } else {
                None
            };
            if let Some(reason) = reason {
                return Err(BindError::InvalidActionName {
                    controller: name,
                    action: action.clone(),
                    reason,
                });
            }
        }

        let instance = Arc::new(make());
        let actions = table
            .into_iter()
            .map(|(action_name, action)| {
                let instance = Arc::clone(&instance);
                let handler: Handler<Req, Res> =
                    Arc::new(move |req: &mut Req, res: &mut Res| action(instance.as_ref(), req, res));
                (action_name, handler)
            })
            .collect();

        let binding = Arc::new(ControllerBinding {
            name: name.clone(),
            alias: alias.clone(),
            instance,
            actions,
        });

        self.bindings.insert(name.clone(), Arc::clone(&binding));
        self.keys.push(name.clone());
        if let Some(alias) = alias {
            self.bindings.insert(alias.clone(), Arc::clone(&binding));
            self.keys.push(alias);
        }

        info!(
            controller = %name,
            alias = ?binding.alias(),
            actions = ?binding.action_names(),
            "Controller registered"
        );
        Ok(binding)
    }

    /// Look up a binding by canonical name or alias.
    pub fn get(&self, name: &str) -> Result<&Arc<ControllerBinding<Req, Res>>, BindError> {
        self.bindings
            .get(name)
            .ok_or_else(|| BindError::ControllerNotFound {
                name: name.to_string(),
                available: self.keys.clone(),
            })
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    /// Every registered key (names and aliases) in insertion order.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.keys
    }

    /// Number of registered controllers; an alias does not count twice.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings
            .iter()
            .filter(|(key, binding)| binding.name() == key.as_str())
            .count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
