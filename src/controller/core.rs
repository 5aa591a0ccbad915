use std::sync::Arc;

use crate::error::DispatchError;

/// An action as declared on a controller type: receives the controller instance.
pub type ControllerAction<C, Req, Res> =
    Arc<dyn Fn(&C, &mut Req, &mut Res) -> Result<(), DispatchError> + Send + Sync>;

/// Last path segment of a type's name, without generic arguments.
///
/// `my_app::controllers::PostsController<T>` becomes `PostsController`.
#[must_use]
pub fn short_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

/// A named collection of actions.
pub trait Controller<Req, Res>: Send + Sync + Sized + 'static {
    /// Identity name used when no explicit name is given at registration.
    ///
    /// `None` (or an empty string) marks the controller as anonymous: it can then only be
    /// registered with an explicit name.
    fn name() -> Option<&'static str> {
        Some(short_type_name::<Self>())
    }

    /// Every action this controller exposes, keyed by action name.
    fn actions() -> ActionTable<Self, Req, Res>;
}

/// Ordered action table declared by a [`Controller`].
pub struct ActionTable<C, Req, Res> {
    entries: Vec<(String, ControllerAction<C, Req, Res>)>,
}

impl<C, Req, Res> Default for ActionTable<C, Req, Res> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<C, Req, Res> ActionTable<C, Req, Res> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an action. Names may not be empty, contain `.`, or repeat; registration
    /// rejects tables that break these rules.
    #[must_use]
    pub fn action<F>(mut self, name: &str, action: F) -> Self
    where
        F: Fn(&C, &mut Req, &mut Res) -> Result<(), DispatchError> + Send + Sync + 'static,
    {
        self.entries.push((name.to_string(), Arc::new(action)));
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|(n, _)| n.as_str()).collect()
    }

    pub(crate) fn into_entries(self) -> Vec<(String, ControllerAction<C, Req, Res>)> {
        self.entries
    }
}

/// Options for controller registration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterOptions {
    /// Canonical name; overrides [`Controller::name`]
    pub name: Option<String>,
    /// Second lookup key for the same controller
    pub alias: Option<String>,
}

impl RegisterOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }
}
