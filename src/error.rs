//! # Error Module
//!
//! Two error families live here:
//!
//! - [`BindError`] is raised while wiring controllers, routes and middleware. These are
//!   configuration errors: they are returned synchronously from the registration call and
//!   are expected to abort startup.
//! - [`DispatchError`] is returned while a bound route runs its middleware chain for a live
//!   request. Only [`DispatchError::Halt`] is intercepted by the binder; every other variant
//!   reaches the router's own error path untouched.

use thiserror::Error;

use crate::path_template::TemplateError;

/// Which original error family a [`BindError`] belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Controller registration and lookup
    Controller,
    /// Route declaration, middleware attachment and reverse routing
    Route,
}

/// Registration-time failure.
#[derive(Debug, Error)]
pub enum BindError {
    /// No explicit name was given and the controller type is anonymous.
    #[error(
        "A name for the controller wasn't provided, please provide a named controller type or set `RegisterOptions::name`"
    )]
    NoName,

    /// The canonical name or alias is already a registry key.
    #[error("{name} is already bound to a controller")]
    NameAlreadyBound { name: String },

    /// The router does not expose a registration function with this name.
    #[error("{method} method doesn't exist on router")]
    InvalidMethod { method: String },

    /// Action reference is not of the form `Controller.action`.
    #[error("Action reference `{action}` is not of the form `Controller.action`")]
    MalformedAction { action: String },

    /// Action reference names a controller that was never registered.
    #[error("Controller with the name {name} was not found. Available Names: {}", .available.join(","))]
    ControllerNotFound { name: String, available: Vec<String> },

    /// The controller exists but does not expose the action.
    #[error("Action with the name {action} was not found on the controller {controller}")]
    ControllerActionNotFound { controller: String, action: String },

    /// The controller's action table contains an unusable entry.
    #[error("Controller {controller} declares an invalid action name `{action}`: {reason}")]
    InvalidActionName {
        controller: String,
        action: String,
        reason: &'static str,
    },

    /// Middleware attachment referenced a name that was never registered.
    #[error("Middleware with the name {name} was not registered")]
    MiddlewareNotFound { name: String },

    /// Reverse routing found no route bound to the action.
    #[error("No route is bound to the action {action}")]
    RouteNotFound { action: String },

    /// The bound URL template could not be rendered.
    #[error(transparent)]
    Template(#[from] TemplateError),
}

impl BindError {
    /// Error family, matching the controller/router split callers already handle.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            BindError::NoName
            | BindError::NameAlreadyBound { .. }
            | BindError::InvalidActionName { .. } => ErrorKind::Controller,
            _ => ErrorKind::Route,
        }
    }

    /// Stable numeric code within the error family.
    ///
    /// Controller family: `0` no name, `1` name already bound, `3` invalid action name.
    /// Route family: `1` invalid method, `2` controller not found, `3` action not found,
    /// `4` malformed action, `5` middleware not found, `6` route not found, `7` template
    /// error.
    #[must_use]
    pub fn code(&self) -> u8 {
        match self {
            BindError::NoName => 0,
            BindError::NameAlreadyBound { .. } => 1,
            BindError::InvalidActionName { .. } => 3,
            BindError::InvalidMethod { .. } => 1,
            BindError::ControllerNotFound { .. } => 2,
            BindError::ControllerActionNotFound { .. } => 3,
            BindError::MalformedAction { .. } => 4,
            BindError::MiddlewareNotFound { .. } => 5,
            BindError::RouteNotFound { .. } => 6,
            BindError::Template(_) => 7,
        }
    }
}

/// Request-time failure raised while running a route's middleware chain.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// Control signal: stop the chain here and treat the request as handled.
    ///
    /// Returning this is equivalent to not calling [`Next::run`](crate::middleware::Next::run).
    #[error("middleware chain halted")]
    Halt,

    /// The dispatch wrapper found no route binding for the URL it was installed under.
    #[error("no route binding for {url}")]
    Unbound { url: String },

    /// Ordinary failure raised by a middleware or controller action.
    #[error(transparent)]
    Handler(#[from] anyhow::Error),
}

impl DispatchError {
    /// Build a [`DispatchError::Handler`] from a plain message.
    pub fn msg<M>(message: M) -> Self
    where
        M: std::fmt::Display + std::fmt::Debug + Send + Sync + 'static,
    {
        DispatchError::Handler(anyhow::Error::msg(message))
    }

    #[must_use]
    pub fn is_halt(&self) -> bool {
        matches!(self, DispatchError::Halt)
    }
}
