use std::sync::Arc;

use crate::error::DispatchError;

/// Registration names every conventional router exposes.
pub const DEFAULT_METHODS: [&str; 5] = ["get", "post", "put", "patch", "delete"];

/// A request handler as installed on a [`Router`].
pub type Handler<Req, Res> =
    Arc<dyn Fn(&mut Req, &mut Res) -> Result<(), DispatchError> + Send + Sync>;

/// The router surface the binder registers onto.
///
/// Implementations expose a set of named registration functions. The binder checks
/// [`supports`](Router::supports) before every registration and reports
/// `BindError::InvalidMethod` for names the router does not expose. Names are matched
/// exactly (`"get"`, not `"GET"`).
///
/// Errors a handler returns belong to the router: the binder only swallows
/// `DispatchError::Halt`.
pub trait Router {
    /// Request value handed to handlers.
    type Request: 'static;
    /// Response value handed to handlers.
    type Response: 'static;

    /// Whether the router exposes a registration function called `method`.
    fn supports(&self, method: &str) -> bool;

    /// Register `handler` for `method` requests matching `url`.
    fn add(&mut self, method: &str, url: &str, handler: Handler<Self::Request, Self::Response>);
}
