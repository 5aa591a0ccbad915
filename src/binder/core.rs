use std::any::Any;
use std::sync::{Arc, Mutex, PoisonError};

use arc_swap::ArcSwap;
use tracing::{debug, info, info_span, warn};

use crate::controller::{Controller, ControllerBinding, ControllerRegistry, RegisterOptions};
use crate::error::{BindError, DispatchError};
use crate::middleware::{run_chain, terminal, MiddlewareNames, MiddlewareRegistry, Next};
use crate::path_template;
use crate::router::{Handler, Router};
use crate::routes::{RouteBinding, RouteTable};
use crate::runtime_config::BinderConfig;

/// What a route runs: a `"Controller.action"` reference or a handler used verbatim.
pub enum Action<Req, Res> {
    /// Resolved through the controller registry; gets a route binding
    Named(String),
    /// Registered on the router as-is; no binding, no middleware, no reverse routing
    Handler(Handler<Req, Res>),
}

impl<Req, Res> Action<Req, Res> {
    /// Wrap a closure as a direct handler.
    pub fn handler<F>(f: F) -> Self
    where
        F: Fn(&mut Req, &mut Res) -> Result<(), DispatchError> + Send + Sync + 'static,
    {
        Action::Handler(Arc::new(f))
    }
}

impl<Req, Res> From<&str> for Action<Req, Res> {
    fn from(action: &str) -> Self {
        Action::Named(action.to_string())
    }
}

impl<Req, Res> From<String> for Action<Req, Res> {
    fn from(action: String) -> Self {
        Action::Named(action)
    }
}

impl<Req, Res> From<Handler<Req, Res>> for Action<Req, Res> {
    fn from(handler: Handler<Req, Res>) -> Self {
        Action::Handler(handler)
    }
}

impl<Req, Res> std::fmt::Debug for Action<Req, Res> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Named(name) => f.debug_tuple("Named").field(name).finish(),
            Action::Handler(_) => f.write_str("Handler(..)"),
        }
    }
}

/// Split `"Controller.action"` at the first `.`.
pub fn parse_action(action: &str) -> Result<(&str, &str), BindError> {
    match action.split_once('.') {
        Some((controller, name)) if !controller.is_empty() && !name.is_empty() => {
            Ok((controller, name))
        }
        _ => Err(BindError::MalformedAction {
            action: action.to_string(),
        }),
    }
}

/// Binds controllers, actions and middleware onto a [`Router`].
pub struct ControllerBinder<R: Router> {
    router: R,
    config: BinderConfig,
    controllers: ControllerRegistry<R::Request, R::Response>,
    middleware: MiddlewareRegistry<R::Request, R::Response>,
    routes: Arc<ArcSwap<RouteTable<R::Request, R::Response>>>,
    /// Serializes route-table writers; readers never take it
    mutation: Mutex<()>,
}

impl<R: Router> ControllerBinder<R> {
    /// Wrap `router` with the default [`BinderConfig`].
    pub fn new(router: R) -> Self {
        Self::with_config(router, BinderConfig::default())
    }

    pub fn with_config(router: R, config: BinderConfig) -> Self {
        Self {
            router,
            config,
            controllers: ControllerRegistry::new(),
            middleware: MiddlewareRegistry::new(),
            routes: Arc::new(ArcSwap::from_pointee(RouteTable::new())),
            mutation: Mutex::new(()),
        }
    }

    /// The router every route is registered on.
    pub fn get_router(&self) -> &R {
        &self.router
    }

    pub fn get_router_mut(&mut self) -> &mut R {
        &mut self.router
    }

    pub fn into_router(self) -> R {
        self.router
    }

    pub fn config(&self) -> &BinderConfig {
        &self.config
    }

    /// Instantiate `C` with [`Default`] and register it.
    ///
    /// The name is `options.name`, else [`Controller::name`]. Fails with
    /// [`BindError::NoName`] when neither yields a name and with
    /// [`BindError::NameAlreadyBound`] when the name or alias is taken.
    pub fn register<C>(&mut self, options: RegisterOptions) -> Result<(), BindError>
    where
        C: Controller<R::Request, R::Response> + Default,
    {
        self.controllers.register_with(C::default, options)?;
        Ok(())
    }

    /// Register an already-built controller; same rules as [`register`](Self::register).
    pub fn register_instance<C>(&mut self, controller: C, options: RegisterOptions) -> Result<(), BindError>
    where
        C: Controller<R::Request, R::Response>,
    {
        self.controllers.register_with(move || controller, options)?;
        Ok(())
    }

    /// Make `middleware` attachable to routes under `name`.
    pub fn register_middleware<F>(&mut self, name: &str, middleware: F)
    where
        F: for<'a> Fn(&mut R::Request, &mut R::Response, Next<'a, R::Request, R::Response>) -> Result<(), DispatchError>
            + Send
            + Sync
            + 'static,
    {
        self.middleware.register(name, Arc::new(middleware));
    }

    /// The controller instance registered under `name` (canonical name or alias).
    pub fn get_controller(&self, name: &str) -> Result<Arc<dyn Any + Send + Sync>, BindError> {
        Ok(self.controllers.get(name)?.instance())
    }

    /// Typed variant of [`get_controller`](Self::get_controller).
    ///
    /// A controller of another type under `name` is reported as not found.
    pub fn controller<C>(&self, name: &str) -> Result<Arc<C>, BindError>
    where
        C: Any + Send + Sync,
    {
        self.get_controller(name)?
            .downcast::<C>()
            .map_err(|_| BindError::ControllerNotFound {
                name: name.to_string(),
                available: self.controllers.names().to_vec(),
            })
    }

    pub(crate) fn controller_binding(
        &self,
        name: &str,
    ) -> Result<&Arc<ControllerBinding<R::Request, R::Response>>, BindError> {
        self.controllers.get(name)
    }

    /// Registered controller keys (names and aliases) in insertion order.
    pub fn controller_names(&self) -> &[String] {
        self.controllers.names()
    }

    /// Declare a route.
    ///
    /// A [`Action::Handler`] goes to the router untouched and the returned handle is
    /// unbound. A [`Action::Named`] reference is resolved now; the router gets a wrapper
    /// that runs whatever chain is bound to `url` at request time, and the binding for
    /// `url` is created or replaced with the action as its only chain element.
    pub fn add_route(
        &mut self,
        method: &str,
        url: &str,
        action: impl Into<Action<R::Request, R::Response>>,
    ) -> Result<RouteHandle<'_, R>, BindError> {
        if !self.router.supports(method) {
            return Err(BindError::InvalidMethod {
                method: method.to_string(),
            });
        }

        let reference = match action.into() {
            Action::Handler(handler) => {
                self.router.add(method, url, handler);
                debug!(method = %method, url = %url, "Direct handler registered");
                return Ok(RouteHandle {
                    binder: self,
                    url: None,
                });
            }
            Action::Named(reference) => reference,
        };

        let (controller_name, action_name) = parse_action(&reference)?;
        let binding = self.controllers.get(controller_name)?;
        let handler = binding
            .action(action_name)
            .ok_or_else(|| BindError::ControllerActionNotFound {
                controller: controller_name.to_string(),
                action: action_name.to_string(),
            })?;

        let route = RouteBinding {
            method: method.to_string(),
            url: url.to_string(),
            action: reference.clone(),
            controller_name: controller_name.to_string(),
            action_name: action_name.to_string(),
            middleware: Arc::from(vec![terminal(Arc::clone(handler))]),
        };

        let wrapper = self.dispatch_wrapper(url);
        self.router.add(method, url, wrapper);

        if let Some(previous) = self.update_routes(|table| table.upsert(route)) {
            if previous.method != method {
                warn!(
                    url = %url,
                    previous_method = %previous.method,
                    method = %method,
                    "URL rebound with a different method; every wrapper on this URL now runs the new chain"
                );
            }
        }
        info!(method = %method, url = %url, action = %reference, "Route bound");

        Ok(RouteHandle {
            binder: self,
            url: Some(url.to_string()),
        })
    }

    pub fn get(
        &mut self,
        url: &str,
        action: impl Into<Action<R::Request, R::Response>>,
    ) -> Result<RouteHandle<'_, R>, BindError> {
        self.add_route("get", url, action)
    }

    pub fn post(
        &mut self,
        url: &str,
        action: impl Into<Action<R::Request, R::Response>>,
    ) -> Result<RouteHandle<'_, R>, BindError> {
        self.add_route("post", url, action)
    }

    pub fn put(
        &mut self,
        url: &str,
        action: impl Into<Action<R::Request, R::Response>>,
    ) -> Result<RouteHandle<'_, R>, BindError> {
        self.add_route("put", url, action)
    }

    pub fn patch(
        &mut self,
        url: &str,
        action: impl Into<Action<R::Request, R::Response>>,
    ) -> Result<RouteHandle<'_, R>, BindError> {
        self.add_route("patch", url, action)
    }

    pub fn delete(
        &mut self,
        url: &str,
        action: impl Into<Action<R::Request, R::Response>>,
    ) -> Result<RouteHandle<'_, R>, BindError> {
        self.add_route("delete", url, action)
    }

    /// Prepend the named middleware to the chain bound to `url`.
    ///
    /// Every name must be registered, even when `url` has no binding; with no binding the
    /// call then does nothing.
    pub fn attach_middleware(
        &self,
        url: &str,
        names: impl Into<MiddlewareNames>,
    ) -> Result<(), BindError> {
        let names = names.into();
        let resolved = self.middleware.resolve(&names)?;
        if self.routes.load().get(url).is_none() {
            debug!(url = %url, middleware = ?names.as_slice(), "No route binding, middleware not attached");
            return Ok(());
        }
        let chain_len = self.update_routes(|table| table.prepend_middleware(url, resolved));
        debug!(url = %url, middleware = ?names.as_slice(), chain_len = ?chain_len, "Middleware attached");
        Ok(())
    }

    /// Build the concrete path for `action` by rendering the first route bound to it.
    ///
    /// The controller part may be the canonical name or the alias, and matches routes
    /// declared with either. Routes are scanned in declaration order.
    pub fn route_for_action(&self, action: &str, params: &[(&str, &str)]) -> Result<String, BindError> {
        let (controller_name, action_name) = parse_action(action)?;
        let binding = self.controllers.get(controller_name)?;

        let table = self.routes.load();
        let route = table
            .iter()
            .find(|r| binding.answers_to(&r.controller_name) && r.action_name == action_name)
            .ok_or_else(|| BindError::RouteNotFound {
                action: action.to_string(),
            })?;

        let template = path_template::compile(&route.url, self.config.encode_params)?;
        Ok(template.render(params)?)
    }

    /// Every route binding in declaration order. Direct handlers are not listed.
    pub fn list_routes(&self) -> Vec<RouteBinding<R::Request, R::Response>> {
        self.routes.load().iter().cloned().collect()
    }

    /// Log the route table at `info` level.
    pub fn dump_routes(&self) {
        let table = self.routes.load();
        info!(count = table.len(), "Route table");
        for route in table.iter() {
            info!(
                method = %route.method,
                url = %route.url,
                action = %route.action,
                middleware = route.middleware.len(),
                "[route]"
            );
        }
    }

    fn update_routes<T>(&self, edit: impl FnOnce(&mut RouteTable<R::Request, R::Response>) -> T) -> T {
        let _guard = self.mutation.lock().unwrap_or_else(PoisonError::into_inner);
        let current = self.routes.load_full();
        let mut next = (*current).clone();
        let out = edit(&mut next);
        self.routes.store(Arc::new(next));
        out
    }

    fn dispatch_wrapper(&self, url: &str) -> Handler<R::Request, R::Response> {
        let routes = Arc::clone(&self.routes);
        let url = url.to_string();
        let trace = self.config.trace_dispatch;

        Arc::new(move |req: &mut R::Request, res: &mut R::Response| {
            let (chain, span) = {
                let table = routes.load();
                let Some(binding) = table.get(&url) else {
                    return Err(DispatchError::Unbound { url: url.clone() });
                };
                let span = trace.then(|| {
                    info_span!(
                        "route_dispatch",
                        method = %binding.method,
                        url = %binding.url,
                        controller = %binding.controller_name,
                        action = %binding.action_name
                    )
                });
                (Arc::clone(&binding.middleware), span)
            };
            let _entered = span.as_ref().map(|s| s.enter());

            match run_chain(&chain, req, res) {
                Err(DispatchError::Halt) => Ok(()),
                other => other,
            }
        })
    }
}

/// Returned by route declarations; attaches middleware to the declared URL.
pub struct RouteHandle<'a, R: Router> {
    binder: &'a ControllerBinder<R>,
    /// `None` for direct handlers
    url: Option<String>,
}

impl<R: Router> std::fmt::Debug for RouteHandle<'_, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouteHandle").field("url", &self.url).finish()
    }
}

impl<'a, R: Router> RouteHandle<'a, R> {
    /// Prepend the named middleware to this route's chain, in the order given.
    ///
    /// Unknown names fail with [`BindError::MiddlewareNotFound`]. On a direct-handler route
    /// this does nothing.
    pub fn middleware(self, names: impl Into<MiddlewareNames>) -> Result<Self, BindError> {
        if let Some(url) = &self.url {
            self.binder.attach_middleware(url, names)?;
        }
        Ok(self)
    }

    /// The URL whose binding this handle edits.
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// Whether the route has a binding that middleware can attach to.
    pub fn is_bound(&self) -> bool {
        self.url.is_some()
    }
}
