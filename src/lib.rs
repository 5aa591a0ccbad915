//! # controller-binder
//!
//! **controller-binder** puts a controller layer on top of any HTTP router. Controllers
//! are registered under a name, routes refer to their actions with `"Controller.action"`
//! strings, and every such route carries its own middleware chain.
//!
//! ## Overview
//!
//! The binder never owns the HTTP machinery. It wraps a [`Router`](router::Router) that
//! exposes named registration functions (`get`, `post`, ...) and installs a dispatch
//! wrapper for each declared route. The wrapper looks the route up by URL on every
//! request and runs its middleware chain, ending in the controller action.
//!
//! ## Architecture
//!
//! - **[`binder`]** - [`ControllerBinder`], the public facade: registration, route
//!   declaration, resource expansion, reverse routing and route listing
//! - **[`controller`]** - the [`Controller`] trait, action tables and the name/alias registry
//! - **[`middleware`]** - middleware callables, the `next` continuation and the named registry
//! - **[`routes`]** - route bindings and the URL-keyed route table
//! - **[`path_template`]** - `:name` path templates: parsing and rendering
//! - **[`router`]** - the router contract plus [`MemoryRouter`], an in-process implementation
//! - **[`error`]** - registration and dispatch errors
//! - **[`runtime_config`]** - environment-driven settings
//!
//! ## Example
//!
//! ```rust
//! use controller_binder::{
//!     ActionTable, Controller, ControllerBinder, DispatchError, HandlerRequest,
//!     HandlerResponse, MemoryRouter, RegisterOptions,
//! };
//! use serde_json::json;
//!
//! #[derive(Default)]
//! struct Items;
//!
//! impl Items {
//!     fn show(&self, req: &mut HandlerRequest, res: &mut HandlerResponse) -> Result<(), DispatchError> {
//!         res.set_json(200, json!({ "id": req.get_path_param("id") }));
//!         Ok(())
//!     }
//! }
//!
//! impl Controller<HandlerRequest, HandlerResponse> for Items {
//!     fn actions() -> ActionTable<Self, HandlerRequest, HandlerResponse> {
//!         ActionTable::new().action("show", Self::show)
//!     }
//! }
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut binder = ControllerBinder::new(MemoryRouter::new());
//! binder.register::<Items>(RegisterOptions::new().alias("Named"))?;
//! binder.register_middleware("auth", |req: &mut HandlerRequest, res: &mut HandlerResponse, next| {
//!     if req.get_header("authorization").is_none() {
//!         res.set_json(401, json!({ "error": "Unauthorized" }));
//!         return Ok(());
//!     }
//!     next.run(req, res)
//! });
//! binder.get("/items/:id", "Items.show")?.middleware("auth")?;
//!
//! assert_eq!(binder.route_for_action("Named.show", &[("id", "7")])?, "/items/7");
//!
//! let res = binder
//!     .get_router()
//!     .dispatch(HandlerRequest::new("GET", "/items/7").with_header("Authorization", "t"))?;
//! assert_eq!(res.body, json!({ "id": "7" }));
//! # Ok(())
//! # }
//! ```
//!
//! ## Logging
//!
//! All diagnostics go through [`tracing`]. Registration logs at `info`, dispatch at
//! `debug`; install any subscriber to see them.

pub mod binder;
pub mod controller;
pub mod error;
pub mod middleware;
pub mod path_template;
pub mod router;
pub mod routes;
pub mod runtime_config;

pub use binder::{Action, ControllerBinder, RouteHandle};
pub use controller::{ActionTable, Controller, RegisterOptions};
pub use error::{BindError, DispatchError, ErrorKind};
pub use middleware::{middleware_fn, Middleware, MiddlewareNames, Next};
pub use router::{Handler, HandlerRequest, HandlerResponse, MemoryRouter, Router};
pub use routes::{RouteBinding, RouteSummary};
pub use runtime_config::BinderConfig;
