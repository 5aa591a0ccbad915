//! # Controller Module
//!
//! Controllers are named collections of actions. A controller type declares its actions up
//! front through [`Controller::actions`]; the table is validated once at registration and
//! each entry becomes a [`Handler`](crate::router::Handler) bound to the single controller
//! instance.
//!
//! ## Naming
//!
//! A controller is registered under a canonical name, taken from
//! [`RegisterOptions::name`] or, failing that, [`Controller::name`] (the short type name by
//! default). An optional alias is a second key for the same binding. Both keys are unique
//! across the registry.
//!
//! ## Example
//!
//! ```rust
//! use controller_binder::controller::{ActionTable, Controller};
//! use controller_binder::error::DispatchError;
//! use controller_binder::router::{HandlerRequest, HandlerResponse};
//! use serde_json::json;
//!
//! #[derive(Default)]
//! struct PostsController;
//!
//! impl PostsController {
//!     fn show(&self, req: &mut HandlerRequest, res: &mut HandlerResponse) -> Result<(), DispatchError> {
//!         res.set_json(200, json!({ "id": req.get_path_param("id") }));
//!         Ok(())
//!     }
//! }
//!
//! impl Controller<HandlerRequest, HandlerResponse> for PostsController {
//!     fn actions() -> ActionTable<Self, HandlerRequest, HandlerResponse> {
//!         ActionTable::new().action("show", Self::show)
//!     }
//! }
//!
//! assert_eq!(<PostsController as Controller<HandlerRequest, HandlerResponse>>::name(), Some("PostsController"));
//! ```

mod core;
mod registry;

pub use core::{short_type_name, ActionTable, Controller, ControllerAction, RegisterOptions};
pub use registry::{ControllerBinding, ControllerRegistry};
