//! # Router Module
//!
//! The binder never depends on a concrete HTTP router. It talks to one through the
//! [`Router`] trait: a set of named registration functions (`get`, `post`, `put`,
//! `patch`, `delete`, or anything else the router chooses to expose), each taking a URL
//! template and a [`Handler`].
//!
//! ## Overview
//!
//! - [`Router`] - the collaborator contract the binder consumes
//! - [`Handler`] - `(request, response) -> Result<(), DispatchError>`
//! - [`MemoryRouter`] - an in-process reference router over [`HandlerRequest`] and
//!   [`HandlerResponse`], useful for tests, benches and small services
//!
//! ## Matching
//!
//! [`MemoryRouter`] uses a two-phase approach:
//!
//! 1. **Compilation**: `:name` templates (e.g. `/pets/:id`) are tokenized by
//!    [`path_template`](crate::path_template) and turned into anchored regex patterns.
//! 2. **Matching**: the request path is tested against every compiled pattern in
//!    registration order (O(n) in the number of routes) and the first match wins.
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use controller_binder::router::{HandlerRequest, HandlerResponse, MemoryRouter, Router};
//! use serde_json::json;
//!
//! let mut router = MemoryRouter::new();
//! router.add(
//!     "get",
//!     "/pets/:id",
//!     Arc::new(|req: &mut HandlerRequest, res: &mut HandlerResponse| {
//!         let id = req.get_path_param("id").unwrap_or_default().to_string();
//!         res.set_json(200, json!({ "id": id }));
//!         Ok(())
//!     }),
//! );
//!
//! let res = router.dispatch(HandlerRequest::new("GET", "/pets/12")).unwrap();
//! assert_eq!(res.status, 200);
//! assert_eq!(res.body["id"], "12");
//! ```

mod core;
mod interface;
mod request;

pub use core::MemoryRouter;
pub use interface::{Handler, Router, DEFAULT_METHODS};
pub use request::{HandlerRequest, HandlerResponse, HeaderVec, ParamVec, MAX_INLINE_PARAMS};
