//! # Middleware Module
//!
//! Per-route middleware chains and the registry that resolves middleware by name.
//!
//! A chain is an ordered slice of [`Middleware`] callables. The last element is always the
//! route's controller action. Execution is cooperative: each element receives a [`Next`]
//! continuation and the chain only moves on when the element calls [`Next::run`].
//!
//! ```text
//! auth(req, res, next) ──next.run──▶ audit(req, res, next) ──next.run──▶ Posts.show
//!        │
//!        └─ returns without calling next: audit and Posts.show never run
//! ```
//!
//! ## Example
//!
//! ```rust
//! use controller_binder::middleware::{middleware_fn, run_chain, Middleware};
//!
//! let log = middleware_fn(|req: &mut Vec<&'static str>, _res: &mut (), next| {
//!     req.push("log");
//!     next.run(req, _res)
//! });
//! let action = middleware_fn(|req: &mut Vec<&'static str>, _res: &mut (), _next| {
//!     req.push("action");
//!     Ok(())
//! });
//! let chain: Vec<Middleware<_, _>> = vec![log, action];
//!
//! let mut trail = Vec::new();
//! run_chain(&chain, &mut trail, &mut ()).unwrap();
//! assert_eq!(trail, vec!["log", "action"]);
//! ```

mod core;
mod registry;

pub use core::{middleware_fn, run_chain, terminal, Middleware, MiddlewareChain, Next};
pub use registry::{MiddlewareNames, MiddlewareRegistry};
