//! # Binder Module
//!
//! [`ControllerBinder`] is the public surface: it owns the controller registry, the
//! middleware registry and the route table, and registers dispatch wrappers on the
//! [`Router`](crate::router::Router) it wraps.
//!
//! ## Request Flow
//!
//! ```text
//! router ──▶ dispatch wrapper(url) ──▶ route table snapshot ──▶ chain for url
//!                                                                 │
//!            auth ─next─▶ audit ─next─▶ Controller.action ◀───────┘
//! ```
//!
//! The wrapper looks the chain up by URL on every request, so middleware attached after
//! the route was declared still runs. `DispatchError::Halt` stops the chain and counts as
//! handled; any other error goes back to the router.
//!
//! ## Concurrency
//!
//! Registration (`register`, `add_route`) is meant to happen once at startup and takes
//! `&mut self`. `attach_middleware` only needs `&self`; route-table writes go through a
//! mutation lock that copies the current table, edits the copy and swaps it in, so
//! concurrent attachments never lose each other. Dispatch wrappers read immutable
//! snapshots through `ArcSwap` without taking the lock and can run on any thread.

mod core;
mod resource;

pub use core::{parse_action, Action, ControllerBinder, RouteHandle};
pub use resource::{normalize_base, RESOURCE_ACTIONS};
