//! # Routes Module
//!
//! Route bindings: the record associating a URL template and method with a resolved
//! controller action and its middleware chain.
//!
//! The URL template is the key. Declaring a second string-action route on the same URL
//! replaces the earlier binding in place (keeping its position), and every dispatch wrapper
//! installed for that URL runs the replacement's chain from then on.
//!
//! Tables are immutable once published; the binder clones, edits and swaps a whole table
//! for each registration, so dispatch wrappers read a consistent snapshot without locking.

mod core;

pub use core::{RouteBinding, RouteSummary, RouteTable};
