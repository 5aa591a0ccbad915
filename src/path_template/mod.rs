//! # Path Template Module
//!
//! Compiles URL templates such as `/users/:user_id/posts/:id` into a [`PathTemplate`]
//! that can substitute named parameters to produce a concrete path. Reverse routing
//! (`ControllerBinder::route_for_action`) renders through this module, and
//! [`MemoryRouter`](crate::router::MemoryRouter) builds its matchers from the same tokens.
//!
//! ## Syntax
//!
//! | Token      | Meaning                                                   |
//! |------------|-----------------------------------------------------------|
//! | `:name`    | Required parameter, one path segment                      |
//! | `:name?`   | Optional parameter; omitted together with its leading `/` |
//! | `*name`    | Wildcard, may span several segments                       |
//! | `\:`       | Literal `:` (any character may be escaped)                |
//!
//! Parameter names are ASCII alphanumerics and `_`.
//!
//! ## Example
//!
//! ```rust
//! use controller_binder::path_template::PathTemplate;
//!
//! let template = PathTemplate::parse("/items/:id").unwrap();
//! assert_eq!(template.render(&[("id", "7")]).unwrap(), "/items/7");
//! ```

mod core;

pub use core::{compile, PathTemplate, TemplateError, Token};
