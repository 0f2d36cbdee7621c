//! Page template management.
//!
//! Templates live in `templates/pages/` and use Jinja2 syntax. They are loaded
//! once on first render and auto-escape HTML.
//!
//! # Usage
//!
//! ```ignore
//! use minijinja::context;
//! use crate::shared::templates::render_template;
//!
//! let html = render_template("home.jinja", context! { records => records })?;
//! ```

pub mod engine;

pub use engine::{render_template, TemplateError};
