//! # formwork-renderer
//!
//! Tera-based rendering of a form's ordered field views: label, input
//! control of the field's kind, and the error text when non-empty.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use formwork_core::{Form, Theme};
//! use formwork_renderer::{Renderer, ViewKind};
//!
//! fn show(form: &Form) {
//!     if let Ok(renderer) = Renderer::new() {
//!         if let Ok(text) = renderer.render(form, Theme::Light, ViewKind::Text) {
//!             println!("{text}");
//!         }
//!     }
//! }
//! ```

pub mod context;
pub mod engine;
pub mod error;

pub use context::{FieldView, FormContext};
pub use engine::{Renderer, TemplateEngine, ViewKind};
pub use error::RenderError;
