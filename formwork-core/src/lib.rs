//! Formwork core library: form fields, validation, to-do list, theme.
//!
//! Public API surface:
//! - [`descriptor`]: static field definitions
//! - [`rules`]: validation rules and their messages
//! - [`controller`]: per-field runtime state
//! - [`form`]: the form coordinator and submission
//! - [`definition`]: YAML form definitions
//! - [`todo`] / [`theme`] / [`store`]: the sibling widgets and their storage seam

pub mod controller;
pub mod definition;
pub mod descriptor;
pub mod error;
pub mod form;
pub mod rules;
pub mod store;
pub mod theme;
pub mod todo;
pub mod types;

pub use controller::{Field, FieldController, FieldState, NoSiblings, ValueLookup};
pub use definition::{load_definition, FormDefinition};
pub use descriptor::{registration_fields, FieldDescriptor};
pub use error::{FormError, ValidationFailure};
pub use form::{Form, Submission};
pub use rules::Rule;
pub use store::{KeyValueStore, MemoryStore};
pub use theme::{ThemeProvider, THEME_KEY};
pub use todo::{TodoItem, TodoList, TODOS_KEY};
pub use types::{FieldId, FieldKind, Theme, TodoId};
