//! Template context: serializable rendering payload built from a [`Form`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use formwork_core::{Field, Form, Theme};

use crate::error::RenderError;

/// Rendering payload: the form title, theme and one view per field in
/// display order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormContext {
    pub title: Option<String>,
    pub theme: String,
    pub fields: Vec<FieldView>,
    /// Number of fields currently showing an error.
    pub error_count: usize,
    pub meta: MetaCtx,
}

/// What a single field shows: label, input control kind and error text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldView {
    pub id: String,
    pub label: String,
    /// `text`, `email` or `password`.
    pub input_type: String,
    /// Current value, blank for secret kinds.
    pub display_value: String,
    /// Empty when the field is valid.
    pub error: String,
}

/// Provenance stamped into the HTML view as a trailing comment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetaCtx {
    pub formwork_version: String,
    pub rendered_at: DateTime<Utc>,
}

impl FormContext {
    /// Build a [`FormContext`] from the form's current state.
    pub fn from_form(form: &Form, theme: Theme) -> Self {
        let fields: Vec<FieldView> = form
            .fields()
            .map(|c| {
                let descriptor = c.descriptor();
                FieldView {
                    id: descriptor.id.to_string(),
                    label: descriptor.label.clone(),
                    input_type: descriptor.kind.to_string(),
                    display_value: if descriptor.kind.is_secret() {
                        String::new()
                    } else {
                        c.value().to_owned()
                    },
                    error: c.error().to_owned(),
                }
            })
            .collect();
        let error_count = fields.iter().filter(|f| !f.error.is_empty()).count();

        FormContext {
            title: form.title().map(str::to_owned),
            theme: theme.to_string(),
            fields,
            error_count,
            meta: MetaCtx {
                formwork_version: env!("CARGO_PKG_VERSION").to_string(),
                rendered_at: Utc::now(),
            },
        }
    }

    /// Convert to a [`tera::Context`] for rendering.
    pub fn to_tera_context(&self) -> Result<tera::Context, RenderError> {
        tera::Context::from_serialize(self).map_err(RenderError::from)
    }
}
