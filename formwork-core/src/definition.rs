//! YAML form definitions.
//!
//! ```yaml
//! title: Register
//! fields:
//!   - id: username
//!     label: Username
//!     kind: text
//!     rule: { type: required, message: Username is required }
//!   - id: password
//!     label: Password
//!     kind: password
//!     rule: { type: password, min_len: 8 }
//!   - id: confirm
//!     label: Confirm Password
//!     kind: password
//!     rule: { type: matches, field: password }
//! ```
//!
//! Loading only parses; link and uniqueness checks happen in
//! [`FormDefinition::build`], the same as for hand-built descriptor lists.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::descriptor::FieldDescriptor;
use crate::error::FormError;
use crate::form::Form;

/// Serializable form declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormDefinition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub fields: Vec<FieldDescriptor>,
}

impl FormDefinition {
    pub fn from_yaml_str(yaml: &str) -> Result<Self, FormError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn to_yaml_string(&self) -> Result<String, FormError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Build the form, running the construction-time checks.
    pub fn build(self) -> Result<Form, FormError> {
        let form = Form::new(self.fields)?;
        Ok(match self.title {
            Some(title) => form.with_title(title),
            None => form,
        })
    }
}

/// Load a definition from `path`.
///
/// Returns `FormError::DefinitionNotFound` if absent,
/// `FormError::Parse` (with path + line context) if malformed YAML.
pub fn load_definition(path: &Path) -> Result<FormDefinition, FormError> {
    if !path.exists() {
        return Err(FormError::DefinitionNotFound {
            path: path.to_path_buf(),
        });
    }
    let contents = std::fs::read_to_string(path)?;
    serde_yaml::from_str(&contents).map_err(|e| FormError::Parse {
        path: path.to_path_buf(),
        source: e,
    })
}
