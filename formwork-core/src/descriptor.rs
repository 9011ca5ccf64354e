//! Field descriptors: static, immutable definition of one form field.
//!
//! A descriptor pairs presentation metadata (label, input kind) with the
//! [`Rule`] that validates the field. Descriptors carry no runtime state.
//!
//! ```
//! use formwork_core::{FieldDescriptor, FieldKind, Rule};
//!
//! let nickname = FieldDescriptor::new("nickname", "Nickname", FieldKind::Text)
//!     .rule(Rule::required("Nickname is required"));
//! assert_eq!(nickname.id.as_str(), "nickname");
//! ```

use serde::{Deserialize, Serialize};

use crate::rules::{self, Rule};
use crate::types::{FieldId, FieldKind};

/// Declarative description of a form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub id: FieldId,
    pub label: String,
    #[serde(default)]
    pub kind: FieldKind,
    /// `None` accepts every value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule: Option<Rule>,
}

impl FieldDescriptor {
    /// Create a descriptor without a rule.
    pub fn new(id: impl Into<FieldId>, label: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            kind,
            rule: None,
        }
    }

    /// Attach the validation rule.
    pub fn rule(mut self, rule: Rule) -> Self {
        self.rule = Some(rule);
        self
    }

    /// The field id this descriptor's rule reads from, if any.
    pub fn link(&self) -> Option<&FieldId> {
        self.rule.as_ref().and_then(Rule::link)
    }

    /// Run the rule; empty string means valid.
    pub fn validate(&self, value: &str, linked: Option<&str>) -> String {
        match &self.rule {
            Some(rule) => rule.validate(value, linked),
            None => String::new(),
        }
    }

    // -----------------------------------------------------------------------
    // Registration fields
    // -----------------------------------------------------------------------

    pub fn username() -> Self {
        Self::new("username", "Username", FieldKind::Text)
            .rule(Rule::required(rules::USERNAME_REQUIRED))
    }

    pub fn email() -> Self {
        Self::new("email", "Email", FieldKind::Email).rule(Rule::email())
    }

    pub fn password() -> Self {
        Self::new("password", "Password", FieldKind::Password).rule(Rule::password())
    }

    /// Linked to the field with id `password`.
    pub fn confirm_password() -> Self {
        Self::new("confirmPassword", "Confirm Password", FieldKind::Password)
            .rule(Rule::matches("password"))
    }
}

/// The four registration fields in display order.
pub fn registration_fields() -> Vec<FieldDescriptor> {
    vec![
        FieldDescriptor::username(),
        FieldDescriptor::email(),
        FieldDescriptor::password(),
        FieldDescriptor::confirm_password(),
    ]
}
