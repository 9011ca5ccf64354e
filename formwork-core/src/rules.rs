//! Validation rules attached to field descriptors.
//!
//! A rule is a pure function of the field's own value and, for linked rules,
//! the current value of the field it references. It returns an empty string
//! when the value is acceptable and a human-readable message otherwise.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::types::FieldId;

pub const USERNAME_REQUIRED: &str = "Username is required";
pub const EMAIL_REQUIRED: &str = "Email is required";
pub const EMAIL_INVALID: &str = "Email is invalid";
pub const PASSWORD_REQUIRED: &str = "Password is required";
pub const PASSWORDS_MISMATCH: &str = "Passwords does not match";

pub const DEFAULT_PASSWORD_MIN_LEN: usize = 6;

const EMAIL_MAX_LEN: usize = 254;
const EMAIL_LOCAL_MAX_LEN: usize = 64;

// Final domain label is 2-63 letters; other labels follow hostname syntax.
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+)*@(?:[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?\.)+[A-Za-z]{2,63}$",
    )
    .expect("email pattern is a valid regex")
});

/// Validation rule of a single field.
///
/// In YAML definitions the variant is selected by `type`:
///
/// ```yaml
/// rule: { type: required, message: Username is required }
/// rule: { type: email }
/// rule: { type: password, min_len: 8 }
/// rule: { type: matches, field: password }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Rule {
    /// Non-empty value required.
    Required { message: String },
    /// Required, then a single-line address pattern.
    Email,
    /// Required, then a minimum length in characters.
    Password {
        #[serde(default = "default_min_len")]
        min_len: usize,
    },
    /// Must equal the current value of another field. Emptiness is not checked.
    Matches {
        field: FieldId,
        #[serde(default = "default_mismatch")]
        message: String,
    },
}

fn default_min_len() -> usize {
    DEFAULT_PASSWORD_MIN_LEN
}

fn default_mismatch() -> String {
    PASSWORDS_MISMATCH.to_owned()
}

impl Rule {
    pub fn required(message: impl Into<String>) -> Self {
        Rule::Required { message: message.into() }
    }

    pub fn email() -> Self {
        Rule::Email
    }

    pub fn password() -> Self {
        Rule::Password { min_len: DEFAULT_PASSWORD_MIN_LEN }
    }

    pub fn matches(field: impl Into<FieldId>) -> Self {
        Rule::Matches { field: field.into(), message: default_mismatch() }
    }

    /// The field this rule reads from, if any.
    pub fn link(&self) -> Option<&FieldId> {
        match self {
            Rule::Matches { field, .. } => Some(field),
            _ => None,
        }
    }

    /// Validate `value`; `linked` is the current value of [`Rule::link`].
    ///
    /// A linked rule with no linked value compares against the empty string.
    pub fn validate(&self, value: &str, linked: Option<&str>) -> String {
        match self {
            Rule::Required { message } => {
                if value.is_empty() {
                    message.clone()
                } else {
                    String::new()
                }
            }
            Rule::Email => {
                if value.is_empty() {
                    EMAIL_REQUIRED.to_owned()
                } else if !is_valid_email(value) {
                    EMAIL_INVALID.to_owned()
                } else {
                    String::new()
                }
            }
            Rule::Password { min_len } => {
                if value.is_empty() {
                    PASSWORD_REQUIRED.to_owned()
                } else if value.chars().count() < *min_len {
                    format!("Password must be at least {min_len} characters")
                } else {
                    String::new()
                }
            }
            Rule::Matches { message, .. } => {
                if value != linked.unwrap_or_default() {
                    message.clone()
                } else {
                    String::new()
                }
            }
        }
    }
}

/// Single-line address check with RFC 5321 length limits.
pub fn is_valid_email(value: &str) -> bool {
    if value.len() > EMAIL_MAX_LEN {
        return false;
    }
    let Some((local, _)) = value.rsplit_once('@') else {
        return false;
    };
    local.len() <= EMAIL_LOCAL_MAX_LEN && EMAIL_PATTERN.is_match(value)
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
