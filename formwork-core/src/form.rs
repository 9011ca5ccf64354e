//! Form coordinator: an ordered set of field controllers plus submission.
//!
//! # Linking
//!
//! A descriptor whose rule reads another field (see [`Rule::Matches`]) is
//! resolved by id against the fields declared *before* it. A missing target
//! fails [`Form::new`] with [`FormError::UnresolvedLink`]; it never surfaces
//! later as a missing value during validation.
//!
//! # Borrowing
//!
//! While one controller is mutated, its siblings are visible through a
//! shared [`Siblings`] view built with `split_at_mut`, so a linked rule can
//! read the referenced value but cannot modify it.
//!
//! [`Rule::Matches`]: crate::rules::Rule::Matches

use std::collections::HashMap;

use serde::Serialize;
use tracing::{debug, info};

use crate::controller::{Field, FieldController, ValueLookup};
use crate::descriptor::{registration_fields, FieldDescriptor};
use crate::error::{FormError, ValidationFailure};
use crate::types::FieldId;

// ---------------------------------------------------------------------------
// Sibling lookup
// ---------------------------------------------------------------------------

/// Shared view of every controller except the one being mutated.
pub struct Siblings<'a> {
    before: &'a [FieldController],
    after: &'a [FieldController],
}

impl ValueLookup for Siblings<'_> {
    fn value_of(&self, id: &FieldId) -> Option<&str> {
        self.before
            .iter()
            .chain(self.after.iter())
            .find(|c| c.id() == id)
            .map(|c| c.value())
    }
}

// ---------------------------------------------------------------------------
// Submission
// ---------------------------------------------------------------------------

/// Accepted submission: every field value in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Submission {
    pub values: Vec<(FieldId, String)>,
}

impl Submission {
    pub fn get(&self, id: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(field, _)| field.as_str() == id)
            .map(|(_, value)| value.as_str())
    }
}

// ---------------------------------------------------------------------------
// Form
// ---------------------------------------------------------------------------

/// Coordinates a fixed, ordered collection of [`FieldController`]s.
#[derive(Debug, Clone)]
pub struct Form {
    title: Option<String>,
    controllers: Vec<FieldController>,
    positions: HashMap<FieldId, usize>,
}

impl Form {
    /// Build a form from descriptors in display order.
    ///
    /// Fails on duplicate ids and on links to fields not declared earlier.
    pub fn new(descriptors: Vec<FieldDescriptor>) -> Result<Self, FormError> {
        let mut declared: Vec<&FieldId> = Vec::with_capacity(descriptors.len());
        for descriptor in &descriptors {
            if declared.contains(&&descriptor.id) {
                return Err(FormError::DuplicateField(descriptor.id.clone()));
            }
            if let Some(target) = descriptor.link() {
                if !declared.contains(&target) {
                    return Err(FormError::UnresolvedLink {
                        field: descriptor.id.clone(),
                        target: target.clone(),
                    });
                }
            }
            declared.push(&descriptor.id);
        }
        Ok(Self::assemble(descriptors))
    }

    /// Username, email, password and confirm-password.
    pub fn registration() -> Self {
        Self::assemble(registration_fields()).with_title("Register")
    }

    /// Controllers in declaration order. Callers guarantee unique ids and
    /// backward-only links.
    fn assemble(descriptors: Vec<FieldDescriptor>) -> Self {
        let positions = descriptors
            .iter()
            .enumerate()
            .map(|(index, d)| (d.id.clone(), index))
            .collect();
        let controllers = descriptors.into_iter().map(FieldController::new).collect();
        Self {
            title: None,
            controllers,
            positions,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Controllers in display order.
    pub fn fields(&self) -> impl Iterator<Item = &FieldController> {
        self.controllers.iter()
    }

    pub fn len(&self) -> usize {
        self.controllers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controllers.is_empty()
    }

    pub fn field(&self, id: &str) -> Option<&FieldController> {
        self.positions.get(id).map(|&pos| &self.controllers[pos])
    }

    pub fn value(&self, id: &str) -> Option<&str> {
        self.field(id).map(|c| c.value())
    }

    pub fn error(&self, id: &str) -> Option<&str> {
        self.field(id).map(|c| c.error())
    }

    /// Route an edit to the field `id`; it re-validates immediately.
    pub fn set_value(&mut self, id: &str, raw: impl Into<String>) -> Result<(), FormError> {
        let pos = self.position(id)?;
        let raw = raw.into();
        self.with_field(pos, |field, siblings| field.set_value(raw, siblings));
        Ok(())
    }

    /// Re-validate the field `id` against current values.
    pub fn check_valid(&mut self, id: &str) -> Result<bool, FormError> {
        let pos = self.position(id)?;
        Ok(self.with_field(pos, |field, siblings| field.check_valid(siblings)))
    }

    /// Aggregate validity against current values. Stored errors are untouched.
    pub fn is_valid(&self) -> bool {
        // Links never point at their own field, so the full slice is a valid view.
        let all = Siblings {
            before: &self.controllers,
            after: &[],
        };
        self.controllers.iter().all(|c| c.evaluate(&all).is_empty())
    }

    /// Re-validate every field in order, without short-circuiting.
    ///
    /// On failure the refreshed per-field errors are the only report.
    pub fn submit(&mut self) -> Result<Submission, ValidationFailure> {
        let mut all_valid = true;
        for pos in 0..self.controllers.len() {
            all_valid &= self.with_field(pos, |field, siblings| field.check_valid(siblings));
        }

        if !all_valid {
            debug!(
                invalid = self.controllers.iter().filter(|c| !c.error().is_empty()).count(),
                "submission rejected"
            );
            return Err(ValidationFailure);
        }

        let values = self
            .controllers
            .iter()
            .map(|c| (c.id().clone(), c.value().to_owned()))
            .collect();
        info!(fields = self.controllers.len(), "submission accepted");
        Ok(Submission { values })
    }

    /// Return every field to its pristine state.
    pub fn reset(&mut self) {
        for controller in &mut self.controllers {
            controller.reset();
        }
    }

    fn position(&self, id: &str) -> Result<usize, FormError> {
        self.positions
            .get(id)
            .copied()
            .ok_or_else(|| FormError::UnknownField(FieldId::from(id)))
    }

    fn with_field<R>(
        &mut self,
        pos: usize,
        f: impl FnOnce(&mut FieldController, &Siblings<'_>) -> R,
    ) -> R {
        let (before, rest) = self.controllers.split_at_mut(pos);
        let (current, after) = rest
            .split_first_mut()
            .unwrap_or_else(|| unreachable!("position {pos} comes from the id index"));
        let siblings = Siblings {
            before: &*before,
            after: &*after,
        };
        f(current, &siblings)
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{self, Rule};
    use crate::types::FieldKind;

    #[test]
    fn registration_has_four_fields_in_order() {
        let form = Form::registration();
        let ids: Vec<_> = form.fields().map(|c| c.id().as_str()).collect();
        assert_eq!(ids, ["username", "email", "password", "confirmPassword"]);
        assert_eq!(form.title(), Some("Register"));
    }

    #[test]
    fn registration_fields_pass_construction_checks() {
        let checked = Form::new(registration_fields()).expect("built-in fields are consistent");
        let built_in = Form::registration();
        let ids = |form: &Form| form.fields().map(|c| c.id().clone()).collect::<Vec<_>>();
        assert_eq!(ids(&checked), ids(&built_in));
        let link = built_in
            .field("confirmPassword")
            .and_then(|c| c.descriptor().link())
            .map(FieldId::as_str);
        assert_eq!(link, Some("password"));
    }

    #[test]
    fn unknown_field_is_a_configuration_error() {
        let mut form = Form::registration();
        let err = form.set_value("nope", "x").unwrap_err();
        assert!(matches!(err, FormError::UnknownField(ref id) if id.as_str() == "nope"));
        assert!(form.check_valid("nope").is_err());
    }

    #[test]
    fn self_link_is_rejected() {
        let err = Form::new(vec![FieldDescriptor::new("a", "A", FieldKind::Text)
            .rule(Rule::matches("a"))])
        .unwrap_err();
        assert!(matches!(err, FormError::UnresolvedLink { .. }));
    }

    #[test]
    fn is_valid_does_not_touch_errors() {
        let form = Form::registration();
        assert!(!form.is_valid());
        assert!(form.fields().all(|c| c.error().is_empty()));
    }

    #[test]
    fn reset_returns_to_pristine() {
        let mut form = Form::registration();
        form.set_value("username", "ada").unwrap();
        form.submit().unwrap_err();
        form.reset();
        assert!(form.fields().all(|c| c.state().is_pristine()));
    }

    #[test]
    fn setting_password_leaves_confirm_error_alone() {
        let mut form = Form::registration();
        form.set_value("password", "abcdef").unwrap();
        form.set_value("confirmPassword", "abcdef").unwrap();
        form.set_value("password", "changed").unwrap();
        assert_eq!(form.error("confirmPassword"), Some(""));
        assert!(!form.check_valid("confirmPassword").unwrap());
        assert_eq!(form.error("confirmPassword"), Some(rules::PASSWORDS_MISMATCH));
    }
}
