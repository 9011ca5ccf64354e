//! Field controllers: runtime owners of one field's value and error.
//!
//! A controller validates eagerly on every [`Field::set_value`] and again on
//! every [`Field::check_valid`], so the stored error always reflects the most
//! recent run against the most recent value. Linked rules read the referenced
//! field through a [`ValueLookup`], which only exposes current values.

use tracing::debug;

use crate::descriptor::FieldDescriptor;
use crate::types::FieldId;

/// Read-only access to sibling field values, by id.
pub trait ValueLookup {
    fn value_of(&self, id: &FieldId) -> Option<&str>;
}

/// Lookup for a controller that lives outside a form.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSiblings;

impl ValueLookup for NoSiblings {
    fn value_of(&self, _id: &FieldId) -> Option<&str> {
        None
    }
}

/// Capability interface the form coordinator drives each field through.
pub trait Field {
    fn id(&self) -> &FieldId;

    /// Current value, no side effects.
    fn value(&self) -> &str;

    /// Error from the most recent validation run; empty when valid.
    fn error(&self) -> &str;

    /// Store `raw` and re-validate immediately.
    fn set_value(&mut self, raw: String, siblings: &dyn ValueLookup);

    /// Re-validate the current value, store the error, report validity.
    fn check_valid(&mut self, siblings: &dyn ValueLookup) -> bool;
}

/// Per-field mutable state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldState {
    pub value: String,
    pub error: String,
}

impl FieldState {
    /// True until the first edit or validation run.
    pub fn is_pristine(&self) -> bool {
        self.value.is_empty() && self.error.is_empty()
    }
}

/// Owns one field's [`FieldState`].
#[derive(Debug, Clone)]
pub struct FieldController {
    descriptor: FieldDescriptor,
    state: FieldState,
}

impl FieldController {
    pub fn new(descriptor: FieldDescriptor) -> Self {
        Self {
            descriptor,
            state: FieldState::default(),
        }
    }

    pub fn descriptor(&self) -> &FieldDescriptor {
        &self.descriptor
    }

    pub fn state(&self) -> &FieldState {
        &self.state
    }

    /// Validate the current value without storing the result.
    pub fn evaluate(&self, siblings: &dyn ValueLookup) -> String {
        let linked = self
            .descriptor
            .link()
            .and_then(|target| siblings.value_of(target));
        self.descriptor.validate(&self.state.value, linked)
    }

    /// Back to `{value: "", error: ""}`.
    pub fn reset(&mut self) {
        self.state = FieldState::default();
    }

    fn refresh(&mut self, siblings: &dyn ValueLookup) {
        self.state.error = self.evaluate(siblings);
        debug!(field = %self.descriptor.id, error = %self.state.error, "validated field");
    }
}

impl Field for FieldController {
    fn id(&self) -> &FieldId {
        &self.descriptor.id
    }

    fn value(&self) -> &str {
        &self.state.value
    }

    fn error(&self) -> &str {
        &self.state.error
    }

    fn set_value(&mut self, raw: String, siblings: &dyn ValueLookup) {
        self.state.value = raw;
        self.refresh(siblings);
    }

    fn check_valid(&mut self, siblings: &dyn ValueLookup) -> bool {
        self.refresh(siblings);
        self.state.error.is_empty()
    }
}
