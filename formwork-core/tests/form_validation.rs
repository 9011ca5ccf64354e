//! Field rule and form-submission behaviour for `formwork-core`.
//!
//! Each `#[case]` builds its own form, so no state is shared.

use formwork_core::{
    rules::{self, Rule},
    FieldDescriptor, FieldKind, Form, FormError, NoSiblings, ValidationFailure,
};
use formwork_core::{Field, FieldController};
use rstest::rstest;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn filled_registration() -> Form {
    let mut form = Form::registration();
    form.set_value("username", "ada").unwrap();
    form.set_value("email", "ada@example.com").unwrap();
    form.set_value("password", "abcdef").unwrap();
    form.set_value("confirmPassword", "abcdef").unwrap();
    form
}

fn errors(form: &Form) -> Vec<(String, String)> {
    form.fields()
        .map(|c| (c.id().to_string(), c.error().to_string()))
        .collect()
}

// ---------------------------------------------------------------------------
// 1. Per-field rules
// ---------------------------------------------------------------------------

#[rstest]
#[case(FieldDescriptor::username(), rules::USERNAME_REQUIRED)]
#[case(FieldDescriptor::email(), rules::EMAIL_REQUIRED)]
#[case(FieldDescriptor::password(), rules::PASSWORD_REQUIRED)]
fn empty_value_yields_required_message(#[case] descriptor: FieldDescriptor, #[case] expected: &str) {
    assert_eq!(descriptor.validate("", None), expected);
}

#[rstest]
#[case("a@b.co", "")]
#[case("a@b", rules::EMAIL_INVALID)]
#[case("", rules::EMAIL_REQUIRED)]
#[case("no-at-sign.example.com", rules::EMAIL_INVALID)]
#[case("user@sub.example.museum", "")]
fn email_rule(#[case] value: &str, #[case] expected: &str) {
    assert_eq!(Rule::email().validate(value, None), expected);
}

#[rstest]
#[case("abc", "Password must be at least 6 characters")]
#[case("abcde", "Password must be at least 6 characters")]
#[case("abcdef", "")]
#[case("", rules::PASSWORD_REQUIRED)]
fn password_rule(#[case] value: &str, #[case] expected: &str) {
    assert_eq!(Rule::password().validate(value, None), expected);
}

#[rstest]
#[case("abcdef", "abcdef", "")]
#[case("abcdef", "abcxyz", rules::PASSWORDS_MISMATCH)]
#[case("abcdef", "", rules::PASSWORDS_MISMATCH)]
fn confirm_rule(#[case] password: &str, #[case] confirm: &str, #[case] expected: &str) {
    assert_eq!(Rule::matches("password").validate(confirm, Some(password)), expected);
}

// ---------------------------------------------------------------------------
// 2. Linked field
// ---------------------------------------------------------------------------

#[test]
fn password_change_is_seen_by_explicit_confirm_check() {
    let mut form = filled_registration();
    assert_eq!(form.error("confirmPassword"), Some(""));

    // Confirm is not re-touched; its stored error is stale until re-checked.
    form.set_value("password", "different").unwrap();
    assert!(!form.check_valid("confirmPassword").unwrap());
    assert_eq!(form.error("confirmPassword"), Some(rules::PASSWORDS_MISMATCH));
}

#[test]
fn password_change_is_seen_by_submit() {
    let mut form = filled_registration();
    form.set_value("password", "different").unwrap();
    assert_eq!(form.submit(), Err(ValidationFailure));
    assert_eq!(form.error("confirmPassword"), Some(rules::PASSWORDS_MISMATCH));
    assert_eq!(form.error("password"), Some(""));
}

#[test]
fn confirm_never_mutates_password() {
    let mut form = filled_registration();
    form.set_value("confirmPassword", "zzz").unwrap();
    form.check_valid("confirmPassword").unwrap();
    assert_eq!(form.value("password"), Some("abcdef"));
    assert_eq!(form.error("password"), Some(""));
}

/// Documented, possibly-unintended: confirm does not check its own emptiness,
/// so an empty confirm matching an empty password is reported valid.
#[test]
fn empty_confirm_matching_empty_password_is_valid() {
    let mut form = Form::registration();
    assert!(form.check_valid("confirmPassword").unwrap());
    assert_eq!(form.error("confirmPassword"), Some(""));

    form.submit().unwrap_err();
    assert_eq!(form.error("password"), Some(rules::PASSWORD_REQUIRED));
    assert_eq!(form.error("confirmPassword"), Some(""));
}

// ---------------------------------------------------------------------------
// 3. Idempotence and eagerness
// ---------------------------------------------------------------------------

#[test]
fn check_valid_twice_yields_same_error() {
    let mut form = Form::registration();
    form.set_value("email", "a@b").unwrap();
    let first = form.check_valid("email").unwrap();
    let first_err = form.error("email").unwrap().to_string();
    let second = form.check_valid("email").unwrap();
    assert_eq!(first, second);
    assert_eq!(form.error("email"), Some(first_err.as_str()));
}

#[test]
fn set_value_updates_error_without_submit() {
    let mut c = FieldController::new(FieldDescriptor::password());
    c.set_value("abc".to_string(), &NoSiblings);
    assert_eq!(c.error(), "Password must be at least 6 characters");
    c.set_value(String::new(), &NoSiblings);
    assert_eq!(c.error(), rules::PASSWORD_REQUIRED);
}

// ---------------------------------------------------------------------------
// 4. Submission
// ---------------------------------------------------------------------------

#[rstest]
#[case("username", rules::USERNAME_REQUIRED)]
#[case("email", rules::EMAIL_REQUIRED)]
fn one_empty_required_field_fails_only_that_field(#[case] field: &str, #[case] expected: &str) {
    let mut fresh = Form::registration();
    for (id, value) in [
        ("username", "ada"),
        ("email", "ada@example.com"),
        ("password", "abcdef"),
        ("confirmPassword", "abcdef"),
    ] {
        if id != field {
            fresh.set_value(id, value).unwrap();
        }
    }
    assert_eq!(fresh.error(field), Some(""), "untouched field is still pristine");

    assert!(!fresh.is_valid());
    assert_eq!(fresh.submit(), Err(ValidationFailure));
    for (id, error) in errors(&fresh) {
        if id == field {
            assert_eq!(error, expected);
        } else {
            assert!(error.is_empty(), "{id} should be valid, got: {error}");
        }
    }
}

#[test]
fn submit_refreshes_every_field_without_short_circuit() {
    let mut form = Form::registration();
    form.set_value("confirmPassword", "x").unwrap();
    form.submit().unwrap_err();
    let errs = errors(&form);
    assert_eq!(errs[0].1, rules::USERNAME_REQUIRED);
    assert_eq!(errs[1].1, rules::EMAIL_REQUIRED);
    assert_eq!(errs[2].1, rules::PASSWORD_REQUIRED);
    assert_eq!(errs[3].1, rules::PASSWORDS_MISMATCH);
}

#[test]
fn accepted_submission_carries_values_in_order() {
    let mut form = filled_registration();
    assert!(form.is_valid());
    let submission = form.submit().expect("valid form");
    let ids: Vec<_> = submission.values.iter().map(|(id, _)| id.as_str()).collect();
    assert_eq!(ids, ["username", "email", "password", "confirmPassword"]);
    assert_eq!(submission.get("email"), Some("ada@example.com"));
    assert_eq!(submission.get("missing"), None);
}

// ---------------------------------------------------------------------------
// 5. Construction-time configuration errors
// ---------------------------------------------------------------------------

#[test]
fn confirm_linked_to_missing_field_fails_at_construction() {
    let err = Form::new(vec![
        FieldDescriptor::username(),
        FieldDescriptor::confirm_password(),
    ])
    .unwrap_err();
    match err {
        FormError::UnresolvedLink { field, target } => {
            assert_eq!(field.as_str(), "confirmPassword");
            assert_eq!(target.as_str(), "password");
        }
        other => panic!("expected UnresolvedLink, got: {other}"),
    }
}

#[test]
fn link_to_later_declared_field_is_rejected() {
    let err = Form::new(vec![
        FieldDescriptor::confirm_password(),
        FieldDescriptor::password(),
    ])
    .unwrap_err();
    assert!(matches!(err, FormError::UnresolvedLink { .. }), "got: {err}");
}

#[test]
fn link_resolves_by_id_not_position() {
    let mut form = Form::new(vec![
        FieldDescriptor::new("secret", "Secret", FieldKind::Password).rule(Rule::password()),
        FieldDescriptor::username(),
        FieldDescriptor::new("again", "Again", FieldKind::Password).rule(Rule::matches("secret")),
    ])
    .expect("build");
    form.set_value("secret", "abcdef").unwrap();
    form.set_value("username", "abcdef-not-this").unwrap();
    form.set_value("again", "abcdef").unwrap();
    assert_eq!(form.error("again"), Some(""));
}

#[test]
fn duplicate_ids_are_rejected() {
    let err = Form::new(vec![FieldDescriptor::email(), FieldDescriptor::email()]).unwrap_err();
    assert!(matches!(err, FormError::DuplicateField(ref id) if id.as_str() == "email"));
    assert!(err.to_string().contains("duplicate field id"));
}
