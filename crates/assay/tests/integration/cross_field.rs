//! Cross-field comparisons and conditional-presence rules.

use assay::prelude::*;
use pretty_assertions::assert_eq;

fn violations(err: ValidateError) -> Violations {
    match err {
        ValidateError::Invalid(v) => v,
        ValidateError::Config(c) => panic!("expected violations, got config error: {c}"),
    }
}

// ============================================================================
// COMPARISON RULES
// ============================================================================

#[derive(Validatable)]
struct ChangePassword {
    #[validate("required,minlen=8")]
    password: String,
    #[validate("required,eqfield=password")]
    confirm_password: String,
}

#[test]
fn eqfield_matching_sibling_passes() {
    let validator = Validator::new();
    let form = ChangePassword {
        password: "x12345678".into(),
        confirm_password: "x12345678".into(),
    };
    assert!(validator.validate(&form).is_ok());
}

#[test]
fn eqfield_mismatch_is_one_violation_on_the_declaring_field() {
    let validator = Validator::new();
    let form = ChangePassword {
        password: "x12345678".into(),
        confirm_password: "different".into(),
    };

    let out = violations(validator.validate(&form).unwrap_err());
    assert_eq!(out.len(), 1);
    assert_eq!(out.as_slice()[0].path, "confirm_password");
    assert_eq!(out.as_slice()[0].rule, "eqfield");
    assert_eq!(out.as_slice()[0].param.as_deref(), Some("password"));
}

#[derive(Validatable)]
struct Window {
    #[validate("required")]
    min_size: u64,
    #[validate("gtfield=min_size")]
    max_size: u64,
}

#[test]
fn ordering_comparisons() {
    let validator = Validator::new();
    assert!(
        validator
            .validate(&Window {
                min_size: 1,
                max_size: 10
            })
            .is_ok()
    );

    let out = violations(
        validator
            .validate(&Window {
                min_size: 10,
                max_size: 10,
            })
            .unwrap_err(),
    );
    assert_eq!(out.as_slice()[0].rule, "gtfield");
}

#[derive(Validatable)]
struct Mismatched {
    count: u64,
    #[validate("eqfield=count")]
    label: String,
}

#[test]
fn kind_mismatch_is_a_validation_failure_not_a_crash() {
    let validator = Validator::new();
    let out = violations(
        validator
            .validate(&Mismatched {
                count: 3,
                label: "3".into(),
            })
            .unwrap_err(),
    );
    assert_eq!(out.len(), 1);
    assert!(out.as_slice()[0].message.contains("Cannot compare"));
}

#[derive(Validatable)]
struct DanglingReference {
    #[validate("eqfield=no_such_field")]
    value: String,
}

#[test]
fn missing_comparison_sibling_is_a_config_error() {
    let validator = Validator::new();
    let err = validator
        .validate(&DanglingReference { value: "x".into() })
        .unwrap_err();
    assert!(matches!(
        err,
        ValidateError::Config(ConfigError::UnknownSibling { .. })
    ));
}

#[derive(Validatable)]
struct OptionalSibling {
    limit: Option<u64>,
    #[validate("ltfield=limit")]
    used: u64,
}

#[test]
fn sibling_optionals_are_dereferenced_before_comparison() {
    let validator = Validator::new();
    assert!(
        validator
            .validate(&OptionalSibling {
                limit: Some(10),
                used: 5
            })
            .is_ok()
    );

    // An absent optional cannot be ordered against a number: validation
    // failure on the declaring field.
    let out = violations(
        validator
            .validate(&OptionalSibling {
                limit: None,
                used: 5,
            })
            .unwrap_err(),
    );
    assert_eq!(out.as_slice()[0].rule, "ltfield");
}

// ============================================================================
// CONDITIONAL-PRESENCE RULES
// ============================================================================

#[derive(Validatable)]
struct Payment {
    #[validate("required,oneof=card invoice")]
    method: String,
    #[validate("required_if=method:card")]
    card_number: String,
    #[validate("required_unless=method:card")]
    billing_contact: String,
}

#[test]
fn required_if_and_unless() {
    let validator = Validator::new();

    assert!(
        validator
            .validate(&Payment {
                method: "card".into(),
                card_number: "4111111111111111".into(),
                billing_contact: String::new(),
            })
            .is_ok()
    );

    assert!(
        validator
            .validate(&Payment {
                method: "invoice".into(),
                card_number: String::new(),
                billing_contact: "ap@example.com".into(),
            })
            .is_ok()
    );

    let out = violations(
        validator
            .validate(&Payment {
                method: "card".into(),
                card_number: String::new(),
                billing_contact: String::new(),
            })
            .unwrap_err(),
    );
    assert_eq!(out.len(), 1);
    assert_eq!(out.as_slice()[0].path, "card_number");
    assert_eq!(out.as_slice()[0].rule, "required_if");
}

#[derive(Validatable)]
struct Credentials {
    username: String,
    #[validate("required_with=username")]
    password: String,
    #[validate("required_without=api_key")]
    login: String,
    api_key: String,
}

#[test]
fn required_with_and_without() {
    let validator = Validator::new();

    // username present -> password required; api_key present -> login not.
    let out = violations(
        validator
            .validate(&Credentials {
                username: "alice".into(),
                password: String::new(),
                login: String::new(),
                api_key: "k-123".into(),
            })
            .unwrap_err(),
    );
    assert_eq!(out.len(), 1);
    assert_eq!(out.as_slice()[0].path, "password");
    assert_eq!(out.as_slice()[0].rule, "required_with");

    // api_key empty -> login required.
    let out = violations(
        validator
            .validate(&Credentials {
                username: String::new(),
                password: String::new(),
                login: String::new(),
                api_key: String::new(),
            })
            .unwrap_err(),
    );
    assert_eq!(out.len(), 1);
    assert_eq!(out.as_slice()[0].path, "login");
    assert_eq!(out.as_slice()[0].rule, "required_without");
}

#[derive(Validatable)]
struct MissingConditionalSibling {
    #[validate("required_if=ghost:yes")]
    a: String,
    #[validate("required_unless=ghost:yes")]
    b: String,
    #[validate("required_with=ghost")]
    c: String,
    #[validate("required_without=ghost")]
    d: String,
}

#[test]
fn missing_conditional_sibling_means_not_required_for_all_four_rules() {
    // One consistent policy: a sibling that does not exist can never make
    // the field required.
    let validator = Validator::new();
    assert!(
        validator
            .validate(&MissingConditionalSibling {
                a: String::new(),
                b: String::new(),
                c: String::new(),
                d: String::new(),
            })
            .is_ok()
    );
}
