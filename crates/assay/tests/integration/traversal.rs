//! Field traversal: ordering, omitempty, nesting, fail-fast, policy knobs.

use assay::prelude::*;
use pretty_assertions::assert_eq;

#[derive(Validatable)]
struct Address {
    #[validate("required")]
    street: String,
    #[validate("required,minlen=2")]
    city: String,
}

#[derive(Validatable)]
struct Account {
    #[validate("required,minlen=3,maxlen=20,alphanum")]
    username: String,
    #[validate("required,range=18:99")]
    age: i64,
    // Untagged nested composite: recursed into unconditionally.
    address: Address,
    shipping: Option<Address>,
}

fn valid_account() -> Account {
    Account {
        username: "alice42".into(),
        age: 30,
        address: Address {
            street: "1 Main St".into(),
            city: "Springfield".into(),
        },
        shipping: None,
    }
}

fn violations(err: ValidateError) -> Violations {
    match err {
        ValidateError::Invalid(v) => v,
        ValidateError::Config(c) => panic!("expected violations, got config error: {c}"),
    }
}

#[test]
fn fully_satisfying_value_passes() {
    let validator = Validator::new();
    assert!(validator.validate(&valid_account()).is_ok());
}

#[test]
fn collect_all_preserves_declaration_order() {
    let validator = Validator::new();
    let account = Account {
        username: "x".into(), // minlen violation
        age: 12,              // range violation
        ..valid_account()
    };

    let out = violations(validator.validate(&account).unwrap_err());
    assert_eq!(out.len(), 2);
    assert_eq!(out.as_slice()[0].path, "username");
    assert_eq!(out.as_slice()[0].rule, "minlen");
    assert_eq!(out.as_slice()[1].path, "age");
    assert_eq!(out.as_slice()[1].rule, "range");
}

#[test]
fn fail_fast_stops_at_first_violation() {
    let validator = Validator::with_options(Options::new().fail_fast(true));
    let account = Account {
        username: String::new(), // would violate required and minlen
        age: 12,                 // would violate range
        address: Address {
            street: String::new(), // would violate required
            city: "S".into(),      // would violate minlen
        },
        ..valid_account()
    };

    let out = violations(validator.validate(&account).unwrap_err());
    assert_eq!(out.len(), 1);
    assert_eq!(out.as_slice()[0].path, "username");
    assert_eq!(out.as_slice()[0].rule, "required");
}

#[test]
fn untagged_nested_struct_is_recursed_with_namespace() {
    let validator = Validator::new();
    let account = Account {
        address: Address {
            street: String::new(),
            city: "S".into(),
        },
        ..valid_account()
    };

    let out = violations(validator.validate(&account).unwrap_err());
    let paths: Vec<_> = out.iter().map(|v| v.path.as_str()).collect();
    assert_eq!(paths, vec!["address.street", "address.city"]);
    // The field name stays local; the path carries the namespace.
    assert_eq!(out.as_slice()[0].field, "street");
}

#[test]
fn absent_optional_composite_is_skipped() {
    let validator = Validator::new();
    let account = valid_account();
    assert!(account.shipping.is_none());
    assert!(validator.validate(&account).is_ok());
}

#[test]
fn present_optional_composite_is_validated() {
    let validator = Validator::new();
    let account = Account {
        shipping: Some(Address {
            street: String::new(),
            city: "Oslo".into(),
        }),
        ..valid_account()
    };

    let out = violations(validator.validate(&account).unwrap_err());
    assert_eq!(out.as_slice()[0].path, "shipping.street");
}

#[test]
fn idempotent_across_runs() {
    let validator = Validator::new();
    let account = Account {
        username: "x".into(),
        age: 12,
        ..valid_account()
    };

    let first = violations(validator.validate(&account).unwrap_err());
    let second = violations(validator.validate(&account).unwrap_err());
    assert_eq!(first, second);
}

// ============================================================================
// OMITEMPTY
// ============================================================================

#[derive(Validatable)]
struct Subscription {
    #[validate("required,oneof=free pro")]
    plan: String,
    #[validate("omitempty,minlen=10,required_if=plan:pro")]
    billing_ref: String,
}

#[test]
fn omitempty_skips_rules_on_empty_value() {
    let validator = Validator::new();
    let sub = Subscription {
        plan: "free".into(),
        billing_ref: String::new(),
    };
    assert!(validator.validate(&sub).is_ok());
}

#[test]
fn omitempty_still_validates_non_empty_value() {
    let validator = Validator::new();
    let sub = Subscription {
        plan: "free".into(),
        billing_ref: "short".into(),
    };

    let out = violations(validator.validate(&sub).unwrap_err());
    assert_eq!(out.len(), 1);
    assert_eq!(out.as_slice()[0].rule, "minlen");
}

#[test]
fn required_if_fires_even_when_field_is_empty() {
    let validator = Validator::new();
    let sub = Subscription {
        plan: "pro".into(),
        billing_ref: String::new(),
    };

    let out = violations(validator.validate(&sub).unwrap_err());
    assert_eq!(out.len(), 1);
    assert_eq!(out.as_slice()[0].path, "billing_ref");
    assert_eq!(out.as_slice()[0].rule, "required_if");
}

// ============================================================================
// OPTIONS
// ============================================================================

#[test]
fn ignored_fields_are_skipped_entirely() {
    let validator = Validator::with_options(Options::new().ignore_field("username"));
    let account = Account {
        username: String::new(),
        ..valid_account()
    };
    assert!(validator.validate(&account).is_ok());
}

#[test]
fn depth_limit_is_a_config_error() {
    let validator = Validator::with_options(Options::new().max_depth(0));
    let account = valid_account();
    let err = validator.validate(&account).unwrap_err();
    assert!(matches!(
        err,
        ValidateError::Config(ConfigError::DepthExceeded(0))
    ));
}

#[derive(Validatable)]
struct BadDecl {
    #[validate("dive=3")]
    value: String,
}

#[test]
fn malformed_declaration_is_a_config_error() {
    let validator = Validator::new();
    let err = validator
        .validate(&BadDecl {
            value: "x".into(),
        })
        .unwrap_err();
    assert!(matches!(
        err,
        ValidateError::Config(ConfigError::Declaration { .. })
    ));
}

#[derive(Validatable)]
struct BadParam {
    #[validate("min=abc")]
    value: i64,
}

#[test]
fn malformed_rule_parameter_is_attributed_to_the_field() {
    let validator = Validator::new();
    let err = validator.validate(&BadParam { value: 5 }).unwrap_err();
    let ValidateError::Config(config) = err else {
        panic!("expected a configuration error");
    };
    assert!(matches!(config, ConfigError::Field { ref field, .. } if field == "value"));
    assert!(config.to_string().contains("invalid parameter `abc`"));
}

// ============================================================================
// RENAME
// ============================================================================

#[derive(Validatable)]
struct Renamed {
    #[validate(rename = "userName", rule = "required")]
    user_name: String,
}

#[test]
fn renamed_field_reports_display_name() {
    let validator = Validator::new();
    let out = violations(
        validator
            .validate(&Renamed {
                user_name: String::new(),
            })
            .unwrap_err(),
    );
    assert_eq!(out.as_slice()[0].path, "userName");
    assert_eq!(out.as_slice()[0].field, "userName");
}

// ============================================================================
// REPORT PROJECTIONS
// ============================================================================

#[test]
fn report_projections_and_json() {
    let validator = Validator::new();
    let account = Account {
        username: "x".into(),
        age: 12,
        ..valid_account()
    };

    let out = violations(validator.validate(&account).unwrap_err());
    assert_eq!(out.filter_by_rule("range").len(), 1);
    assert_eq!(out.filter_by_field("username").len(), 1);
    assert_eq!(out.fields(), vec!["username", "age"]);
    assert!(out.as_map().contains_key("age"));

    let json: serde_json::Value = serde_json::from_str(&out.to_json().unwrap()).unwrap();
    assert_eq!(json.as_array().unwrap().len(), 2);
    assert_eq!(json[1]["path"], "age");
    assert_eq!(json[1]["value"], "12");
}
