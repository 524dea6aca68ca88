//! Dive traversal over collections and associative structures.

use std::collections::BTreeMap;

use assay::prelude::*;
use pretty_assertions::assert_eq;

fn violations(err: ValidateError) -> Violations {
    match err {
        ValidateError::Invalid(v) => v,
        ValidateError::Config(c) => panic!("expected violations, got config error: {c}"),
    }
}

// ============================================================================
// SEQUENCES
// ============================================================================

#[derive(Validatable)]
struct Tagged {
    #[validate("dive,minlen=2")]
    tags: Vec<String>,
}

#[test]
fn dive_applies_rule_tail_per_element_with_indexed_path() {
    let validator = Validator::new();
    let value = Tagged {
        tags: vec!["a".into(), "bb".into()],
    };

    let out = violations(validator.validate(&value).unwrap_err());
    assert_eq!(out.len(), 1);
    assert_eq!(out.as_slice()[0].path, "tags[0]");
    assert_eq!(out.as_slice()[0].rule, "minlen");
    assert_eq!(out.as_slice()[0].value.as_deref(), Some("a"));
}

#[test]
fn dive_over_empty_collection_is_vacuous() {
    let validator = Validator::new();
    assert!(validator.validate(&Tagged { tags: vec![] }).is_ok());
}

#[derive(Validatable)]
struct Limits {
    #[validate("min=1,dive,range=1:100")]
    counts: Vec<i64>,
}

#[test]
fn rules_before_dive_apply_to_the_collection_itself() {
    let validator = Validator::new();

    // min=1 binds the collection size, range binds each element.
    let out = violations(validator.validate(&Limits { counts: vec![] }).unwrap_err());
    assert_eq!(out.as_slice()[0].rule, "min");
    assert_eq!(out.as_slice()[0].path, "counts");

    let out = violations(
        validator
            .validate(&Limits {
                counts: vec![50, 200],
            })
            .unwrap_err(),
    );
    assert_eq!(out.len(), 1);
    assert_eq!(out.as_slice()[0].path, "counts[1]");
}

#[test]
fn fail_fast_stops_element_iteration() {
    let validator = Validator::with_options(Options::new().fail_fast(true));
    let value = Tagged {
        tags: vec!["a".into(), "b".into(), "c".into()],
    };

    let out = violations(validator.validate(&value).unwrap_err());
    assert_eq!(out.len(), 1);
    assert_eq!(out.as_slice()[0].path, "tags[0]");
}

// ============================================================================
// NESTED COMPOSITE ELEMENTS
// ============================================================================

#[derive(Validatable)]
struct LineItem {
    #[validate("required")]
    sku: String,
    #[validate("range=1:999")]
    quantity: i64,
}

#[derive(Validatable)]
struct Order {
    #[validate("min=1,dive")]
    items: Vec<LineItem>,
}

#[test]
fn dive_without_tail_recurses_into_composite_elements() {
    let validator = Validator::new();
    let order = Order {
        items: vec![
            LineItem {
                sku: "A-1".into(),
                quantity: 2,
            },
            LineItem {
                sku: String::new(),
                quantity: 0,
            },
        ],
    };

    let out = violations(validator.validate(&order).unwrap_err());
    let paths: Vec<_> = out.iter().map(|v| v.path.as_str()).collect();
    assert_eq!(paths, vec!["items[1].sku", "items[1].quantity"]);
}

// ============================================================================
// ASSOCIATIVE STRUCTURES
// ============================================================================

#[derive(Validatable)]
struct Labels {
    #[validate("dive,keys,alphanum,endkeys,minlen=1")]
    labels: BTreeMap<String, String>,
}

#[test]
fn map_dive_partitions_key_and_value_rules() {
    let validator = Validator::new();

    let mut labels = BTreeMap::new();
    labels.insert("env".to_string(), "prod".to_string());
    labels.insert("bad key!".to_string(), String::new());

    let out = violations(validator.validate(&Labels { labels }).unwrap_err());
    // BTreeMap iterates in key order: "bad key!" first.
    assert_eq!(out.len(), 2);
    assert_eq!(out.as_slice()[0].path, "labels[bad key!]");
    assert_eq!(out.as_slice()[0].rule, "alphanum");
    assert_eq!(out.as_slice()[1].path, "labels[bad key!]");
    assert_eq!(out.as_slice()[1].rule, "minlen");
}

#[derive(Validatable)]
struct Matrix {
    #[validate("dive,dive,range=0:9")]
    rows: Vec<Vec<i64>>,
}

#[test]
fn nested_dive_reaches_inner_elements() {
    let validator = Validator::new();
    let matrix = Matrix {
        rows: vec![vec![1, 2], vec![3, 42]],
    };

    let out = violations(validator.validate(&matrix).unwrap_err());
    assert_eq!(out.len(), 1);
    assert_eq!(out.as_slice()[0].path, "rows[1][1]");
}

// ============================================================================
// MISUSE
// ============================================================================

#[derive(Validatable)]
struct DiveOnScalar {
    #[validate("dive,minlen=1")]
    name: String,
}

#[test]
fn dive_on_a_scalar_is_a_config_error() {
    let validator = Validator::new();
    let err = validator
        .validate(&DiveOnScalar { name: "x".into() })
        .unwrap_err();
    assert!(matches!(
        err,
        ValidateError::Config(ConfigError::NotApplicable { .. })
    ));
}
