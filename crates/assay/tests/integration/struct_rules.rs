//! Whole-object rules and custom per-field rules.

use assay::prelude::*;
use pretty_assertions::assert_eq;

fn violations(err: ValidateError) -> Violations {
    match err {
        ValidateError::Invalid(v) => v,
        ValidateError::Config(c) => panic!("expected violations, got config error: {c}"),
    }
}

#[derive(Validatable)]
struct Invoice {
    #[validate("min=0")]
    subtotal: i64,
    #[validate("min=0")]
    tax: i64,
    #[validate("min=0")]
    total: i64,
}

#[derive(Validatable)]
struct Batch {
    invoice: Invoice,
}

fn register_total_check(validator: &mut Validator) {
    validator.register_struct_rule::<Invoice, _>(|invoice, report| {
        if invoice.total != invoice.subtotal + invoice.tax {
            report.error("total", "sum", "total must equal subtotal plus tax");
        }
    });
}

#[test]
fn struct_rule_runs_after_fields_and_merges_into_the_collection() {
    let mut validator = Validator::new();
    register_total_check(&mut validator);

    let invoice = Invoice {
        subtotal: 100,
        tax: -1, // field violation first
        total: 50,
    };

    let out = violations(validator.validate(&invoice).unwrap_err());
    assert_eq!(out.len(), 2);
    assert_eq!(out.as_slice()[0].path, "tax");
    assert_eq!(out.as_slice()[1].path, "total");
    assert_eq!(out.as_slice()[1].rule, "sum");
}

#[test]
fn struct_rule_is_namespaced_for_nested_composites() {
    let mut validator = Validator::new();
    register_total_check(&mut validator);

    let batch = Batch {
        invoice: Invoice {
            subtotal: 100,
            tax: 10,
            total: 50,
        },
    };

    let out = violations(validator.validate(&batch).unwrap_err());
    assert_eq!(out.len(), 1);
    assert_eq!(out.as_slice()[0].path, "invoice.total");
}

#[test]
fn struct_rule_passes_when_consistent() {
    let mut validator = Validator::new();
    register_total_check(&mut validator);

    let invoice = Invoice {
        subtotal: 100,
        tax: 10,
        total: 110,
    };
    assert!(validator.validate(&invoice).is_ok());
}

// ============================================================================
// CUSTOM PER-FIELD RULES
// ============================================================================

#[derive(Validatable)]
struct Machine {
    #[validate("required,hostname_prefix=db")]
    hostname: String,
}

#[test]
fn custom_rule_sees_parameter_and_value() {
    let mut validator = Validator::new();
    validator.register_rule("hostname_prefix", |ctx| match ctx.value() {
        FieldView::Str(s) if s.starts_with(ctx.param()) => Ok(()),
        FieldView::Str(_) => Err(ValidationError::new(
            "hostname_prefix",
            format!("Value must start with `{}`", ctx.param()),
        )),
        other => Err(ValidationError::new(
            "type",
            format!("expected a string, got {}", other.kind()),
        )),
    });

    assert!(
        validator
            .validate(&Machine {
                hostname: "db-eu-1".into()
            })
            .is_ok()
    );

    let out = violations(
        validator
            .validate(&Machine {
                hostname: "web-eu-1".into(),
            })
            .unwrap_err(),
    );
    assert_eq!(out.len(), 1);
    assert_eq!(out.as_slice()[0].rule, "hostname_prefix");
    assert_eq!(out.as_slice()[0].param.as_deref(), Some("db"));
}

#[derive(Validatable)]
struct Contact {
    #[validate("required,email")]
    email: String,
}

#[test]
fn format_boundary_rules_plug_into_the_engine() {
    let mut validator = Validator::new();
    register_formats(&mut validator);

    assert!(
        validator
            .validate(&Contact {
                email: "ops@example.com".into()
            })
            .is_ok()
    );

    let out = violations(
        validator
            .validate(&Contact {
                email: "nope".into(),
            })
            .unwrap_err(),
    );
    assert_eq!(out.as_slice()[0].rule, "email");
    assert_eq!(out.as_slice()[0].path, "email");
}

#[test]
fn custom_rules_can_do_sibling_lookups() {
    #[derive(Validatable)]
    struct Span {
        start: u64,
        #[validate("after=start")]
        end: u64,
    }

    let mut validator = Validator::new();
    validator.register_rule("after", |ctx| {
        let (Some(FieldView::UInt(start)), FieldView::UInt(end)) =
            (ctx.sibling(ctx.param()), ctx.value())
        else {
            return Err(ValidationError::new("after", "expected two integers"));
        };
        if *end > start {
            Ok(())
        } else {
            Err(ValidationError::new(
                "after",
                format!("Value must be greater than `{}`", ctx.param()),
            ))
        }
    });

    assert!(validator.validate(&Span { start: 1, end: 5 }).is_ok());
    assert!(validator.validate(&Span { start: 5, end: 1 }).is_err());
}
