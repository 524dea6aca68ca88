//! Cross-field and conditional-presence rules
//!
//! Comparison rules (`eqfield`, `nefield`, `gtfield`, `gtefield`,
//! `ltfield`, `ltefield`) resolve a named sibling by looking it up in the
//! immediate parent composite only — never further up the ancestry chain.
//! Pointer and optional wrappers are already dereferenced by view
//! construction. A missing sibling is a configuration error.
//!
//! Conditional-presence rules (`required_if=Sibling:value`,
//! `required_unless=Sibling:value`, `required_with=Sibling`,
//! `required_without=Sibling`) uniformly treat a missing sibling as
//! "condition not met": the field is not required. This is one policy for
//! all four rules, on purpose.
//!
//! Comparison semantics are kind-appropriate — numeric magnitude with
//! signed/unsigned widening, lexicographic string order. A kind mismatch
//! between the two fields is a validation failure, never a panic.

use std::cmp::Ordering;

use super::ConfigError;
use super::report::{Violation, Violations, join_path};
use super::traverse::Site;
use crate::foundation::ValidationError;
use crate::schema::{FieldView, RuleSpec};

// ============================================================================
// COMPARISON RULES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CompareOp {
    Eq,
    Ne,
    Gt,
    Gte,
    Lt,
    Lte,
}

impl CompareOp {
    fn holds(self, ordering: Ordering) -> bool {
        match self {
            Self::Eq => ordering == Ordering::Equal,
            Self::Ne => ordering != Ordering::Equal,
            Self::Gt => ordering == Ordering::Greater,
            Self::Gte => matches!(ordering, Ordering::Greater | Ordering::Equal),
            Self::Lt => ordering == Ordering::Less,
            Self::Lte => matches!(ordering, Ordering::Less | Ordering::Equal),
        }
    }

    fn describe(self) -> &'static str {
        match self {
            Self::Eq => "equal to",
            Self::Ne => "different from",
            Self::Gt => "greater than",
            Self::Gte => "greater than or equal to",
            Self::Lt => "less than",
            Self::Lte => "less than or equal to",
        }
    }
}

pub(crate) fn eval_compare(
    op: CompareOp,
    site: Site<'_>,
    field_name: &str,
    view: &FieldView<'_>,
    rule: &RuleSpec,
    out: &mut Violations,
) -> Result<(), ConfigError> {
    let sibling_name = rule.param_str().trim();
    if sibling_name.is_empty() {
        return Err(ConfigError::InvalidParam {
            rule: rule.name.clone(),
            param: rule.param_str().to_string(),
            reason: "expected a sibling field name".to_string(),
        });
    }

    let Some(parent) = site.parent else {
        return Err(ConfigError::NoParent {
            field: join_path(site.path, field_name),
            rule: rule.name.clone(),
        });
    };

    let Some(sibling) = parent.field_view_by_name(sibling_name) else {
        return Err(ConfigError::UnknownSibling {
            field: join_path(site.path, field_name),
            rule: rule.name.clone(),
            sibling: sibling_name.to_string(),
        });
    };

    let error = match compare_views(view, &sibling) {
        Some(ordering) if op.holds(ordering) => return Ok(()),
        Some(_) => ValidationError::new(
            "cross_field",
            format!("Value must be {} field `{sibling_name}`", op.describe()),
        ),
        None => ValidationError::new(
            "cross_field_kind",
            format!(
                "Cannot compare with field `{sibling_name}`: {} vs {}",
                view.kind(),
                sibling.kind()
            ),
        ),
    };

    out.push(Violation::from_error(
        site.path,
        field_name,
        &rule.name,
        rule.param.as_deref(),
        view,
        error,
    ));
    Ok(())
}

/// Kind-appropriate ordering between two views.
///
/// `None` means the kinds are not comparable — reported as a validation
/// failure by the caller, not a crash.
fn compare_views(a: &FieldView<'_>, b: &FieldView<'_>) -> Option<Ordering> {
    match (a, b) {
        (FieldView::Str(x), FieldView::Str(y)) => Some(x.cmp(y)),
        (FieldView::Int(x), FieldView::Int(y)) => Some(x.cmp(y)),
        (FieldView::UInt(x), FieldView::UInt(y)) => Some(x.cmp(y)),
        (FieldView::Float(x), FieldView::Float(y)) => x.partial_cmp(y),
        (FieldView::Bool(x), FieldView::Bool(y)) => Some(x.cmp(y)),
        (FieldView::Int(x), FieldView::UInt(y)) => Some(cmp_int_uint(*x, *y)),
        (FieldView::UInt(x), FieldView::Int(y)) => Some(cmp_int_uint(*y, *x).reverse()),
        _ => None,
    }
}

fn cmp_int_uint(a: i64, b: u64) -> Ordering {
    if a < 0 {
        Ordering::Less
    } else {
        (a as u64).cmp(&b)
    }
}

// ============================================================================
// CONDITIONAL-PRESENCE RULES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Conditional {
    If,
    Unless,
    With,
    Without,
}

pub(crate) fn eval_conditional(
    cond: Conditional,
    site: Site<'_>,
    field_name: &str,
    view: &FieldView<'_>,
    rule: &RuleSpec,
    out: &mut Violations,
) -> Result<(), ConfigError> {
    let Some(parent) = site.parent else {
        return Err(ConfigError::NoParent {
            field: join_path(site.path, field_name),
            rule: rule.name.clone(),
        });
    };

    let (required, message) = match cond {
        Conditional::If | Conditional::Unless => {
            let (sibling_name, expected) =
                rule.param_str()
                    .split_once(':')
                    .ok_or_else(|| ConfigError::InvalidParam {
                        rule: rule.name.clone(),
                        param: rule.param_str().to_string(),
                        reason: "expected `sibling:value`".to_string(),
                    })?;
            let (sibling_name, expected) = (sibling_name.trim(), expected.trim());

            // A missing sibling, or one that does not render as a scalar,
            // cannot match the literal: the condition is not met.
            let actual = parent
                .field_view_by_name(sibling_name)
                .and_then(|s| s.render());

            match cond {
                Conditional::If => (
                    actual.as_deref() == Some(expected),
                    format!("Value is required when `{sibling_name}` is `{expected}`"),
                ),
                _ => (
                    actual.as_deref().is_some_and(|a| a != expected),
                    format!("Value is required unless `{sibling_name}` is `{expected}`"),
                ),
            }
        }
        Conditional::With | Conditional::Without => {
            let sibling_name = rule.param_str().trim();
            if sibling_name.is_empty() {
                return Err(ConfigError::InvalidParam {
                    rule: rule.name.clone(),
                    param: rule.param_str().to_string(),
                    reason: "expected a sibling field name".to_string(),
                });
            }

            let sibling = parent.field_view_by_name(sibling_name);
            match cond {
                Conditional::With => (
                    sibling.is_some_and(|s| !s.is_empty()),
                    format!("Value is required when `{sibling_name}` is present"),
                ),
                _ => (
                    sibling.is_some_and(|s| s.is_empty()),
                    format!("Value is required when `{sibling_name}` is empty"),
                ),
            }
        }
    };

    if required && view.is_empty() {
        out.push(Violation::from_error(
            site.path,
            field_name,
            &rule.name,
            rule.param.as_deref(),
            view,
            ValidationError::new("required", message),
        ));
    }
    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================
