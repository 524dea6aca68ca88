//! Built-in rule dispatch
//!
//! Built-in rules are a closed enum matched directly — no table lookup on
//! the hot path. The open, name-keyed handler table is reserved for
//! genuinely custom caller-registered rules, which are consulted first and
//! may shadow any built-in.
//!
//! Parameterized built-ins (`min`, `max`, `len`, `range`, `oneof`) resolve
//! through the rule registry so each distinct `(rule, parameter)` pair is
//! parsed once and the resulting validator instance is shared. Polymorphic
//! rules pick a registry lane from the field's runtime kind: `min` on an
//! integer is a numeric bound, on a string a length bound, on a collection
//! a size bound.

use super::cross_field::{self, CompareOp, Conditional};
use super::report::{Violation, Violations, join_path};
use super::traverse::Site;
use super::{ConfigError, Validator};
use crate::foundation::{Validate, ValidationError};
use crate::schema::{FieldView, RuleSpec};
use crate::validators::{alpha, alphanumeric, digits};

// ============================================================================
// BUILTIN ENUM
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Builtin {
    Required,
    Eq,
    Ne,
    Min,
    Max,
    Len,
    Range,
    OneOf,
    Alpha,
    Alphanum,
    Numeric,
    Compare(CompareOp),
    Conditional(Conditional),
}

impl Builtin {
    pub(crate) fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "required" => Self::Required,
            "eq" => Self::Eq,
            "ne" => Self::Ne,
            "min" => Self::Min,
            "max" => Self::Max,
            "len" => Self::Len,
            "range" => Self::Range,
            "oneof" => Self::OneOf,
            "alpha" => Self::Alpha,
            "alphanum" => Self::Alphanum,
            "numeric" => Self::Numeric,
            "eqfield" => Self::Compare(CompareOp::Eq),
            "nefield" => Self::Compare(CompareOp::Ne),
            "gtfield" => Self::Compare(CompareOp::Gt),
            "gtefield" => Self::Compare(CompareOp::Gte),
            "ltfield" => Self::Compare(CompareOp::Lt),
            "ltefield" => Self::Compare(CompareOp::Lte),
            "required_if" => Self::Conditional(Conditional::If),
            "required_unless" => Self::Conditional(Conditional::Unless),
            "required_with" => Self::Conditional(Conditional::With),
            "required_without" => Self::Conditional(Conditional::Without),
            _ => return None,
        })
    }
}

// ============================================================================
// DISPATCH
// ============================================================================

impl Validator {
    /// Evaluates one rule against one field view.
    ///
    /// Custom handlers win over built-ins; unknown names are configuration
    /// errors under strict mode and skipped otherwise.
    pub(crate) fn eval_rule(
        &self,
        site: Site<'_>,
        field_name: &str,
        struct_field: &str,
        view: &FieldView<'_>,
        rule: &RuleSpec,
        out: &mut Violations,
    ) -> Result<(), ConfigError> {
        if let Some(handler) = self.custom.get(rule.name.as_str()) {
            let ctx = super::FieldContext {
                root: site.root,
                parent: site.parent,
                value: view,
                field_name,
                struct_field,
                rule: &rule.name,
                param: rule.param_str(),
            };
            if let Err(error) = handler(&ctx) {
                out.push(Violation::from_error(
                    site.path,
                    field_name,
                    &rule.name,
                    rule.param.as_deref(),
                    view,
                    error,
                ));
            }
            return Ok(());
        }

        match Builtin::from_name(&rule.name) {
            Some(builtin) => self
                .eval_builtin(builtin, site, field_name, view, rule, out)
                .map_err(|e| e.at_field(join_path(site.path, field_name))),
            None if self.options.strict => Err(ConfigError::UnknownRule(rule.name.clone())
                .at_field(join_path(site.path, field_name))),
            None => Ok(()),
        }
    }

    fn eval_builtin(
        &self,
        builtin: Builtin,
        site: Site<'_>,
        field_name: &str,
        view: &FieldView<'_>,
        rule: &RuleSpec,
        out: &mut Violations,
    ) -> Result<(), ConfigError> {
        match builtin {
            Builtin::Required => {
                if view.is_empty() {
                    out.push(Violation::from_error(
                        site.path,
                        field_name,
                        &rule.name,
                        None,
                        view,
                        ValidationError::required(),
                    ));
                }
                Ok(())
            }
            Builtin::Min | Builtin::Max | Builtin::Len | Builtin::Range => {
                self.eval_bound(builtin, site, field_name, view, rule, out)
            }
            Builtin::Eq | Builtin::Ne => eval_equality(builtin, site, field_name, view, rule, out),
            Builtin::OneOf => self.eval_oneof(site, field_name, view, rule, out),
            Builtin::Alpha | Builtin::Alphanum | Builtin::Numeric => {
                eval_content(builtin, site, field_name, view, rule, out)
            }
            Builtin::Compare(op) => cross_field::eval_compare(op, site, field_name, view, rule, out),
            Builtin::Conditional(cond) => {
                cross_field::eval_conditional(cond, site, field_name, view, rule, out)
            }
        }
    }

    /// `min` / `max` / `len` / `range`, lane-dispatched on the view kind.
    fn eval_bound(
        &self,
        builtin: Builtin,
        site: Site<'_>,
        field_name: &str,
        view: &FieldView<'_>,
        rule: &RuleSpec,
        out: &mut Violations,
    ) -> Result<(), ConfigError> {
        let param = rule.param_str();

        let not_applicable = || ConfigError::NotApplicable {
            rule: rule.name.clone(),
            kind: view.kind(),
            field: join_path(site.path, field_name),
        };

        let outcome = match view {
            FieldView::Int(v) => {
                let lane = match builtin {
                    Builtin::Min => "min_int",
                    Builtin::Max => "max_int",
                    Builtin::Range => "range_int",
                    _ => return Err(not_applicable()),
                };
                self.registry.resolve::<i64>(lane, param)?.validate(v)
            }
            FieldView::UInt(v) => {
                let lane = match builtin {
                    Builtin::Min => "min_uint",
                    Builtin::Max => "max_uint",
                    Builtin::Range => "range_uint",
                    _ => return Err(not_applicable()),
                };
                self.registry.resolve::<u64>(lane, param)?.validate(v)
            }
            FieldView::Float(v) => {
                let lane = match builtin {
                    Builtin::Min => "min_float",
                    Builtin::Max => "max_float",
                    Builtin::Range => "range_float",
                    _ => return Err(not_applicable()),
                };
                self.registry.resolve::<f64>(lane, param)?.validate(v)
            }
            FieldView::Str(s) => {
                let lane = match builtin {
                    Builtin::Min => "minlen",
                    Builtin::Max => "maxlen",
                    Builtin::Len => "len",
                    _ => return Err(not_applicable()),
                };
                self.registry.resolve::<str>(lane, param)?.validate(s)
            }
            FieldView::List(_) | FieldView::Map(_) => {
                let lane = match builtin {
                    Builtin::Min => "min_size",
                    Builtin::Max => "max_size",
                    Builtin::Len => "size",
                    _ => return Err(not_applicable()),
                };
                let count = view.len().unwrap_or(0);
                self.registry.resolve::<u64>(lane, param)?.validate(&count)
            }
            _ => return Err(not_applicable()),
        };

        if let Err(error) = outcome {
            out.push(Violation::from_error(
                site.path,
                field_name,
                &rule.name,
                rule.param.as_deref(),
                view,
                error,
            ));
        }
        Ok(())
    }

    fn eval_oneof(
        &self,
        site: Site<'_>,
        field_name: &str,
        view: &FieldView<'_>,
        rule: &RuleSpec,
        out: &mut Violations,
    ) -> Result<(), ConfigError> {
        let FieldView::Str(s) = view else {
            return Err(ConfigError::NotApplicable {
                rule: rule.name.clone(),
                kind: view.kind(),
                field: join_path(site.path, field_name),
            });
        };

        let validator = self.registry.resolve::<str>("oneof", rule.param_str())?;
        if let Err(error) = validator.validate(s) {
            out.push(Violation::from_error(
                site.path,
                field_name,
                &rule.name,
                rule.param.as_deref(),
                view,
                error,
            ));
        }
        Ok(())
    }
}

// ============================================================================
// PARAMETERLESS / LITERAL RULES
// ============================================================================

fn eval_content(
    builtin: Builtin,
    site: Site<'_>,
    field_name: &str,
    view: &FieldView<'_>,
    rule: &RuleSpec,
    out: &mut Violations,
) -> Result<(), ConfigError> {
    let FieldView::Str(s) = view else {
        return Err(ConfigError::NotApplicable {
            rule: rule.name.clone(),
            kind: view.kind(),
            field: join_path(site.path, field_name),
        });
    };

    let outcome = match builtin {
        Builtin::Alpha => alpha().validate(s),
        Builtin::Alphanum => alphanumeric().validate(s),
        Builtin::Numeric => digits().validate(s),
        _ => unreachable!("eval_content only handles content rules"),
    };

    if let Err(error) = outcome {
        out.push(Violation::from_error(
            site.path,
            field_name,
            &rule.name,
            None,
            view,
            error,
        ));
    }
    Ok(())
}

/// `eq` / `ne` against a literal parameter, parsed per the field's kind.
fn eval_equality(
    builtin: Builtin,
    site: Site<'_>,
    field_name: &str,
    view: &FieldView<'_>,
    rule: &RuleSpec,
    out: &mut Violations,
) -> Result<(), ConfigError> {
    let param = rule.param_str();

    let invalid = |reason: &str| ConfigError::InvalidParam {
        rule: rule.name.clone(),
        param: param.to_string(),
        reason: reason.to_string(),
    };

    let equal = match view {
        FieldView::Str(s) => *s == param,
        FieldView::Int(v) => {
            *v == param
                .trim()
                .parse::<i64>()
                .map_err(|_| invalid("expected an integer"))?
        }
        FieldView::UInt(v) => {
            *v == param
                .trim()
                .parse::<u64>()
                .map_err(|_| invalid("expected a non-negative integer"))?
        }
        FieldView::Float(v) => {
            *v == param
                .trim()
                .parse::<f64>()
                .map_err(|_| invalid("expected a number"))?
        }
        FieldView::Bool(b) => {
            *b == param
                .trim()
                .parse::<bool>()
                .map_err(|_| invalid("expected `true` or `false`"))?
        }
        other => {
            return Err(ConfigError::NotApplicable {
                rule: rule.name.clone(),
                kind: other.kind(),
                field: join_path(site.path, field_name),
            });
        }
    };

    let failed = match builtin {
        Builtin::Eq => !equal,
        Builtin::Ne => equal,
        _ => unreachable!("eval_equality only handles eq/ne"),
    };

    if failed {
        let error = match builtin {
            Builtin::Eq => ValidationError::new("eq", format!("Value must equal `{param}`")),
            _ => ValidationError::new("ne", format!("Value must not equal `{param}`")),
        };
        out.push(Violation::from_error(
            site.path,
            field_name,
            &rule.name,
            rule.param.as_deref(),
            view,
            error,
        ));
    }
    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_names_resolve() {
        assert_eq!(Builtin::from_name("required"), Some(Builtin::Required));
        assert_eq!(
            Builtin::from_name("eqfield"),
            Some(Builtin::Compare(CompareOp::Eq))
        );
        assert_eq!(
            Builtin::from_name("required_without"),
            Some(Builtin::Conditional(Conditional::Without))
        );
        assert_eq!(Builtin::from_name("frobnicate"), None);
    }

    #[test]
    fn required_checks_zero_values() {
        let validator = Validator::new();
        assert!(validator.validate_field("s", "", "required").is_err());
        assert!(validator.validate_field("n", &0_i32, "required").is_err());
        assert!(validator.validate_field("b", &false, "required").is_err());
        assert!(validator.validate_field("s", "x", "required").is_ok());
        assert!(validator.validate_field("n", &1_i32, "required").is_ok());
    }

    #[test]
    fn bound_lanes_by_kind() {
        let validator = Validator::new();
        // numeric value bound
        assert!(validator.validate_field("n", &5_i64, "min=3").is_ok());
        assert!(validator.validate_field("n", &2_i64, "min=3").is_err());
        // string length bound
        assert!(validator.validate_field("s", "abcd", "min=3").is_ok());
        assert!(validator.validate_field("s", "ab", "min=3").is_err());
        // collection size bound
        let items = vec![1_u32, 2, 3];
        assert!(validator.validate_field("v", &items, "min=2").is_ok());
        assert!(validator.validate_field("v", &items, "min=4").is_err());
    }

    #[test]
    fn range_on_scalars_only() {
        let validator = Validator::new();
        assert!(validator.validate_field("n", &10_i64, "range=1:20").is_ok());
        assert!(validator.validate_field("n", &30_i64, "range=1:20").is_err());
        assert!(matches!(
            validator.validate_field("s", "x", "range=1:20"),
            Err(crate::engine::ValidateError::Config(
                ConfigError::NotApplicable { .. }
            ))
        ));
    }

    #[test]
    fn equality_rules() {
        let validator = Validator::new();
        assert!(validator.validate_field("k", "prod", "eq=prod").is_ok());
        assert!(validator.validate_field("k", "dev", "eq=prod").is_err());
        assert!(validator.validate_field("k", "dev", "ne=prod").is_ok());
        assert!(validator.validate_field("n", &4_u32, "eq=4").is_ok());
        assert!(validator.validate_field("b", &true, "eq=true").is_ok());
    }

    #[test]
    fn equality_with_bad_literal_is_config_error() {
        let validator = Validator::new();
        let err = validator.validate_field("n", &4_u32, "eq=four").unwrap_err();
        assert!(matches!(
            err,
            crate::engine::ValidateError::Config(ConfigError::Field { .. })
        ));
        assert!(err.to_string().contains("invalid parameter `four`"));
    }

    #[test]
    fn content_rules() {
        let validator = Validator::new();
        assert!(validator.validate_field("s", "abc", "alpha").is_ok());
        assert!(validator.validate_field("s", "abc1", "alpha").is_err());
        assert!(validator.validate_field("s", "abc1", "alphanum").is_ok());
        assert!(validator.validate_field("s", "123", "numeric").is_ok());
    }

    #[test]
    fn oneof_rule() {
        let validator = Validator::new();
        assert!(
            validator
                .validate_field("mode", "require", "oneof=disable require verify-full")
                .is_ok()
        );
        assert!(
            validator
                .validate_field("mode", "maybe", "oneof=disable require verify-full")
                .is_err()
        );
    }

    #[test]
    fn min_on_bool_is_config_error() {
        let validator = Validator::new();
        assert!(matches!(
            validator.validate_field("b", &true, "min=1"),
            Err(crate::engine::ValidateError::Config(
                ConfigError::NotApplicable { .. }
            ))
        ));
    }
}
