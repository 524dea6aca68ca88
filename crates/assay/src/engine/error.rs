//! Engine error types
//!
//! Two categories that are never conflated:
//!
//! - [`ConfigError`] — a programming or schema mistake (malformed rule
//!   parameter, unknown rule under strict mode, registry type mismatch,
//!   missing comparison sibling, …). Raised loudly as a hard error; the
//!   policy is uniform, no built-in degrades to "rule treated as failed".
//! - [`Violations`](super::Violations) — the value legitimately failing
//!   its constraints, collected and returned, never panicked.
//!
//! [`ValidateError`] is the public sum of the two.

use thiserror::Error;

use super::report::Violations;
use crate::schema::DeclarationError;

// ============================================================================
// CONFIGURATION ERRORS
// ============================================================================

/// A schema or registration mistake, detected during validation setup or
/// rule resolution. Always aborts the `validate` call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// No handler or built-in exists for a rule name (strict mode).
    #[error("rule `{0}` is not registered")]
    UnknownRule(String),

    /// A rule parameter failed to parse.
    #[error("rule `{rule}`: invalid parameter `{param}`: {reason}")]
    InvalidParam {
        /// The rule whose parameter was malformed.
        rule: String,
        /// The raw parameter text.
        param: String,
        /// What was expected instead.
        reason: String,
    },

    /// A field's constraint declaration failed to parse.
    #[error("field `{field}`: invalid constraint declaration: {source}")]
    Declaration {
        /// Namespace path of the offending field.
        field: String,
        /// The underlying parse failure.
        #[source]
        source: DeclarationError,
    },

    /// A cached or registered validator has a different element type than
    /// the one requested.
    #[error("rule `{rule}` was requested for element type `{expected}` but resolves to {actual}")]
    TypeMismatch {
        /// The rule name.
        rule: String,
        /// The requested element type.
        expected: &'static str,
        /// What the registry actually holds.
        actual: &'static str,
    },

    /// A rule was declared on a field kind it cannot apply to
    /// (e.g. `min` on a boolean, `dive` on a scalar).
    #[error("rule `{rule}` is not applicable to {kind} field `{field}`")]
    NotApplicable {
        /// The rule name.
        rule: String,
        /// The field's runtime kind.
        kind: &'static str,
        /// Namespace path of the field.
        field: String,
    },

    /// A cross-field comparison names a sibling that does not exist.
    #[error("field `{field}`: rule `{rule}` references unknown sibling `{sibling}`")]
    UnknownSibling {
        /// Namespace path of the declaring field.
        field: String,
        /// The cross-field rule.
        rule: String,
        /// The sibling name that failed to resolve.
        sibling: String,
    },

    /// A cross-field rule was evaluated without a parent composite
    /// (ad hoc `validate_field`, or a dive element).
    #[error("field `{field}`: rule `{rule}` requires a parent struct")]
    NoParent {
        /// Namespace path of the declaring field.
        field: String,
        /// The cross-field rule.
        rule: String,
    },

    /// Composite nesting exceeded the configured depth limit.
    #[error("recursion depth limit {0} exceeded; value graph is too deep or cyclic")]
    DepthExceeded(usize),

    /// Any other configuration error, attributed to the field whose
    /// declaration triggered it.
    #[error("field `{field}`: {source}")]
    Field {
        /// Namespace path of the offending field.
        field: String,
        /// The underlying configuration error.
        #[source]
        source: Box<ConfigError>,
    },
}

impl ConfigError {
    /// Attributes this error to a field, unless it already names one.
    pub(crate) fn at_field(self, field: String) -> Self {
        match self {
            already @ (Self::Declaration { .. }
            | Self::NotApplicable { .. }
            | Self::UnknownSibling { .. }
            | Self::NoParent { .. }
            | Self::Field { .. }) => already,
            other => Self::Field {
                field,
                source: Box::new(other),
            },
        }
    }
}

// ============================================================================
// VALIDATE ERROR
// ============================================================================

/// The failure side of a `validate` call.
#[derive(Debug, Error)]
pub enum ValidateError {
    /// A configuration error; the value was not (fully) validated.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The value failed one or more constraints.
    #[error(transparent)]
    Invalid(#[from] Violations),
}

impl ValidateError {
    /// The collected violations, if this is a validation failure.
    #[must_use]
    pub fn violations(&self) -> Option<&Violations> {
        match self {
            Self::Invalid(violations) => Some(violations),
            Self::Config(_) => None,
        }
    }

    /// Consumes the error, returning the violations if present.
    #[must_use]
    pub fn into_violations(self) -> Option<Violations> {
        match self {
            Self::Invalid(violations) => Some(violations),
            Self::Config(_) => None,
        }
    }

    /// True for the configuration-error category.
    #[must_use]
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

// ============================================================================
// TESTS
// ============================================================================
