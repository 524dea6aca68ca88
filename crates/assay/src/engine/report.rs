//! Violation collection
//!
//! [`Violations`] is the per-call error collector: an insertion-ordered
//! sequence of [`Violation`]s (insertion order = traversal order) plus the
//! fail-fast flag. It is created by one `validate` call, owned by that
//! call's stack, and handed to the caller on failure.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::foundation::ValidationError;
use crate::schema::FieldView;

// ============================================================================
// VIOLATION
// ============================================================================

/// A single constraint violation with full attribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// Dotted path from the validation root, e.g. `address.city` or
    /// `tags[0]`. Disambiguates same-named fields in nested contexts.
    pub path: String,

    /// The field name the violation is reported against.
    pub field: String,

    /// The rule that failed, e.g. `minlen`.
    pub rule: String,

    /// The rule's raw parameter, if it had one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub param: Option<String>,

    /// The offending value, rendered, when it is a scalar.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    /// Human-readable message.
    pub message: String,
}

impl Violation {
    pub(crate) fn from_error(
        prefix: &str,
        field: &str,
        rule: &str,
        param: Option<&str>,
        view: &FieldView<'_>,
        error: ValidationError,
    ) -> Self {
        Self {
            path: join_path(prefix, field),
            field: field.to_string(),
            rule: rule.to_string(),
            param: param.map(str::to_string),
            value: view.render(),
            message: error.message.into_owned(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.path, self.rule, self.message)
    }
}

/// Joins a namespace prefix and a field name with a dot.
pub(crate) fn join_path(prefix: &str, field: &str) -> String {
    if prefix.is_empty() {
        field.to_string()
    } else {
        format!("{prefix}.{field}")
    }
}

// ============================================================================
// VIOLATIONS
// ============================================================================

/// Ordered collection of violations for one `validate` call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Violations {
    items: Vec<Violation>,
    fail_fast: bool,
}

impl Violations {
    /// Creates an empty collection with the given fail-fast policy.
    #[must_use]
    pub fn new(fail_fast: bool) -> Self {
        Self {
            items: Vec::new(),
            fail_fast,
        }
    }

    /// Appends a violation.
    pub fn push(&mut self, violation: Violation) {
        self.items.push(violation);
    }

    /// True iff fail-fast is enabled and at least one violation exists.
    ///
    /// The traversal checks this after every rule evaluation, at every
    /// nesting level: one recorded error stops everything.
    #[must_use]
    pub fn should_stop(&self) -> bool {
        self.fail_fast && !self.items.is_empty()
    }

    /// True when no violations were recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of violations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// The violations in traversal order.
    #[must_use]
    pub fn as_slice(&self) -> &[Violation] {
        &self.items
    }

    /// Iterates violations in traversal order.
    pub fn iter(&self) -> std::slice::Iter<'_, Violation> {
        self.items.iter()
    }

    /// Groups violations by namespace path.
    #[must_use]
    pub fn as_map(&self) -> BTreeMap<&str, Vec<&Violation>> {
        let mut map: BTreeMap<&str, Vec<&Violation>> = BTreeMap::new();
        for violation in &self.items {
            map.entry(violation.path.as_str()).or_default().push(violation);
        }
        map
    }

    /// Violations reported against a field name or namespace path.
    #[must_use]
    pub fn filter_by_field(&self, field: &str) -> Vec<&Violation> {
        self.items
            .iter()
            .filter(|v| v.field == field || v.path == field)
            .collect()
    }

    /// Violations produced by one rule.
    #[must_use]
    pub fn filter_by_rule(&self, rule: &str) -> Vec<&Violation> {
        self.items.iter().filter(|v| v.rule == rule).collect()
    }

    /// The distinct namespace paths with violations, in traversal order.
    #[must_use]
    pub fn fields(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for violation in &self.items {
            if !seen.contains(&violation.path.as_str()) {
                seen.push(violation.path.as_str());
            }
        }
        seen
    }

    /// Serializes the collection as a stable JSON array.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.items)
    }
}

impl Serialize for Violations {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(&self.items)
    }
}

impl<'a> IntoIterator for &'a Violations {
    type Item = &'a Violation;
    type IntoIter = std::slice::Iter<'a, Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "validation failed with {} violation(s):", self.items.len())?;
        for (i, violation) in self.items.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, violation)?;
        }
        Ok(())
    }
}

impl std::error::Error for Violations {}

// ============================================================================
// TESTS
// ============================================================================
