//! Field and struct contexts
//!
//! Ephemeral per-evaluation views handed to rule handlers. A
//! [`FieldContext`] exists for one rule evaluation on one field; a
//! [`StructContext`] exists for one whole-object rule on one composite.
//! Neither is ever persisted or shared across threads — they borrow the
//! traversal's stack.

use super::report::{Violation, Violations, join_path};
use crate::schema::{FieldView, Validatable};

// ============================================================================
// FIELD CONTEXT
// ============================================================================

/// Everything a per-field rule handler can see.
///
/// `parent` is the composite literally one level up — cross-field lookups
/// never cross into an ancestor of an ancestor. It is a read-only borrow
/// valid for the duration of one traversal call, not an ownership
/// relationship.
#[derive(Clone, Copy)]
pub struct FieldContext<'a> {
    pub(crate) root: Option<&'a dyn Validatable>,
    pub(crate) parent: Option<&'a dyn Validatable>,
    pub(crate) value: &'a FieldView<'a>,
    pub(crate) field_name: &'a str,
    pub(crate) struct_field: &'a str,
    pub(crate) rule: &'a str,
    pub(crate) param: &'a str,
}

impl<'a> FieldContext<'a> {
    /// The value under test.
    #[must_use]
    pub fn value(&self) -> &'a FieldView<'a> {
        self.value
    }

    /// The field's display name.
    #[must_use]
    pub fn field_name(&self) -> &'a str {
        self.field_name
    }

    /// The original struct field identifier.
    #[must_use]
    pub fn struct_field(&self) -> &'a str {
        self.struct_field
    }

    /// The rule currently being evaluated.
    #[must_use]
    pub fn rule(&self) -> &'a str {
        self.rule
    }

    /// The rule's raw parameter text (empty when the rule takes none).
    #[must_use]
    pub fn param(&self) -> &'a str {
        self.param
    }

    /// The validation root, when validating a struct.
    #[must_use]
    pub fn root(&self) -> Option<&'a dyn Validatable> {
        self.root
    }

    /// The immediate parent composite, when the field has one.
    #[must_use]
    pub fn parent(&self) -> Option<&'a dyn Validatable> {
        self.parent
    }

    /// Looks up a sibling field's view in the immediate parent.
    ///
    /// Pointer and optional wrappers are already dereferenced by view
    /// construction; an absent optional resolves to [`FieldView::None`].
    #[must_use]
    pub fn sibling(&self, name: &str) -> Option<FieldView<'a>> {
        self.parent?.field_view_by_name(name)
    }
}

// ============================================================================
// STRUCT CONTEXT
// ============================================================================

/// Everything a whole-object rule handler can see.
pub struct StructContext<'a> {
    pub(crate) root: &'a dyn Validatable,
    pub(crate) current: &'a dyn Validatable,
    pub(crate) path: &'a str,
}

impl<'a> StructContext<'a> {
    /// The validation root.
    #[must_use]
    pub fn root(&self) -> &'a dyn Validatable {
        self.root
    }

    /// The composite this rule runs against.
    #[must_use]
    pub fn current(&self) -> &'a dyn Validatable {
        self.current
    }

    /// The namespace path of the current composite ("" at the root).
    #[must_use]
    pub fn path(&self) -> &'a str {
        self.path
    }

    /// Looks up a field view of the current composite by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<FieldView<'a>> {
        self.current.field_view_by_name(name)
    }
}

// ============================================================================
// STRUCT REPORT
// ============================================================================

/// Error sink for whole-object rules.
///
/// Reports are merged into the same collection as per-field violations,
/// namespaced under the current composite's path.
pub struct StructReport<'a, 'b> {
    out: &'b mut Violations,
    path: &'a str,
}

impl<'a, 'b> StructReport<'a, 'b> {
    pub(crate) fn new(out: &'b mut Violations, path: &'a str) -> Self {
        Self { out, path }
    }

    /// Reports a violation against `field` under the current namespace.
    pub fn error(&mut self, field: &str, rule: &str, message: impl Into<String>) {
        self.out.push(Violation {
            path: join_path(self.path, field),
            field: field.to_string(),
            rule: rule.to_string(),
            param: None,
            value: None,
            message: message.into(),
        });
    }

    /// True once fail-fast has tripped; handlers may return early.
    #[must_use]
    pub fn should_stop(&self) -> bool {
        self.out.should_stop()
    }
}

// ============================================================================
// TESTS
// ============================================================================
