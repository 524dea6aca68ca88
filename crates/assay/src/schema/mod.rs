//! Type schemas and runtime value views
//!
//! This module is the engine's answer to reflection: instead of enumerating
//! fields and re-reading tag text at validation time, every validatable
//! struct carries a one-time [`StructSchema`] — field names, indices and
//! pre-parsed constraint declarations — built lazily by the code
//! `#[derive(Validatable)]` emits. The hot path walks the schema and pulls
//! borrowed [`FieldView`]s out of the value by index.
//!
//! - [`Inspect`] — turns a value into a [`FieldView`]
//! - [`Validatable`] — a composite with a schema and indexed field access
//! - [`Declaration`] — a field's parsed, ordered rule list

pub mod declaration;
pub mod view;

pub use declaration::{Declaration, DeclarationError, DiveSpec, RuleSpec};
pub use view::{FieldView, Inspect};

use std::any::Any;

// Derive macro alongside the trait it implements, serde-style.
#[cfg(feature = "derive")]
pub use assay_macros::Validatable;

// ============================================================================
// VALIDATABLE
// ============================================================================

/// A composite value the traversal engine can walk.
///
/// Implemented by `#[derive(Validatable)]`; hand-written impls are possible
/// but rarely worth it. The schema is `'static` — built once per type, on
/// first use, and shared by every instance and every thread.
pub trait Validatable: Any {
    /// The per-type metadata table: field names and parsed declarations.
    fn schema(&self) -> &'static StructSchema;

    /// Returns the view of the field at `index` (schema order).
    ///
    /// Out-of-range indices return [`FieldView::None`].
    fn field_view(&self, index: usize) -> FieldView<'_>;

    /// Type-erased self, for whole-object rule dispatch by `TypeId`.
    fn as_any(&self) -> &dyn Any;

    /// The composite's type name, as recorded in the schema.
    fn type_name(&self) -> &'static str {
        self.schema().name
    }

    /// Looks up a field view by display name or struct field name.
    ///
    /// This is the sibling lookup cross-field rules use; it never reaches
    /// past this composite into an ancestor.
    fn field_view_by_name(&self, name: &str) -> Option<FieldView<'_>> {
        let index = self
            .schema()
            .fields
            .iter()
            .position(|f| f.name == name || f.ident == name)?;
        Some(self.field_view(index))
    }
}

// ============================================================================
// STRUCT SCHEMA
// ============================================================================

/// Static metadata for one validatable struct type.
#[derive(Debug)]
pub struct StructSchema {
    /// The struct's type name.
    pub name: &'static str,
    /// Field metadata in declaration order.
    pub fields: Vec<FieldSchema>,
}

/// Static metadata for one field.
#[derive(Debug)]
pub struct FieldSchema {
    /// The struct field identifier.
    pub ident: &'static str,
    /// The display name errors are reported under (rename or `ident`).
    pub name: &'static str,
    /// The raw declaration text, if the field carries one.
    pub raw: Option<&'static str>,
    /// The parsed declaration; a parse failure is kept and surfaced as a
    /// configuration error on first use of the type.
    pub decl: Option<Result<Declaration, DeclarationError>>,
}

impl StructSchema {
    /// Builds a schema from `(ident, display name, raw rules)` triples.
    ///
    /// Called from derive-generated code inside a `LazyLock`, so each
    /// declaration is parsed exactly once per process.
    #[must_use]
    pub fn build(
        name: &'static str,
        fields: &[(&'static str, &'static str, Option<&'static str>)],
    ) -> Self {
        Self {
            name,
            fields: fields
                .iter()
                .map(|&(ident, name, raw)| FieldSchema {
                    ident,
                    name,
                    raw,
                    decl: raw.map(Declaration::parse),
                })
                .collect(),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
