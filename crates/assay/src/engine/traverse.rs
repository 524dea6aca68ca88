//! Struct traversal
//!
//! The walk proceeds field by field in declaration order:
//!
//! 1. Ignored fields are skipped entirely.
//! 2. Untagged fields that are nested composites are recursed into
//!    unconditionally — absence of a declaration never suppresses deep
//!    validation of an embedded struct.
//! 3. Tagged fields evaluate their rule list in order. When the value is
//!    an absent optional, or empty under `omitempty`, only `required*`
//!    rules run.
//! 4. `dive` applies the declaration tail per element (`field[i]`) or per
//!    map entry (`field[key]`), with `keys`…`endkeys` rules on the keys.
//! 5. After each rule, fail-fast is checked; one recorded violation stops
//!    every remaining field, nested object and collection element.
//!
//! Struct-level rules registered for the current composite's type run
//! after its fields.

use tracing::trace;

use super::report::{Violations, join_path};
use super::{ConfigError, StructContext, StructReport, Validator};
use crate::schema::{Declaration, DiveSpec, FieldView, Validatable};

/// Where in the value graph a rule evaluation is happening.
///
/// Bundles the read-only coordinates the traversal threads through every
/// level: the validation root, the immediate parent composite, the
/// namespace path, and the current nesting depth.
#[derive(Clone, Copy)]
pub(crate) struct Site<'a> {
    pub(crate) root: Option<&'a dyn Validatable>,
    pub(crate) parent: Option<&'a dyn Validatable>,
    pub(crate) path: &'a str,
    pub(crate) depth: usize,
}

impl Validator {
    pub(crate) fn walk_struct(
        &self,
        root: &dyn Validatable,
        current: &dyn Validatable,
        path: &str,
        depth: usize,
        out: &mut Violations,
    ) -> Result<(), ConfigError> {
        if depth > self.options.max_depth {
            return Err(ConfigError::DepthExceeded(self.options.max_depth));
        }

        let schema = current.schema();
        trace!(ty = schema.name, path, depth, "walking struct");

        for (index, field) in schema.fields.iter().enumerate() {
            if self.options.ignored_fields.contains(field.name) {
                continue;
            }

            let view = current.field_view(index);
            let site = Site {
                root: Some(root),
                parent: Some(current),
                path,
                depth,
            };

            match &field.decl {
                None => {}
                Some(Err(source)) => {
                    return Err(ConfigError::Declaration {
                        field: join_path(path, field.name),
                        source: source.clone(),
                    });
                }
                Some(Ok(decl)) => {
                    self.apply_declaration(site, field.name, field.ident, &view, decl, out)?;
                    if out.should_stop() {
                        return Ok(());
                    }
                }
            }

            // Nested composites are recursed into whether or not the field
            // carries its own declaration.
            self.recurse_nested(site, field.name, &view, out)?;
            if out.should_stop() {
                return Ok(());
            }
        }

        self.run_struct_rules(root, current, path, out);
        Ok(())
    }

    /// Recurses into a nested composite view, extending the namespace path.
    fn recurse_nested(
        &self,
        site: Site<'_>,
        field_name: &str,
        view: &FieldView<'_>,
        out: &mut Violations,
    ) -> Result<(), ConfigError> {
        if let FieldView::Nested(inner) = view {
            let child_path = join_path(site.path, field_name);
            let root = site.root.unwrap_or(*inner);
            self.walk_struct(root, *inner, &child_path, site.depth + 1, out)?;
        }
        Ok(())
    }

    /// Evaluates one field's declaration: rules in order, then `dive`.
    pub(crate) fn apply_declaration(
        &self,
        site: Site<'_>,
        field_name: &str,
        struct_field: &str,
        view: &FieldView<'_>,
        decl: &Declaration,
        out: &mut Violations,
    ) -> Result<(), ConfigError> {
        // A null optional skips everything except presence rules; so does
        // an empty value under `omitempty`. Conditional-presence rules
        // (`required_if` and friends) still execute either way.
        let presence_only = view.is_none() || (decl.omit_empty && view.is_empty());

        for rule in &decl.rules {
            if presence_only && !rule.is_required_family() {
                continue;
            }
            self.eval_rule(site, field_name, struct_field, view, rule, out)?;
            if out.should_stop() {
                return Ok(());
            }
        }

        if let Some(dive) = &decl.dive {
            if !presence_only {
                self.walk_dive(site, field_name, view, dive, out)?;
            }
        }

        Ok(())
    }

    /// Applies a dive tail to every element of a collection view.
    fn walk_dive(
        &self,
        site: Site<'_>,
        field_name: &str,
        view: &FieldView<'_>,
        dive: &DiveSpec,
        out: &mut Violations,
    ) -> Result<(), ConfigError> {
        match view {
            FieldView::List(items) => {
                for (index, item) in items.iter().enumerate() {
                    let element = format!("{field_name}[{index}]");
                    self.apply_element(site, &element, item, &dive.element, out)?;
                    if out.should_stop() {
                        return Ok(());
                    }
                }
            }
            FieldView::Map(entries) => {
                for (key, value) in entries {
                    let label = key.render().unwrap_or_else(|| key.kind().to_string());
                    let element = format!("{field_name}[{label}]");

                    for rule in &dive.keys {
                        self.eval_rule(site, &element, &element, key, rule, out)?;
                        if out.should_stop() {
                            return Ok(());
                        }
                    }

                    self.apply_element(site, &element, value, &dive.element, out)?;
                    if out.should_stop() {
                        return Ok(());
                    }
                }
            }
            other => {
                return Err(ConfigError::NotApplicable {
                    rule: "dive".to_string(),
                    kind: other.kind(),
                    field: join_path(site.path, field_name),
                });
            }
        }
        Ok(())
    }

    /// Applies the element declaration to one collection element.
    ///
    /// Elements have no parent composite, so cross-field rules inside a
    /// dive tail are configuration errors. An element that is itself a
    /// composite is recursed into — with a tail, after its rules; without
    /// one, unconditionally.
    fn apply_element(
        &self,
        site: Site<'_>,
        element_name: &str,
        view: &FieldView<'_>,
        decl: &Declaration,
        out: &mut Violations,
    ) -> Result<(), ConfigError> {
        let element_site = Site {
            parent: None,
            ..site
        };

        if !(decl.rules.is_empty() && decl.dive.is_none()) {
            self.apply_declaration(element_site, element_name, element_name, view, decl, out)?;
            if out.should_stop() {
                return Ok(());
            }
        }

        self.recurse_nested(site, element_name, view, out)
    }

    /// Runs whole-object rules registered for the current composite's type.
    fn run_struct_rules(
        &self,
        root: &dyn Validatable,
        current: &dyn Validatable,
        path: &str,
        out: &mut Violations,
    ) {
        let Some(handlers) = self.struct_rules.get(&current.as_any().type_id()) else {
            return;
        };

        let ctx = StructContext {
            root,
            current,
            path,
        };
        let mut report = StructReport::new(out, path);
        for handler in handlers {
            if report.should_stop() {
                return;
            }
            handler(&ctx, &mut report);
        }
    }
}
