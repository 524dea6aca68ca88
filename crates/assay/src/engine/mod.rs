//! Traversal engine
//!
//! [`Validator`] walks a [`Validatable`] value's fields in declaration
//! order, dispatches each declared rule — custom-registered handlers first,
//! then built-ins matched on a closed enum — recurses into nested
//! composites, resolves cross-field references against the immediate
//! parent, and accumulates [`Violations`] under a fail-fast or collect-all
//! policy.
//!
//! A `Validator` is built once at startup (registration takes `&mut self`)
//! and then shared: `validate` takes `&self` and many calls may run
//! concurrently against the same instance. The only shared mutable state
//! is the rule registry's concurrent instance cache.
//!
//! ```rust,ignore
//! use assay::{Validatable, Validator};
//!
//! #[derive(Validatable)]
//! struct SignUp {
//!     #[validate("required,minlen=3")]
//!     username: String,
//!     #[validate("required,eqfield=password")]
//!     confirm_password: String,
//!     #[validate("required,minlen=8")]
//!     password: String,
//! }
//!
//! let validator = Validator::new();
//! let outcome = validator.validate(&form);
//! ```

mod builtin;
mod context;
mod cross_field;
mod error;
mod options;
mod report;
mod traverse;

pub use context::{FieldContext, StructContext, StructReport};
pub use error::{ConfigError, ValidateError};
pub use options::Options;
pub use report::{Violation, Violations};

use std::any::TypeId;
use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::foundation::ValidationError;
use crate::registry::RuleRegistry;
use crate::schema::{Declaration, Inspect, Validatable};
use traverse::Site;

// ============================================================================
// HANDLER TYPES
// ============================================================================

/// A custom per-field rule handler.
///
/// Handlers report validation failures by returning a
/// [`ValidationError`]; they cannot raise configuration errors.
pub type RuleHandler = dyn Fn(&FieldContext<'_>) -> Result<(), ValidationError> + Send + Sync;

type StructHandler = Box<dyn Fn(&StructContext<'_>, &mut StructReport<'_, '_>) + Send + Sync>;

// ============================================================================
// VALIDATOR
// ============================================================================

/// The constraint-dispatch and struct-traversal engine.
pub struct Validator {
    registry: Arc<RuleRegistry>,
    custom: HashMap<String, Box<RuleHandler>>,
    struct_rules: HashMap<TypeId, Vec<StructHandler>>,
    options: Options,
}

impl std::fmt::Debug for Validator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Validator")
            .field("registry", &self.registry)
            .field("custom_rules", &self.custom.len())
            .field("struct_rules", &self.struct_rules.len())
            .field("options", &self.options)
            .finish()
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator {
    /// Creates a validator with the built-in registry and default options.
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(Options::default())
    }

    /// Creates a validator with the built-in registry and custom options.
    #[must_use]
    pub fn with_options(options: Options) -> Self {
        Self::with_registry(Arc::new(RuleRegistry::with_builtins()), options)
    }

    /// Creates a validator over an explicit, possibly shared registry.
    #[must_use]
    pub fn with_registry(registry: Arc<RuleRegistry>, options: Options) -> Self {
        Self {
            registry,
            custom: HashMap::new(),
            struct_rules: HashMap::new(),
            options,
        }
    }

    /// The active options.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// The shared rule registry.
    #[must_use]
    pub fn registry(&self) -> &Arc<RuleRegistry> {
        &self.registry
    }

    /// Registers a custom per-field rule handler under `name`.
    ///
    /// Custom handlers take precedence over built-ins of the same name;
    /// name collisions overwrite — last writer wins.
    pub fn register_rule<F>(&mut self, name: impl Into<String>, handler: F)
    where
        F: Fn(&FieldContext<'_>) -> Result<(), ValidationError> + Send + Sync + 'static,
    {
        let name = name.into();
        debug!(rule = %name, "registering custom rule");
        self.custom.insert(name, Box::new(handler));
    }

    /// Registers a whole-object rule for the concrete type `T`.
    ///
    /// The handler runs after `T`'s fields are validated and may report
    /// violations against any field name; they are merged into the same
    /// collection, namespaced under `T`'s position in the value graph.
    pub fn register_struct_rule<T, F>(&mut self, handler: F)
    where
        T: Validatable,
        F: Fn(&T, &mut StructReport<'_, '_>) + Send + Sync + 'static,
    {
        self.struct_rules
            .entry(TypeId::of::<T>())
            .or_default()
            .push(Box::new(move |ctx, report| {
                if let Some(typed) = ctx.current().as_any().downcast_ref::<T>() {
                    handler(typed, report);
                }
            }));
    }

    /// Validates a structured value against its declared constraints.
    ///
    /// Returns `Ok(())` only when the violation collection ends up empty.
    /// Configuration mistakes (unknown rules, malformed parameters, missing
    /// comparison siblings, …) abort with [`ValidateError::Config`].
    pub fn validate<T: Validatable>(&self, value: &T) -> Result<(), ValidateError> {
        self.validate_dyn(value)
    }

    /// Type-erased variant of [`validate`](Self::validate).
    pub fn validate_dyn(&self, value: &dyn Validatable) -> Result<(), ValidateError> {
        debug!(ty = value.type_name(), "validating value");
        let mut out = Violations::new(self.options.fail_fast);
        self.walk_struct(value, value, "", 0, &mut out)?;
        if out.is_empty() { Ok(()) } else { Err(out.into()) }
    }

    /// Validates a single value against an ad hoc rule list.
    ///
    /// There is no parent composite here, so cross-field rules are
    /// configuration errors.
    pub fn validate_field<T>(&self, name: &str, value: &T, rules: &str) -> Result<(), ValidateError>
    where
        T: Inspect + ?Sized,
    {
        let decl = Declaration::parse(rules).map_err(|source| ConfigError::Declaration {
            field: name.to_string(),
            source,
        })?;

        let mut out = Violations::new(self.options.fail_fast);
        let view = value.view();
        let site = Site {
            root: None,
            parent: None,
            path: "",
            depth: 0,
        };
        self.apply_declaration(site, name, name, &view, &decl, &mut out)?;
        if out.is_empty() { Ok(()) } else { Err(out.into()) }
    }
}

// ============================================================================
// TESTS
// ============================================================================
