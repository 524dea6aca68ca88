//! Prelude module for convenient imports.
//!
//! A single `use assay::prelude::*;` brings in the engine, the core
//! traits, the built-in validators and the derive macro.
//!
//! ```rust,ignore
//! use assay::prelude::*;
//!
//! #[derive(Validatable)]
//! struct Config {
//!     #[validate("required,oneof=debug info warn error")]
//!     log_level: String,
//! }
//!
//! Validator::new().validate(&config)?;
//! ```

// ============================================================================
// ENGINE: Validator, options, errors, contexts
// ============================================================================

pub use crate::engine::{
    ConfigError, FieldContext, Options, StructContext, StructReport, ValidateError, Validator,
    Violation, Violations,
};

// ============================================================================
// FOUNDATION: Core trait and error type
// ============================================================================

pub use crate::foundation::{Validate, ValidationError};

// ============================================================================
// SCHEMA: Views, traits, declarations
// ============================================================================

pub use crate::schema::{Declaration, FieldView, Inspect, RuleSpec, StructSchema, Validatable};

// ============================================================================
// REGISTRY AND FORMATS
// ============================================================================

pub use crate::formats::register_formats;
pub use crate::registry::{RuleRegistry, SharedValidator};

// ============================================================================
// VALIDATORS: All built-in constraint validators
// ============================================================================

#[allow(clippy::wildcard_imports)]
pub use crate::validators::*;
