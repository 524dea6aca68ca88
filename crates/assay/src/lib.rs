//! # assay
//!
//! A declarative struct validation engine: per-field constraint lists,
//! resolved to statically-typed validators through a caching rule
//! registry, evaluated by a traversal engine that recurses into nested
//! composites, resolves cross-field references and collects structured
//! violations under a fail-fast or collect-all policy.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use assay::{Validatable, Validator};
//!
//! #[derive(Validatable)]
//! struct SignUp {
//!     #[validate("required,minlen=3,maxlen=20,alphanum")]
//!     username: String,
//!
//!     #[validate("required,minlen=8")]
//!     password: String,
//!
//!     #[validate("required,eqfield=password")]
//!     confirm_password: String,
//!
//!     #[validate("omitempty,range=13:130")]
//!     age: i64,
//! }
//!
//! let validator = Validator::new();
//! match validator.validate(&form) {
//!     Ok(()) => println!("valid"),
//!     Err(err) => {
//!         for violation in err.violations().into_iter().flatten() {
//!             eprintln!("{violation}");
//!         }
//!     }
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`foundation`] — the [`Validate`] trait and [`ValidationError`]
//! - [`schema`] — field views, per-type schemas, declaration parsing
//! - [`registry`] — rule factories and the shared parsed-instance cache
//! - [`validators`] — the built-in generic constraint validators
//! - [`engine`] — the traversal engine, contexts and violation collector
//! - [`formats`] — the format-validator collaborator boundary
//!
//! Ad hoc single-value checks skip the derive entirely:
//!
//! ```rust,ignore
//! let validator = Validator::new();
//! validator.validate_field("port", &8080_u16, "range=1:65535")?;
//! ```

// Deep generic nesting around the registry's type-erased factories is
// inherent to the typed-resolution design.
#![allow(clippy::type_complexity)]

pub mod engine;
pub mod formats;
pub mod foundation;
mod macros;
pub mod prelude;
pub mod registry;
pub mod schema;
pub mod validators;

pub use engine::{
    ConfigError, FieldContext, Options, StructContext, StructReport, ValidateError, Validator,
    Violation, Violations,
};
pub use foundation::{Validate, ValidationError};
pub use registry::RuleRegistry;
pub use schema::{FieldView, Inspect, StructSchema, Validatable};
