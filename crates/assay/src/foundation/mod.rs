//! Core validation types and traits
//!
//! The fundamental building blocks of the validation system:
//!
//! - [`Validate`] — the trait every constraint validator implements
//! - [`ValidationError`] — the structured failure a validator returns
//!
//! Validators are generic over their input type, providing compile-time
//! guarantees:
//!
//! ```rust,ignore
//! use assay::foundation::Validate;
//!
//! struct MinLength { min: usize }
//!
//! impl Validate for MinLength {
//!     type Input = str;  // Only validates strings
//!     // ...
//! }
//! ```
//!
//! The [`validator!`](crate::validator) macro removes the boilerplate for
//! the common cases; see `crate::validators` for the built-in set.

pub mod error;
pub mod traits;

pub use error::ValidationError;
pub use traits::Validate;
