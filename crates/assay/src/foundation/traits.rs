//! Core trait for the validation system
//!
//! Every constraint validator implements [`Validate`]. The trait is generic
//! over the input type so comparisons are direct and never boxed; `?Sized`
//! inputs allow validators over `str` and `[T]`.

use super::ValidationError;

// ============================================================================
// CORE VALIDATOR TRAIT
// ============================================================================

/// The contract all constraint validators implement.
///
/// Validators are immutable once constructed and carry no interior
/// mutability, so a single instance may be shared freely across threads
/// (the rule registry relies on this to hand out cached `Arc`s).
///
/// # Examples
///
/// ```rust,ignore
/// use assay::foundation::{Validate, ValidationError};
///
/// struct MinLength {
///     min: usize,
/// }
///
/// impl Validate for MinLength {
///     type Input = str;
///
///     fn validate(&self, input: &Self::Input) -> Result<(), ValidationError> {
///         if input.chars().count() >= self.min {
///             Ok(())
///         } else {
///             Err(ValidationError::min_length(self.min, input.chars().count()))
///         }
///     }
/// }
/// ```
pub trait Validate {
    /// The type of input being validated.
    ///
    /// Use `?Sized` types like `str` and `[T]` where borrowing is natural.
    type Input: ?Sized;

    /// Validates the input value.
    ///
    /// Returns `Ok(())` on success, or a [`ValidationError`] describing the
    /// violated constraint.
    fn validate(&self, input: &Self::Input) -> Result<(), ValidationError>;
}

// ============================================================================
// TESTS
// ============================================================================
