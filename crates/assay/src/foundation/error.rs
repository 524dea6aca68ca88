//! Error type for individual validation failures
//!
//! [`ValidationError`] is what a single [`Validate`](super::Validate)
//! implementation returns when its rule does not hold. The traversal engine
//! wraps it with field and namespace attribution (see `engine::Violation`);
//! on its own it carries a stable error code, a human-readable message and
//! optional key/value parameters for message templating.
//!
//! All string fields use `Cow<'static, str>` so the common case of static
//! codes and messages allocates nothing.

use std::borrow::Cow;
use std::fmt;

use smallvec::SmallVec;

/// Parameters rarely exceed two entries (bound + actual), so keep them inline.
type Params = SmallVec<[(Cow<'static, str>, Cow<'static, str>); 2]>;

// ============================================================================
// VALIDATION ERROR
// ============================================================================

/// A single, structured validation failure.
///
/// # Examples
///
/// ```rust,ignore
/// use assay::foundation::ValidationError;
///
/// let error = ValidationError::new("minlen", "String is too short")
///     .with_param("min", "5")
///     .with_param("actual", "3");
/// assert_eq!(error.param("min"), Some("5"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Error code for programmatic handling; by convention the rule name.
    pub code: Cow<'static, str>,

    /// Human-readable message in English. Use `code` and `params` for i18n.
    pub message: Cow<'static, str>,

    /// Ordered key/value parameters, e.g. `[("min", "5"), ("actual", "3")]`.
    pub params: Params,
}

impl ValidationError {
    /// Creates a new validation error with a code and message.
    ///
    /// Static strings are borrowed; dynamic strings allocate only when
    /// actually constructed with `format!`.
    pub fn new(code: impl Into<Cow<'static, str>>, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            params: Params::new(),
        }
    }

    /// Adds a parameter to the error.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_param(
        mut self,
        key: impl Into<Cow<'static, str>>,
        value: impl Into<Cow<'static, str>>,
    ) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// Looks up a parameter value by key.
    #[must_use]
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k.as_ref() == key)
            .map(|(_, v)| v.as_ref())
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)?;

        if !self.params.is_empty() {
            write!(f, " (")?;
            for (i, (k, v)) in self.params.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{k}={v}")?;
            }
            write!(f, ")")?;
        }

        Ok(())
    }
}

impl std::error::Error for ValidationError {}

// ============================================================================
// CONVENIENCE CONSTRUCTORS
// ============================================================================

impl ValidationError {
    /// Creates a "required" error.
    #[must_use]
    pub fn required() -> Self {
        Self::new("required", "Value is required")
    }

    /// Creates a "minlen" error.
    #[must_use]
    pub fn min_length(min: usize, actual: usize) -> Self {
        Self::new("minlen", format!("Must be at least {min} characters"))
            .with_param("min", min.to_string())
            .with_param("actual", actual.to_string())
    }

    /// Creates a "maxlen" error.
    #[must_use]
    pub fn max_length(max: usize, actual: usize) -> Self {
        Self::new("maxlen", format!("Must be at most {max} characters"))
            .with_param("max", max.to_string())
            .with_param("actual", actual.to_string())
    }

    /// Creates a "range" error.
    #[must_use]
    pub fn out_of_range<T: fmt::Display>(min: T, max: T, actual: T) -> Self {
        Self::new("range", format!("Value must be between {min} and {max}"))
            .with_param("min", min.to_string())
            .with_param("max", max.to_string())
            .with_param("actual", actual.to_string())
    }

    /// Creates an "invalid_format" error.
    pub fn invalid_format(expected: impl Into<Cow<'static, str>>) -> Self {
        let expected = expected.into();
        Self::new("invalid_format", format!("Must be a valid {expected}"))
            .with_param("expected", expected)
    }
}

// ============================================================================
// TESTS
// ============================================================================
