//! Character-class validators
//!
//! Empty strings fail all three rules: each asserts the string consists of
//! at least one character of the class.

use crate::foundation::ValidationError;

crate::validator! {
    /// Validates that a string is non-empty ASCII alphabetic.
    pub Alpha for str;
    rule(input) { !input.is_empty() && input.chars().all(|c| c.is_ascii_alphabetic()) }
    error(input) {
        ValidationError::new("alpha", "Value must contain only alphabetic characters")
    }
    fn alpha();
}

crate::validator! {
    /// Validates that a string is non-empty ASCII alphanumeric.
    pub Alphanumeric for str;
    rule(input) { !input.is_empty() && input.chars().all(|c| c.is_ascii_alphanumeric()) }
    error(input) {
        ValidationError::new("alphanum", "Value must contain only alphanumeric characters")
    }
    fn alphanumeric();
}

crate::validator! {
    /// Validates that a string is non-empty ASCII digits.
    pub Digits for str;
    rule(input) { !input.is_empty() && input.chars().all(|c| c.is_ascii_digit()) }
    error(input) {
        ValidationError::new("numeric", "Value must contain only numeric characters")
    }
    fn digits();
}

// ============================================================================
// TESTS
// ============================================================================
