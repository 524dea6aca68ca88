//! Fixed-choice validator

use crate::foundation::ValidationError;

crate::validator! {
    /// Validates that a string is one of a fixed set of options.
    #[derive(PartialEq, Eq, Hash)]
    pub OneOf { options: Vec<String> } for str;
    rule(self, input) { self.options.iter().any(|option| option == input) }
    error(self, input) {
        ValidationError::new(
            "oneof",
            format!("Value must be one of [{}]", self.options.join(", ")),
        )
        .with_param("options", self.options.join(" "))
        .with_param("actual", input.to_string())
    }
    fn one_of(options: Vec<String>);
}

impl OneOf {
    /// Builds the option set from a space-separated parameter string,
    /// e.g. `"disable require verify-full"`.
    #[must_use]
    pub fn from_param(param: &str) -> Self {
        Self::new(param.split_whitespace().map(str::to_string).collect())
    }
}

// ============================================================================
// TESTS
// ============================================================================
