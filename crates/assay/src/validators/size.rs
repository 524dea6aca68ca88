//! Collection size validators
//!
//! These validate element counts, not values; the traversal engine computes
//! the count from a list or map view and feeds it in as `u64`.

use crate::foundation::ValidationError;

crate::validator! {
    /// Validates that a collection has at least `min` elements.
    #[derive(Copy, PartialEq, Eq, Hash)]
    pub MinSize { min: u64 } for u64;
    rule(self, input) { *input >= self.min }
    error(self, input) {
        ValidationError::new(
            "min_size",
            format!("Collection must have at least {} elements", self.min),
        )
        .with_param("min", self.min.to_string())
        .with_param("actual", input.to_string())
    }
    fn min_size(min: u64);
}

crate::validator! {
    /// Validates that a collection has at most `max` elements.
    #[derive(Copy, PartialEq, Eq, Hash)]
    pub MaxSize { max: u64 } for u64;
    rule(self, input) { *input <= self.max }
    error(self, input) {
        ValidationError::new(
            "max_size",
            format!("Collection must have at most {} elements", self.max),
        )
        .with_param("max", self.max.to_string())
        .with_param("actual", input.to_string())
    }
    fn max_size(max: u64);
}

crate::validator! {
    /// Validates that a collection has exactly `size` elements.
    #[derive(Copy, PartialEq, Eq, Hash)]
    pub ExactSize { size: u64 } for u64;
    rule(self, input) { *input == self.size }
    error(self, input) {
        ValidationError::new(
            "size",
            format!("Collection must have exactly {} elements", self.size),
        )
        .with_param("expected", self.size.to_string())
        .with_param("actual", input.to_string())
    }
    fn exact_size(size: u64);
}

// ============================================================================
// TESTS
// ============================================================================
