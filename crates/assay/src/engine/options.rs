//! Validator configuration

use std::collections::HashSet;

/// Behavior knobs for a [`Validator`](super::Validator).
///
/// The declaration keyword itself is not configurable at runtime: it is the
/// `#[validate]` derive attribute, fixed at compile time.
#[derive(Debug, Clone)]
pub struct Options {
    /// Stop the entire traversal at the first recorded violation.
    pub fail_fast: bool,

    /// Treat unknown rule names as configuration errors (default). When
    /// disabled, unknown rules are skipped silently.
    pub strict: bool,

    /// Field names (display names) to skip entirely during traversal.
    pub ignored_fields: HashSet<String>,

    /// Maximum composite nesting depth before the traversal aborts with a
    /// configuration error. Guards against pathologically deep values.
    pub max_depth: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            fail_fast: false,
            strict: true,
            ignored_fields: HashSet::new(),
            max_depth: 128,
        }
    }
}

impl Options {
    /// Creates the default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the fail-fast policy.
    #[must_use = "builder methods must be chained or built"]
    pub fn fail_fast(mut self, enabled: bool) -> Self {
        self.fail_fast = enabled;
        self
    }

    /// Skips unknown rule names instead of raising a configuration error.
    #[must_use = "builder methods must be chained or built"]
    pub fn allow_unknown_rules(mut self) -> Self {
        self.strict = false;
        self
    }

    /// Adds a field name to skip entirely.
    #[must_use = "builder methods must be chained or built"]
    pub fn ignore_field(mut self, name: impl Into<String>) -> Self {
        self.ignored_fields.insert(name.into());
        self
    }

    /// Sets the maximum composite nesting depth.
    #[must_use = "builder methods must be chained or built"]
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }
}

// ============================================================================
// TESTS
// ============================================================================
