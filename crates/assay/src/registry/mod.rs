//! Rule registry
//!
//! Maps rule names to typed factories that parse a rule's parameter text
//! into an executable validator, and caches the parsed instances keyed by
//! `(rule-name, raw-parameter-string)`.
//!
//! The factory table is append-only after warm-up: registration takes
//! `&mut self`, so once a registry is shared behind an `Arc` it is
//! read-only except for the instance cache, which is a concurrent map.
//! Two threads may race to populate the same cache key; factories are
//! required to be deterministic, so both build equivalent immutable
//! validators and the last writer wins with no semantic effect.
//!
//! Instances never get evicted — the set of distinct `(name, parameter)`
//! pairs is the tag vocabulary of the program, small and fixed at compile
//! time.
//!
//! Polymorphic rules are registered once per element type under a lane
//! name (`min_int`, `min_uint`, `min_float`, …); the traversal engine picks
//! the lane from the field's runtime view.

use std::any::{Any, TypeId, type_name};
use std::collections::HashMap;
use std::sync::Arc;

use dashmap::DashMap;
use tracing::{debug, trace};

use crate::engine::ConfigError;
use crate::foundation::Validate;
use crate::validators::{
    ExactLength, ExactSize, InRange, Max, MaxLength, MaxSize, Min, MinLength, MinSize, OneOf,
};

// ============================================================================
// TYPES
// ============================================================================

/// A cached, shareable validator for inputs of type `T`.
pub type SharedValidator<T> = Arc<dyn Validate<Input = T> + Send + Sync>;

/// Type-erased cache slot; holds a `SharedValidator<T>` for some `T`.
type BoxedInstance = Box<dyn Any + Send + Sync>;

struct FactoryEntry {
    input_type: TypeId,
    input_name: &'static str,
    build: Box<dyn Fn(&str) -> Result<BoxedInstance, ConfigError> + Send + Sync>,
}

/// Name-keyed table of rule factories plus the parsed-instance cache.
pub struct RuleRegistry {
    factories: HashMap<String, FactoryEntry>,
    cache: DashMap<(String, String), BoxedInstance>,
}

impl std::fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleRegistry")
            .field("factories", &self.factories.len())
            .field("cached", &self.cache.len())
            .finish()
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

// ============================================================================
// REGISTRY
// ============================================================================

impl RuleRegistry {
    /// Creates an empty registry with no factories.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            factories: HashMap::new(),
            cache: DashMap::new(),
        }
    }

    /// Creates a registry pre-loaded with the built-in rule lanes.
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut registry = Self::empty();
        registry.install_builtins();
        registry
    }

    /// Registers a factory under `name`. Name collisions overwrite — last
    /// writer wins.
    pub fn register<T, F>(&mut self, name: impl Into<String>, factory: F)
    where
        T: ?Sized + 'static,
        F: Fn(&str) -> Result<SharedValidator<T>, ConfigError> + Send + Sync + 'static,
    {
        let name = name.into();
        debug!(rule = %name, input = type_name::<T>(), "registering rule factory");
        self.factories.insert(
            name,
            FactoryEntry {
                input_type: TypeId::of::<T>(),
                input_name: type_name::<T>(),
                build: Box::new(move |param| factory(param).map(|v| Box::new(v) as BoxedInstance)),
            },
        );
    }

    /// Whether a factory is registered under `name`.
    #[must_use]
    pub fn is_registered(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Number of cached parsed instances (for diagnostics).
    #[must_use]
    pub fn cached_instances(&self) -> usize {
        self.cache.len()
    }

    /// Resolves `(name, param)` to a validator, cache first.
    ///
    /// On a hit the existing instance is returned with no parsing work; on
    /// a miss the factory runs, its element type is checked against the
    /// requested `T`, and the instance is stored for reuse.
    pub fn resolve<T>(&self, name: &str, param: &str) -> Result<SharedValidator<T>, ConfigError>
    where
        T: ?Sized + 'static,
    {
        let key = (name.to_string(), param.to_string());

        if let Some(hit) = self.cache.get(&key) {
            return hit.downcast_ref::<SharedValidator<T>>().cloned().ok_or_else(|| {
                ConfigError::TypeMismatch {
                    rule: name.to_string(),
                    expected: type_name::<T>(),
                    actual: "a previously cached instance of a different element type",
                }
            });
        }

        let entry = self
            .factories
            .get(name)
            .ok_or_else(|| ConfigError::UnknownRule(name.to_string()))?;

        if entry.input_type != TypeId::of::<T>() {
            return Err(ConfigError::TypeMismatch {
                rule: name.to_string(),
                expected: type_name::<T>(),
                actual: entry.input_name,
            });
        }

        trace!(rule = %name, param = %param, "rule cache miss, building instance");
        let built = (entry.build)(param)?;
        let validator = built
            .downcast_ref::<SharedValidator<T>>()
            .cloned()
            .ok_or_else(|| ConfigError::TypeMismatch {
                rule: name.to_string(),
                expected: type_name::<T>(),
                actual: entry.input_name,
            })?;

        // Racing writers both insert equivalent instances; last wins.
        self.cache.insert(key, built);
        Ok(validator)
    }
}

// ============================================================================
// BUILT-IN LANES
// ============================================================================

impl RuleRegistry {
    fn install_builtins(&mut self) {
        // Signed integer lane
        self.register::<i64, _>("min_int", |p| {
            Ok(Arc::new(Min::new(parse_int("min", p)?)) as SharedValidator<i64>)
        });
        self.register::<i64, _>("max_int", |p| {
            Ok(Arc::new(Max::new(parse_int("max", p)?)) as SharedValidator<i64>)
        });
        self.register::<i64, _>("range_int", |p| {
            let (lo, hi) = parse_int_bounds("range", p)?;
            Ok(Arc::new(InRange::new(lo, hi)) as SharedValidator<i64>)
        });

        // Unsigned integer lane
        self.register::<u64, _>("min_uint", |p| {
            Ok(Arc::new(Min::new(parse_uint("min", p)?)) as SharedValidator<u64>)
        });
        self.register::<u64, _>("max_uint", |p| {
            Ok(Arc::new(Max::new(parse_uint("max", p)?)) as SharedValidator<u64>)
        });
        self.register::<u64, _>("range_uint", |p| {
            let (lo, hi) = parse_uint_bounds("range", p)?;
            Ok(Arc::new(InRange::new(lo, hi)) as SharedValidator<u64>)
        });

        // Float lane
        self.register::<f64, _>("min_float", |p| {
            Ok(Arc::new(Min::new(parse_float("min", p)?)) as SharedValidator<f64>)
        });
        self.register::<f64, _>("max_float", |p| {
            Ok(Arc::new(Max::new(parse_float("max", p)?)) as SharedValidator<f64>)
        });
        self.register::<f64, _>("range_float", |p| {
            let (lo, hi) = parse_float_bounds("range", p)?;
            Ok(Arc::new(InRange::new(lo, hi)) as SharedValidator<f64>)
        });

        // String length lane
        self.register::<str, _>("minlen", |p| {
            Ok(Arc::new(MinLength::new(parse_usize("minlen", p)?)) as SharedValidator<str>)
        });
        self.register::<str, _>("maxlen", |p| {
            Ok(Arc::new(MaxLength::new(parse_usize("maxlen", p)?)) as SharedValidator<str>)
        });
        self.register::<str, _>("len", |p| {
            Ok(Arc::new(ExactLength::new(parse_usize("len", p)?)) as SharedValidator<str>)
        });

        // Collection size lane
        self.register::<u64, _>("min_size", |p| {
            Ok(Arc::new(MinSize::new(parse_uint("min", p)?)) as SharedValidator<u64>)
        });
        self.register::<u64, _>("max_size", |p| {
            Ok(Arc::new(MaxSize::new(parse_uint("max", p)?)) as SharedValidator<u64>)
        });
        self.register::<u64, _>("size", |p| {
            Ok(Arc::new(ExactSize::new(parse_uint("len", p)?)) as SharedValidator<u64>)
        });

        // Fixed choice
        self.register::<str, _>("oneof", |p| {
            if p.split_whitespace().next().is_none() {
                return Err(ConfigError::InvalidParam {
                    rule: "oneof".to_string(),
                    param: p.to_string(),
                    reason: "expected a space-separated list of options".to_string(),
                });
            }
            Ok(Arc::new(OneOf::from_param(p)) as SharedValidator<str>)
        });
    }
}

// ============================================================================
// PARAMETER PARSING
// ============================================================================

fn invalid(rule: &str, param: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidParam {
        rule: rule.to_string(),
        param: param.to_string(),
        reason: reason.to_string(),
    }
}

fn parse_int(rule: &str, param: &str) -> Result<i64, ConfigError> {
    param
        .trim()
        .parse()
        .map_err(|_| invalid(rule, param, "expected an integer"))
}

fn parse_uint(rule: &str, param: &str) -> Result<u64, ConfigError> {
    param
        .trim()
        .parse()
        .map_err(|_| invalid(rule, param, "expected a non-negative integer"))
}

fn parse_usize(rule: &str, param: &str) -> Result<usize, ConfigError> {
    param
        .trim()
        .parse()
        .map_err(|_| invalid(rule, param, "expected a non-negative integer"))
}

fn parse_float(rule: &str, param: &str) -> Result<f64, ConfigError> {
    param
        .trim()
        .parse()
        .map_err(|_| invalid(rule, param, "expected a number"))
}

/// Splits a range parameter like `1:20` or `1,20` into its two halves.
fn split_bounds<'a>(rule: &str, param: &'a str) -> Result<(&'a str, &'a str), ConfigError> {
    let split = param
        .split_once(':')
        .or_else(|| param.split_once(','))
        .ok_or_else(|| invalid(rule, param, "expected `min:max`"))?;
    Ok(split)
}

fn parse_int_bounds(rule: &str, param: &str) -> Result<(i64, i64), ConfigError> {
    let (lo, hi) = split_bounds(rule, param)?;
    let (lo, hi) = (parse_int(rule, lo)?, parse_int(rule, hi)?);
    if lo > hi {
        return Err(invalid(rule, param, "min cannot be greater than max"));
    }
    Ok((lo, hi))
}

fn parse_uint_bounds(rule: &str, param: &str) -> Result<(u64, u64), ConfigError> {
    let (lo, hi) = split_bounds(rule, param)?;
    let (lo, hi) = (parse_uint(rule, lo)?, parse_uint(rule, hi)?);
    if lo > hi {
        return Err(invalid(rule, param, "min cannot be greater than max"));
    }
    Ok((lo, hi))
}

fn parse_float_bounds(rule: &str, param: &str) -> Result<(f64, f64), ConfigError> {
    let (lo, hi) = split_bounds(rule, param)?;
    let (lo, hi) = (parse_float(rule, lo)?, parse_float(rule, hi)?);
    if lo > hi {
        return Err(invalid(rule, param, "min cannot be greater than max"));
    }
    Ok((lo, hi))
}

// ============================================================================
// TESTS
// ============================================================================
