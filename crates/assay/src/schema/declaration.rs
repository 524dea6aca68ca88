//! Constraint declaration parsing
//!
//! A declaration is the comma-separated rule list attached to one field:
//! `required,minlen=3` or `omitempty,dive,keys,alphanum,endkeys,min=1`.
//! Each rule is `name` or `name=parameter`; the split happens once on the
//! first `=` and the pieces are never re-scanned. Order is significant —
//! rules evaluate in declaration order.
//!
//! Reserved names with traversal effects:
//!
//! - `omitempty` — skip all non-`required*` rules when the value is empty
//! - `dive` — apply the remaining rule tail to every element of a
//!   collection (the tail may itself contain another `dive`)
//! - `keys` … `endkeys` — inside a `dive` tail, partition the rules that
//!   apply to map keys from those that apply to map values
//!
//! Declarations are parsed once per type (the derive macro builds the
//! schema in a `LazyLock`); parse failures are configuration errors
//! surfaced on first use of the type, never silent.

use thiserror::Error;

// ============================================================================
// DATA MODEL
// ============================================================================

/// One `(name, parameter?)` pair from a declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSpec {
    /// The rule name, e.g. `minlen`.
    pub name: String,
    /// The raw parameter text after `=`, if any.
    pub param: Option<String>,
}

impl RuleSpec {
    /// The raw parameter, or `""` when the rule takes none.
    #[must_use]
    pub fn param_str(&self) -> &str {
        self.param.as_deref().unwrap_or("")
    }

    /// Whether this rule belongs to the `required*` family, which is never
    /// skipped by the empty-value short-circuit.
    #[must_use]
    pub fn is_required_family(&self) -> bool {
        self.name.starts_with("required")
    }
}

/// A parsed, ordered constraint declaration for one field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Declaration {
    /// `omitempty` marker: suppress non-presence rules on empty values.
    pub omit_empty: bool,
    /// Rules applying to the field value itself, in declaration order.
    pub rules: Vec<RuleSpec>,
    /// Element-wise rule tail introduced by `dive`.
    pub dive: Option<Box<DiveSpec>>,
}

/// The element-wise part of a declaration after a `dive` marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiveSpec {
    /// Rules for map keys (`keys` … `endkeys` segment).
    pub keys: Vec<RuleSpec>,
    /// Declaration applied to every element / map value; may dive again.
    pub element: Declaration,
}

// ============================================================================
// PARSE ERRORS
// ============================================================================

/// A malformed constraint declaration. Always a configuration error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeclarationError {
    /// A rule token was empty or started with `=`.
    #[error("empty rule name")]
    EmptyRule,
    /// A marker that takes no parameter was given one.
    #[error("`{0}` takes no parameter")]
    UnexpectedParam(String),
    /// `keys` appeared outside a `dive` tail.
    #[error("`keys` is only valid directly after `dive`")]
    KeysOutsideDive,
    /// A `keys` segment was never closed.
    #[error("`keys` segment missing closing `endkeys`")]
    UnterminatedKeys,
    /// `endkeys` without a preceding `keys`.
    #[error("`endkeys` without a preceding `keys`")]
    StrayEndKeys,
}

// ============================================================================
// PARSER
// ============================================================================

impl Declaration {
    /// Parses a declaration from its tag text.
    pub fn parse(text: &str) -> Result<Self, DeclarationError> {
        let tokens: Vec<&str> = text.split(',').map(str::trim).collect();
        Self::parse_tokens(&tokens)
    }

    fn parse_tokens(tokens: &[&str]) -> Result<Self, DeclarationError> {
        let mut decl = Self::default();

        let mut i = 0;
        while i < tokens.len() {
            let token = tokens[i];
            i += 1;

            // Tolerate stray separators ("a,,b"), like the tag grammar
            // this models.
            if token.is_empty() {
                continue;
            }

            let spec = parse_rule(token)?;
            match spec.name.as_str() {
                "omitempty" => {
                    reject_param(&spec)?;
                    decl.omit_empty = true;
                }
                "dive" => {
                    reject_param(&spec)?;
                    decl.dive = Some(Box::new(Self::parse_dive(&tokens[i..])?));
                    return Ok(decl);
                }
                "keys" => return Err(DeclarationError::KeysOutsideDive),
                "endkeys" => return Err(DeclarationError::StrayEndKeys),
                _ => decl.rules.push(spec),
            }
        }

        Ok(decl)
    }

    /// Parses the tail after a `dive` marker: an optional `keys`…`endkeys`
    /// segment followed by the element declaration.
    fn parse_dive(rest: &[&str]) -> Result<DiveSpec, DeclarationError> {
        if rest.first().copied() == Some("keys") {
            let end = rest
                .iter()
                .position(|t| *t == "endkeys")
                .ok_or(DeclarationError::UnterminatedKeys)?;

            let mut keys = Vec::with_capacity(end - 1);
            for token in &rest[1..end] {
                if token.is_empty() {
                    continue;
                }
                keys.push(parse_rule(token)?);
            }

            let element = Declaration::parse_tokens(&rest[end + 1..])?;
            return Ok(DiveSpec { keys, element });
        }

        let element = Declaration::parse_tokens(rest)?;
        Ok(DiveSpec {
            keys: Vec::new(),
            element,
        })
    }
}

/// Splits one token on the first `=` into name and parameter.
fn parse_rule(token: &str) -> Result<RuleSpec, DeclarationError> {
    let (name, param) = match token.split_once('=') {
        Some((name, param)) => (name.trim(), Some(param.trim().to_string())),
        None => (token, None),
    };
    if name.is_empty() {
        return Err(DeclarationError::EmptyRule);
    }
    Ok(RuleSpec {
        name: name.to_string(),
        param,
    })
}

fn reject_param(spec: &RuleSpec) -> Result<(), DeclarationError> {
    if spec.param.is_some() {
        return Err(DeclarationError::UnexpectedParam(spec.name.clone()));
    }
    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================
