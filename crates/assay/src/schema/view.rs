//! Runtime field views
//!
//! [`FieldView`] is the engine's uniform, borrowed view of one field value:
//! scalars, strings, collections, nested composites. It replaces the dynamic
//! field enumeration a reflection-based validator would do — the [`Inspect`]
//! impls below dereference `Option` and `Box` structurally, so by the time
//! the engine sees a view, pointer and optional wrappers are already
//! unwrapped (a `None` optional becomes [`FieldView::None`]).
//!
//! Shared pointers (`Rc`, `Arc`) deliberately have no `Inspect` impl: they
//! are the only safe way to build a cyclic value graph, and the traversal
//! guards depth, not identity.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::hash::BuildHasher;

use super::Validatable;

// ============================================================================
// FIELD VIEW
// ============================================================================

/// A borrowed runtime view of a single field value.
#[derive(Clone)]
pub enum FieldView<'a> {
    /// A string value.
    Str(&'a str),
    /// A signed integer, widened to `i64`.
    Int(i64),
    /// An unsigned integer, widened to `u64`.
    UInt(u64),
    /// A floating-point value, widened to `f64`.
    Float(f64),
    /// A boolean value.
    Bool(bool),
    /// A sequence; element views in declaration order.
    List(Vec<FieldView<'a>>),
    /// An associative structure; (key, value) view pairs in iteration order.
    Map(Vec<(FieldView<'a>, FieldView<'a>)>),
    /// A nested composite that carries its own schema.
    Nested(&'a dyn Validatable),
    /// An absent optional (`Option::None`).
    None,
}

impl FieldView<'_> {
    /// A short, stable name for the view's kind, used in error messages.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Str(_) => "string",
            Self::Int(_) => "integer",
            Self::UInt(_) => "unsigned integer",
            Self::Float(_) => "float",
            Self::Bool(_) => "boolean",
            Self::List(_) => "list",
            Self::Map(_) => "map",
            Self::Nested(_) => "struct",
            Self::None => "none",
        }
    }

    /// Returns true for an absent optional.
    #[must_use]
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Whether the value counts as "empty" for `required` / `omitempty`.
    ///
    /// Empty means: zero-length string or collection, absent optional, or a
    /// zero-value scalar (`0`, `0.0`, `false`). Nested composites are never
    /// empty — presence of the struct is what `required` checks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Str(s) => s.is_empty(),
            Self::Int(v) => *v == 0,
            Self::UInt(v) => *v == 0,
            Self::Float(v) => *v == 0.0,
            Self::Bool(b) => !b,
            Self::List(items) => items.is_empty(),
            Self::Map(entries) => entries.is_empty(),
            Self::Nested(_) => false,
            Self::None => true,
        }
    }

    /// The element count of a string or collection, if the view has one.
    #[must_use]
    pub fn len(&self) -> Option<u64> {
        match self {
            Self::Str(s) => Some(s.chars().count() as u64),
            Self::List(items) => Some(items.len() as u64),
            Self::Map(entries) => Some(entries.len() as u64),
            _ => Option::None,
        }
    }

    /// Renders a scalar value for error reporting and cross-field matching.
    ///
    /// Composite views render as `None`: the offending value of a failed
    /// list constraint is not the whole list.
    #[must_use]
    pub fn render(&self) -> Option<String> {
        match self {
            Self::Str(s) => Some((*s).to_string()),
            Self::Int(v) => Some(v.to_string()),
            Self::UInt(v) => Some(v.to_string()),
            Self::Float(v) => Some(v.to_string()),
            Self::Bool(b) => Some(b.to_string()),
            _ => Option::None,
        }
    }
}

impl fmt::Debug for FieldView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => f.debug_tuple("Str").field(s).finish(),
            Self::Int(v) => f.debug_tuple("Int").field(v).finish(),
            Self::UInt(v) => f.debug_tuple("UInt").field(v).finish(),
            Self::Float(v) => f.debug_tuple("Float").field(v).finish(),
            Self::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Self::List(items) => f.debug_tuple("List").field(items).finish(),
            Self::Map(entries) => f.debug_tuple("Map").field(entries).finish(),
            Self::Nested(v) => f.debug_tuple("Nested").field(&v.schema().name).finish(),
            Self::None => f.write_str("None"),
        }
    }
}

// ============================================================================
// INSPECT
// ============================================================================

/// Produces a [`FieldView`] for a value.
///
/// Leaf impls cover the scalar, string and collection types a validated
/// struct is built from; `#[derive(Validatable)]` adds an impl returning
/// [`FieldView::Nested`] for each derived composite.
pub trait Inspect {
    /// Returns the runtime view of this value.
    fn view(&self) -> FieldView<'_>;
}

impl Inspect for str {
    fn view(&self) -> FieldView<'_> {
        FieldView::Str(self)
    }
}

impl Inspect for String {
    fn view(&self) -> FieldView<'_> {
        FieldView::Str(self.as_str())
    }
}

impl Inspect for bool {
    fn view(&self) -> FieldView<'_> {
        FieldView::Bool(*self)
    }
}

macro_rules! inspect_int {
    ($($ty:ty),+) => {
        $(
            impl Inspect for $ty {
                fn view(&self) -> FieldView<'_> {
                    FieldView::Int(*self as i64)
                }
            }
        )+
    };
}

macro_rules! inspect_uint {
    ($($ty:ty),+) => {
        $(
            impl Inspect for $ty {
                fn view(&self) -> FieldView<'_> {
                    FieldView::UInt(*self as u64)
                }
            }
        )+
    };
}

inspect_int!(i8, i16, i32, isize);
inspect_uint!(u8, u16, u32, usize);

impl Inspect for i64 {
    fn view(&self) -> FieldView<'_> {
        FieldView::Int(*self)
    }
}

impl Inspect for u64 {
    fn view(&self) -> FieldView<'_> {
        FieldView::UInt(*self)
    }
}

impl Inspect for f32 {
    fn view(&self) -> FieldView<'_> {
        FieldView::Float(f64::from(*self))
    }
}

impl Inspect for f64 {
    fn view(&self) -> FieldView<'_> {
        FieldView::Float(*self)
    }
}

impl<T: Inspect> Inspect for Option<T> {
    fn view(&self) -> FieldView<'_> {
        match self {
            Some(value) => value.view(),
            None => FieldView::None,
        }
    }
}

impl<T: Inspect + ?Sized> Inspect for Box<T> {
    fn view(&self) -> FieldView<'_> {
        (**self).view()
    }
}

impl<T: Inspect> Inspect for Vec<T> {
    fn view(&self) -> FieldView<'_> {
        FieldView::List(self.iter().map(Inspect::view).collect())
    }
}

impl<T: Inspect> Inspect for [T] {
    fn view(&self) -> FieldView<'_> {
        FieldView::List(self.iter().map(Inspect::view).collect())
    }
}

impl<K: Inspect, V: Inspect, S: BuildHasher> Inspect for HashMap<K, V, S> {
    fn view(&self) -> FieldView<'_> {
        FieldView::Map(self.iter().map(|(k, v)| (k.view(), v.view())).collect())
    }
}

impl<K: Inspect, V: Inspect> Inspect for BTreeMap<K, V> {
    fn view(&self) -> FieldView<'_> {
        FieldView::Map(self.iter().map(|(k, v)| (k.view(), v.view())).collect())
    }
}

// ============================================================================
// TESTS
// ============================================================================
