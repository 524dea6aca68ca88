//! Built-in generic constraint validators
//!
//! Small, stateless, statically-typed validators implementing
//! [`Validate`](crate::foundation::Validate). They are usable directly:
//!
//! ```rust,ignore
//! use assay::validators::{min, min_length};
//! use assay::foundation::Validate;
//!
//! assert!(min(5).validate(&7).is_ok());
//! assert!(min_length(3).validate("hi").is_err());
//! ```
//!
//! or through the rule registry, which parses rule parameters once, caches
//! the instance and shares it across threads.
//!
//! - **Numeric**: [`Min`], [`Max`], [`InRange`], [`GreaterThan`], [`LessThan`]
//! - **String**: [`MinLength`], [`MaxLength`], [`ExactLength`], [`LengthRange`], [`NotEmpty`]
//! - **Collection**: [`MinSize`], [`MaxSize`], [`ExactSize`]
//! - **Choice**: [`OneOf`]
//! - **Content**: [`Alpha`], [`Alphanumeric`], [`Digits`]

pub mod content;
pub mod length;
pub mod range;
pub mod set;
pub mod size;

pub use content::{Alpha, Alphanumeric, Digits, alpha, alphanumeric, digits};
pub use length::{
    ExactLength, LengthMode, LengthRange, MaxLength, MinLength, NotEmpty, exact_length,
    length_range, max_length, min_length, not_empty,
};
pub use range::{
    GreaterThan, InRange, LessThan, Max, Min, greater_than, in_range, less_than, max, min,
};
pub use set::{OneOf, one_of};
pub use size::{ExactSize, MaxSize, MinSize, exact_size, max_size, min_size};
