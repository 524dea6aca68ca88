//! Integration suite: derive + traversal engine end to end.

mod concurrency;
mod cross_field;
mod dive;
mod struct_rules;
mod traversal;
