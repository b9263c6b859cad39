//! Exemplar - filter-by-example predicates for Rust struct collections.
//!
//! Hand exemplar a record whose fields are partially populated and it builds
//! a reusable predicate selecting the records whose fields match the
//! populated ones. No per-type filter code is needed:
//!
//! - `#[derive(Filterable)]` describes a struct's fields at compile time
//! - simple fields (primitives, text, decimals, optionals) become equality terms
//! - terms are ANDed in declaration order into one [`Predicate`]
//! - the predicate owns its data and can be shared across threads
//!
//! # Quick Start
//!
//! ```rust
//! use exemplar::{Filterable, Policy};
//!
//! #[derive(Debug, Filterable)]
//! struct Person {
//!     name: String,
//!     age: Option<i32>,
//! }
//!
//! let people = vec![
//!     Person { name: "Ann".into(), age: Some(30) },
//!     Person { name: "Bea".into(), age: Some(30) },
//!     Person { name: "Ann".into(), age: None },
//! ];
//!
//! // Age is left unset, so it does not constrain the match
//! let example = Person { name: "Ann".into(), age: None };
//! let predicate = exemplar::build(&example, Policy::DiscardUnset).unwrap();
//! assert_eq!(predicate.count(&people), 2);
//!
//! // Strict equality: the absent age has to match too
//! let strict = exemplar::build(&example, Policy::KeepUnset).unwrap();
//! assert_eq!(strict.filter(&people).len(), 1);
//! ```
//!
//! # Policies
//!
//! ```text
//! DiscardUnset (default):  (f == v || v is the default of f) for every field
//! KeepUnset:                f == v                            for every field
//! ```
//!
//! Under [`Policy::DiscardUnset`] an example field holding its type's default
//! (zero, `false`, empty text, `None`) is indistinguishable from one the
//! caller never set, so it doesn't constrain the match. The flip side is that
//! filtering for an explicit default value needs [`Policy::KeepUnset`].
//!
//! # Simple Fields
//!
//! | Declared type | Simple |
//! |---------------|--------|
//! | `bool`, `char`, integer and float primitives | yes |
//! | `String`, `&str` | yes |
//! | `rust_decimal::Decimal` | yes |
//! | `Option<V>` for any value type `V` | yes |
//! | structs, enums, `Box`/`Rc`/`Arc`, collections | no |

extern crate self as exemplar;

mod builder;
mod classify;
mod error;
mod expr;
mod ext;
mod field;
mod policy;
mod predicate;
mod value;

// Re-export public API
pub use builder::{build, build_from, default_term, equal_term};
pub use classify::{is_optional_value, is_simple, is_simple_type, simple_fields};
pub use error::{Error, Result};
pub use expr::{Expr, Operand};
pub use ext::{FilterBy, FilterByExt};
pub use field::{unsupported, Field, FieldType, Filterable, Primitive, Scalar, TypeKind};
pub use policy::Policy;
pub use predicate::Predicate;
pub use value::{Literal, Number, Value};

pub use rust_decimal::Decimal;

#[cfg(feature = "derive")]
pub use exemplar_macros::Filterable;
