//! Proc macros for exemplar.
//!
//! This crate provides the derive macro that describes a struct's fields for
//! filter-by-example predicates. It is re-exported by `exemplar` behind the
//! default `derive` feature and rarely needs to be depended on directly.
//!
//! # Available Macros
//!
//! - [`Filterable`] - Generate the `Filterable` field table for a struct
//!
//! # Examples
//!
//! For working examples, see `exemplar/tests/filterable_derive.rs`.

mod filterable;

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

/// Derives the `Filterable` trait for structs with named fields.
///
/// Every field, in declaration order, becomes a descriptor in
/// `Filterable::FIELDS`. Fields whose type is a primitive, text
/// (`String`, `&str`), `Decimal` or an `Option` of an inline value are read
/// through the `Scalar` trait and take part in predicates. Every other field
/// is listed with its kind but never read.
///
/// # Field Attributes
///
/// | Attribute | Description |
/// |-----------|-------------|
/// | `skip` | Leave the field out of the table |
/// | `scalar` | Read the field through its `Scalar` impl (newtypes, C-like enums) |
/// | `rename = "..."` | Use a custom field name |
///
/// # Generated Code
///
/// The macro generates:
///
/// 1. Field name constants (e.g., `Person::NAME`, `Person::AGE`)
/// 2. One hidden accessor function per scalar field
/// 3. Implementation of `Filterable` with `FIELDS` and `record_name()`
///
/// # Example
///
/// ```ignore
/// use exemplar::{Filterable, Policy};
///
/// #[derive(Filterable)]
/// struct Person {
///     name: String,
///     age: Option<u32>,
///
///     #[filter(skip)]
///     password_hash: String,
///
///     // Listed, never compared
///     tags: Vec<String>,
/// }
///
/// let example = Person {
///     name: "Ann".into(),
///     age: None,
///     password_hash: String::new(),
///     tags: Vec::new(),
/// };
/// let predicate = exemplar::build(&example, Policy::DiscardUnset)?;
/// assert_eq!(predicate.term_count(), 2);
/// assert_eq!(Person::field(Person::AGE).unwrap().name, "age");
/// ```
///
/// # Optional Composites
///
/// `Option<V>` of a struct or enum `V` counts as a value type, so `V` must
/// implement `Scalar`. Mark the field `#[filter(skip)]` otherwise:
///
/// ```ignore
/// use exemplar::{FieldType, Filterable, Number, Primitive, Scalar, TypeKind, Value};
///
/// #[derive(Clone, Copy)]
/// enum Status { Open, Closed }
///
/// impl Scalar for Status {
///     const FIELD_TYPE: FieldType = FieldType::new(TypeKind::Primitive(Primitive::U8));
///
///     fn to_value(&self) -> Value<'_> {
///         Value::Number(Number::from(*self as u8))
///     }
/// }
///
/// #[derive(Filterable)]
/// struct Ticket {
///     #[filter(scalar)]
///     status: Status,
///     previous: Option<Status>,
/// }
/// ```
///
/// # Compile-Time Errors
///
/// - enums, unions, tuple and unit structs
/// - two fields sharing a name after `rename`
/// - unknown `#[filter(...)]` options, or `skip` combined with `scalar`
/// - a scalar-read field whose type doesn't implement `Scalar`
#[proc_macro_derive(Filterable, attributes(filter))]
pub fn filterable_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    filterable::filterable_derive_impl(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
