//! Predicate synthesis from an example record.
//!
//! [`build`] enumerates the simple fields of a record type, reads each one
//! from the example, turns it into a comparison term under the selected
//! [`Policy`] and folds the terms into one conjunction:
//!
//! ```text
//! DiscardUnset:  (f0 == v0 || unset(v0)) && (f1 == v1 || unset(v1)) && ...
//! KeepUnset:     f0 == v0 && f1 == v1 && ...
//! ```
//!
//! `unset(v)` is the default term applied to the example's own field. It is
//! decided while building, since the predicate does not keep the example.

use tracing::{debug, trace};

use crate::classify::{is_optional_value, simple_fields};
use crate::error::{Error, Result};
use crate::expr::{Expr, Operand};
use crate::field::{Field, Filterable};
use crate::policy::Policy;
use crate::predicate::Predicate;
use crate::value::Literal;

/// Builds a predicate matching records whose simple fields equal the example's.
///
/// # Errors
///
/// - [`Error::UnsupportedType`] if `T` has no simple field.
/// - [`Error::UnreadableField`] if a simple field's accessor yields
///   [`Value::Unsupported`](crate::Value::Unsupported).
///
/// # Example
///
/// ```
/// use exemplar::{build, Filterable, Policy};
///
/// #[derive(Filterable)]
/// struct Person {
///     name: String,
///     age: Option<i32>,
/// }
///
/// let example = Person { name: "Ann".into(), age: None };
/// let predicate = build(&example, Policy::DiscardUnset).unwrap();
///
/// assert!(predicate.matches(&Person { name: "Ann".into(), age: Some(30) }));
/// assert!(!predicate.matches(&Person { name: "Bea".into(), age: Some(30) }));
///
/// let strict = build(&example, Policy::KeepUnset).unwrap();
/// assert!(!strict.matches(&Person { name: "Ann".into(), age: Some(30) }));
/// assert!(strict.matches(&Person { name: "Ann".into(), age: None }));
/// ```
pub fn build<T: Filterable>(example: &T, policy: Policy) -> Result<Predicate<T>> {
    build_from(Some(example), policy)
}

/// Builds a predicate from an example that may be missing.
///
/// Accepts the result of a lookup directly, such as `records.first()`.
///
/// # Errors
///
/// [`Error::InvalidArgument`] if `example` is `None`, plus everything
/// [`build`] returns.
///
/// ```
/// use exemplar::{build_from, Error, Filterable, Policy};
///
/// #[derive(Filterable)]
/// struct Person {
///     name: String,
/// }
///
/// let people: Vec<Person> = Vec::new();
/// let err = build_from(people.first(), Policy::DiscardUnset).unwrap_err();
/// assert_eq!(err, Error::InvalidArgument("example"));
/// ```
pub fn build_from<T: Filterable>(example: Option<&T>, policy: Policy) -> Result<Predicate<T>> {
    let example = example.ok_or(Error::InvalidArgument("example"))?;

    let fields: Vec<&'static Field<T>> = simple_fields::<T>().collect();
    let Some((first, rest)) = fields.split_first() else {
        return Err(Error::UnsupportedType {
            record: T::record_name(),
        });
    };

    // First term seeds the fold, the rest are ANDed in declaration order
    let seed = comparison_term(*first, example, policy)?;
    let expr = rest.iter().try_fold(seed, |acc, field| {
        comparison_term(*field, example, policy).map(|term| acc.and(term))
    })?;

    debug!(
        record = T::record_name(),
        %policy,
        terms = fields.len(),
        "built filter predicate"
    );

    Ok(Predicate::new(expr, policy, fields.len()))
}

fn comparison_term<T: Filterable>(
    field: &'static Field<T>,
    example: &T,
    policy: Policy,
) -> Result<Expr<T>> {
    let value = field
        .value(example)
        .to_literal()
        .ok_or(Error::UnreadableField {
            record: T::record_name(),
            field: field.name,
        })?;
    trace!(field = field.name, ty = %field.ty, %value, "comparison term");

    let term = equal_term(field, value);
    Ok(match policy {
        Policy::DiscardUnset => term.or(Expr::Const(default_term(field).eval(example))),
        Policy::KeepUnset => term,
    })
}

/// Builds `record.field == value`, adapting `value` to the field's type.
///
/// A concrete value compared with an optional field is widened to the
/// optional representation, so an absent record field never matches it. An
/// absent value becomes the field's absent marker and matches only absent
/// record fields.
pub fn equal_term<T>(field: &'static Field<T>, value: Literal) -> Expr<T> {
    let operand = if value.is_absent() {
        Operand::Absent
    } else if is_optional_value(field.ty) {
        Operand::Present(value)
    } else {
        Operand::Value(value)
    };
    Expr::field_eq(field, operand)
}

/// Builds `record.field == zero_value(field.ty)`.
///
/// Types without a comparable default produce `false`.
pub fn default_term<T>(field: &'static Field<T>) -> Expr<T> {
    match field.ty.zero_value() {
        Some(Literal::Absent) => Expr::field_eq(field, Operand::Absent),
        Some(zero) => Expr::field_eq(field, Operand::Value(zero)),
        None => Expr::Const(false),
    }
}
