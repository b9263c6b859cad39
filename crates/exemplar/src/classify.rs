//! Field classification.
//!
//! Decides which fields of a record type are *simple*, meaning eligible for
//! comparison-term generation. Rules, in priority order:
//!
//! 1. primitive numeric, boolean or character type
//! 2. text
//! 3. high-precision decimal
//! 4. optional wrapper over any value type (the wrapped type is not
//!    re-checked against rules 1-3)
//! 5. anything else (composites, references, collections) is not simple

use crate::field::{Field, FieldType, Filterable, TypeKind};

/// Returns `true` if `field` can take part in a filter predicate.
pub fn is_simple<T>(field: &Field<T>) -> bool {
    is_simple_type(field.ty)
}

/// Type-level form of [`is_simple`].
pub fn is_simple_type(ty: FieldType) -> bool {
    if is_optional_value(ty) {
        return true;
    }
    if ty.is_optional() {
        return false;
    }
    matches!(
        ty.kind(),
        TypeKind::Primitive(_) | TypeKind::Text | TypeKind::Decimal
    )
}

/// Returns `true` if `ty` is an optional wrapper over a value type.
pub fn is_optional_value(ty: FieldType) -> bool {
    ty.is_optional() && ty.kind().is_value_type()
}

/// Iterates over the simple fields of `T`, in declaration order.
///
/// # Example
///
/// ```
/// use exemplar::{simple_fields, Filterable};
///
/// #[derive(Filterable)]
/// struct Order {
///     id: u64,
///     lines: Vec<String>,
///     note: Option<String>,
/// }
///
/// let names: Vec<_> = simple_fields::<Order>().map(|f| f.name).collect();
/// assert_eq!(names, ["id", "note"]);
/// ```
pub fn simple_fields<T: Filterable>() -> impl Iterator<Item = &'static Field<T>> {
    T::FIELDS.iter().filter(|field| is_simple(*field))
}
