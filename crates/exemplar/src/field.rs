//! Record description: field descriptors and the traits behind them.
//!
//! A record type implements [`Filterable`] by exposing a static table of
//! [`Field`] descriptors, one per declared field, in declaration order. The
//! table is normally generated by `#[derive(Filterable)]`, but can be written
//! by hand.

use std::fmt;

use rust_decimal::Decimal;

use crate::value::{Literal, Number, Value};

/// Primitive numeric, boolean and character types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    Bool,
    Char,
    I8,
    I16,
    I32,
    I64,
    Isize,
    U8,
    U16,
    U32,
    U64,
    Usize,
    F32,
    F64,
}

impl Primitive {
    /// Returns the Rust name of this primitive.
    pub fn as_str(self) -> &'static str {
        match self {
            Primitive::Bool => "bool",
            Primitive::Char => "char",
            Primitive::I8 => "i8",
            Primitive::I16 => "i16",
            Primitive::I32 => "i32",
            Primitive::I64 => "i64",
            Primitive::Isize => "isize",
            Primitive::U8 => "u8",
            Primitive::U16 => "u16",
            Primitive::U32 => "u32",
            Primitive::U64 => "u64",
            Primitive::Usize => "usize",
            Primitive::F32 => "f32",
            Primitive::F64 => "f64",
        }
    }

    /// Returns the default value of this primitive as a literal.
    pub fn zero(self) -> Literal {
        match self {
            Primitive::Bool => Literal::Bool(false),
            Primitive::Char => Literal::Char('\0'),
            Primitive::I8 | Primitive::I16 | Primitive::I32 | Primitive::I64 | Primitive::Isize => {
                Literal::Number(Number::I64(0))
            }
            Primitive::U8 | Primitive::U16 | Primitive::U32 | Primitive::U64 | Primitive::Usize => {
                Literal::Number(Number::U64(0))
            }
            Primitive::F32 | Primitive::F64 => Literal::Number(Number::F64(0.0)),
        }
    }
}

/// The shape of a declared type, ignoring optionality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    /// Primitive numeric, boolean or character type.
    Primitive(Primitive),
    /// Text (`String`, `&str`).
    Text,
    /// High-precision fixed-point decimal.
    Decimal,
    /// Struct or enum stored inline. Holds the type name.
    Composite(&'static str),
    /// Boxed or shared pointer to another record (navigation field).
    Reference(&'static str),
    /// Sequence, set or map.
    Collection(&'static str),
}

impl TypeKind {
    /// Returns `true` for types stored inline in the record.
    ///
    /// References and collections point elsewhere and are not value types.
    pub fn is_value_type(self) -> bool {
        !matches!(self, TypeKind::Reference(_) | TypeKind::Collection(_))
    }
}

/// The declared type of a field.
///
/// # Example
///
/// ```
/// use exemplar::{FieldType, Primitive, TypeKind};
///
/// const AGE: FieldType = FieldType::optional(TypeKind::Primitive(Primitive::U8));
/// assert!(AGE.is_optional());
/// assert_eq!(AGE.to_string(), "Option<u8>");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldType {
    kind: TypeKind,
    optional: bool,
}

impl FieldType {
    /// A non-optional type.
    pub const fn new(kind: TypeKind) -> Self {
        FieldType {
            kind,
            optional: false,
        }
    }

    /// An optional wrapper around `kind`.
    pub const fn optional(kind: TypeKind) -> Self {
        FieldType {
            kind,
            optional: true,
        }
    }

    /// Wraps this type in an optional. Already optional types are unchanged.
    pub const fn into_optional(self) -> Self {
        FieldType::optional(self.kind)
    }

    /// The underlying kind, without the optional wrapper.
    pub fn kind(self) -> TypeKind {
        self.kind
    }

    /// Returns `true` if this type is an optional wrapper.
    pub fn is_optional(self) -> bool {
        self.optional
    }

    /// Returns the default ("unset") value of this type.
    ///
    /// Zero, `false`, `'\0'` or empty text for value types; absent for
    /// optional and reference types. Composites and collections have no
    /// comparable default.
    pub fn zero_value(self) -> Option<Literal> {
        if self.optional {
            return Some(Literal::Absent);
        }
        match self.kind {
            TypeKind::Primitive(p) => Some(p.zero()),
            TypeKind::Text => Some(Literal::Text(String::new())),
            TypeKind::Decimal => Some(Literal::Decimal(Decimal::ZERO)),
            TypeKind::Reference(_) => Some(Literal::Absent),
            TypeKind::Composite(_) | TypeKind::Collection(_) => None,
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self.kind {
            TypeKind::Primitive(p) => p.as_str(),
            TypeKind::Text => "String",
            TypeKind::Decimal => "Decimal",
            TypeKind::Composite(name) | TypeKind::Reference(name) | TypeKind::Collection(name) => {
                name
            }
        };
        if self.optional {
            write!(f, "Option<{name}>")
        } else {
            f.write_str(name)
        }
    }
}

/// Descriptor for one field of a record type.
///
/// Holds the field name, its declared type and a plain function pointer that
/// reads the field from a record. Descriptors live in `'static` tables, so
/// predicates can refer to them without borrowing anything.
pub struct Field<T> {
    /// Field name, unique within the record type.
    pub name: &'static str,
    /// Declared type.
    pub ty: FieldType,
    get: for<'a> fn(&'a T) -> Value<'a>,
}

impl<T> Field<T> {
    /// Creates a field descriptor.
    pub const fn new(
        name: &'static str,
        ty: FieldType,
        get: for<'a> fn(&'a T) -> Value<'a>,
    ) -> Self {
        Field { name, ty, get }
    }

    /// Reads this field from a record.
    pub fn value<'a>(&self, record: &'a T) -> Value<'a> {
        (self.get)(record)
    }

    /// Returns `true` if this field can take part in a filter predicate.
    pub fn is_simple(&self) -> bool {
        crate::classify::is_simple(self)
    }
}

impl<T> Clone for Field<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Field<T> {}

impl<T> fmt::Debug for Field<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("ty", &self.ty)
            .finish()
    }
}

/// Accessor for fields that have no comparable value.
///
/// Used by `#[derive(Filterable)]` for composite, reference and collection
/// fields.
pub fn unsupported<T>(_record: &T) -> Value<'_> {
    Value::Unsupported
}

/// Trait for record types that can seed and be matched by a predicate.
///
/// This trait is typically derived using `#[derive(Filterable)]`, but can
/// also be implemented manually.
///
/// # Derive Usage
///
/// ```
/// use exemplar::{Filterable, Policy};
///
/// #[derive(Filterable)]
/// struct Person {
///     name: String,
///     age: Option<u32>,
/// }
///
/// let people = vec![
///     Person { name: "Ann".into(), age: Some(30) },
///     Person { name: "Bea".into(), age: Some(30) },
/// ];
///
/// let example = Person { name: "Ann".into(), age: None };
/// let predicate = exemplar::build(&example, Policy::DiscardUnset).unwrap();
/// assert_eq!(predicate.count(&people), 1);
/// ```
///
/// # Manual Implementation
///
/// ```
/// use exemplar::{Field, FieldType, Filterable, Scalar, Value};
///
/// struct Person {
///     name: String,
///     age: Option<u32>,
/// }
///
/// impl Filterable for Person {
///     const FIELDS: &'static [Field<Self>] = &[
///         Field::new("name", <String as Scalar>::FIELD_TYPE, |p| p.name.to_value()),
///         Field::new("age", <Option<u32> as Scalar>::FIELD_TYPE, |p| p.age.to_value()),
///     ];
/// }
///
/// assert_eq!(Person::FIELDS.len(), 2);
/// ```
pub trait Filterable: Sized + 'static {
    /// All declared fields, in declaration order.
    const FIELDS: &'static [Field<Self>];

    /// Name of the record type, used in errors and logs.
    fn record_name() -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Looks up a field descriptor by name.
    fn field(name: &str) -> Option<&'static Field<Self>> {
        Self::FIELDS.iter().find(|field| field.name == name)
    }

    /// Reads a field by name.
    ///
    /// Returns [`Value::Unsupported`] if the field doesn't exist.
    fn field_value(&self, name: &str) -> Value<'_> {
        match Self::field(name) {
            Some(field) => field.value(self),
            None => Value::Unsupported,
        }
    }
}

/// Types with a direct equality-comparable value.
///
/// Implemented for the primitive numeric, boolean and character types,
/// `String`, `&str`, [`Decimal`] and `Option` of any of them. Implement it for
/// a newtype or a C-like enum and mark the field `#[filter(scalar)]` to make
/// it filterable.
///
/// # Example
///
/// ```
/// use exemplar::{FieldType, Number, Primitive, Scalar, TypeKind, Value};
///
/// #[derive(Clone, Copy)]
/// enum Status {
///     Open = 1,
///     Closed = 2,
/// }
///
/// impl Scalar for Status {
///     const FIELD_TYPE: FieldType = FieldType::new(TypeKind::Primitive(Primitive::U32));
///
///     fn to_value(&self) -> Value<'_> {
///         Value::Number(Number::from(*self as u32))
///     }
/// }
///
/// assert_eq!(Status::Closed.to_value(), Value::Number(Number::U64(2)));
/// ```
///
/// `Option` of a struct or enum is read through this trait too, so an
/// optional field whose inner type doesn't implement it fails to derive:
///
/// ```compile_fail
/// use exemplar::Filterable;
///
/// struct Address {
///     city: String,
/// }
///
/// #[derive(Filterable)]
/// struct Customer {
///     name: String,
///     home: Option<Address>,
/// }
/// ```
///
/// Skipping the field makes it derive:
///
/// ```
/// use exemplar::Filterable;
///
/// struct Address {
///     city: String,
/// }
///
/// #[derive(Filterable)]
/// struct Customer {
///     name: String,
///     #[filter(skip)]
///     home: Option<Address>,
/// }
///
/// assert_eq!(Customer::FIELDS.len(), 1);
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` can't be compared as a filter value",
    label = "this field is read through `Scalar`",
    note = "implement `exemplar::Scalar` for it, or mark the field `#[filter(skip)]`"
)]
pub trait Scalar {
    /// Declared type reported in field descriptors.
    const FIELD_TYPE: FieldType;

    /// Returns the value for comparison.
    fn to_value(&self) -> Value<'_>;
}

macro_rules! scalar_number {
    ($($ty:ty => $prim:ident),+ $(,)?) => {
        $(
            impl Scalar for $ty {
                const FIELD_TYPE: FieldType = FieldType::new(TypeKind::Primitive(Primitive::$prim));

                fn to_value(&self) -> Value<'_> {
                    Value::Number(Number::from(*self))
                }
            }
        )+
    };
}

scalar_number!(
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    isize => Isize,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    usize => Usize,
    f32 => F32,
    f64 => F64,
);

impl Scalar for bool {
    const FIELD_TYPE: FieldType = FieldType::new(TypeKind::Primitive(Primitive::Bool));

    fn to_value(&self) -> Value<'_> {
        Value::Bool(*self)
    }
}

impl Scalar for char {
    const FIELD_TYPE: FieldType = FieldType::new(TypeKind::Primitive(Primitive::Char));

    fn to_value(&self) -> Value<'_> {
        Value::Char(*self)
    }
}

impl Scalar for String {
    const FIELD_TYPE: FieldType = FieldType::new(TypeKind::Text);

    fn to_value(&self) -> Value<'_> {
        Value::Text(self)
    }
}

impl Scalar for &str {
    const FIELD_TYPE: FieldType = FieldType::new(TypeKind::Text);

    fn to_value(&self) -> Value<'_> {
        Value::Text(self)
    }
}

impl Scalar for Decimal {
    const FIELD_TYPE: FieldType = FieldType::new(TypeKind::Decimal);

    fn to_value(&self) -> Value<'_> {
        Value::Decimal(*self)
    }
}

impl<S: Scalar> Scalar for Option<S> {
    const FIELD_TYPE: FieldType = S::FIELD_TYPE.into_optional();

    fn to_value(&self) -> Value<'_> {
        match self {
            Some(inner) => inner.to_value(),
            None => Value::Absent,
        }
    }
}
