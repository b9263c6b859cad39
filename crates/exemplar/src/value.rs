//! Runtime value types for field comparison.
//!
//! A [`Value`] is borrowed from a record when a field is read. A [`Literal`]
//! owns its data so it can live inside a predicate after the example that
//! produced it is gone.

use std::fmt;

use rust_decimal::Decimal;

/// Runtime value of a field, borrowed from the source record.
///
/// # Example
///
/// ```
/// use exemplar::{Number, Value};
///
/// struct Person {
///     name: String,
///     age: Option<u8>,
/// }
///
/// fn age(person: &Person) -> Value<'_> {
///     match person.age {
///         Some(age) => Value::Number(Number::from(age)),
///         None => Value::Absent,
///     }
/// }
///
/// let ann = Person { name: "Ann".into(), age: None };
/// assert!(age(&ann).is_absent());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value<'a> {
    /// Boolean value.
    Bool(bool),
    /// Character value.
    Char(char),
    /// Numeric value.
    Number(Number),
    /// Text value (borrowed).
    Text(&'a str),
    /// High-precision decimal value.
    Decimal(Decimal),
    /// Optional field holding no value.
    Absent,
    /// Field is not simple and has no comparable value.
    Unsupported,
}

impl<'a> Value<'a> {
    /// Returns `true` if this is an `Absent` value.
    pub fn is_absent(&self) -> bool {
        matches!(self, Value::Absent)
    }

    /// Returns `true` if this is an `Unsupported` value.
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Value::Unsupported)
    }

    /// Extracts the text value, if present.
    pub fn as_str(&self) -> Option<&'a str> {
        match *self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Extracts the number value, if present.
    pub fn as_number(&self) -> Option<Number> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Extracts the boolean value, if present.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Extracts the decimal value, if present.
    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            Value::Decimal(d) => Some(*d),
            _ => None,
        }
    }

    /// Copies this value into an owned [`Literal`].
    ///
    /// Returns `None` for [`Value::Unsupported`], which has no literal form.
    pub fn to_literal(&self) -> Option<Literal> {
        match *self {
            Value::Bool(b) => Some(Literal::Bool(b)),
            Value::Char(c) => Some(Literal::Char(c)),
            Value::Number(n) => Some(Literal::Number(n)),
            Value::Text(s) => Some(Literal::Text(s.to_owned())),
            Value::Decimal(d) => Some(Literal::Decimal(d)),
            Value::Absent => Some(Literal::Absent),
            Value::Unsupported => None,
        }
    }
}

/// Numeric value supporting all primitive numeric types.
///
/// Numbers are stored in one of three variants:
/// - `I64` for signed integers
/// - `U64` for unsigned integers
/// - `F64` for floating point
///
/// A given field always produces the same variant, so equality compares
/// like with like. Floats follow IEEE semantics: `NaN` equals nothing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    /// Signed 64-bit integer.
    I64(i64),
    /// Unsigned 64-bit integer.
    U64(u64),
    /// 64-bit floating point.
    F64(f64),
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::I64(n) => write!(f, "{n}"),
            Number::U64(n) => write!(f, "{n}"),
            Number::F64(n) => write!(f, "{n:?}"),
        }
    }
}

macro_rules! number_from {
    ($variant:ident, $target:ty: $($source:ty),+) => {
        $(
            impl From<$source> for Number {
                fn from(n: $source) -> Self {
                    Number::$variant(n as $target)
                }
            }
        )+
    };
}

number_from!(I64, i64: i8, i16, i32, i64, isize);
number_from!(U64, u64: u8, u16, u32, u64, usize);
number_from!(F64, f64: f32, f64);

/// Owned value stored in a predicate.
///
/// Unlike [`Value`], which borrows from the source record, `Literal`
/// owns its data so predicates are independent of the example instance.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// Boolean value.
    Bool(bool),
    /// Character value.
    Char(char),
    /// Numeric value.
    Number(Number),
    /// Text value.
    Text(String),
    /// Decimal value.
    Decimal(Decimal),
    /// No value.
    Absent,
}

impl Literal {
    /// Returns `true` if this is the `Absent` literal.
    pub fn is_absent(&self) -> bool {
        matches!(self, Literal::Absent)
    }

    /// Tests a field value for exact equality with this literal.
    ///
    /// Values of a different kind never match, and [`Value::Unsupported`]
    /// matches nothing.
    pub fn matches(&self, value: &Value<'_>) -> bool {
        match (self, value) {
            (Literal::Bool(a), Value::Bool(b)) => a == b,
            (Literal::Char(a), Value::Char(b)) => a == b,
            (Literal::Number(a), Value::Number(b)) => a == b,
            (Literal::Text(a), Value::Text(b)) => a == b,
            (Literal::Decimal(a), Value::Decimal(b)) => a == b,
            (Literal::Absent, Value::Absent) => true,
            _ => false,
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Bool(b) => write!(f, "{b}"),
            Literal::Char(c) => write!(f, "{c:?}"),
            Literal::Number(n) => write!(f, "{n}"),
            Literal::Text(s) => write!(f, "{s:?}"),
            Literal::Decimal(d) => write!(f, "{d}"),
            Literal::Absent => f.write_str("None"),
        }
    }
}

impl From<&str> for Literal {
    fn from(s: &str) -> Self {
        Literal::Text(s.to_owned())
    }
}

impl From<String> for Literal {
    fn from(s: String) -> Self {
        Literal::Text(s)
    }
}

impl From<bool> for Literal {
    fn from(b: bool) -> Self {
        Literal::Bool(b)
    }
}

impl From<Number> for Literal {
    fn from(n: Number) -> Self {
        Literal::Number(n)
    }
}

impl From<Decimal> for Literal {
    fn from(d: Decimal) -> Self {
        Literal::Decimal(d)
    }
}
