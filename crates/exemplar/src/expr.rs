//! Boolean expression tree over one record.
//!
//! An [`Expr`] is the in-process form of a comparison term or a folded
//! predicate. It refers to fields through their `'static` descriptors and owns
//! every literal it compares against, so it never borrows the example it was
//! built from.

use std::fmt;

use crate::field::Field;
use crate::value::{Literal, Value};

/// Right-hand side of an equality term.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    /// Compare directly with a concrete literal.
    Value(Literal),
    /// Concrete literal widened to an optional field: the record's field must
    /// be present and equal.
    Present(Literal),
    /// The absent marker of an optional field: true only when the record's
    /// field is absent too.
    Absent,
}

impl Operand {
    /// Tests a field value against this operand.
    pub fn matches(&self, value: &Value<'_>) -> bool {
        match self {
            Operand::Value(literal) => literal.matches(value),
            Operand::Present(literal) => !value.is_absent() && literal.matches(value),
            Operand::Absent => value.is_absent(),
        }
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Value(literal) => write!(f, "{literal}"),
            Operand::Present(literal) => write!(f, "Some({literal})"),
            Operand::Absent => f.write_str("None"),
        }
    }
}

/// A boolean expression evaluable against any record of type `T`.
pub enum Expr<T: 'static> {
    /// Constant outcome.
    Const(bool),
    /// `record.field == operand`.
    Eq {
        field: &'static Field<T>,
        operand: Operand,
    },
    /// Logical AND, left evaluated first.
    And(Box<Expr<T>>, Box<Expr<T>>),
    /// Logical OR, left evaluated first.
    Or(Box<Expr<T>>, Box<Expr<T>>),
}

impl<T: 'static> Expr<T> {
    /// Creates an equality term.
    pub fn field_eq(field: &'static Field<T>, operand: Operand) -> Self {
        Expr::Eq { field, operand }
    }

    /// Combines `self AND rhs`.
    pub fn and(self, rhs: Expr<T>) -> Self {
        Expr::And(Box::new(self), Box::new(rhs))
    }

    /// Combines `self OR rhs`.
    pub fn or(self, rhs: Expr<T>) -> Self {
        Expr::Or(Box::new(self), Box::new(rhs))
    }

    /// Evaluates this expression against a record.
    pub fn eval(&self, record: &T) -> bool {
        match self {
            Expr::Const(outcome) => *outcome,
            Expr::Eq { field, operand } => operand.matches(&field.value(record)),
            Expr::And(lhs, rhs) => lhs.eval(record) && rhs.eval(record),
            Expr::Or(lhs, rhs) => lhs.eval(record) || rhs.eval(record),
        }
    }

    /// Splits a left-folded conjunction back into its terms, in fold order.
    ///
    /// An expression that is not an `And` is a single term.
    pub fn conjuncts(&self) -> Vec<&Expr<T>> {
        let mut terms = Vec::new();
        let mut current = self;
        while let Expr::And(lhs, rhs) = current {
            terms.push(rhs.as_ref());
            current = lhs.as_ref();
        }
        terms.push(current);
        terms.reverse();
        terms
    }
}

impl<T: 'static> Clone for Expr<T> {
    fn clone(&self) -> Self {
        match self {
            Expr::Const(outcome) => Expr::Const(*outcome),
            Expr::Eq { field, operand } => Expr::Eq {
                field: *field,
                operand: operand.clone(),
            },
            Expr::And(lhs, rhs) => Expr::And(lhs.clone(), rhs.clone()),
            Expr::Or(lhs, rhs) => Expr::Or(lhs.clone(), rhs.clone()),
        }
    }
}

impl<T: 'static> fmt::Debug for Expr<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Const(outcome) => f.debug_tuple("Const").field(outcome).finish(),
            Expr::Eq { field, operand } => f
                .debug_struct("Eq")
                .field("field", &field.name)
                .field("operand", operand)
                .finish(),
            Expr::And(lhs, rhs) => f.debug_tuple("And").field(lhs).field(rhs).finish(),
            Expr::Or(lhs, rhs) => f.debug_tuple("Or").field(lhs).field(rhs).finish(),
        }
    }
}

impl<T: 'static> fmt::Display for Expr<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Const(outcome) => write!(f, "{outcome}"),
            Expr::Eq { field, operand } => write!(f, "{} == {operand}", field.name),
            Expr::And(lhs, rhs) => write!(f, "{lhs} && {rhs}"),
            Expr::Or(lhs, rhs) => write!(f, "({lhs} || {rhs})"),
        }
    }
}
