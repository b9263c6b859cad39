//! Built predicates and their execution helpers.
//!
//! A [`Predicate`] is produced once by [`build`](crate::build) and evaluated
//! many times. It owns its literals and refers to fields through `'static`
//! descriptors, so it is `Send + Sync` and outlives the example it came from.

use std::fmt;

use crate::error::Result;
use crate::expr::Expr;
use crate::field::Filterable;
use crate::policy::Policy;

/// A reusable boolean predicate over records of type `T`.
///
/// # Example
///
/// ```
/// use exemplar::{Filterable, Predicate};
///
/// #[derive(Debug, Clone, Filterable)]
/// struct Task {
///     title: String,
///     done: bool,
///     priority: u8,
/// }
///
/// let tasks = vec![
///     Task { title: "Write docs".into(), done: false, priority: 3 },
///     Task { title: "Fix bug".into(), done: true, priority: 5 },
///     Task { title: "Review".into(), done: false, priority: 5 },
/// ];
///
/// // Only `priority` is set, every other field is left at its default
/// let example = Task { title: String::new(), done: false, priority: 5 };
/// let predicate = Predicate::from_example(&example).unwrap();
///
/// let found = predicate.filter(&tasks);
/// assert_eq!(found.len(), 2);
/// assert_eq!(found[0].title, "Fix bug");
/// ```
pub struct Predicate<T: 'static> {
    expr: Expr<T>,
    policy: Policy,
    terms: usize,
}

impl<T: Filterable> Predicate<T> {
    /// Builds a predicate from `example` with the default policy,
    /// [`Policy::DiscardUnset`].
    pub fn from_example(example: &T) -> Result<Self> {
        crate::builder::build(example, Policy::default())
    }
}

impl<T: 'static> Predicate<T> {
    pub(crate) fn new(expr: Expr<T>, policy: Policy, terms: usize) -> Self {
        Predicate {
            expr,
            policy,
            terms,
        }
    }

    // ========================================================================
    // Introspection
    // ========================================================================

    /// Returns the policy this predicate was built with.
    pub fn policy(&self) -> Policy {
        self.policy
    }

    /// Returns the folded expression.
    pub fn expr(&self) -> &Expr<T> {
        &self.expr
    }

    /// Returns the comparison terms, one per simple field, in fold order.
    pub fn terms(&self) -> Vec<&Expr<T>> {
        self.expr.conjuncts()
    }

    /// Returns the number of comparison terms.
    pub fn term_count(&self) -> usize {
        self.terms
    }

    // ========================================================================
    // Execution
    // ========================================================================

    /// Tests if a single record matches.
    pub fn matches(&self, record: &T) -> bool {
        self.expr.eval(record)
    }

    /// Borrows this predicate as a closure, for APIs such as
    /// `Iterator::filter` or `Vec::retain`.
    pub fn as_fn(&self) -> impl Fn(&T) -> bool + Copy + '_ {
        move |record: &T| self.matches(record)
    }

    /// Turns this predicate into an owned closure that can be moved across
    /// threads.
    pub fn into_fn(self) -> impl Fn(&T) -> bool + Clone + Send + Sync {
        move |record: &T| self.matches(record)
    }

    /// Filters a slice, returning references to matching records in order.
    pub fn filter<'a>(&self, items: &'a [T]) -> Vec<&'a T> {
        items.iter().filter(|item| self.matches(item)).collect()
    }

    /// Filters and clones matching records.
    pub fn filter_cloned(&self, items: &[T]) -> Vec<T>
    where
        T: Clone,
    {
        self.filter(items).into_iter().cloned().collect()
    }

    /// Filters a vector in place, keeping only matching records.
    pub fn filter_mut(&self, items: &mut Vec<T>) {
        items.retain(|item| self.matches(item));
    }

    /// Counts the matching records.
    pub fn count(&self, items: &[T]) -> usize {
        items.iter().filter(|item| self.matches(item)).count()
    }

    /// Returns `true` if any record matches.
    pub fn any(&self, items: &[T]) -> bool {
        items.iter().any(|item| self.matches(item))
    }

    /// Returns `true` if all records match.
    pub fn all(&self, items: &[T]) -> bool {
        items.iter().all(|item| self.matches(item))
    }

    /// Finds the first matching record.
    pub fn find<'a>(&self, items: &'a [T]) -> Option<&'a T> {
        items.iter().find(|item| self.matches(item))
    }

    /// Finds the first matching record and returns its index.
    pub fn position(&self, items: &[T]) -> Option<usize> {
        items.iter().position(|item| self.matches(item))
    }
}

impl<T: 'static> Clone for Predicate<T> {
    fn clone(&self) -> Self {
        Predicate {
            expr: self.expr.clone(),
            policy: self.policy,
            terms: self.terms,
        }
    }
}

impl<T: 'static> fmt::Debug for Predicate<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Predicate")
            .field("policy", &self.policy)
            .field("terms", &self.terms)
            .field("expr", &self.expr)
            .finish()
    }
}

impl<T: 'static> fmt::Display for Predicate<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.expr)
    }
}
