//! Iterator extension for filtering by example.

use std::fmt;
use std::iter::FusedIterator;

use crate::builder::build;
use crate::error::Result;
use crate::field::Filterable;
use crate::policy::Policy;
use crate::predicate::Predicate;

/// Adds `filter_by` to anything that iterates over record references.
///
/// # Example
///
/// ```
/// use exemplar::{FilterByExt, Filterable, Policy};
///
/// #[derive(Filterable)]
/// struct City {
///     name: String,
///     country: String,
///     population: Option<u64>,
/// }
///
/// let cities = vec![
///     City { name: "Lyon".into(), country: "FR".into(), population: Some(522_000) },
///     City { name: "Porto".into(), country: "PT".into(), population: None },
///     City { name: "Nice".into(), country: "FR".into(), population: None },
/// ];
///
/// let example = City { name: String::new(), country: "FR".into(), population: None };
///
/// let french: Vec<_> = cities.iter().filter_by(&example).unwrap().map(|c| &c.name).collect();
/// assert_eq!(french, ["Lyon", "Nice"]);
///
/// let exact = cities.iter().filter_by_with(&example, Policy::KeepUnset).unwrap().count();
/// assert_eq!(exact, 0);
/// ```
pub trait FilterByExt<'a, T: Filterable>: IntoIterator<Item = &'a T> + Sized {
    /// Keeps the records matching `example` under the default policy.
    fn filter_by(self, example: &T) -> Result<FilterBy<'a, T, Self::IntoIter>> {
        self.filter_by_with(example, Policy::default())
    }

    /// Keeps the records matching `example` under `policy`.
    fn filter_by_with(
        self,
        example: &T,
        policy: Policy,
    ) -> Result<FilterBy<'a, T, Self::IntoIter>> {
        let predicate = build(example, policy)?;
        Ok(FilterBy {
            inner: self.into_iter(),
            predicate,
        })
    }
}

impl<'a, T, I> FilterByExt<'a, T> for I
where
    T: Filterable,
    I: IntoIterator<Item = &'a T>,
{
}

/// Iterator returned by [`FilterByExt::filter_by`].
pub struct FilterBy<'a, T: 'static, I>
where
    I: Iterator<Item = &'a T>,
{
    inner: I,
    predicate: Predicate<T>,
}

impl<'a, T: 'static, I> FilterBy<'a, T, I>
where
    I: Iterator<Item = &'a T>,
{
    /// Returns the predicate driving this iterator.
    pub fn predicate(&self) -> &Predicate<T> {
        &self.predicate
    }
}

impl<'a, T: 'static, I> Clone for FilterBy<'a, T, I>
where
    I: Iterator<Item = &'a T> + Clone,
{
    fn clone(&self) -> Self {
        FilterBy {
            inner: self.inner.clone(),
            predicate: self.predicate.clone(),
        }
    }
}

impl<'a, T: 'static, I> fmt::Debug for FilterBy<'a, T, I>
where
    I: Iterator<Item = &'a T>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterBy")
            .field("predicate", &self.predicate)
            .finish_non_exhaustive()
    }
}

impl<'a, T: 'static, I> Iterator for FilterBy<'a, T, I>
where
    I: Iterator<Item = &'a T>,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let predicate = &self.predicate;
        self.inner.find(|item| predicate.matches(item))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (_, upper) = self.inner.size_hint();
        (0, upper)
    }
}

impl<'a, T: 'static, I> FusedIterator for FilterBy<'a, T, I> where
    I: FusedIterator<Item = &'a T>
{
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::field::{unsupported, Field, FieldType, Scalar, TypeKind};

    #[derive(Debug, PartialEq)]
    struct Item {
        label: String,
        qty: u32,
    }

    impl Filterable for Item {
        const FIELDS: &'static [Field<Self>] = &[
            Field::new("label", <String as Scalar>::FIELD_TYPE, |i| i.label.to_value()),
            Field::new("qty", <u32 as Scalar>::FIELD_TYPE, |i| i.qty.to_value()),
        ];
    }

    struct Opaque;

    impl Filterable for Opaque {
        const FIELDS: &'static [Field<Self>] = &[Field::new(
            "inner",
            FieldType::new(TypeKind::Composite("Inner")),
            unsupported,
        )];

        fn record_name() -> &'static str {
            "Opaque"
        }
    }

    fn item(label: &str, qty: u32) -> Item {
        Item {
            label: label.to_string(),
            qty,
        }
    }

    #[test]
    fn filter_by_default_policy() {
        let items = vec![item("a", 1), item("b", 2), item("a", 3)];
        let found: Vec<_> = items.iter().filter_by(&item("a", 0)).unwrap().collect();
        assert_eq!(found, [&items[0], &items[2]]);
    }

    #[test]
    fn filter_by_on_slice_reference() {
        let items = [item("a", 1), item("b", 1)];
        let found = (&items).filter_by(&item("", 1)).unwrap().count();
        assert_eq!(found, 2);
    }

    #[test]
    fn filter_by_with_keep_unset() {
        let items = vec![item("a", 0), item("a", 3)];
        let mut iter = items
            .iter()
            .filter_by_with(&item("a", 0), Policy::KeepUnset)
            .unwrap();
        assert_eq!(iter.predicate().policy(), Policy::KeepUnset);
        assert_eq!(iter.next(), Some(&items[0]));
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn filter_by_propagates_errors() {
        let records = [Opaque];
        let err = records.iter().filter_by(&Opaque).unwrap_err();
        assert_eq!(err, Error::UnsupportedType { record: "Opaque" });
    }
}
