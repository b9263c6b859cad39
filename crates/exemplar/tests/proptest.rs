//! Property-based tests for predicate synthesis using proptest.

#![cfg(feature = "derive")]

use exemplar::{build, Decimal, Filterable, Policy};
use proptest::prelude::*;

// ============================================================================
// Test records
// ============================================================================

#[derive(Debug, Clone, PartialEq, Filterable)]
struct Item {
    name: String,
    qty: u32,
    delta: i64,
    active: bool,
    price: Decimal,
    note: Option<String>,
    rank: Option<i16>,
}

/// Same fields as `Item`, declared in a different order.
#[derive(Debug, Clone, PartialEq, Filterable)]
struct Shuffled {
    rank: Option<i16>,
    active: bool,
    note: Option<String>,
    price: Decimal,
    qty: u32,
    name: String,
    delta: i64,
}

impl From<&Item> for Shuffled {
    fn from(item: &Item) -> Self {
        Shuffled {
            rank: item.rank,
            active: item.active,
            note: item.note.clone(),
            price: item.price,
            qty: item.qty,
            name: item.name.clone(),
            delta: item.delta,
        }
    }
}

fn default_item() -> Item {
    Item {
        name: String::new(),
        qty: 0,
        delta: 0,
        active: false,
        price: Decimal::ZERO,
        note: None,
        rank: None,
    }
}

// Small domains so that generated records collide with examples often
fn item_strategy() -> impl Strategy<Value = Item> {
    (
        "[a-c]{0,2}",
        0u32..3,
        -2i64..3,
        any::<bool>(),
        (0i64..3).prop_map(Decimal::from),
        prop::option::of("[a-b]{0,1}"),
        prop::option::of(-1i16..2),
    )
        .prop_map(|(name, qty, delta, active, price, note, rank)| Item {
            name,
            qty,
            delta,
            active,
            price,
            note,
            rank,
        })
}

// Every field holds a non-default value
fn fully_set_strategy() -> impl Strategy<Value = Item> {
    (
        "[a-c]{1,2}",
        1u32..3,
        prop_oneof![-2i64..0, 1i64..3],
        Just(true),
        (1i64..3).prop_map(Decimal::from),
        "[a-b]{0,1}",
        -1i16..2,
    )
        .prop_map(|(name, qty, delta, active, price, note, rank)| Item {
            name,
            qty,
            delta,
            active,
            price,
            note: Some(note),
            rank: Some(rank),
        })
}

// ============================================================================
// Property tests
// ============================================================================

proptest! {
    /// An example left entirely at defaults accepts every record.
    #[test]
    fn all_default_example_accepts_everything(record in item_strategy()) {
        let predicate = build(&default_item(), Policy::DiscardUnset).unwrap();
        prop_assert!(predicate.matches(&record));
    }

    /// With every simple field set, both policies agree on every record.
    #[test]
    fn fully_set_example_policies_agree(
        example in fully_set_strategy(),
        records in prop::collection::vec(item_strategy(), 0..40),
    ) {
        let discard = build(&example, Policy::DiscardUnset).unwrap();
        let keep = build(&example, Policy::KeepUnset).unwrap();

        for record in &records {
            prop_assert_eq!(discard.matches(record), keep.matches(record));
        }
        prop_assert!(keep.matches(&example));
    }

    /// Building twice from the same example yields equivalent predicates.
    #[test]
    fn build_is_idempotent(
        example in item_strategy(),
        records in prop::collection::vec(item_strategy(), 0..40),
    ) {
        for policy in [Policy::DiscardUnset, Policy::KeepUnset] {
            let first = build(&example, policy).unwrap();
            let second = build(&example, policy).unwrap();
            prop_assert_eq!(first.filter(&records), second.filter(&records));
            prop_assert_eq!(first.to_string(), second.to_string());
        }
    }

    /// Declaration order changes the fold order but not the outcome.
    #[test]
    fn field_order_does_not_change_results(
        example in item_strategy(),
        records in prop::collection::vec(item_strategy(), 0..40),
    ) {
        let shuffled_example = Shuffled::from(&example);
        let shuffled: Vec<Shuffled> = records.iter().map(Shuffled::from).collect();

        for policy in [Policy::DiscardUnset, Policy::KeepUnset] {
            let ordered = build(&example, policy).unwrap();
            let reordered = build(&shuffled_example, policy).unwrap();
            for (record, twin) in records.iter().zip(&shuffled) {
                prop_assert_eq!(ordered.matches(record), reordered.matches(twin));
            }
        }
    }

    /// KeepUnset compares optional fields exactly: absent matches absent only,
    /// present matches the same present value only.
    #[test]
    fn keep_unset_optional_fields_are_exact(
        example_rank in prop::option::of(-1i16..2),
        record_rank in prop::option::of(-1i16..2),
    ) {
        let example = Item { rank: example_rank, ..default_item() };
        let record = Item { rank: record_rank, ..default_item() };

        let predicate = build(&example, Policy::KeepUnset).unwrap();
        prop_assert_eq!(predicate.matches(&record), example_rank == record_rank);
    }

    /// DiscardUnset only rejects a record on a field the example sets.
    #[test]
    fn discard_unset_is_looser_than_keep_unset(
        example in item_strategy(),
        record in item_strategy(),
    ) {
        let keep = build(&example, Policy::KeepUnset).unwrap();
        let discard = build(&example, Policy::DiscardUnset).unwrap();
        if keep.matches(&record) {
            prop_assert!(discard.matches(&record));
        }
    }

    /// Filter never grows the collection and agrees with count.
    #[test]
    fn count_equals_filter_len(
        example in item_strategy(),
        records in prop::collection::vec(item_strategy(), 0..40),
    ) {
        let predicate = build(&example, Policy::DiscardUnset).unwrap();
        let filtered = predicate.filter(&records);
        prop_assert!(filtered.len() <= records.len());
        prop_assert_eq!(filtered.len(), predicate.count(&records));
    }
}
