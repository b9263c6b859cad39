//! Error types for the exemplar crate.

use thiserror::Error;

/// Errors that can occur when building a predicate from an example.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A required argument was absent.
    #[error("invalid argument: {0} must be present")]
    InvalidArgument(&'static str),

    /// The record type has no field a predicate can be built from.
    #[error("record type '{record}' has no simple fields, can't define a filter predicate")]
    UnsupportedType { record: &'static str },

    /// A field classified as simple returned no readable value.
    #[error("field '{field}' of '{record}' is classified as simple but yields no value")]
    UnreadableField {
        record: &'static str,
        field: &'static str,
    },

    /// Policy name not recognized by [`Policy::from_str`](crate::Policy).
    #[error("unknown policy '{0}', expected 'discard-unset' or 'keep-unset'")]
    UnknownPolicy(String),
}

/// Result type for exemplar operations.
pub type Result<T> = std::result::Result<T, Error>;
