//! Implementation of the `#[derive(Filterable)]` macro.
//!
//! This module provides derive macro support for exemplar, generating the
//! static field table and field name constants from a struct definition.

mod attrs;
mod derive;
mod shape;

pub use derive::filterable_derive_impl;
