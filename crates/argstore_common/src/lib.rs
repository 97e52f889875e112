//! Shared foundational types for the argstore constant and argument cache.
//!
//! This crate provides the closed registry of primitive kinds, the typed
//! values they parse into, and the error returned when a literal does not
//! match a kind's grammar.

#![warn(missing_docs)]

pub mod error;
pub mod primitive;
pub mod value;

pub use error::ParseError;
pub use primitive::PrimitiveKind;
pub use value::PrimitiveValue;
