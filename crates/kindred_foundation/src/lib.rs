//! Core identifiers, enumerations, and error types for Kindred.
//!
//! This crate provides:
//! - [`MemberId`] - Stable integer identifiers for family members
//! - [`Gender`] - The fixed set of genders the model records
//! - [`Relation`] - The two relation kinds (spouse, parent/child)
//! - [`Error`] - Typed outcomes for every failing operation

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod member;

pub use error::{
    AGE_MESSAGE, Error, ErrorContext, ErrorKind, GENDER_MESSAGE, ID_MESSAGE, NAME_MESSAGE,
    RELATION_FIELDS_MESSAGE, ROSTER_ORDER_MESSAGE, Result,
};
pub use member::{Gender, MemberId, Relation};
