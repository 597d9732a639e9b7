//! Member storage, relation indices, and input validation for Kindred.
//!
//! This crate provides:
//! - [`MemberStore`] - Id allocation and scalar member storage
//! - [`RelationIndex`] - Spouse pairs and parent edges with a derived child index
//! - [`MemberInput`] - Raw caller input, validated into [`NewMember`] or [`MemberPatch`]
//! - [`MemberRecord`] - The joined read view handed to callers

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod member;
pub mod relation;
pub mod store;
pub mod validate;

pub use member::{Member, MemberPatch, MemberRecord, NewMember};
pub use relation::{Detached, RelationIndex};
pub use store::MemberStore;
pub use validate::MemberInput;
