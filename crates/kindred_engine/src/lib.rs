//! Relationship rules, family operations, and tree derivation for Kindred.
//!
//! This crate provides:
//! - [`Family`] - The guarded operations over members and their relations
//! - [`SharedFamily`] - A lock-guarded handle for hosts that share one family
//! - [`build_display_tree`] / [`build_lineage_tree`] - Derived views for display

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod family;
pub mod shared;
pub mod tree;

pub use family::{Deleted, Family, RosterEntry};
pub use shared::SharedFamily;
pub use tree::{DISPLAY_TREE_TITLE, MemberAttributes, TreeNode, build_display_tree, build_lineage_tree};
