//! Kindred - In-memory family tree
//!
//! This crate re-exports all layers of the Kindred system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 3: kindred_runtime    — Shell, command files, CLI, rendering
//! Layer 2: kindred_engine     — Relationship rules, family operations, trees
//! Layer 1: kindred_storage    — Member store, relation index, validation
//! Layer 0: kindred_foundation — Core types (MemberId, Gender, Error)
//! ```

pub use kindred_engine as engine;
pub use kindred_foundation as foundation;
pub use kindred_runtime as runtime;
pub use kindred_storage as storage;
