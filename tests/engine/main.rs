//! Integration tests for Layer 2: Engine
//!
//! Tests for family operations, shared access, and tree derivation.

mod family;
mod trees;
