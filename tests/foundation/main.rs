//! Integration tests for Layer 0: Foundation
//!
//! Tests for core types: MemberId, Gender, Relation, and Error.

mod identifiers;
