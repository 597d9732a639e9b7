//! End-to-end tests across all layers.
//!
//! Tests complete family scenarios from roster to rendered output.
