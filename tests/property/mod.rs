//! Property-based tests for tree invariants

mod tree_invariants;
