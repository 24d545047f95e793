//! Property-based tests for hashing determinism

mod determinism;
