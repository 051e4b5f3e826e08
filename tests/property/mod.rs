//! Property-based tests for value formatting
