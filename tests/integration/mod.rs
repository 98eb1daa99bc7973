//! Integration Tests Module
//!
//! End-to-end tests that verify complete request paths across multiple
//! components.

pub mod end_to_end;
