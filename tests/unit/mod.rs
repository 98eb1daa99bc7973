//! Unit Tests Module
//!
//! Tests for individual components against the mock ledger client.

pub mod account;
