//! Core module tests
//!
//! Contains test suites for core functionality:
//! - Collection model tests (add/remove/reset/edit, filter and sort views)
//! - Duplicate keyword detection tests
//! - Keyword and URL validation tests
//! - Type tests (conversion between stored and editing shapes)

#[cfg(test)]
mod conflict_tests;
