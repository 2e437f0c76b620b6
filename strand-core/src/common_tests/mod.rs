//! Generic test suites for `SafeList`/`LruList` implementations.
//!
//! Implementing crates drive these from their own `tests/` directory.

pub mod list_core_tests;
