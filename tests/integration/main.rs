//! Integration test suite. Requires a running server, see api_tests.rs.

mod api_tests;
