//! Integration test harness. Tests run against a live server:
//! start one with `cargo run`, then `cargo test -- --ignored`.

mod api_tests;
