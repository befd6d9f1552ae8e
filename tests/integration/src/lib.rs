//! Test-only crate; see `src/tests.rs` for the integration suite.
