//! # chainref testkit
//!
//! Testing utilities for chainref.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: known identifier and link cases with expected outputs
//! - **Generators**: proptest strategies for property-based testing
//! - **Fixtures**: helpers for setting up test scenarios
//!
//! ## Golden Vectors
//!
//! ```rust
//! use chainref_testkit::vectors::verify_all_vectors;
//!
//! for result in verify_all_vectors() {
//!     assert!(result.passed, "{}: {}", result.name, result.actual);
//! }
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use chainref_testkit::generators::EntryParams;
//!
//! proptest! {
//!     #[test]
//!     fn entry_id_is_deterministic(params: EntryParams) {
//!         let record = params.record();
//!         prop_assert_eq!(record.first_entry_id().unwrap(), record.first_entry_id().unwrap());
//!     }
//! }
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::TestFixture;
