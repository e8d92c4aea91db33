//! # chainref core
//!
//! Pure primitives for addressing ledger records: hashing, canonical entry
//! encoding, and chain/entry id derivation.
//!
//! This crate contains no I/O beyond reading a caller-supplied stream for
//! hashing. No storage, no networking.
//!
//! ## Key Types
//!
//! - [`ChainId`] - SHA-256 identifier of a chain, derived from its first entry's external ids
//! - [`EntryId`] - SHA-256 identifier of an entry within a chain
//! - [`ExternalId`] / [`ExternalIdValue`] - order-significant metadata values
//! - [`EntryRecord`] / [`ChainRecord`] - convenience records over the derivation functions
//!
//! ## Canonicalization
//!
//! The byte layout identifiers are derived from is fixed. See [`canonical`].

pub mod canonical;
pub mod digest;
pub mod error;
pub mod record;
pub mod types;

pub use canonical::{
    chain_id, chain_id_base, encode_external_ids, encode_length, entry_id, entry_id_base,
    entry_to_bytes, first_entry_id,
};
pub use digest::{HashAlgorithm, Sha256Hash, Sha512Hash};
pub use error::{CoreError, Result};
pub use record::{ChainRecord, ChainType, EntryRecord, ExternalId, ExternalIdValue};
pub use types::{ChainId, EntryId};
