//! # chainref
//!
//! Deterministic addressing for append-only ledgers: chain and entry
//! identifiers, typed ChainLink keys, and hierarchical target links.
//!
//! ## Overview
//!
//! - **Chain id**: SHA-256 over the per-id SHA-256 digests of the first
//!   entry's external ids. Content never contributes.
//! - **Entry id**: SHA-256 over `SHA-512(bytes) ++ bytes`, where `bytes` is
//!   the canonical serialization of version, chain id, external ids and content.
//! - **ChainLink keys**: `ChainLink` or `ChainLink:<RegistrationType>`.
//! - **Target links**: `/context/chains/<chain>/entries/<entry>/...`.
//!
//! ## Usage
//!
//! ```rust
//! use chainref::{defaults, Link, Toolkit};
//!
//! let toolkit = Toolkit::default();
//!
//! let chain_id = toolkit.chain_id(&["first external id", "second external id"])?;
//! let entry_id = toolkit.entry_id(
//!     Some(chain_id.to_hex().as_str()),
//!     Some(b"Test Entry Content".as_slice()),
//!     &["first entry external id", "second entry external id"],
//! )?;
//!
//! let link = toolkit
//!     .link(Link::EntryId, defaults::HASH)
//!     .context("context")?
//!     .chain_id(chain_id.to_hex())?
//!     .entry_id(entry_id.to_hex())?;
//! assert_eq!(link.build_link_key(), "ChainLink:Hash");
//! # Ok::<(), chainref::ChainrefError>(())
//! ```
//!
//! ## Re-exports
//!
//! - `chainref::core` - hashing, canonical encoding, identifier types
//! - `chainref::links` - registration types, registry, subsystems, links

pub mod error;
pub mod toolkit;

// Re-export component crates
pub use chainref_core as core;
pub use chainref_links as links;

// Re-export main types for convenience
pub use error::{ChainrefError, Result};
pub use toolkit::{DefaultSubsystem, SubsystemConfig, Toolkit, ToolkitConfig};

// Re-export commonly used component types
pub use chainref_core::{
    ChainId, ChainRecord, ChainType, EntryId, EntryRecord, ExternalId, ExternalIdValue,
    HashAlgorithm, Sha256Hash, Sha512Hash,
};
pub use chainref_links::{
    defaults, Link, LinkBuilder, LinkPath, RegistrationType, Registry, Subsystem,
};
