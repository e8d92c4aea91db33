//! # chainref links
//!
//! Typed metadata categories and the hierarchical link addressing scheme.
//!
//! ## Overview
//!
//! - **Registration types**: named categories such as `Hash` or `NodeId`,
//!   used as typed ChainLink keys (`ChainLink:Hash`).
//! - **Registry**: interns registration types once per name and records which
//!   subsystems registered them.
//! - **Subsystems**: deployment contexts (Alfresco, Sharepoint, File, Custom)
//!   that declare default registration types.
//! - **Links**: a fixed six-level hierarchy of target link templates, with a
//!   builder to format target links and a parser to take them apart.
//!
//! ## Usage
//!
//! ```rust
//! use chainref_links::{defaults, Link};
//!
//! let builder = Link::ExternalId
//!     .builder(defaults::HASH)
//!     .context("context")?
//!     .chain_id("chain1")?
//!     .entry_id("entry1")?
//!     .external_id(0)?;
//!
//! assert_eq!(
//!     builder.build_target_link()?,
//!     "/context/chains/chain1/entries/entry1/externalids/0"
//! );
//! assert_eq!(builder.build_link_key(), "ChainLink:Hash");
//! # Ok::<(), chainref_links::LinkError>(())
//! ```

pub mod builder;
pub mod error;
pub mod link;
pub mod parser;
pub mod path;
pub mod registration;
pub mod registry;
pub mod subsystem;

pub use builder::LinkBuilder;
pub use error::{LinkError, Result};
pub use link::Link;
pub use path::LinkPath;
pub use registration::{defaults, RegistrationType, CHAIN_LINK_KEY_PREFIX};
pub use registry::Registry;
pub use subsystem::Subsystem;
