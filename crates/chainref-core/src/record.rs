//! External ids, entry content and the records that carry them.
//!
//! Identifier derivation accepts any list whose elements implement
//! [`ExternalIdValue`], so callers can hand in their own containers. An
//! element that reports no value (`None`) is rejected at encoding time.

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::canonical;
use crate::error::Result;
use crate::types::{ChainId, EntryId};

/// Anything that can serve as an external id value.
pub trait ExternalIdValue {
    /// The raw value, or `None` when the element carries no value.
    fn value(&self) -> Option<&[u8]>;
}

impl ExternalIdValue for [u8] {
    fn value(&self) -> Option<&[u8]> {
        Some(self)
    }
}

impl<const N: usize> ExternalIdValue for [u8; N] {
    fn value(&self) -> Option<&[u8]> {
        Some(self)
    }
}

impl ExternalIdValue for Vec<u8> {
    fn value(&self) -> Option<&[u8]> {
        Some(self)
    }
}

impl ExternalIdValue for str {
    fn value(&self) -> Option<&[u8]> {
        Some(self.as_bytes())
    }
}

impl ExternalIdValue for String {
    fn value(&self) -> Option<&[u8]> {
        Some(self.as_bytes())
    }
}

impl ExternalIdValue for Bytes {
    fn value(&self) -> Option<&[u8]> {
        Some(self)
    }
}

impl<T: ExternalIdValue + ?Sized> ExternalIdValue for &T {
    fn value(&self) -> Option<&[u8]> {
        (**self).value()
    }
}

impl<T: ExternalIdValue> ExternalIdValue for Option<T> {
    fn value(&self) -> Option<&[u8]> {
        self.as_ref().and_then(|v| v.value())
    }
}

/// An opaque, order-significant external id value.
#[derive(Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ExternalId(pub Bytes);

impl ExternalId {
    /// Create from anything convertible into bytes.
    pub fn new(value: impl Into<Bytes>) -> Self {
        Self(value.into())
    }

    /// Get the raw bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Length of the value in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when the value is zero-length.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl ExternalIdValue for ExternalId {
    fn value(&self) -> Option<&[u8]> {
        Some(&self.0)
    }
}

impl fmt::Debug for ExternalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match std::str::from_utf8(&self.0) {
            Ok(s) => write!(f, "ExternalId({s:?})"),
            Err(_) => write!(f, "ExternalId(0x{})", hex::encode(&self.0)),
        }
    }
}

impl From<&str> for ExternalId {
    fn from(s: &str) -> Self {
        Self(Bytes::copy_from_slice(s.as_bytes()))
    }
}

impl From<String> for ExternalId {
    fn from(s: String) -> Self {
        Self(Bytes::from(s))
    }
}

impl From<Vec<u8>> for ExternalId {
    fn from(v: Vec<u8>) -> Self {
        Self(Bytes::from(v))
    }
}

impl From<&[u8]> for ExternalId {
    fn from(v: &[u8]) -> Self {
        Self(Bytes::copy_from_slice(v))
    }
}

/// An entry: optional content plus its ordered external ids.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EntryRecord {
    /// Entry content. `None` means no content bytes are serialized.
    pub content: Option<Bytes>,

    /// External ids in their significant order.
    pub external_ids: Vec<ExternalId>,
}

impl EntryRecord {
    /// Create an entry without content or external ids.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the content.
    pub fn content(mut self, content: impl Into<Bytes>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Append an external id.
    pub fn external_id(mut self, id: impl Into<ExternalId>) -> Self {
        self.external_ids.push(id.into());
        self
    }

    /// Append several external ids, preserving their order.
    pub fn external_ids<I, T>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<ExternalId>,
    {
        self.external_ids.extend(ids.into_iter().map(Into::into));
        self
    }

    /// Content as a byte slice, if any.
    pub fn content_bytes(&self) -> Option<&[u8]> {
        self.content.as_deref()
    }

    /// Canonical bytes of this entry within the given chain.
    ///
    /// With no chain id the entry is serialized as the first entry of its chain.
    pub fn to_bytes(&self, chain_id: Option<&ChainId>) -> Result<Vec<u8>> {
        let hex = chain_id.map(ChainId::to_hex);
        canonical::entry_to_bytes(hex.as_deref(), self.content_bytes(), &self.external_ids)
    }

    /// Entry id of this entry within the given chain.
    pub fn entry_id(&self, chain_id: &ChainId) -> Result<EntryId> {
        canonical::entry_id(
            Some(chain_id.to_hex().as_str()),
            self.content_bytes(),
            &self.external_ids,
        )
    }

    /// Entry id of this entry as the first entry of a chain.
    pub fn first_entry_id(&self) -> Result<EntryId> {
        canonical::first_entry_id(self.content_bytes(), &self.external_ids)
    }
}

/// A chain, known through its first entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainRecord {
    /// The entry the chain was created with.
    pub first_entry: EntryRecord,
}

impl ChainRecord {
    /// Create a chain from its first entry.
    pub fn new(first_entry: EntryRecord) -> Self {
        Self { first_entry }
    }

    /// The chain id. Only the first entry's external ids contribute.
    pub fn chain_id(&self) -> Result<ChainId> {
        canonical::chain_id(&self.first_entry.external_ids)
    }

    /// The entry id of the first entry.
    pub fn first_entry_id(&self) -> Result<EntryId> {
        self.first_entry.first_entry_id()
    }

    /// Chain id bytes followed by the first entry's canonical bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        canonical::chain_to_bytes(
            self.first_entry.content_bytes(),
            &self.first_entry.external_ids,
        )
    }
}

/// Well-known purposes a chain can serve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChainType {
    FileChain,
    SettingsChain,
    ProofChain,
    MetadataChain,
}

impl ChainType {
    /// Human readable label.
    pub fn label(&self) -> &'static str {
        match self {
            ChainType::FileChain => "File chain",
            ChainType::SettingsChain => "Settings chain",
            ChainType::ProofChain => "Proof chain",
            ChainType::MetadataChain => "Metadata chain",
        }
    }
}

impl fmt::Display for ChainType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_impls() {
        assert_eq!("abc".value(), Some(&b"abc"[..]));
        assert_eq!(String::from("abc").value(), Some(&b"abc"[..]));
        assert_eq!(vec![1u8, 2].value(), Some(&[1u8, 2][..]));
        assert_eq!([7u8; 3].value(), Some(&[7u8; 3][..]));
        assert_eq!(Bytes::from_static(b"x").value(), Some(&b"x"[..]));
        assert_eq!(Some("abc").value(), Some(&b"abc"[..]));
        assert_eq!(None::<&str>.value(), None);
    }

    #[test]
    fn test_entry_record_builder_keeps_order() {
        let entry = EntryRecord::new()
            .content("body")
            .external_id("b")
            .external_ids(["a", "c"]);
        let ids: Vec<&[u8]> = entry.external_ids.iter().map(ExternalId::as_bytes).collect();
        assert_eq!(ids, vec![&b"b"[..], &b"a"[..], &b"c"[..]]);
        assert_eq!(entry.content_bytes(), Some(&b"body"[..]));
    }

    #[test]
    fn test_chain_id_ignores_content() {
        let a = ChainRecord::new(EntryRecord::new().content("one").external_id("id"));
        let b = ChainRecord::new(EntryRecord::new().content("two").external_id("id"));
        assert_eq!(a.chain_id().unwrap(), b.chain_id().unwrap());
        assert_ne!(a.first_entry_id().unwrap(), b.first_entry_id().unwrap());
    }

    #[test]
    fn test_first_entry_id_matches_explicit_chain() {
        let chain = ChainRecord::new(EntryRecord::new().content("c").external_ids(["x", "y"]));
        let chain_id = chain.chain_id().unwrap();
        assert_eq!(
            chain.first_entry.entry_id(&chain_id).unwrap(),
            chain.first_entry_id().unwrap()
        );
    }

    #[test]
    fn test_chain_to_bytes_prefix() {
        let chain = ChainRecord::new(EntryRecord::new().external_id("x"));
        let bytes = chain.to_bytes().unwrap();
        let chain_id = chain.chain_id().unwrap();
        assert_eq!(&bytes[..32], chain_id.as_bytes());
        assert_eq!(&bytes[32..], chain.first_entry.to_bytes(None).unwrap().as_slice());
    }

    #[test]
    fn test_external_id_debug() {
        assert_eq!(format!("{:?}", ExternalId::from("abc")), "ExternalId(\"abc\")");
        assert_eq!(
            format!("{:?}", ExternalId::from(vec![0xff, 0x00])),
            "ExternalId(0xff00)"
        );
    }

    #[test]
    fn test_record_serde_roundtrip() {
        let entry = EntryRecord::new().content("c").external_id("x");
        let json = serde_json::to_string(&entry).unwrap();
        let back: EntryRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, entry);
    }

    #[test]
    fn test_chain_type_labels() {
        assert_eq!(ChainType::ProofChain.to_string(), "Proof chain");
        assert_eq!(ChainType::MetadataChain.label(), "Metadata chain");
    }
}
