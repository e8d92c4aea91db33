//! Golden test vectors for deterministic verification.
//!
//! These vectors pin the canonical encoding and the link formats so every
//! implementation produces identical identifiers and paths.

use serde::{Deserialize, Serialize};

use chainref_core::canonical;
use chainref_links::{defaults, Link, RegistrationType};

/// A golden identifier vector.
#[derive(Debug, Clone, Serialize)]
pub struct GoldenVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    /// Chain id hex, or `None` for the first entry of a chain.
    pub chain_id: Option<&'static str>,
    /// External ids, in order.
    pub external_ids: &'static [&'static str],
    /// Entry content.
    pub content: Option<&'static [u8]>,
    /// Expected chain id of a chain started by this entry (hex), if pinned.
    pub expected_chain_id: Option<&'static str>,
    /// Expected entry id (hex).
    pub expected_entry_id: &'static str,
}

/// A golden link vector.
#[derive(Debug, Clone)]
pub struct LinkVector {
    pub name: &'static str,
    pub link: Link,
    pub registration_type: RegistrationType,
    /// Parts in the order they are added.
    pub parts: &'static [(Link, &'static str)],
    pub expected_target: &'static str,
    pub expected_key: &'static str,
}

/// Outcome of checking one vector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VectorResult {
    pub name: String,
    pub passed: bool,
    pub actual: String,
}

pub const CHAIN_ID: &str = "502b99271ff6a3f8509ba2764e1e1c1482ad800140c17b25e165837ab5320501";

/// All identifier vectors.
pub fn all_vectors() -> Vec<GoldenVector> {
    vec![
        GoldenVector {
            name: "first entry without content",
            chain_id: None,
            external_ids: &["first external id", "second external id"],
            content: None,
            expected_chain_id: Some(CHAIN_ID),
            expected_entry_id: "322b18e1f267202565bf0d1ee03865f076fd22357ff6dc46c7a6dfef454f3871",
        },
        GoldenVector {
            name: "entry with content",
            chain_id: Some(CHAIN_ID),
            external_ids: &["first entry external id", "second entry external id"],
            content: Some(&b"Test Entry Content"[..]),
            expected_chain_id: None,
            expected_entry_id: "3d945a53b2e0ec5bc4464ae83955e818b6cb5906c93a1eaf80291bd1e241653c",
        },
    ]
}

/// All link vectors.
pub fn all_link_vectors() -> Vec<LinkVector> {
    vec![
        LinkVector {
            name: "external id link",
            link: Link::ExternalId,
            registration_type: defaults::HASH,
            parts: &[
                (Link::Context, "context"),
                (Link::ChainId, "chain1"),
                (Link::EntryId, "entry1"),
                (Link::ExternalId, "0"),
            ],
            expected_target: "/context/chains/chain1/entries/entry1/externalids/0",
            expected_key: "ChainLink:Hash",
        },
        LinkVector {
            name: "none link",
            link: Link::None,
            registration_type: defaults::CHAIN_LINK,
            parts: &[(Link::None, "TEST123")],
            expected_target: "TEST123",
            expected_key: "ChainLink",
        },
    ]
}

/// Derive the entry id of a vector.
pub fn entry_id_for(vector: &GoldenVector) -> chainref_core::Result<String> {
    Ok(canonical::entry_id(vector.chain_id, vector.content, vector.external_ids)?.to_hex())
}

/// Verify every identifier and link vector.
pub fn verify_all_vectors() -> Vec<VectorResult> {
    let ids = all_vectors().into_iter().map(|v| {
        let actual = entry_id_for(&v).unwrap_or_else(|e| e.to_string());
        let chain_ok = match v.expected_chain_id {
            Some(expected) => canonical::chain_id(v.external_ids)
                .map(|id| id.to_hex() == expected)
                .unwrap_or(false),
            None => true,
        };
        VectorResult {
            name: v.name.to_string(),
            passed: chain_ok && actual == v.expected_entry_id,
            actual,
        }
    });

    let links = all_link_vectors().into_iter().map(|v| {
        let built = v
            .link
            .builder(v.registration_type.clone())
            .add_all(v.parts.iter().copied())
            .and_then(|b| b.build_target_link().map(|target| (target, b.build_link_key())));
        match built {
            Ok((target, key)) => VectorResult {
                name: v.name.to_string(),
                passed: target == v.expected_target && key == v.expected_key,
                actual: format!("{target} {key}"),
            },
            Err(e) => VectorResult {
                name: v.name.to_string(),
                passed: false,
                actual: e.to_string(),
            },
        }
    });

    ids.chain(links).collect()
}
