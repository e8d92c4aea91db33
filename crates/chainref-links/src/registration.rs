//! Registration types: named metadata categories usable as typed link keys.
//!
//! A registration type is identified by its name alone. The optional label is
//! display text and takes no part in equality, ordering or hashing.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Namespace prefix of typed ChainLink keys.
pub const CHAIN_LINK_KEY_PREFIX: &str = "ChainLink:";

/// A named metadata category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrationType {
    name: Cow<'static, str>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    label: Option<Cow<'static, str>>,
}

impl RegistrationType {
    /// A registration type over static strings, usable in constants.
    pub const fn from_static(name: &'static str, label: &'static str) -> Self {
        Self {
            name: Cow::Borrowed(name),
            label: Some(Cow::Borrowed(label)),
        }
    }

    /// A static registration type whose label is its name.
    pub const fn named(name: &'static str) -> Self {
        Self {
            name: Cow::Borrowed(name),
            label: None,
        }
    }

    /// Create a registration type. A leading `ChainLink:` prefix is dropped.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let name = match name.strip_prefix(CHAIN_LINK_KEY_PREFIX) {
            Some(stripped) => stripped.to_string(),
            None => name,
        };
        Self {
            name: Cow::Owned(name),
            label: None,
        }
    }

    /// Set the display label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(Cow::Owned(label.into()));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The display label, falling back to the name.
    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or(self.name.as_ref())
    }

    /// True when `other` has the same name and the same label.
    ///
    /// Stricter than `==`, which compares names only.
    pub fn is_same_instance(&self, other: &RegistrationType) -> bool {
        self.name == other.name && self.label == other.label
    }

    pub fn name_bytes(&self) -> &[u8] {
        self.name.as_bytes()
    }

    /// The typed key for this registration type: `ChainLink:<name>`.
    pub fn chain_link_key(&self) -> String {
        format!("{CHAIN_LINK_KEY_PREFIX}{}", self.name)
    }

    /// True when `key` names this type, with or without the `ChainLink:` prefix.
    ///
    /// Both the prefix and the name compare case-insensitively. The bare key
    /// `ChainLink` names the default ChainLink type.
    pub fn is_chain_link(&self, key: &str) -> bool {
        let name = strip_prefix_ignore_case(key, CHAIN_LINK_KEY_PREFIX).unwrap_or(key);
        name.eq_ignore_ascii_case(&self.name)
    }
}

/// Strip `prefix` from the start of `s`, ignoring ASCII case.
pub(crate) fn strip_prefix_ignore_case<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let head = s.get(..prefix.len())?;
    if head.eq_ignore_ascii_case(prefix) {
        s.get(prefix.len()..)
    } else {
        None
    }
}

impl PartialEq for RegistrationType {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for RegistrationType {}

impl PartialOrd for RegistrationType {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RegistrationType {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name.cmp(&other.name)
    }
}

impl Hash for RegistrationType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Display for RegistrationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// The default registration type catalogue.
pub mod defaults {
    use super::RegistrationType;

    pub const CHAIN_TYPE: RegistrationType = RegistrationType::from_static("ChainType", "Chain type");
    pub const CHAIN_LINK: RegistrationType = RegistrationType::from_static("ChainLink", "Chain link");
    pub const HASH: RegistrationType = RegistrationType::from_static("Hash", "File/content hash");
    pub const LIST: RegistrationType = RegistrationType::named("List");
    pub const LIST_ITEM: RegistrationType = RegistrationType::named("ListItem");
    pub const NODE_ID: RegistrationType = RegistrationType::named("NodeId");
    pub const SITE: RegistrationType = RegistrationType::named("Site");
    pub const CONTEXT: RegistrationType = RegistrationType::named("Context");
    pub const ROOT: RegistrationType = RegistrationType::named("Root");
    pub const URL: RegistrationType = RegistrationType::named("URL");
    pub const REMARK: RegistrationType = RegistrationType::named("Remark");
    pub const CASE_ID: RegistrationType = RegistrationType::from_static("CaseId", "Case Id");
    pub const DOCUMENT_ID: RegistrationType = RegistrationType::from_static("DocumentId", "Document Id");
    pub const GENERAL: RegistrationType = RegistrationType::named("General");
    pub const X509_THUMBPRINT: RegistrationType =
        RegistrationType::from_static("X509Thumbprint", "X.509 Thumbprint");
    pub const X509_PUBLIC_KEY: RegistrationType =
        RegistrationType::from_static("X509PublicKey", "X.509 Public key");
    pub const X509_DN: RegistrationType = RegistrationType::from_static("X509DN", "X.509 DN");
    pub const CRYPTO_KEYS_KEY_ID: RegistrationType =
        RegistrationType::from_static("CryptoKeysKeyId", "Crypto Keys KeyId");
    pub const CRYPTO_KEYS_LIST: RegistrationType =
        RegistrationType::from_static("CryptoKeysList", "Crypto Keys List");

    /// Every default registration type.
    pub fn all() -> Vec<RegistrationType> {
        vec![
            CHAIN_TYPE,
            CHAIN_LINK,
            HASH,
            LIST,
            LIST_ITEM,
            NODE_ID,
            SITE,
            CONTEXT,
            ROOT,
            URL,
            REMARK,
            CASE_ID,
            DOCUMENT_ID,
            GENERAL,
            X509_THUMBPRINT,
            X509_PUBLIC_KEY,
            X509_DN,
            CRYPTO_KEYS_KEY_ID,
            CRYPTO_KEYS_LIST,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_identity_is_name_only() {
        let a = RegistrationType::new("Hash").with_label("one");
        let b = RegistrationType::new("Hash").with_label("two");
        assert_eq!(a, b);
        assert_eq!(a, defaults::HASH);

        let set: HashSet<_> = [a, b].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_same_instance_compares_labels() {
        assert!(defaults::SITE.is_same_instance(&RegistrationType::new("Site")));
        assert!(defaults::HASH.is_same_instance(&defaults::HASH.clone()));
        assert!(!defaults::SITE.is_same_instance(&RegistrationType::new("Site").with_label("other")));
        assert!(!defaults::SITE.is_same_instance(&defaults::LIST));
    }

    #[test]
    fn test_label_falls_back_to_name() {
        assert_eq!(defaults::HASH.label(), "File/content hash");
        assert_eq!(defaults::NODE_ID.label(), "NodeId");
        assert_eq!(RegistrationType::new("Custom").label(), "Custom");
    }

    #[test]
    fn test_new_strips_chain_link_prefix() {
        let ty = RegistrationType::new("ChainLink:Site");
        assert_eq!(ty.name(), "Site");
        assert_eq!(ty, defaults::SITE);
    }

    #[test]
    fn test_chain_link_key() {
        assert_eq!(defaults::HASH.chain_link_key(), "ChainLink:Hash");
        assert_eq!(defaults::X509_DN.chain_link_key(), "ChainLink:X509DN");
    }

    #[test]
    fn test_is_chain_link() {
        assert!(defaults::NODE_ID.is_chain_link("ChainLink:NodeId"));
        assert!(defaults::NODE_ID.is_chain_link("chainlink:nodeid"));
        assert!(!defaults::NODE_ID.is_chain_link("ChainLink:Site"));
        assert!(defaults::CHAIN_LINK.is_chain_link("ChainLink"));
        assert!(!defaults::HASH.is_chain_link("ChainLink"));
    }

    #[test]
    fn test_default_catalogue_names_are_unique() {
        let all = defaults::all();
        let names: HashSet<&str> = all.iter().map(RegistrationType::name).collect();
        assert_eq!(names.len(), all.len());
        assert_eq!(all.len(), 19);
    }

    #[test]
    fn test_serde_roundtrip() {
        let json = serde_json::to_string(&defaults::CASE_ID).unwrap();
        assert_eq!(json, r#"{"name":"CaseId","label":"Case Id"}"#);
        let back: RegistrationType = serde_json::from_str(r#"{"name":"Root"}"#).unwrap();
        assert_eq!(back, defaults::ROOT);
        assert_eq!(back.label(), "Root");
    }
}
