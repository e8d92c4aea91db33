//! Link builder: accumulates parts and produces target links and link keys.

use crate::error::Result;
use crate::link::Link;
use crate::path::{LinkPath, CONTENT_VALUE};
use crate::registration::{defaults, RegistrationType};

/// Builder for one link against one registration type.
///
/// Created per call through [`Link::builder`] and discarded once the target
/// link or link key has been produced.
#[derive(Debug, Clone)]
pub struct LinkBuilder {
    link: Link,
    registration_type: RegistrationType,
    path: LinkPath,
}

impl LinkBuilder {
    pub fn new(link: Link, registration_type: RegistrationType) -> Self {
        Self {
            link,
            registration_type,
            path: LinkPath::new(),
        }
    }

    /// The link kind this builder was created for.
    pub fn link(&self) -> Link {
        self.link
    }

    pub fn registration_type(&self) -> &RegistrationType {
        &self.registration_type
    }

    /// Record a part. See [`LinkPath::insert`] for the value rules.
    pub fn add(mut self, link: Link, value: impl Into<String>) -> Result<Self> {
        self.path.insert(link, value)?;
        Ok(self)
    }

    /// Record several parts in order, stopping at the first invalid one.
    pub fn add_all<I, V>(mut self, parts: I) -> Result<Self>
    where
        I: IntoIterator<Item = (Link, V)>,
        V: Into<String>,
    {
        for (link, value) in parts {
            self.path.insert(link, value)?;
        }
        Ok(self)
    }

    pub fn none(self, value: impl Into<String>) -> Result<Self> {
        self.add(Link::None, value)
    }

    pub fn context(self, value: impl Into<String>) -> Result<Self> {
        self.add(Link::Context, value)
    }

    pub fn chain_id(self, value: impl Into<String>) -> Result<Self> {
        self.add(Link::ChainId, value)
    }

    pub fn entry_id(self, value: impl Into<String>) -> Result<Self> {
        self.add(Link::EntryId, value)
    }

    pub fn external_id(self, index: usize) -> Result<Self> {
        self.add(Link::ExternalId, index.to_string())
    }

    pub fn content(self) -> Result<Self> {
        self.add(Link::Content, CONTENT_VALUE)
    }

    /// Drop every recorded part.
    pub fn reset(mut self) -> Self {
        self.path.clear();
        self
    }

    /// The parts recorded so far.
    pub fn parts(&self) -> &LinkPath {
        &self.path
    }

    /// Name of the registration type this link is keyed by.
    pub fn link_type_name(&self) -> &str {
        self.registration_type.name()
    }

    /// Format the target link from the recorded parts.
    pub fn build_target_link(&self) -> Result<String> {
        self.path.target()
    }

    pub fn build_target_link_bytes(&self) -> Result<Vec<u8>> {
        self.build_target_link().map(String::into_bytes)
    }

    /// `ChainLink` for the default ChainLink type, `ChainLink:<name>` otherwise.
    pub fn build_link_key(&self) -> String {
        if self.registration_type == defaults::CHAIN_LINK {
            defaults::CHAIN_LINK.name().to_string()
        } else {
            self.registration_type.chain_link_key()
        }
    }

    pub fn build_link_key_bytes(&self) -> Vec<u8> {
        self.build_link_key().into_bytes()
    }
}
