//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use chainref::{Toolkit, ToolkitConfig};
use chainref_core::{ChainId, ChainRecord, EntryId, EntryRecord};
use chainref_links::{Link, LinkBuilder, RegistrationType};

/// A test fixture with a fully registered toolkit.
pub struct TestFixture {
    pub toolkit: Toolkit,
}

impl TestFixture {
    /// Create a fixture with every default subsystem registered.
    pub fn new() -> Self {
        Self::with_config(ToolkitConfig::default())
    }

    pub fn with_config(config: ToolkitConfig) -> Self {
        Self {
            toolkit: Toolkit::new(config),
        }
    }

    /// A chain started by an entry with the given external ids and no content.
    pub fn make_chain(&self, external_ids: &[&str]) -> ChainRecord {
        ChainRecord::new(EntryRecord::new().external_ids(external_ids.iter().copied()))
    }

    /// Chain id of a chain started with the given external ids.
    pub fn chain_id(&self, external_ids: &[&str]) -> ChainId {
        self.toolkit
            .chain_id(external_ids)
            .expect("fixture external ids fit the length prefix")
    }

    /// An entry with content and external ids.
    pub fn make_entry(&self, content: &[u8], external_ids: &[&str]) -> EntryRecord {
        EntryRecord::new()
            .content(content.to_vec())
            .external_ids(external_ids.iter().copied())
    }

    /// Entry id of `entry` within `chain_id`.
    pub fn entry_id(&self, chain_id: &ChainId, entry: &EntryRecord) -> EntryId {
        entry
            .entry_id(chain_id)
            .expect("fixture entries fit the length prefix")
    }

    /// A builder for an external id link with every ancestor filled in.
    pub fn external_id_link(
        &self,
        registration_type: RegistrationType,
        context: &str,
        chain_id: &ChainId,
        entry_id: &EntryId,
        index: usize,
    ) -> LinkBuilder {
        self.toolkit
            .link(Link::ExternalId, registration_type)
            .context(context)
            .and_then(|b| b.chain_id(chain_id.to_hex()))
            .and_then(|b| b.entry_id(entry_id.to_hex()))
            .and_then(|b| b.external_id(index))
            .expect("fixture link parts are valid")
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chainref_links::defaults;

    #[test]
    fn test_fixture_chain_and_entry() {
        let fixture = TestFixture::new();
        let chain = fixture.make_chain(&["first external id", "second external id"]);
        let chain_id = fixture.chain_id(&["first external id", "second external id"]);
        assert_eq!(chain.chain_id().unwrap(), chain_id);
        assert_eq!(chain_id.to_hex(), crate::vectors::CHAIN_ID);

        let entry = fixture.make_entry(b"body", &["x"]);
        let entry_id = fixture.entry_id(&chain_id, &entry);
        let link = fixture.external_id_link(defaults::HASH, "ctx", &chain_id, &entry_id, 0);
        let target = link.build_target_link().unwrap();
        assert_eq!(
            target,
            format!("/ctx/chains/{}/entries/{}/externalids/0", chain_id, entry_id)
        );
    }
}
