//! Proptest generators for property-based testing.

use proptest::prelude::*;

use chainref_core::{ChainId, EntryRecord, ExternalId};
use chainref_links::Link;

/// Generate a random ChainId.
pub fn chain_id() -> impl Strategy<Value = ChainId> {
    any::<[u8; 32]>().prop_map(ChainId::from_bytes)
}

/// Generate one external id value.
pub fn external_id(max_len: usize) -> impl Strategy<Value = ExternalId> {
    prop::collection::vec(any::<u8>(), 0..=max_len).prop_map(ExternalId::from)
}

/// Generate an ordered list of external ids.
pub fn external_ids(max_count: usize, max_len: usize) -> impl Strategy<Value = Vec<ExternalId>> {
    prop::collection::vec(external_id(max_len), 0..=max_count)
}

/// Generate content bytes of specified max length.
pub fn content(max_len: usize) -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..=max_len)
}

/// Generate a path segment value usable in a target link.
pub fn segment() -> impl Strategy<Value = String> {
    "[A-Za-z0-9_.-]{1,24}".prop_map(String::from)
}

/// Generate any link level.
pub fn link() -> impl Strategy<Value = Link> {
    prop::sample::select(Link::ALL.to_vec())
}

/// Parameters for generating an entry.
#[derive(Debug, Clone)]
pub struct EntryParams {
    pub chain_id: Option<ChainId>,
    pub content: Option<Vec<u8>>,
    pub external_ids: Vec<ExternalId>,
}

impl EntryParams {
    /// The entry as a record.
    pub fn record(&self) -> EntryRecord {
        let record = EntryRecord::new().external_ids(self.external_ids.iter().cloned());
        match &self.content {
            Some(content) => record.content(content.clone()),
            None => record,
        }
    }
}

impl Arbitrary for EntryParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (
            prop::option::of(chain_id()),
            prop::option::of(content(512)),
            external_ids(8, 64),
        )
            .prop_map(|(chain_id, content, external_ids)| EntryParams {
                chain_id,
                content,
                external_ids,
            })
            .boxed()
    }
}

/// Parts for a complete target link of the given level.
pub fn link_parts(link: Link) -> impl Strategy<Value = Vec<(Link, String)>> {
    let ancestry = link.ancestry();
    (prop::collection::vec(segment(), ancestry.len()), 0usize..100_000).prop_map(
        move |(values, index)| {
            ancestry
                .iter()
                .zip(values)
                .map(|(ancestor, value)| match ancestor {
                    Link::ExternalId => (*ancestor, index.to_string()),
                    Link::Content => (*ancestor, "content".to_string()),
                    _ => (*ancestor, value),
                })
                .collect()
        },
    )
}
