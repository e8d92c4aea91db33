//! Depth-ordered link parts and target formatting.

use std::collections::BTreeMap;

use crate::error::{LinkError, Result};
use crate::link::{Link, PLACEHOLDER};

/// The normalized value of a [`Link::Content`] part.
pub const CONTENT_VALUE: &str = "content";

/// A depth-ordered mapping of link levels to their values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkPath {
    parts: BTreeMap<Link, String>,
}

impl LinkPath {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and record a part, replacing any earlier value for the same link.
    ///
    /// - `ExternalId` values must be a non-negative decimal index.
    /// - `Content` values must be empty or `content` in any case, and are
    ///   stored as `content`.
    /// - Every other value must be non-empty. Values under the `/`-rooted
    ///   links must not contain `/`.
    pub fn insert(&mut self, link: Link, value: impl Into<String>) -> Result<()> {
        let value = normalize(link, value.into())?;
        self.parts.insert(link, value);
        Ok(())
    }

    pub fn get(&self, link: Link) -> Option<&str> {
        self.parts.get(&link).map(String::as_str)
    }

    pub fn contains(&self, link: Link) -> bool {
        self.parts.contains_key(&link)
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    pub fn clear(&mut self) {
        self.parts.clear();
    }

    /// The deepest recorded link.
    pub fn last(&self) -> Option<Link> {
        self.parts.keys().next_back().copied()
    }

    /// Recorded parts, root-most first.
    pub fn iter(&self) -> impl Iterator<Item = (Link, &str)> {
        self.parts.iter().map(|(link, value)| (*link, value.as_str()))
    }

    /// Format the target link of the deepest recorded part.
    ///
    /// The recorded parts must be exactly the ancestor chain of the deepest
    /// link, otherwise this fails with [`LinkError::IncompleteAddress`].
    pub fn target(&self) -> Result<String> {
        let last = self.last().ok_or(LinkError::IncompleteAddress {
            recorded: 0,
            required: 1,
        })?;
        let ancestry = last.ancestry();
        let incomplete = LinkError::IncompleteAddress {
            recorded: self.parts.len(),
            required: ancestry.len(),
        };
        if self.parts.len() != ancestry.len() {
            return Err(incomplete);
        }

        let mut values = Vec::with_capacity(ancestry.len());
        for link in &ancestry {
            match self.parts.get(link) {
                Some(value) => values.push(value.as_str()),
                None => return Err(incomplete),
            }
        }
        Ok(fill_template(last.template(), &values))
    }
}

impl<'a> IntoIterator for &'a LinkPath {
    type Item = (&'a Link, &'a String);
    type IntoIter = std::collections::btree_map::Iter<'a, Link, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.parts.iter()
    }
}

fn normalize(link: Link, value: String) -> Result<String> {
    match link {
        Link::ExternalId => {
            if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
                return Err(LinkError::malformed(format!(
                    "external id index must be a non-negative integer, got {value:?}"
                )));
            }
            Ok(value)
        }
        Link::Content => {
            if value.is_empty() || value.eq_ignore_ascii_case(CONTENT_VALUE) {
                Ok(CONTENT_VALUE.to_string())
            } else {
                Err(LinkError::malformed(format!(
                    "content part must be empty or {CONTENT_VALUE:?}, got {value:?}"
                )))
            }
        }
        _ => {
            if value.is_empty() {
                return Err(LinkError::malformed(format!("{link} value must not be empty")));
            }
            if link != Link::None && value.contains('/') {
                return Err(LinkError::malformed(format!(
                    "{link} value must not contain '/', got {value:?}"
                )));
            }
            Ok(value)
        }
    }
}

/// Replace each placeholder in order; surplus values are ignored.
fn fill_template(template: &str, values: &[&str]) -> String {
    let mut out = String::with_capacity(template.len() + values.iter().map(|v| v.len()).sum::<usize>());
    let mut values = values.iter();
    let mut rest = template;
    while let Some(pos) = rest.find(PLACEHOLDER) {
        out.push_str(&rest[..pos]);
        if let Some(value) = values.next() {
            out.push_str(value);
        }
        rest = &rest[pos + PLACEHOLDER.len()..];
    }
    out.push_str(rest);
    out
}
