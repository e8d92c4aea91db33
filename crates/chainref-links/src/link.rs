//! The fixed link hierarchy.
//!
//! Six link levels form a tree by parent pointer:
//!
//! ```text
//! None        %s
//! Context     /%s
//!   ChainId     /%s/chains/%s
//!     EntryId     /%s/chains/%s/entries/%s
//!       ExternalId  /%s/chains/%s/entries/%s/externalids/%s
//!       Content     /%s/chains/%s/entries/%s/content
//! ```
//!
//! Templates and parents live in one static table. Depth and ancestry are
//! derived by walking that table, never from declaration order.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

use crate::builder::LinkBuilder;
use crate::registration::RegistrationType;

/// Placeholder marker inside a link template.
pub const PLACEHOLDER: &str = "%s";

/// One level of the link hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Link {
    None,
    Context,
    ChainId,
    EntryId,
    ExternalId,
    Content,
}

struct LinkDef {
    name: &'static str,
    template: &'static str,
    parent: Option<Link>,
}

static TABLE: [LinkDef; 6] = [
    LinkDef {
        name: "None",
        template: "%s",
        parent: None,
    },
    LinkDef {
        name: "Context",
        template: "/%s",
        parent: None,
    },
    LinkDef {
        name: "ChainId",
        template: "/%s/chains/%s",
        parent: Some(Link::Context),
    },
    LinkDef {
        name: "EntryId",
        template: "/%s/chains/%s/entries/%s",
        parent: Some(Link::ChainId),
    },
    LinkDef {
        name: "ExternalId",
        template: "/%s/chains/%s/entries/%s/externalids/%s",
        parent: Some(Link::EntryId),
    },
    LinkDef {
        name: "Content",
        template: "/%s/chains/%s/entries/%s/content",
        parent: Some(Link::EntryId),
    },
];

impl Link {
    /// Every link, in table order.
    pub const ALL: [Link; 6] = [
        Link::None,
        Link::Context,
        Link::ChainId,
        Link::EntryId,
        Link::ExternalId,
        Link::Content,
    ];

    fn index(self) -> usize {
        match self {
            Link::None => 0,
            Link::Context => 1,
            Link::ChainId => 2,
            Link::EntryId => 3,
            Link::ExternalId => 4,
            Link::Content => 5,
        }
    }

    fn def(self) -> &'static LinkDef {
        &TABLE[self.index()]
    }

    pub fn name(self) -> &'static str {
        self.def().name
    }

    /// Format template; each `%s` is filled with one ancestor value, root first.
    pub fn template(self) -> &'static str {
        self.def().template
    }

    pub fn parent(self) -> Option<Link> {
        self.def().parent
    }

    pub fn has_parent(self) -> bool {
        self.parent().is_some()
    }

    /// Links whose parent is this link.
    pub fn children(self) -> Vec<Link> {
        Link::ALL
            .into_iter()
            .filter(|link| link.parent() == Some(self))
            .collect()
    }

    pub fn has_children(self) -> bool {
        Link::ALL.iter().any(|link| link.parent() == Some(self))
    }

    /// Distance from the root. Roots have depth 0.
    pub fn depth(self) -> usize {
        let mut depth = 0;
        let mut current = self;
        while let Some(parent) = current.parent() {
            depth += 1;
            current = parent;
        }
        depth
    }

    /// This link and all its ancestors, root first.
    pub fn ancestry(self) -> Vec<Link> {
        let mut chain = vec![self];
        let mut current = self;
        while let Some(parent) = current.parent() {
            chain.push(parent);
            current = parent;
        }
        chain.reverse();
        chain
    }

    /// Number of placeholders in the template.
    pub fn placeholders(self) -> usize {
        self.template().matches(PLACEHOLDER).count()
    }

    /// Start building a link of this kind for the given registration type.
    pub fn builder(self, registration_type: RegistrationType) -> LinkBuilder {
        LinkBuilder::new(self, registration_type)
    }
}

impl PartialOrd for Link {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Links order by depth, then by table position.
impl Ord for Link {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.depth(), self.index()).cmp(&(other.depth(), other.index()))
    }
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
