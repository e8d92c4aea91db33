//! Subsystems: named deployment contexts and their registration types.

use crate::registration::{defaults, RegistrationType};
use crate::registry::Registry;

/// A named deployment context.
///
/// Holds the registration types it declares as defaults and a local list of
/// the types it has registered. Registering through a subsystem also records
/// the association in the [`Registry`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subsystem {
    name: String,
    defaults: Vec<RegistrationType>,
    registered: Vec<RegistrationType>,
}

impl Subsystem {
    /// A subsystem without default registration types.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_defaults(name, Vec::new())
    }

    pub fn with_defaults(name: impl Into<String>, defaults: Vec<RegistrationType>) -> Self {
        Self {
            name: name.into(),
            defaults,
            registered: Vec::new(),
        }
    }

    pub fn alfresco() -> Self {
        Self::with_defaults(
            "Alfresco",
            vec![defaults::CHAIN_LINK, defaults::HASH, defaults::NODE_ID, defaults::SITE],
        )
    }

    pub fn sharepoint() -> Self {
        Self::with_defaults(
            "Sharepoint",
            vec![
                defaults::CHAIN_LINK,
                defaults::HASH,
                defaults::LIST,
                defaults::LIST_ITEM,
                defaults::SITE,
            ],
        )
    }

    pub fn file() -> Self {
        Self::with_defaults(
            "File",
            vec![
                defaults::CHAIN_LINK,
                defaults::HASH,
                defaults::DOCUMENT_ID,
                defaults::CONTEXT,
                defaults::REMARK,
                defaults::ROOT,
            ],
        )
    }

    pub fn custom() -> Self {
        Self::with_defaults(
            "Custom",
            vec![
                defaults::CHAIN_LINK,
                defaults::ROOT,
                defaults::CONTEXT,
                defaults::GENERAL,
                defaults::URL,
            ],
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The registration types this subsystem declares as defaults.
    pub fn default_registrations(&self) -> &[RegistrationType] {
        &self.defaults
    }

    /// Register a type with this subsystem and record it in the registry.
    pub fn register(&mut self, registry: &mut Registry, ty: RegistrationType) {
        registry.add(&ty, self);
        if !self.registered.contains(&ty) {
            tracing::debug!(subsystem = %self.name, name = ty.name(), "registered type");
            self.registered.push(ty);
        }
    }

    /// Register every default type of this subsystem.
    pub fn register_default_registrations(&mut self, registry: &mut Registry) {
        for ty in self.defaults.clone() {
            self.register(registry, ty);
        }
    }

    /// Registration types registered through this subsystem, in registration order.
    pub fn registered_types(&self) -> &[RegistrationType] {
        &self.registered
    }

    /// True when `ty` was registered through this subsystem. Does not consult the registry.
    pub fn is_registered(&self, ty: &RegistrationType) -> bool {
        self.registered.contains(ty)
    }

    pub fn has_registrations(&self) -> bool {
        !self.registered.is_empty()
    }
}
