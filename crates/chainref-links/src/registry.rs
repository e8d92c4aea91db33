//! The registration registry.
//!
//! Registration types are interned once per name. The first instance added
//! under a name is the one that is kept; later adds under the same name never
//! replace it or its label. Subsystem associations are append-only and are
//! only recorded for the stored instance itself: re-adding a distinct
//! instance under a known name associates nothing.
//!
//! Mutation needs `&mut Registry`, so writes are exclusive by construction.
//! Populate the registry at startup, then share it read-only (see
//! `chainref::Toolkit`, which freezes it behind an `Arc`).

use std::collections::{BTreeMap, BTreeSet};

use crate::registration::{RegistrationType, CHAIN_LINK_KEY_PREFIX};
use crate::subsystem::Subsystem;

#[derive(Debug, Clone)]
struct RegisteredType {
    registration_type: RegistrationType,
    subsystems: BTreeSet<String>,
}

/// Process-wide store of registration types and their subsystem associations.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    types: BTreeMap<String, RegisteredType>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a registration type on behalf of a subsystem.
    ///
    /// Inserts `ty` only if no type with its name is stored yet. The
    /// association with `subsystem` is recorded only when `ty` is the stored
    /// instance (same name and label). A distinct instance under a known
    /// name is a no-op.
    pub fn add(&mut self, ty: &RegistrationType, subsystem: &Subsystem) {
        let entry = self
            .types
            .entry(ty.name().to_string())
            .or_insert_with(|| {
                tracing::debug!(name = ty.name(), "interning registration type");
                RegisteredType {
                    registration_type: ty.clone(),
                    subsystems: BTreeSet::new(),
                }
            });
        if !entry.registration_type.is_same_instance(ty) {
            tracing::debug!(
                name = ty.name(),
                subsystem = subsystem.name(),
                "registration type already stored, ignoring duplicate"
            );
            return;
        }
        if entry.subsystems.insert(subsystem.name().to_string()) {
            tracing::debug!(
                name = ty.name(),
                subsystem = subsystem.name(),
                "associated registration type with subsystem"
            );
        }
    }

    /// Look up a registration type by name.
    ///
    /// Tries an exact match first. On a miss, drops an optional `ChainLink:`
    /// prefix (exact case) and compares the rest case-insensitively against
    /// stored keys and names.
    pub fn get(&self, name: &str) -> Option<&RegistrationType> {
        if let Some(found) = self.types.get(name) {
            return Some(&found.registration_type);
        }
        let bare = name.strip_prefix(CHAIN_LINK_KEY_PREFIX).unwrap_or(name);
        self.types
            .iter()
            .find(|(key, stored)| {
                key.eq_ignore_ascii_case(bare)
                    || stored.registration_type.name().eq_ignore_ascii_case(bare)
            })
            .map(|(_, stored)| &stored.registration_type)
    }

    /// True iff a type with this name is stored and the stored type is
    /// associated with `subsystem`.
    pub fn contains(&self, ty: &RegistrationType, subsystem: &Subsystem) -> bool {
        self.types
            .get(ty.name())
            .is_some_and(|stored| stored.subsystems.contains(subsystem.name()))
    }

    /// All stored registration types, ordered by name.
    pub fn all(&self) -> impl Iterator<Item = &RegistrationType> {
        self.types.values().map(|stored| &stored.registration_type)
    }

    /// Stored registration types associated with the named subsystem.
    pub fn all_for<'a>(&'a self, subsystem: &'a str) -> impl Iterator<Item = &'a RegistrationType> + 'a {
        self.types
            .values()
            .filter(move |stored| stored.subsystems.contains(subsystem))
            .map(|stored| &stored.registration_type)
    }

    /// Names of the subsystems a stored type is associated with.
    pub fn subsystems_of(&self, name: &str) -> Vec<&str> {
        self.types
            .get(name)
            .map(|stored| stored.subsystems.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Number of stored registration types.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Register a subsystem's default types.
    pub fn init_subsystem(&mut self, subsystem: &mut Subsystem) {
        subsystem.register_default_registrations(self);
    }

    /// Create and register the four default subsystems.
    pub fn init_default_subsystems(&mut self) -> Vec<Subsystem> {
        let mut subsystems = vec![
            Subsystem::alfresco(),
            Subsystem::sharepoint(),
            Subsystem::file(),
            Subsystem::custom(),
        ];
        for subsystem in &mut subsystems {
            self.init_subsystem(subsystem);
        }
        tracing::debug!(
            subsystems = subsystems.len(),
            types = self.len(),
            "initialized default subsystems"
        );
        subsystems
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registration::defaults;

    #[test]
    fn test_alfresco_registrations() {
        let mut registry = Registry::new();
        let mut alfresco = Subsystem::alfresco();
        registry.init_subsystem(&mut alfresco);

        assert!(registry.contains(&defaults::HASH, &alfresco));
        assert!(!registry.contains(&defaults::LIST_ITEM, &alfresco));
        assert!(registry.get("ListItem").is_none());
    }

    #[test]
    fn test_first_writer_wins() {
        let subsystem = Subsystem::new("Test");
        let mut registry = Registry::new();
        registry.add(&RegistrationType::new("Thing").with_label("first"), &subsystem);
        registry.add(&RegistrationType::new("Thing").with_label("second"), &subsystem);

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("Thing").unwrap().label(), "first");
    }

    #[test]
    fn test_contains_checks_stored_associations() {
        let alfresco = Subsystem::new("Alfresco");
        let sharepoint = Subsystem::new("Sharepoint");
        let mut registry = Registry::new();
        registry.add(&defaults::SITE, &alfresco);

        assert!(registry.contains(&defaults::SITE, &alfresco));
        assert!(!registry.contains(&defaults::SITE, &sharepoint));

        // The shared instance accumulates associations.
        registry.add(&defaults::SITE, &sharepoint);
        assert!(registry.contains(&defaults::SITE, &sharepoint));
        assert_eq!(registry.subsystems_of("Site"), vec!["Alfresco", "Sharepoint"]);
    }

    #[test]
    fn test_distinct_instance_does_not_merge_associations() {
        let alfresco = Subsystem::new("Alfresco");
        let sharepoint = Subsystem::new("Sharepoint");
        let mut registry = Registry::new();
        registry.add(&defaults::SITE, &alfresco);
        registry.add(&RegistrationType::new("Site").with_label("other"), &sharepoint);

        assert_eq!(registry.len(), 1);
        assert!(registry.contains(&defaults::SITE, &alfresco));
        assert!(!registry.contains(&defaults::SITE, &sharepoint));
        assert_eq!(registry.get("Site").unwrap().label(), "Site");
        assert_eq!(registry.subsystems_of("Site"), vec!["Alfresco"]);
        assert_eq!(registry.all_for("Sharepoint").count(), 0);
    }

    #[test]
    fn test_get_fallbacks() {
        let mut registry = Registry::new();
        registry.add(&defaults::NODE_ID, &Subsystem::new("Alfresco"));

        assert_eq!(registry.get("NodeId"), Some(&defaults::NODE_ID));
        assert_eq!(registry.get("nodeid"), Some(&defaults::NODE_ID));
        assert_eq!(registry.get("ChainLink:NodeId"), Some(&defaults::NODE_ID));
        assert_eq!(registry.get("ChainLink:NODEID"), Some(&defaults::NODE_ID));
        // The namespace prefix itself is case-sensitive.
        assert_eq!(registry.get("chainlink:NodeId"), None);
        assert_eq!(registry.get("CHAINLINK:nodeid"), None);
        assert_eq!(registry.get("ChainLink:Site"), None);
        assert_eq!(registry.get(""), None);
    }

    #[test]
    fn test_all_for_subsystem() {
        let mut registry = Registry::new();
        let subsystems = registry.init_default_subsystems();
        assert_eq!(subsystems.len(), 4);

        let file: Vec<&str> = registry.all_for("File").map(RegistrationType::name).collect();
        assert_eq!(
            file,
            vec!["ChainLink", "Context", "DocumentId", "Hash", "Remark", "Root"]
        );
        assert!(registry.all().any(|ty| ty == &defaults::LIST_ITEM));
        assert_eq!(
            registry.subsystems_of("ChainLink"),
            vec!["Alfresco", "Custom", "File", "Sharepoint"]
        );
        assert!(registry.subsystems_of("Missing").is_empty());
    }
}
