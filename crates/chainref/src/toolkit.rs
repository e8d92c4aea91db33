//! The Toolkit: startup wiring for identifiers, registrations and links.
//!
//! All registration happens in [`Toolkit::new`]. Afterwards the registry and
//! subsystems are frozen and shared, so the toolkit can be cloned and used
//! from any thread without locking.

use std::io::Read;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use chainref_core::digest::{self, HashAlgorithm, STREAM_CHUNK_SIZE};
use chainref_core::{canonical, ChainId, EntryId, ExternalIdValue};
use chainref_links::{parser, Link, LinkBuilder, LinkPath, RegistrationType, Registry, Subsystem};

use crate::error::Result;

/// The built-in subsystems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DefaultSubsystem {
    Alfresco,
    Sharepoint,
    File,
    Custom,
}

impl DefaultSubsystem {
    /// All built-in subsystems.
    pub const ALL: [DefaultSubsystem; 4] = [
        DefaultSubsystem::Alfresco,
        DefaultSubsystem::Sharepoint,
        DefaultSubsystem::File,
        DefaultSubsystem::Custom,
    ];

    fn create(self) -> Subsystem {
        match self {
            DefaultSubsystem::Alfresco => Subsystem::alfresco(),
            DefaultSubsystem::Sharepoint => Subsystem::sharepoint(),
            DefaultSubsystem::File => Subsystem::file(),
            DefaultSubsystem::Custom => Subsystem::custom(),
        }
    }
}

/// An additional subsystem declared in configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubsystemConfig {
    /// Subsystem name.
    pub name: String,
    /// Names of its default registration types; `ChainLink:` keys are accepted.
    #[serde(default)]
    pub registrations: Vec<String>,
}

/// Configuration for the Toolkit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolkitConfig {
    /// Built-in subsystems to register at startup.
    pub default_subsystems: Vec<DefaultSubsystem>,
    /// Additional subsystems, registered after the built-in ones.
    pub custom_subsystems: Vec<SubsystemConfig>,
    /// Chunk size for stream hashing.
    pub stream_chunk_size: usize,
}

impl Default for ToolkitConfig {
    fn default() -> Self {
        Self {
            default_subsystems: DefaultSubsystem::ALL.to_vec(),
            custom_subsystems: Vec::new(),
            stream_chunk_size: STREAM_CHUNK_SIZE,
        }
    }
}

impl ToolkitConfig {
    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Identifier derivation, link building and the frozen registry.
#[derive(Debug, Clone)]
pub struct Toolkit {
    config: ToolkitConfig,
    registry: Arc<Registry>,
    subsystems: Arc<Vec<Subsystem>>,
}

impl Toolkit {
    /// Create a toolkit, registering every configured subsystem.
    pub fn new(config: ToolkitConfig) -> Self {
        let mut registry = Registry::new();
        let mut subsystems = Vec::new();

        for default in &config.default_subsystems {
            let mut subsystem = default.create();
            registry.init_subsystem(&mut subsystem);
            subsystems.push(subsystem);
        }

        for custom in &config.custom_subsystems {
            let types = custom
                .registrations
                .iter()
                .map(|name| match registry.get(name) {
                    Some(ty) => ty.clone(),
                    None => {
                        tracing::warn!(
                            subsystem = %custom.name,
                            name = %name,
                            "unknown registration type, creating it"
                        );
                        RegistrationType::new(name.as_str())
                    }
                })
                .collect();
            let mut subsystem = Subsystem::with_defaults(custom.name.clone(), types);
            registry.init_subsystem(&mut subsystem);
            subsystems.push(subsystem);
        }

        tracing::debug!(
            subsystems = subsystems.len(),
            registration_types = registry.len(),
            "toolkit ready"
        );

        Self {
            config,
            registry: Arc::new(registry),
            subsystems: Arc::new(subsystems),
        }
    }

    pub fn config(&self) -> &ToolkitConfig {
        &self.config
    }

    /// The frozen registry.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn subsystems(&self) -> &[Subsystem] {
        &self.subsystems
    }

    /// Look up a registered subsystem by name.
    pub fn subsystem(&self, name: &str) -> Option<&Subsystem> {
        self.subsystems.iter().find(|s| s.name() == name)
    }

    /// Look up a registration type by name or `ChainLink:` key.
    pub fn registration_type(&self, name: &str) -> Option<&RegistrationType> {
        self.registry.get(name)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Identifiers
    // ─────────────────────────────────────────────────────────────────────────

    /// Chain id of a chain whose first entry has these external ids.
    pub fn chain_id<T: ExternalIdValue>(&self, external_ids: &[T]) -> Result<ChainId> {
        Ok(canonical::chain_id(external_ids)?)
    }

    /// Entry id within the chain given as hex, or as the chain's first entry.
    pub fn entry_id<T: ExternalIdValue>(
        &self,
        chain_id: Option<&str>,
        content: Option<&[u8]>,
        external_ids: &[T],
    ) -> Result<EntryId> {
        Ok(canonical::entry_id(chain_id, content, external_ids)?)
    }

    /// Entry id of the first entry of a chain.
    pub fn first_entry_id<T: ExternalIdValue>(
        &self,
        content: Option<&[u8]>,
        external_ids: &[T],
    ) -> Result<EntryId> {
        Ok(canonical::first_entry_id(content, external_ids)?)
    }

    /// Hash a stream using the configured chunk size.
    pub fn hash_stream<R: Read>(&self, algorithm: HashAlgorithm, reader: R) -> Result<Vec<u8>> {
        Ok(digest::hash_reader_with_capacity(
            algorithm,
            reader,
            self.config.stream_chunk_size,
        )?)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Links
    // ─────────────────────────────────────────────────────────────────────────

    /// Start building a link keyed by a registration type.
    pub fn link(&self, link: Link, registration_type: RegistrationType) -> LinkBuilder {
        link.builder(registration_type)
    }

    /// Resolve a `ChainLink` key to its registered type.
    pub fn link_key_type(&self, key: &str) -> Option<&RegistrationType> {
        parser::link_key_type(key, &self.registry)
    }

    /// Take a target link apart.
    pub fn parse_target_link(&self, path: &str) -> Result<LinkPath> {
        Ok(parser::target_link_parts(path)?)
    }
}

impl Default for Toolkit {
    fn default() -> Self {
        Self::new(ToolkitConfig::default())
    }
}
