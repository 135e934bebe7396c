//! Extension registry — the ordered, immutable set of loaded extensions.

use std::path::{Path, PathBuf};

use libloading::Library;
use tracing::info;

use crate::extension::Extension;
use crate::hooks::definitions::{Hook, HookSet};

/// One registered extension with its metadata fixed at registration time.
#[derive(Debug)]
pub struct RegistryEntry {
    extension: Box<dyn Extension>,
    name: String,
    capabilities: HookSet,
    module: Option<PathBuf>,
}

impl RegistryEntry {
    fn new(extension: Box<dyn Extension>, module: Option<PathBuf>) -> Self {
        let name = extension.name().to_string();
        let capabilities = extension.hooks();
        Self {
            extension,
            name,
            capabilities,
            module,
        }
    }

    /// Diagnostic extension name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The capability set declared by the extension.
    pub fn capabilities(&self) -> HookSet {
        self.capabilities
    }

    /// Path of the unit that provided this extension, if dynamically loaded.
    pub fn module(&self) -> Option<&Path> {
        self.module.as_deref()
    }

    /// The extension itself.
    pub fn extension(&self) -> &dyn Extension {
        self.extension.as_ref()
    }
}

/// Ordered collection of registered extensions.
///
/// Built exactly once, before any dispatch, and immutable afterwards.
/// Shared behind an `Arc`, it is safe to query concurrently without
/// locking: publication of the fully built registry is the happens-before
/// edge for every subsequent read.
#[derive(Debug, Default)]
pub struct ExtensionRegistry {
    entries: Vec<RegistryEntry>,
    /// Keeps dynamically loaded units alive as long as their extensions.
    _libraries: Vec<Library>,
}

impl ExtensionRegistry {
    /// The zero-extension registry used when no plugin directory is
    /// configured.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of registered extensions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no extensions are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &RegistryEntry> {
        self.entries.iter()
    }

    /// Entries implementing `hook`, in registration order.
    pub fn implementers(&self, hook: Hook) -> impl Iterator<Item = &RegistryEntry> {
        self.entries
            .iter()
            .filter(move |entry| entry.capabilities.contains(hook))
    }

    /// Number of entries implementing `hook`.
    pub fn implementer_count(&self, hook: Hook) -> usize {
        self.implementers(hook).count()
    }
}

/// Builder consumed exactly once to produce the registry.
///
/// Registration order is discovery order: the loader registers units in
/// lexicographic path order and, within a unit, in declaration order.
#[derive(Debug, Default)]
pub struct ExtensionRegistryBuilder {
    entries: Vec<RegistryEntry>,
    libraries: Vec<Library>,
}

impl ExtensionRegistryBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a compiled-in extension.
    pub fn register(&mut self, extension: Box<dyn Extension>) {
        self.push(RegistryEntry::new(extension, None));
    }

    /// Registers an extension provided by a dynamically loaded unit.
    pub fn register_from_module(&mut self, extension: Box<dyn Extension>, module: &Path) {
        self.push(RegistryEntry::new(extension, Some(module.to_path_buf())));
    }

    /// Takes ownership of a library backing one or more registered
    /// extensions, keeping it loaded for the registry's lifetime.
    pub fn keep_library(&mut self, library: Library) {
        self.libraries.push(library);
    }

    /// Finalizes the registry.
    pub fn build(self) -> ExtensionRegistry {
        ExtensionRegistry {
            entries: self.entries,
            _libraries: self.libraries,
        }
    }

    fn push(&mut self, entry: RegistryEntry) {
        info!(
            extension = %entry.name(),
            capabilities = ?entry.capabilities(),
            "Extension registered"
        );
        self.entries.push(entry);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use async_trait::async_trait;

    #[derive(Debug)]
    struct Declared {
        name: &'static str,
        hooks: HookSet,
    }

    #[async_trait]
    impl Extension for Declared {
        fn name(&self) -> &str {
            self.name
        }

        fn hooks(&self) -> HookSet {
            self.hooks
        }
    }

    fn registry_of(extensions: Vec<Declared>) -> ExtensionRegistry {
        let mut builder = ExtensionRegistryBuilder::new();
        for extension in extensions {
            builder.register(Box::new(extension));
        }
        builder.build()
    }

    #[test]
    fn implementers_preserve_registration_order() {
        let registry = registry_of(vec![
            Declared {
                name: "b",
                hooks: HookSet::of(Hook::Report),
            },
            Declared {
                name: "a",
                hooks: HookSet::of(Hook::Report).with(Hook::GitReport),
            },
            Declared {
                name: "c",
                hooks: HookSet::of(Hook::GitReport),
            },
        ]);

        let names: Vec<&str> = registry
            .implementers(Hook::Report)
            .map(RegistryEntry::name)
            .collect();
        assert_eq!(names, ["b", "a"]);

        let names: Vec<&str> = registry
            .implementers(Hook::GitReport)
            .map(RegistryEntry::name)
            .collect();
        assert_eq!(names, ["a", "c"]);
    }

    #[test]
    fn capability_filtering_is_exact() {
        let registry = registry_of(vec![Declared {
            name: "report-only",
            hooks: HookSet::of(Hook::Report),
        }]);

        assert_eq!(registry.implementer_count(Hook::Report), 1);
        assert_eq!(registry.implementer_count(Hook::BackupSuccess), 0);
        assert_eq!(registry.implementer_count(Hook::BackupFailed), 0);
    }

    #[test]
    fn empty_capability_set_registers_but_matches_nothing() {
        let registry = registry_of(vec![Declared {
            name: "inert",
            hooks: HookSet::empty(),
        }]);

        assert_eq!(registry.len(), 1);
        for hook in Hook::ALL {
            assert_eq!(registry.implementer_count(hook), 0);
        }
    }

    #[test]
    fn empty_registry_is_a_cheap_default() {
        let registry = ExtensionRegistry::empty();
        assert!(registry.is_empty());
        assert_eq!(registry.implementer_count(Hook::Report), 0);
    }
}
