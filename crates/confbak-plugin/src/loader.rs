//! Extension loader — scans the plugin directory and builds the registry.
//!
//! Each extension unit is a shared library exporting the registration
//! symbol (see [`crate::exports`]). Units are loaded in lexicographic path
//! order; a unit that fails to open, lacks the symbol, or declares a
//! constructor that fails is recorded and skipped without stopping the
//! scan. Nothing in here can abort the host workflow.

use std::path::{Path, PathBuf};

use libloading::Library;
use tracing::{info, warn};

use confbak_core::error::{AppError, ErrorKind};

use crate::exports::{ExtensionBundle, REGISTRATION_SYMBOL, RegisterExtensionsFn};
use crate::registry::{ExtensionRegistry, ExtensionRegistryBuilder};

/// Load status of one candidate extension unit.
#[derive(Debug)]
pub enum ModuleStatus {
    /// The unit loaded; `registered` extensions joined the registry and
    /// `skipped` constructors failed.
    Loaded { registered: usize, skipped: usize },
    /// The unit could not be loaded or did not expose a valid registration.
    Failed(AppError),
}

/// Record of one candidate unit encountered during the scan.
#[derive(Debug)]
pub struct ModuleRecord {
    /// Path of the candidate file.
    pub path: PathBuf,
    /// What happened when loading it.
    pub status: ModuleStatus,
}

impl ModuleRecord {
    /// Whether the unit failed to load.
    pub fn is_failed(&self) -> bool {
        matches!(self.status, ModuleStatus::Failed(_))
    }
}

/// Result of scanning the plugin directory.
#[derive(Debug, Default)]
pub struct LoadOutcome {
    /// The registry of successfully instantiated extensions.
    pub registry: ExtensionRegistry,
    /// Per-unit records in scan order.
    pub modules: Vec<ModuleRecord>,
    /// Set when the directory itself could not be enumerated.
    pub directory_error: Option<AppError>,
}

/// Scans `plugins_dir` and builds the extension registry.
///
/// `None` or a nonexistent directory yields an empty registry without
/// error. An unreadable directory is logged, surfaced in
/// [`LoadOutcome::directory_error`], and also yields an empty registry.
pub fn load_extensions(plugins_dir: Option<&Path>) -> LoadOutcome {
    let mut outcome = LoadOutcome::default();

    let Some(dir) = plugins_dir else {
        return outcome;
    };
    if !dir.is_dir() {
        return outcome;
    }

    let candidates = match candidate_units(dir) {
        Ok(paths) => paths,
        Err(error) => {
            warn!(dir = %dir.display(), error = %error, "Plugin directory is not readable");
            outcome.directory_error = Some(error);
            return outcome;
        }
    };

    let mut builder = ExtensionRegistryBuilder::new();
    for path in candidates {
        let status = match load_unit(&path, &mut builder) {
            Ok(status) => status,
            Err(error) => {
                warn!(unit = %path.display(), error = %error, "Extension unit failed to load");
                ModuleStatus::Failed(error)
            }
        };
        outcome.modules.push(ModuleRecord { path, status });
    }

    outcome.registry = builder.build();
    outcome
}

/// Candidate units: regular files carrying the platform dynamic-library
/// suffix, sorted lexicographically by full path.
fn candidate_units(dir: &Path) -> Result<Vec<PathBuf>, AppError> {
    let entries = std::fs::read_dir(dir).map_err(|e| {
        AppError::with_source(
            ErrorKind::Plugin,
            format!("cannot read plugin directory '{}'", dir.display()),
            e,
        )
    })?;

    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| {
            AppError::with_source(
                ErrorKind::Plugin,
                format!("cannot enumerate plugin directory '{}'", dir.display()),
                e,
            )
        })?;
        let path = entry.path();
        if path.is_file()
            && path
                .extension()
                .is_some_and(|ext| ext == std::env::consts::DLL_EXTENSION)
        {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

/// Loads one unit and registers every extension it declares.
fn load_unit(
    path: &Path,
    builder: &mut ExtensionRegistryBuilder,
) -> Result<ModuleStatus, AppError> {
    // SAFETY: extension units are trusted code supplied by the operator;
    // opening the library runs its initializers.
    let library = unsafe { Library::new(path) }.map_err(|e| {
        AppError::with_source(
            ErrorKind::Plugin,
            format!("failed to open '{}'", path.display()),
            e,
        )
    })?;

    let bundle: ExtensionBundle = {
        // SAFETY: the symbol signature is fixed by the registration contract
        // and generated by `export_extensions!`.
        let register = unsafe { library.get::<RegisterExtensionsFn>(REGISTRATION_SYMBOL) }
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Plugin,
                    format!("'{}' has no registration symbol", path.display()),
                    e,
                )
            })?;
        let raw = unsafe { register() };
        if raw.is_null() {
            return Err(AppError::plugin(format!(
                "'{}' returned a null registration bundle",
                path.display()
            )));
        }
        // SAFETY: the bundle was Box-allocated by the unit's registration
        // function, which the macro guarantees.
        *unsafe { Box::from_raw(raw) }
    };

    let (registered, skipped) = register_bundle(bundle, path, builder);

    builder.keep_library(library);
    info!(unit = %path.display(), registered, skipped, "Extension unit loaded");
    Ok(ModuleStatus::Loaded { registered, skipped })
}

/// Instantiates every descriptor in the bundle, registering successes in
/// declaration order and skipping failed constructors.
fn register_bundle(
    bundle: ExtensionBundle,
    path: &Path,
    builder: &mut ExtensionRegistryBuilder,
) -> (usize, usize) {
    let mut registered = 0;
    let mut skipped = 0;
    for descriptor in bundle.into_descriptors() {
        match descriptor.build() {
            Ok(extension) => {
                builder.register_from_module(extension, path);
                registered += 1;
            }
            Err(error) => {
                warn!(unit = %path.display(), error = %error, "Extension constructor failed");
                skipped += 1;
            }
        }
    }
    (registered, skipped)
}

#[cfg(test)]
mod tests {
    use super::*;

    use async_trait::async_trait;

    use crate::extension::Extension;
    use crate::exports::ExtensionDescriptor;
    use crate::hooks::definitions::{Hook, HookSet};

    #[derive(Debug)]
    struct Named(&'static str);

    #[async_trait]
    impl Extension for Named {
        fn name(&self) -> &str {
            self.0
        }

        fn hooks(&self) -> HookSet {
            HookSet::of(Hook::Report)
        }
    }

    #[test]
    fn bundle_registration_preserves_declaration_order() {
        let bundle = ExtensionBundle::new(vec![
            ExtensionDescriptor::new(|| Ok(Box::new(Named("first")) as Box<dyn Extension>)),
            ExtensionDescriptor::new(|| Ok(Box::new(Named("second")) as Box<dyn Extension>)),
        ]);
        let mut builder = ExtensionRegistryBuilder::new();

        let counts = register_bundle(bundle, Path::new("unit.so"), &mut builder);
        let registry = builder.build();

        assert_eq!(counts, (2, 0));
        let names: Vec<&str> = registry.iter().map(|entry| entry.name()).collect();
        assert_eq!(names, ["first", "second"]);
        assert!(
            registry
                .iter()
                .all(|entry| entry.module() == Some(Path::new("unit.so")))
        );
    }

    #[test]
    fn failing_constructor_is_skipped_and_counted() {
        let bundle = ExtensionBundle::new(vec![
            ExtensionDescriptor::new(|| Err(AppError::plugin("no config"))),
            ExtensionDescriptor::new(|| Ok(Box::new(Named("survivor")) as Box<dyn Extension>)),
        ]);
        let mut builder = ExtensionRegistryBuilder::new();

        let counts = register_bundle(bundle, Path::new("unit.so"), &mut builder);
        let registry = builder.build();

        assert_eq!(counts, (1, 1));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.iter().next().unwrap().name(), "survivor");
    }
}
