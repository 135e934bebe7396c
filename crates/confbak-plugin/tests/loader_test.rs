//! Loader scan behavior over the plugin directory.

use std::fs;
use std::path::Path;

use confbak_plugin::loader::load_extensions;

fn dll_name(stem: &str) -> String {
    format!("{stem}.{}", std::env::consts::DLL_EXTENSION)
}

#[test]
fn no_directory_configured_yields_empty_registry() {
    let outcome = load_extensions(None);

    assert!(outcome.registry.is_empty());
    assert!(outcome.modules.is_empty());
    assert!(outcome.directory_error.is_none());
}

#[test]
fn nonexistent_directory_yields_empty_registry() {
    let outcome = load_extensions(Some(Path::new("/nonexistent/confbak/plugins")));

    assert!(outcome.registry.is_empty());
    assert!(outcome.modules.is_empty());
    assert!(outcome.directory_error.is_none());
}

#[test]
fn empty_directory_yields_empty_registry() {
    let dir = tempfile::tempdir().unwrap();

    let outcome = load_extensions(Some(dir.path()));

    assert!(outcome.registry.is_empty());
    assert!(outcome.modules.is_empty());
}

#[test]
fn unloadable_units_are_recorded_without_stopping_the_scan() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join(dll_name("bbb")), b"not a shared library").unwrap();
    fs::write(dir.path().join(dll_name("aaa")), b"also not one").unwrap();
    fs::write(dir.path().join("notes.txt"), b"ignored").unwrap();

    let outcome = load_extensions(Some(dir.path()));

    // Both candidates scanned in lexicographic order; the text file ignored.
    assert_eq!(outcome.modules.len(), 2);
    assert!(outcome.modules[0].path.ends_with(dll_name("aaa")));
    assert!(outcome.modules[1].path.ends_with(dll_name("bbb")));
    assert!(outcome.modules.iter().all(|module| module.is_failed()));
    assert!(outcome.registry.is_empty());
    assert!(outcome.directory_error.is_none());
}

#[cfg(unix)]
#[test]
fn unreadable_directory_is_reported_with_an_empty_registry() {
    use std::os::unix::fs::{MetadataExt, PermissionsExt};

    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join(dll_name("aaa")), b"junk").unwrap();

    // Permission bits do not bind root, so there is nothing to observe
    // when the suite runs as uid 0.
    if fs::metadata(dir.path()).unwrap().uid() == 0 {
        return;
    }

    fs::set_permissions(dir.path(), fs::Permissions::from_mode(0o000)).unwrap();
    let outcome = load_extensions(Some(dir.path()));
    fs::set_permissions(dir.path(), fs::Permissions::from_mode(0o700)).unwrap();

    assert!(outcome.directory_error.is_some());
    assert!(outcome.registry.is_empty());
    assert!(outcome.modules.is_empty());
}

#[test]
fn scan_order_is_reproducible() {
    let dir = tempfile::tempdir().unwrap();
    for stem in ["zeta", "alpha", "mid"] {
        fs::write(dir.path().join(dll_name(stem)), b"junk").unwrap();
    }

    let first: Vec<_> = load_extensions(Some(dir.path()))
        .modules
        .into_iter()
        .map(|m| m.path)
        .collect();
    let second: Vec<_> = load_extensions(Some(dir.path()))
        .modules
        .into_iter()
        .map(|m| m.path)
        .collect();

    assert_eq!(first, second);
    assert!(first[0].ends_with(dll_name("alpha")));
    assert!(first[2].ends_with(dll_name("zeta")));
}
