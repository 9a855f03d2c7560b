//! End-to-end build pipeline tests over on-disk ontology trees.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use ontology_discovery::{BuildError, UniverseBuilder, UniverseSource, build_universe};

fn write(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

/// Lays down a small consistent ontology: a global base type, an HVAC
/// namespace inheriting from it, and a field pool.
fn write_default_ontology(root: &Path) {
    write(
        root,
        "GLOBAL/entity_types/base.yaml",
        "EQUIPMENT:\n  description: Base equipment\n  is_abstract: true\n",
    );
    write(
        root,
        "HVAC/entity_types/vav.yaml",
        "VAV:\n  description: Variable air volume terminal\n  implements:\n    - EQUIPMENT\n  uses:\n    - zone_air_temperature_sensor\n",
    );
    write(
        root,
        "HVAC/fields/telemetry.yaml",
        "literals:\n  - zone_air_temperature_sensor\n",
    );
}

fn namespace_names(universe: &ontology_core::Universe) -> BTreeSet<String> {
    universe
        .namespace_names()
        .into_iter()
        .map(str::to_string)
        .collect()
}

#[test]
fn test_simplified_never_touches_the_filesystem() {
    // A default root that does not exist anywhere.
    let builder = UniverseBuilder::new("/nonexistent/ontology/root");

    let universe = builder.build(UniverseSource::Simplified).unwrap();
    assert!(universe.entity_type_count() > 0);
    assert!(universe.generated_at.is_none());
}

#[test]
fn test_simplified_takes_priority_over_overlay_flag() {
    let universe = build_universe(
        true,
        Some(PathBuf::from("/nonexistent/overlay")),
        Path::new("/nonexistent/root"),
    )
    .unwrap();
    assert!(universe.namespace_names().contains("HVAC"));
}

#[test]
fn test_missing_overlay_path_is_missing_source() {
    let root = TempDir::new().unwrap();
    write_default_ontology(root.path());
    let builder = UniverseBuilder::new(root.path());

    let missing = root.path().join("no-such-overlay");
    let err = builder
        .build(UniverseSource::Overlay(missing.clone()))
        .unwrap_err();
    match err {
        BuildError::MissingSource {
            path,
            is_default_root,
        } => {
            assert_eq!(path, missing);
            assert!(!is_default_root);
        }
        other => panic!("expected MissingSource, got {other:?}"),
    }
}

#[test]
fn test_missing_default_root_is_missing_source() {
    let builder = UniverseBuilder::new("/nonexistent/ontology/root");

    let err = builder.build(UniverseSource::Default).unwrap_err();
    assert!(matches!(
        err,
        BuildError::MissingSource {
            is_default_root: true,
            ..
        }
    ));
}

#[test]
fn test_empty_tree_skips_assembly_and_still_validates() {
    let root = TempDir::new().unwrap();
    let builder = UniverseBuilder::new(root.path());

    let universe = builder.build(UniverseSource::Default).unwrap();
    assert_eq!(universe.entity_type_count(), 0);
    assert!(universe.namespace_names().is_empty());
}

#[test]
fn test_default_build_exposes_declared_namespaces() {
    let root = TempDir::new().unwrap();
    write_default_ontology(root.path());
    let builder = UniverseBuilder::new(root.path());

    let universe = builder.build(UniverseSource::Default).unwrap();
    assert_eq!(
        namespace_names(&universe),
        BTreeSet::from(["GLOBAL".to_string(), "HVAC".to_string()])
    );
    assert!(universe.field_names.contains("zone_air_temperature_sensor"));
    assert!(universe.generated_at.is_some());
}

#[test]
fn test_overlay_of_identical_copy_matches_default_build() {
    let root = TempDir::new().unwrap();
    let copy = TempDir::new().unwrap();
    write_default_ontology(root.path());
    write_default_ontology(copy.path());
    let builder = UniverseBuilder::new(root.path());

    let from_default = builder.build(UniverseSource::Default).unwrap();
    let from_overlay = builder
        .build(UniverseSource::Overlay(copy.path().to_path_buf()))
        .unwrap();

    assert_eq!(namespace_names(&from_default), namespace_names(&from_overlay));
    for ns in from_default.entity_type_namespaces() {
        let other = from_overlay.find_namespace(&ns.name).unwrap();
        assert_eq!(ns.type_names(), other.type_names());
    }
}

#[test]
fn test_orphaned_overlay_file_propagates_overlay_error() {
    let root = TempDir::new().unwrap();
    let overlay = TempDir::new().unwrap();
    write_default_ontology(root.path());
    write(
        overlay.path(),
        "HVAC/entity_types/renamed.yaml",
        "FAN:\n  description: A fan\n",
    );
    let builder = UniverseBuilder::new(root.path());

    let err = builder
        .build(UniverseSource::Overlay(overlay.path().to_path_buf()))
        .unwrap_err();
    assert!(matches!(err, BuildError::Overlay(_)));
}

#[test]
fn test_duplicate_types_assemble_but_fail_namespace_validation() {
    // Overlay declares VAV in a second file that also exists in the
    // reference tree, so structural validation passes and the duplicate is
    // only caught by the final namespace check.
    let root = TempDir::new().unwrap();
    write_default_ontology(root.path());
    write(root.path(), "HVAC/entity_types/extra.yaml", "VAV:\n  description: Duplicate\n");

    let overlay = TempDir::new().unwrap();
    write_default_ontology(overlay.path());
    write(
        overlay.path(),
        "HVAC/entity_types/extra.yaml",
        "VAV:\n  description: Duplicate\n",
    );

    let builder = UniverseBuilder::new(root.path());
    let err = builder
        .build(UniverseSource::Overlay(overlay.path().to_path_buf()))
        .unwrap_err();
    match err {
        BuildError::NamespaceConflict { findings } => assert!(!findings.is_empty()),
        other => panic!("expected NamespaceConflict, got {other:?}"),
    }
}

#[test]
fn test_invalid_universe_is_never_returned_via_compat_surface() {
    let root = TempDir::new().unwrap();
    write_default_ontology(root.path());
    write(root.path(), "HVAC/entity_types/extra.yaml", "VAV:\n  description: Duplicate\n");

    assert!(build_universe(false, None, root.path()).is_none());
}

#[test]
fn test_malformed_yaml_propagates_assembly_error() {
    let root = TempDir::new().unwrap();
    write(root.path(), "HVAC/entity_types/bad.yaml", "VAV: [unclosed\n");
    let builder = UniverseBuilder::new(root.path());

    let err = builder.build(UniverseSource::Default).unwrap_err();
    assert!(matches!(err, BuildError::Assembly(_)));
}
