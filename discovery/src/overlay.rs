//! Structural validation of a modified ontology tree against a reference.
//!
//! A modified ("overlay") tree is expected to contain only files that also
//! exist, at the same relative path, in the reference tree. A file present
//! in the overlay but absent from the reference has been added or renamed;
//! either way the overlay no longer lines up with the reference and the
//! comparison reports it as orphaned.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};

use crate::walk::recursive_dir_walk;

/// Overlay validation errors.
#[derive(Debug, Error)]
pub enum OverlayError {
    /// Filesystem I/O failure while walking the changed tree.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The changed tree diverges structurally from the reference tree.
    #[error("overlay {changed_root} has {} file(s) with no counterpart in {original_root}: {}",
        orphaned.len(),
        orphaned.iter().map(|p| p.display().to_string()).collect::<Vec<_>>().join(", "))]
    Inconsistent {
        changed_root: String,
        original_root: String,
        orphaned: Vec<PathBuf>,
    },
}

/// Compares a changed ontology tree against its reference tree.
///
/// Walks `changed_root` and flags every YAML file whose relative path does
/// not exist under `original_root`. `filter` restricts the comparison to
/// relative paths containing the given substring. In non-interactive mode
/// any finding is an [`OverlayError::Inconsistent`]; interactive mode
/// downgrades findings to warnings and never blocks on input.
pub fn validate_overlay(
    filter: Option<&str>,
    changed_root: &Path,
    original_root: &Path,
    interactive: bool,
) -> Result<(), OverlayError> {
    let changed_files = recursive_dir_walk(changed_root)?;

    let mut orphaned = Vec::new();
    for file in &changed_files {
        if let Some(text) = filter {
            let relative = file.relative.to_string_lossy();
            if !relative.contains(text) {
                continue;
            }
        }
        if !original_root.join(&file.relative).is_file() {
            orphaned.push(file.relative.clone());
        }
    }

    debug!(
        changed = %changed_root.display(),
        original = %original_root.display(),
        checked = changed_files.len(),
        orphaned = orphaned.len(),
        "overlay comparison complete"
    );

    if orphaned.is_empty() {
        return Ok(());
    }

    if interactive {
        for path in &orphaned {
            warn!(path = %path.display(), "overlay file has no counterpart in reference tree");
        }
        return Ok(());
    }

    Err(OverlayError::Inconsistent {
        changed_root: changed_root.display().to_string(),
        original_root: original_root.display().to_string(),
        orphaned,
    })
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
    }

    #[test]
    fn test_subset_overlay_passes() {
        let original = TempDir::new().unwrap();
        let changed = TempDir::new().unwrap();
        touch(original.path(), "HVAC/entity_types/vav.yaml");
        touch(original.path(), "HVAC/entity_types/ahu.yaml");
        touch(changed.path(), "HVAC/entity_types/vav.yaml");

        assert!(validate_overlay(None, changed.path(), original.path(), false).is_ok());
    }

    #[test]
    fn test_orphaned_file_fails_non_interactive() {
        let original = TempDir::new().unwrap();
        let changed = TempDir::new().unwrap();
        touch(changed.path(), "HVAC/entity_types/renamed.yaml");

        let err = validate_overlay(None, changed.path(), original.path(), false).unwrap_err();
        match err {
            OverlayError::Inconsistent { orphaned, .. } => {
                assert_eq!(orphaned, vec![PathBuf::from("HVAC/entity_types/renamed.yaml")]);
            }
            other => panic!("expected Inconsistent, got {other:?}"),
        }
    }

    #[test]
    fn test_filter_limits_comparison() {
        let original = TempDir::new().unwrap();
        let changed = TempDir::new().unwrap();
        touch(changed.path(), "HVAC/entity_types/orphan.yaml");
        touch(changed.path(), "LIGHTING/entity_types/also_orphan.yaml");
        touch(original.path(), "LIGHTING/entity_types/also_orphan.yaml");

        // Only LIGHTING paths are compared, and those all line up.
        assert!(validate_overlay(Some("LIGHTING"), changed.path(), original.path(), false).is_ok());
    }

    #[test]
    fn test_interactive_mode_warns_instead_of_failing() {
        let original = TempDir::new().unwrap();
        let changed = TempDir::new().unwrap();
        touch(changed.path(), "HVAC/entity_types/orphan.yaml");

        assert!(validate_overlay(None, changed.path(), original.path(), true).is_ok());
    }

    #[test]
    fn test_missing_changed_root_is_io_error() {
        let original = TempDir::new().unwrap();
        let missing = original.path().join("nope");

        let err = validate_overlay(None, &missing, original.path(), false).unwrap_err();
        assert!(matches!(err, OverlayError::Io(_)));
    }
}
