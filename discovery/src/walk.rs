//! Recursive discovery of ontology source files.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use ontology_core::GLOBAL_NAMESPACE;

use crate::assemble::ConfigCategory;

/// A discovered ontology source file.
///
/// Keeps the walk root and the path relative to it separate: the relative
/// path carries the namespace and category structure, while overlay
/// validation compares relative paths across two different roots.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct SourceFile {
    /// Root the walk started from.
    pub root: PathBuf,
    /// Path relative to `root`.
    pub relative: PathBuf,
}

impl SourceFile {
    /// Absolute-ish path suitable for opening the file.
    pub fn full_path(&self) -> PathBuf {
        self.root.join(&self.relative)
    }

    /// Namespace this file declares into.
    ///
    /// The first directory component of the relative path names the
    /// namespace. Files whose first component is a category folder (or that
    /// sit directly under the root) belong to the global namespace.
    pub fn namespace(&self) -> String {
        let first = self
            .relative
            .components()
            .next()
            .and_then(|c| c.as_os_str().to_str());
        match first {
            Some(dir)
                if self.relative.components().count() > 1
                    && ConfigCategory::from_dir_name(dir).is_none() =>
            {
                dir.to_string()
            }
            _ => GLOBAL_NAMESPACE.to_string(),
        }
    }
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("yaml") | Some("yml")
    )
}

/// Recursively enumerates all YAML source files under `root`.
///
/// Non-YAML files and empty directories are skipped. The result is sorted
/// by relative path for deterministic downstream behavior; an empty result
/// is valid and simply means the tree declares nothing.
pub fn recursive_dir_walk(root: &Path) -> io::Result<Vec<SourceFile>> {
    let mut files = Vec::new();
    walk_into(root, root, &mut files)?;
    files.sort();
    debug!(root = %root.display(), count = files.len(), "recursive walk complete");
    Ok(files)
}

fn walk_into(root: &Path, dir: &Path, files: &mut Vec<SourceFile>) -> io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if entry.file_type()?.is_dir() {
            walk_into(root, &path, files)?;
        } else if is_yaml(&path) {
            let relative = path
                .strip_prefix(root)
                .map_err(|_| io::Error::new(io::ErrorKind::InvalidData, "walk escaped its root"))?
                .to_path_buf();
            files.push(SourceFile {
                root: root.to_path_buf(),
                relative,
            });
        }
    }
    Ok(())
}
