//! Universe selection and assembly.
//!
//! [`UniverseBuilder`] is the orchestration entry point: it decides which
//! ontology source to load (simplified fixture, overlay tree, or the default
//! root), checks preconditions, discovers and assembles the source files,
//! and namespace-validates the result before handing it to the caller.

use std::env;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, error, info};

use ontology_core::{NamespaceFinding, NamespaceValidator, Universe, fixture};

use crate::assemble::{AssemblyError, build_universe_from_config, separate_config_files};
use crate::overlay::{OverlayError, validate_overlay};
use crate::walk::recursive_dir_walk;

/// Which ontology source a build loads from.
///
/// Exactly one source is active per build. [`UniverseSource::from_flags`]
/// encodes the flag priority of the original driver surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UniverseSource {
    /// The in-memory simplified fixture; no filesystem access.
    Simplified,
    /// A caller-modified tree, validated against the default root.
    Overlay(PathBuf),
    /// The default ontology root.
    Default,
}

impl UniverseSource {
    /// Resolves the legacy two-flag surface into a single source.
    ///
    /// Simplified takes priority over an overlay path; an absent or empty
    /// overlay path routes to the default root.
    pub fn from_flags(use_simplified: bool, overlay_path: Option<PathBuf>) -> Self {
        if use_simplified {
            return Self::Simplified;
        }
        match overlay_path {
            Some(path) if !path.as_os_str().is_empty() => Self::Overlay(path),
            _ => Self::Default,
        }
    }
}

/// Universe build failures.
///
/// The two checked preconditions (missing roots) and the final namespace
/// check are reported as dedicated variants after printing a diagnostic;
/// collaborator failures propagate unchanged as their own variants and are
/// never collapsed into one another.
#[derive(Debug, Error)]
pub enum BuildError {
    /// The requested source root does not exist on disk.
    #[error("source root does not exist: {path}")]
    MissingSource {
        path: PathBuf,
        /// True when the missing root was the default root.
        is_default_root: bool,
    },

    /// The overlay tree diverges structurally from the reference tree.
    #[error(transparent)]
    Overlay(#[from] OverlayError),

    /// File separation or compilation failed.
    #[error(transparent)]
    Assembly(#[from] AssemblyError),

    /// Recursive discovery failed.
    #[error("failed to walk {path}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The assembled universe failed namespace validation.
    #[error("ontology failed namespace validation with {} finding(s)", findings.len())]
    NamespaceConflict { findings: Vec<NamespaceFinding> },
}

/// Builds ontology universes from a configured default root.
///
/// The default root is injected at construction rather than read from
/// process-wide state, so tests can point builders at isolated trees. Each
/// [`build`](UniverseBuilder::build) call is synchronous, independent, and
/// returns a freshly assembled universe or the first failure encountered.
///
/// # Examples
///
/// ```
/// use ontology_discovery::{UniverseBuilder, UniverseSource};
///
/// let builder = UniverseBuilder::new("ontology/yaml/resources");
/// let universe = builder.build(UniverseSource::Simplified).unwrap();
/// assert!(universe.entity_type_count() > 0);
/// ```
#[derive(Debug, Clone)]
pub struct UniverseBuilder {
    default_root: PathBuf,
}

impl UniverseBuilder {
    /// Creates a builder with the given default ontology root.
    pub fn new(default_root: impl Into<PathBuf>) -> Self {
        Self {
            default_root: default_root.into(),
        }
    }

    /// The configured default ontology root.
    pub fn default_root(&self) -> &Path {
        &self.default_root
    }

    /// Assembles and validates a universe from the given source.
    ///
    /// Missing-root preconditions and the final namespace check print an
    /// `[ERROR]` diagnostic to stdout in addition to returning the error;
    /// callers driving a console rely on both channels. A universe that
    /// fails namespace validation is discarded, never returned.
    pub fn build(&self, source: UniverseSource) -> Result<Universe, BuildError> {
        let universe = match source {
            UniverseSource::Simplified => {
                debug!("loading simplified universe fixture");
                fixture::create_simplified_universe()
            }
            UniverseSource::Overlay(path) => {
                if !path.exists() {
                    println!(
                        "[ERROR]\tSpecified filepath [{}] does not exist.",
                        path.display()
                    );
                    return Err(BuildError::MissingSource {
                        path,
                        is_default_root: false,
                    });
                }
                let path = expand_user(&path);
                info!(overlay = %path.display(), "building universe from overlay");
                validate_overlay(None, &path, &self.default_root, false)?;
                self.assemble_tree(&path)?
            }
            UniverseSource::Default => {
                if !self.default_root.exists() {
                    println!(
                        "[ERROR]\tSpecified filepath [{}] for default ontology does not exist.",
                        self.default_root.display()
                    );
                    return Err(BuildError::MissingSource {
                        path: self.default_root.clone(),
                        is_default_root: true,
                    });
                }
                info!(root = %self.default_root.display(), "building universe from default root");
                self.assemble_tree(&self.default_root)?
            }
        };

        let validation = NamespaceValidator::new(universe.entity_type_namespaces());
        if !validation.is_valid() {
            println!("[ERROR]\tOntology is not valid.");
            for finding in validation.findings() {
                error!(%finding, "namespace validation finding");
            }
            return Err(BuildError::NamespaceConflict {
                findings: validation.findings().to_vec(),
            });
        }

        Ok(universe)
    }

    /// Walks a source tree and assembles it; an empty tree skips assembly
    /// and yields the empty universe.
    fn assemble_tree(&self, root: &Path) -> Result<Universe, BuildError> {
        let files = recursive_dir_walk(root).map_err(|source| BuildError::Walk {
            path: root.to_path_buf(),
            source,
        })?;

        if files.is_empty() {
            debug!(root = %root.display(), "no source files found, skipping assembly");
            return Ok(Universe::new());
        }

        let config = separate_config_files(files)?;
        Ok(build_universe_from_config(&config)?)
    }
}

/// Builds a universe with the legacy two-flag surface.
///
/// Compatibility wrapper for callers expecting a null-equivalent on any
/// failure: the structured error is logged, then dropped.
pub fn build_universe(
    use_simplified: bool,
    overlay_path: Option<PathBuf>,
    default_root: &Path,
) -> Option<Universe> {
    let builder = UniverseBuilder::new(default_root);
    match builder.build(UniverseSource::from_flags(use_simplified, overlay_path)) {
        Ok(universe) => Some(universe),
        Err(err) => {
            error!(error = %err, "universe build failed");
            None
        }
    }
}

/// Expands a leading `~` or `~/` to the user's home directory.
///
/// Paths without the home marker, and systems without a home directory,
/// pass through unchanged.
fn expand_user(path: &Path) -> PathBuf {
    let Some(raw) = path.to_str() else {
        return path.to_path_buf();
    };
    let home = env::var_os("HOME").map(PathBuf::from);
    match (raw, home) {
        ("~", Some(home)) => home,
        (raw, Some(home)) => match raw.strip_prefix("~/") {
            Some(rest) => home.join(rest),
            None => path.to_path_buf(),
        },
        (_, None) => path.to_path_buf(),
    }
}
