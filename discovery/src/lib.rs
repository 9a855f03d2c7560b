//! Ontology source discovery and universe assembly.
//!
//! This crate turns a tree of YAML ontology source files into an assembled,
//! namespace-validated [`Universe`]:
//!
//! - [`walk`] — recursive discovery of source files under a root.
//! - [`overlay`] — structural validation of a modified tree against the
//!   default reference tree.
//! - [`assemble`] — partitioning of discovered files into configuration
//!   categories and compilation into a universe.
//! - [`builder`] — the [`UniverseBuilder`] orchestration entry point tying
//!   the above together with precondition checks and the final namespace
//!   consistency check.
//! - [`output`] — JSON / YAML / table rendering of assembled universes.
//!
//! # Example
//!
//! ```no_run
//! use ontology_discovery::{UniverseBuilder, UniverseSource};
//!
//! let builder = UniverseBuilder::new("ontology/yaml/resources");
//! let universe = builder.build(UniverseSource::Default)?;
//! for ns in universe.entity_type_namespaces() {
//!     println!("{}: {} type(s)", ns.name, ns.entity_types.len());
//! }
//! # Ok::<(), ontology_discovery::BuildError>(())
//! ```
//!
//! [`Universe`]: ontology_core::Universe

pub mod assemble;
pub mod builder;
pub mod output;
pub mod overlay;
pub mod walk;

pub use builder::{BuildError, UniverseBuilder, UniverseSource, build_universe};
pub use walk::SourceFile;
