//! Separation of discovered files into configuration categories and
//! compilation into a [`Universe`].

use std::collections::BTreeMap;
use std::path::PathBuf;

use chrono::Utc;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use ontology_core::{EntityTypeDecl, Universe};

use crate::walk::SourceFile;

/// Configuration categories an ontology source file can belong to.
///
/// The category is named by a directory component of the file's relative
/// path (e.g. `HVAC/entity_types/vav.yaml`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigCategory {
    Fields,
    Subfields,
    States,
    Units,
    Connections,
    EntityTypes,
}

impl ConfigCategory {
    /// Maps a directory name to its category, if recognized.
    pub fn from_dir_name(dir: &str) -> Option<Self> {
        match dir {
            "fields" => Some(Self::Fields),
            "subfields" => Some(Self::Subfields),
            "states" => Some(Self::States),
            "units" => Some(Self::Units),
            "connections" => Some(Self::Connections),
            "entity_types" => Some(Self::EntityTypes),
            _ => None,
        }
    }

    /// The directory name declaring this category.
    pub fn dir_name(&self) -> &'static str {
        match self {
            Self::Fields => "fields",
            Self::Subfields => "subfields",
            Self::States => "states",
            Self::Units => "units",
            Self::Connections => "connections",
            Self::EntityTypes => "entity_types",
        }
    }
}

/// Discovered files partitioned by configuration category.
#[derive(Debug, Clone, Default)]
pub struct ParsedConfig {
    pub fields: Vec<SourceFile>,
    pub subfields: Vec<SourceFile>,
    pub states: Vec<SourceFile>,
    pub units: Vec<SourceFile>,
    pub connections: Vec<SourceFile>,
    pub entity_types: Vec<SourceFile>,
}

impl ParsedConfig {
    /// Total number of categorized files.
    pub fn file_count(&self) -> usize {
        self.fields.len()
            + self.subfields.len()
            + self.states.len()
            + self.units.len()
            + self.connections.len()
            + self.entity_types.len()
    }
}

/// Assembly errors: categorization, file reading, and YAML parsing.
#[derive(Debug, Error)]
pub enum AssemblyError {
    /// A YAML file sits under no recognized category directory.
    #[error("file belongs to no recognized config category: {path}")]
    UnrecognizedCategory { path: PathBuf },

    /// Filesystem read failure for a discovered file.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed YAML or a document that does not match the expected shape.
    #[error("failed to parse {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Partitions discovered files into configuration categories.
///
/// The deepest recognized directory component wins, so a namespace folder
/// that happens to share a category name does not confuse categorization.
/// A YAML file under no category directory is an error; the source tree is
/// expected to contain nothing else.
pub fn separate_config_files(files: Vec<SourceFile>) -> Result<ParsedConfig, AssemblyError> {
    let mut config = ParsedConfig::default();

    for file in files {
        let category = file
            .relative
            .parent()
            .into_iter()
            .flat_map(|dir| dir.components().rev())
            .filter_map(|c| c.as_os_str().to_str())
            .find_map(ConfigCategory::from_dir_name)
            .ok_or_else(|| AssemblyError::UnrecognizedCategory {
                path: file.full_path(),
            })?;

        match category {
            ConfigCategory::Fields => config.fields.push(file),
            ConfigCategory::Subfields => config.subfields.push(file),
            ConfigCategory::States => config.states.push(file),
            ConfigCategory::Units => config.units.push(file),
            ConfigCategory::Connections => config.connections.push(file),
            ConfigCategory::EntityTypes => config.entity_types.push(file),
        }
    }

    debug!(files = config.file_count(), "separated config files");
    Ok(config)
}

/// Shape of a literal-pool source file (`fields/`, `subfields/`, ...).
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct LiteralFile {
    #[serde(default)]
    literals: Vec<String>,
}

fn read_yaml<T: serde::de::DeserializeOwned>(file: &SourceFile) -> Result<T, AssemblyError> {
    let path = file.full_path();
    let raw = std::fs::read_to_string(&path).map_err(|source| AssemblyError::Io {
        path: path.clone(),
        source,
    })?;
    serde_yaml::from_str(&raw).map_err(|source| AssemblyError::Yaml { path, source })
}

/// Compiles a separated configuration into a [`Universe`].
///
/// Entity type files are maps from type name to declaration body; every
/// declaration is kept, including names already declared by another file in
/// the same namespace — cross-file conflicts are a namespace-validation
/// concern, not an assembly failure. Literal files contribute their names
/// to the universe's pools. An empty configuration compiles to the empty
/// universe.
pub fn build_universe_from_config(config: &ParsedConfig) -> Result<Universe, AssemblyError> {
    let mut universe = Universe::new();

    for file in &config.entity_types {
        let decls: BTreeMap<String, EntityTypeDecl> = read_yaml(file)?;
        let types = decls
            .into_iter()
            .map(|(name, decl)| decl.into_entity_type(&name))
            .collect();
        universe.insert_entity_types(&file.namespace(), types);
    }

    for (files, pool) in [
        (&config.fields, &mut universe.field_names),
        (&config.subfields, &mut universe.subfield_names),
        (&config.states, &mut universe.state_names),
        (&config.units, &mut universe.unit_names),
        (&config.connections, &mut universe.connection_names),
    ] {
        for file in files {
            let literal_file: LiteralFile = read_yaml(file)?;
            pool.extend(literal_file.literals);
        }
    }

    universe.generated_at = Some(Utc::now().to_rfc3339());
    debug!(
        namespaces = universe.namespaces.len(),
        entity_types = universe.entity_type_count(),
        "universe assembled"
    );
    Ok(universe)
}
