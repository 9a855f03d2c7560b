//! Type definitions for the ontology universe model.
//!
//! This module defines the core data model used to represent an assembled
//! ontology: entity types grouped into namespaces, plus the literal pools
//! (fields, subfields, states, units, connections) declared alongside them.
//! The types are designed for serialization with [`serde`] and round-trip
//! through JSON and YAML.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Name of the global namespace.
///
/// Entity types declared directly under the ontology root (not inside a
/// namespace folder) belong to this namespace, and unqualified parent
/// references fall back to it during validation.
pub const GLOBAL_NAMESPACE: &str = "GLOBAL";

/// Separator used in qualified type references (e.g. `HVAC/VAV_BASE`).
pub const NAMESPACE_SEPARATOR: char = '/';

/// A single entity type declaration.
///
/// Entity types are declared in YAML maps keyed by type name; the value
/// carries the description, inherited parents, and field usage. Use
/// [`EntityType::new`] and the chainable builder methods to construct types
/// in code (fixtures, tests).
///
/// # Examples
///
/// ```
/// use ontology_core::EntityType;
///
/// let vav = EntityType::new("VAV_CONTROLLER")
///     .with_description("Variable air volume box controller")
///     .with_implements(&["EQUIPMENT"])
///     .with_uses(&["zone_air_temperature_sensor"]);
/// assert_eq!(vav.name, "VAV_CONTROLLER");
/// assert!(!vav.is_abstract);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityType {
    /// Type name, unique within its namespace (e.g. `VAV_CONTROLLER`).
    pub name: String,
    /// Human-readable description from the source file.
    pub description: Option<String>,
    /// Parent types this type inherits from. Unqualified names resolve in
    /// the declaring namespace, then the global namespace; `NS/NAME`
    /// references resolve in `NS`.
    pub implements: Vec<String>,
    /// Required field names.
    pub uses: Vec<String>,
    /// Optional field names.
    pub opt_uses: Vec<String>,
    /// Abstract types exist only to be inherited from.
    pub is_abstract: bool,
}

impl EntityType {
    /// Creates an empty concrete type with the given name.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            description: None,
            implements: Vec::new(),
            uses: Vec::new(),
            opt_uses: Vec::new(),
            is_abstract: false,
        }
    }

    /// Adds a description.
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    /// Sets the inherited parent types.
    pub fn with_implements(mut self, parents: &[&str]) -> Self {
        self.implements = parents.iter().map(|p| p.to_string()).collect();
        self
    }

    /// Sets the required field names.
    pub fn with_uses(mut self, fields: &[&str]) -> Self {
        self.uses = fields.iter().map(|f| f.to_string()).collect();
        self
    }

    /// Sets the optional field names.
    pub fn with_opt_uses(mut self, fields: &[&str]) -> Self {
        self.opt_uses = fields.iter().map(|f| f.to_string()).collect();
        self
    }

    /// Marks the type as abstract.
    pub fn abstract_type(mut self) -> Self {
        self.is_abstract = true;
        self
    }
}

/// Body of an entity type declaration as it appears in a source file.
///
/// Source files declare types as a map from type name to this body, so the
/// name is not part of the value; [`EntityTypeDecl::into_entity_type`]
/// attaches it after deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EntityTypeDecl {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub implements: Vec<String>,
    #[serde(default)]
    pub uses: Vec<String>,
    #[serde(default)]
    pub opt_uses: Vec<String>,
    #[serde(default)]
    pub is_abstract: bool,
}

impl EntityTypeDecl {
    /// Combines the declaration body with the map key it was declared under.
    pub fn into_entity_type(self, name: &str) -> EntityType {
        EntityType {
            name: name.to_string(),
            description: self.description,
            implements: self.implements,
            uses: self.uses,
            opt_uses: self.opt_uses,
            is_abstract: self.is_abstract,
        }
    }
}

/// All entity types declared under one namespace.
///
/// Assembly preserves every declaration it encounters, including duplicate
/// names declared across different files; deduplication is deliberately left
/// to [`NamespaceValidator`](crate::NamespaceValidator) so that cross-file
/// conflicts are reported as validation findings rather than silently merged.
///
/// # Examples
///
/// ```
/// use ontology_core::{EntityType, TypeNamespace};
///
/// let mut ns = TypeNamespace::new("HVAC");
/// ns.entity_types.push(EntityType::new("VAV_BASE").abstract_type());
/// ns.entity_types.push(EntityType::new("VAV_CONTROLLER"));
/// assert_eq!(ns.type_names().len(), 2);
/// assert!(ns.find_entity_type("VAV_BASE").is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeNamespace {
    /// Namespace name (e.g. `HVAC`, or [`GLOBAL_NAMESPACE`]).
    pub name: String,
    /// Every entity type declared in this namespace, in declaration order.
    pub entity_types: Vec<EntityType>,
}

impl TypeNamespace {
    /// Creates an empty namespace.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            entity_types: Vec::new(),
        }
    }

    /// Returns the first declaration with the given name, if any.
    pub fn find_entity_type(&self, name: &str) -> Option<&EntityType> {
        self.entity_types.iter().find(|t| t.name == name)
    }

    /// Returns the distinct type names declared in this namespace.
    pub fn type_names(&self) -> BTreeSet<&str> {
        self.entity_types.iter().map(|t| t.name.as_str()).collect()
    }
}

/// The assembled composite model of an ontology.
///
/// A universe holds every [`TypeNamespace`] discovered during assembly plus
/// the literal pools declared by the non-type configuration files. It is
/// immutable once returned by the builder; callers own it outright.
///
/// # Examples
///
/// ```
/// use ontology_core::{EntityType, Universe};
///
/// let mut universe = Universe::new();
/// universe.insert_entity_types("HVAC", vec![EntityType::new("FAN")]);
/// assert_eq!(universe.namespace_names().len(), 1);
/// assert_eq!(universe.entity_type_count(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Universe {
    /// Entity type namespaces, sorted by namespace name.
    pub namespaces: Vec<TypeNamespace>,
    /// Standard field names declared under `fields/`.
    pub field_names: BTreeSet<String>,
    /// Subfield names declared under `subfields/`.
    pub subfield_names: BTreeSet<String>,
    /// Multi-state value names declared under `states/`.
    pub state_names: BTreeSet<String>,
    /// Measurement unit names declared under `units/`.
    pub unit_names: BTreeSet<String>,
    /// Connection type names declared under `connections/`.
    pub connection_names: BTreeSet<String>,
    /// RFC 3339 timestamp of assembly; `None` for fixture universes.
    pub generated_at: Option<String>,
}

impl Universe {
    /// Creates an empty universe.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the entity type namespaces of this universe.
    ///
    /// This is the sole capability the build pipeline relies on after
    /// assembly: the final namespace-consistency check runs over exactly
    /// this slice.
    pub fn entity_type_namespaces(&self) -> &[TypeNamespace] {
        &self.namespaces
    }

    /// Returns the set of namespace names with at least one declaration.
    pub fn namespace_names(&self) -> BTreeSet<&str> {
        self.namespaces.iter().map(|ns| ns.name.as_str()).collect()
    }

    /// Returns the namespace with the given name, if present.
    pub fn find_namespace(&self, name: &str) -> Option<&TypeNamespace> {
        self.namespaces.iter().find(|ns| ns.name == name)
    }

    /// Total number of entity type declarations across all namespaces.
    pub fn entity_type_count(&self) -> usize {
        self.namespaces.iter().map(|ns| ns.entity_types.len()).sum()
    }

    /// Appends declarations to the given namespace, creating it on first
    /// use and keeping `namespaces` sorted by name.
    pub fn insert_entity_types(&mut self, namespace: &str, types: Vec<EntityType>) {
        match self.namespaces.iter_mut().find(|ns| ns.name == namespace) {
            Some(ns) => ns.entity_types.extend(types),
            None => {
                let mut ns = TypeNamespace::new(namespace);
                ns.entity_types = types;
                let index = self
                    .namespaces
                    .partition_point(|existing| existing.name.as_str() < namespace);
                self.namespaces.insert(index, ns);
            }
        }
    }
}
