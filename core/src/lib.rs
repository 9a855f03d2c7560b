//! Core model types and namespace validation for ontology universes.
//!
//! This crate defines the foundational types for modeling an assembled
//! ontology:
//!
//! - [`EntityType`] — a single type declaration (description, inherited
//!   parents, field usage).
//! - [`TypeNamespace`] — every declaration under one namespace, duplicates
//!   preserved.
//! - [`Universe`] — the composite model: namespaces plus the literal pools
//!   (fields, subfields, states, units, connections).
//!
//! Validation ([`NamespaceValidator`]) checks the consistency of a
//! universe's namespaces: naming conventions, duplicate declarations,
//! unresolvable parent references, and inheritance cycles.
//!
//! The [`fixture`] module provides the simplified universe used by the
//! fast-path build mode.
//!
//! # Example
//!
//! ```
//! use ontology_core::*;
//!
//! let mut universe = Universe::new();
//! universe.insert_entity_types(
//!     GLOBAL_NAMESPACE,
//!     vec![EntityType::new("EQUIPMENT").abstract_type()],
//! );
//! universe.insert_entity_types(
//!     "HVAC",
//!     vec![EntityType::new("FAN").with_implements(&["EQUIPMENT"])],
//! );
//!
//! assert_eq!(universe.entity_type_count(), 2);
//! assert!(NamespaceValidator::new(universe.entity_type_namespaces()).is_valid());
//! ```

pub mod fixture;
mod types;
mod validate;

pub use types::*;
pub use validate::{NamespaceFinding, NamespaceValidator};
