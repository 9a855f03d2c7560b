//! Namespace consistency validation.
//!
//! Validates the entity type namespaces of an assembled universe: naming
//! conventions, duplicate declarations across files, unresolvable parent
//! references, and inheritance cycles. Assembly deliberately keeps every
//! declaration it sees, so conflicts between files surface here rather than
//! as parse failures.
//!
//! # Examples
//!
//! ```
//! use ontology_core::{EntityType, NamespaceValidator, TypeNamespace};
//!
//! let mut ns = TypeNamespace::new("HVAC");
//! ns.entity_types.push(EntityType::new("FAN"));
//! assert!(NamespaceValidator::new(&[ns.clone()]).is_valid());
//!
//! // Same name declared twice (e.g. in two files) → conflict
//! ns.entity_types.push(EntityType::new("FAN"));
//! assert!(!NamespaceValidator::new(&[ns]).is_valid());
//! ```

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::{GLOBAL_NAMESPACE, NAMESPACE_SEPARATOR, TypeNamespace};

static NAMESPACE_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z][A-Z0-9_]*$").expect("namespace name regex is valid"));

static TYPE_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z][A-Z0-9_]*$").expect("type name regex is valid"));

/// A single namespace consistency problem.
///
/// Each variant describes one finding; the `Display` impl provides a
/// human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NamespaceFinding {
    /// Namespace name violates the naming convention.
    #[error("invalid namespace name: {0}")]
    InvalidNamespaceName(String),
    /// Entity type name violates the naming convention.
    #[error("invalid entity type name in {namespace}: {name}")]
    InvalidTypeName { namespace: String, name: String },
    /// The same type name is declared more than once in a namespace.
    #[error("duplicate entity type in {namespace}: {name}")]
    DuplicateType { namespace: String, name: String },
    /// An `implements` reference does not resolve to a known type.
    #[error("unresolved parent of {namespace}/{name}: {parent}")]
    UnresolvedParent {
        namespace: String,
        name: String,
        parent: String,
    },
    /// Following `implements` edges returns to an ancestor.
    #[error("inheritance cycle: {0}")]
    InheritanceCycle(String),
}

/// Consistency checker over a universe's entity type namespaces.
///
/// All checks run at construction; the validator itself holds only the
/// findings. It reads the namespaces and nothing else, so repeated
/// validation of the same input always produces the same result.
#[derive(Debug, Clone)]
pub struct NamespaceValidator {
    findings: Vec<NamespaceFinding>,
}

impl NamespaceValidator {
    /// Validates the given namespaces.
    pub fn new(namespaces: &[TypeNamespace]) -> Self {
        let mut findings = Vec::new();

        for ns in namespaces {
            if !NAMESPACE_NAME_RE.is_match(&ns.name) {
                findings.push(NamespaceFinding::InvalidNamespaceName(ns.name.clone()));
            }

            let mut seen: HashSet<&str> = HashSet::new();
            for entity in &ns.entity_types {
                if !TYPE_NAME_RE.is_match(&entity.name) {
                    findings.push(NamespaceFinding::InvalidTypeName {
                        namespace: ns.name.clone(),
                        name: entity.name.clone(),
                    });
                }
                if !seen.insert(entity.name.as_str()) {
                    findings.push(NamespaceFinding::DuplicateType {
                        namespace: ns.name.clone(),
                        name: entity.name.clone(),
                    });
                }
            }
        }

        findings.extend(validate_inheritance(namespaces));

        Self { findings }
    }

    /// True when no findings were recorded.
    pub fn is_valid(&self) -> bool {
        self.findings.is_empty()
    }

    /// All findings, in discovery order.
    pub fn findings(&self) -> &[NamespaceFinding] {
        &self.findings
    }
}

/// Resolves an `implements` reference from the given namespace.
///
/// Qualified references (`NS/NAME`) resolve only in `NS`; unqualified names
/// resolve in the declaring namespace first, then the global namespace.
fn resolve_parent<'a>(
    types: &HashSet<(&'a str, &'a str)>,
    namespace: &'a str,
    reference: &'a str,
) -> Option<(&'a str, &'a str)> {
    if let Some((ns, name)) = reference.split_once(NAMESPACE_SEPARATOR) {
        return types.get(&(ns, name)).copied();
    }
    types
        .get(&(namespace, reference))
        .or_else(|| types.get(&(GLOBAL_NAMESPACE, reference)))
        .copied()
}

fn validate_inheritance(namespaces: &[TypeNamespace]) -> Vec<NamespaceFinding> {
    let mut findings = Vec::new();

    let types: HashSet<(&str, &str)> = namespaces
        .iter()
        .flat_map(|ns| {
            ns.entity_types
                .iter()
                .map(|entity| (ns.name.as_str(), entity.name.as_str()))
        })
        .collect();

    // Parent edges between resolved (namespace, type) pairs. Duplicate
    // declarations share a node; their edges are unioned.
    let mut edges: HashMap<(&str, &str), Vec<(&str, &str)>> = HashMap::new();

    for ns in namespaces {
        for entity in &ns.entity_types {
            let node = (ns.name.as_str(), entity.name.as_str());
            for parent in &entity.implements {
                match resolve_parent(&types, &ns.name, parent) {
                    Some(target) => edges.entry(node).or_default().push(target),
                    None => findings.push(NamespaceFinding::UnresolvedParent {
                        namespace: ns.name.clone(),
                        name: entity.name.clone(),
                        parent: parent.clone(),
                    }),
                }
            }
        }
    }

    let mut done: HashSet<(&str, &str)> = HashSet::new();
    for ns in namespaces {
        for entity in &ns.entity_types {
            let node = (ns.name.as_str(), entity.name.as_str());
            let mut path = vec![node];
            if let Some(cycle) = find_cycle(&edges, &mut done, &mut path) {
                findings.push(NamespaceFinding::InheritanceCycle(cycle));
            }
        }
    }

    findings
}

fn find_cycle<'a>(
    edges: &HashMap<(&'a str, &'a str), Vec<(&'a str, &'a str)>>,
    done: &mut HashSet<(&'a str, &'a str)>,
    path: &mut Vec<(&'a str, &'a str)>,
) -> Option<String> {
    let node = *path.last()?;
    if done.contains(&node) {
        return None;
    }

    for &parent in edges.get(&node).map(Vec::as_slice).unwrap_or_default() {
        if path.contains(&parent) {
            let rendered = path
                .iter()
                .chain(std::iter::once(&parent))
                .map(|(ns, name)| format!("{ns}{NAMESPACE_SEPARATOR}{name}"))
                .collect::<Vec<_>>()
                .join(" -> ");
            return Some(rendered);
        }
        path.push(parent);
        let cycle = find_cycle(edges, done, path);
        path.pop();
        if cycle.is_some() {
            return cycle;
        }
    }

    done.insert(node);
    None
}
