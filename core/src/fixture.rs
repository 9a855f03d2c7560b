//! Pre-built minimal universe for fast-path testing.

use crate::{EntityType, Universe};

/// Creates the simplified universe fixture.
///
/// A minimal, fully in-memory model covering the global namespace and one
/// applied namespace, with enough inheritance to exercise downstream
/// consumers. Infallible and filesystem-free; always passes
/// [`NamespaceValidator`](crate::NamespaceValidator).
///
/// # Examples
///
/// ```
/// use ontology_core::{NamespaceValidator, fixture};
///
/// let universe = fixture::create_simplified_universe();
/// assert!(universe.namespace_names().contains("HVAC"));
/// assert!(NamespaceValidator::new(universe.entity_type_namespaces()).is_valid());
/// ```
pub fn create_simplified_universe() -> Universe {
    let mut universe = Universe::new();

    universe.insert_entity_types(
        crate::GLOBAL_NAMESPACE,
        vec![
            EntityType::new("EQUIPMENT")
                .with_description("Base type for all physical equipment")
                .abstract_type(),
            EntityType::new("NO_ANALYSIS")
                .with_description("Devices excluded from analysis")
                .abstract_type(),
        ],
    );

    universe.insert_entity_types(
        "HVAC",
        vec![
            EntityType::new("CHWS")
                .with_description("Chilled water system")
                .with_implements(&["EQUIPMENT"])
                .with_uses(&["supply_water_temperature_sensor"]),
            EntityType::new("VAV")
                .with_description("Variable air volume terminal")
                .with_implements(&["EQUIPMENT"])
                .with_uses(&["zone_air_temperature_sensor"])
                .with_opt_uses(&["discharge_air_flowrate_sensor"]),
        ],
    );

    for field in [
        "supply_water_temperature_sensor",
        "zone_air_temperature_sensor",
        "discharge_air_flowrate_sensor",
    ] {
        universe.field_names.insert(field.to_string());
    }
    for subfield in ["temperature", "flowrate", "sensor", "zone", "air", "water"] {
        universe.subfield_names.insert(subfield.to_string());
    }

    universe
}
