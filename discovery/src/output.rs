//! Output formatting for universes.

use ontology_core::Universe;

/// Supported output formats.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum OutputFormat {
    Json,
    Yaml,
    Table,
}

/// Formats a universe in the requested output format.
pub fn format_universe(universe: &Universe, format: OutputFormat) -> Result<String, String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(universe)
            .map_err(|e| format!("JSON serialization failed: {e}")),
        OutputFormat::Yaml => {
            serde_yaml::to_string(universe).map_err(|e| format!("YAML serialization failed: {e}"))
        }
        OutputFormat::Table => Ok(universe_to_table(universe)),
    }
}

fn universe_to_table(universe: &Universe) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "Universe: {} namespace(s), {} entity type(s)",
        universe.namespaces.len(),
        universe.entity_type_count()
    ));
    if let Some(ref generated_at) = universe.generated_at {
        out.push_str(&format!("  Generated: {generated_at}"));
    }
    out.push('\n');

    for ns in &universe.namespaces {
        out.push_str(&format!("  {}: {} type(s)\n", ns.name, ns.entity_types.len()));
        for entity in &ns.entity_types {
            let marker = if entity.is_abstract { " (abstract)" } else { "" };
            out.push_str(&format!("    {}{marker}\n", entity.name));
        }
    }

    out.push_str(&format!(
        "  fields: {}  subfields: {}  states: {}  units: {}  connections: {}\n",
        universe.field_names.len(),
        universe.subfield_names.len(),
        universe.state_names.len(),
        universe.unit_names.len(),
        universe.connection_names.len()
    ));

    out
}

#[cfg(test)]
mod tests {
    use ontology_core::fixture::create_simplified_universe;

    use super::*;

    #[test]
    fn test_json_output_round_trips() {
        let universe = create_simplified_universe();
        let raw = format_universe(&universe, OutputFormat::Json).unwrap();
        let parsed: Universe = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed, universe);
    }

    #[test]
    fn test_table_output_lists_namespaces() {
        let universe = create_simplified_universe();
        let table = format_universe(&universe, OutputFormat::Table).unwrap();
        assert!(table.contains("HVAC"));
        assert!(table.contains("(abstract)"));
    }
}
