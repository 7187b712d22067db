//! Schema command: JSON Schema export.

use anyhow::{anyhow, Result};
use schema_viz::json_schema::{all_schemas, get_schema, schema_names};
use std::fs;
use std::path::PathBuf;

pub fn run(name: Option<String>, output: Option<PathBuf>) -> Result<()> {
    let schemas = match name {
        Some(name) => {
            let schema = get_schema(&name).ok_or_else(|| {
                anyhow!(
                    "Unknown schema: {}. Available: {}",
                    name,
                    schema_names().join(", ")
                )
            })?;
            vec![(name, schema)]
        }
        None => all_schemas()
            .into_iter()
            .map(|(name, schema)| (name.to_string(), schema))
            .collect(),
    };

    match output {
        Some(dir) => {
            fs::create_dir_all(&dir)?;
            for (name, schema) in &schemas {
                let path = dir.join(format!("{}.schema.json", name));
                fs::write(&path, serde_json::to_string_pretty(schema)? + "\n")?;
                eprintln!("Schema written to: {}", path.display());
            }
        }
        None if schemas.len() == 1 => {
            println!("{}", serde_json::to_string_pretty(&schemas[0].1)?);
        }
        None => {
            let map: serde_json::Map<String, serde_json::Value> = schemas
                .into_iter()
                .map(|(name, schema)| -> Result<(String, serde_json::Value)> {
                    Ok((name, serde_json::to_value(schema)?))
                })
                .collect::<Result<_>>()?;
            println!("{}", serde_json::to_string_pretty(&map)?);
        }
    }

    Ok(())
}
