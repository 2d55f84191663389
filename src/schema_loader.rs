//! JSON Schema loading for game datasets.
//!
//! The crate bundles `schema/game_catalog.schema.json`; callers may point at a
//! replacement file instead. Either way the schema must declare a `schema_version` in the
//! allowed set before it is compiled, so a mismatched schema cannot silently
//! accept the wrong record shape.

use anyhow::{Context, Result, anyhow, bail};
use jsonschema::JSONSchema;
use serde_json::Value;
use std::collections::BTreeSet;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

pub(crate) const BUNDLED_CATALOG_SCHEMA: &str =
    include_str!("../schema/game_catalog.schema.json");

/// The single catalog schema version this build understands.
pub const CATALOG_SCHEMA_VERSION: &str = "game_catalog_v1";

/// Result of loading and compiling a JSON Schema.
pub(crate) struct SchemaLoadResult {
    pub schema_version: String,
    pub compiled: JSONSchema,
}

/// Where the schema text comes from.
pub(crate) enum SchemaSource<'a> {
    Bundled,
    Path(&'a Path),
}

pub(crate) fn load_json_schema(
    source: SchemaSource<'_>,
    allowed_versions: &BTreeSet<String>,
) -> Result<SchemaLoadResult> {
    let schema_value: Value = match source {
        SchemaSource::Bundled => serde_json::from_str(BUNDLED_CATALOG_SCHEMA)
            .context("parsing bundled catalog schema")?,
        SchemaSource::Path(path) => serde_json::from_reader(BufReader::new(
            File::open(path).with_context(|| format!("opening schema {}", path.display()))?,
        ))
        .with_context(|| format!("parsing schema {}", path.display()))?,
    };

    let schema_version = extract_schema_version(&schema_value)
        .ok_or_else(|| anyhow!("schema missing a valid schema_version"))?;
    if !allowed_versions.contains(&schema_version) {
        bail!(
            "schema_version '{}' not in allowed set {:?}",
            schema_version,
            allowed_versions
        );
    }

    // Compile errors borrow the schema value; flatten them to text here.
    let compiled = JSONSchema::compile(&schema_value)
        .map_err(|err| anyhow!("compiling schema {schema_version}: {err}"))?;

    Ok(SchemaLoadResult {
        schema_version,
        compiled,
    })
}

/// Validate `instance`, joining every violation into one message.
pub(crate) fn validate_instance(schema: &SchemaLoadResult, instance: &Value) -> Result<()> {
    if let Err(errors) = schema.compiled.validate(instance) {
        let details = errors
            .map(|err| format!("{}: {}", err.instance_path, err))
            .collect::<Vec<_>>()
            .join("\n");
        bail!(
            "dataset failed {} validation:\n{}",
            schema.schema_version,
            details
        );
    }
    Ok(())
}

pub(crate) fn allowed_schema_versions() -> BTreeSet<String> {
    BTreeSet::from_iter([CATALOG_SCHEMA_VERSION.to_string()])
}

fn extract_schema_version(schema: &Value) -> Option<String> {
    let version = schema.get("schema_version").and_then(Value::as_str)?;
    if !version.is_empty()
        && version
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
    {
        Some(version.to_string())
    } else {
        None
    }
}
