//! Schema Loading
//!
//! Reads schema objects from JSON files on disk. Each file holds either a
//! single schema object or an array of them.

use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use tracing::debug;
use walkdir::WalkDir;

use crate::config::LoaderConfig;
use crate::error::{Result, SchemaError};
use crate::objects::ObjectSchema;

/// Load every schema object from one file
pub fn load_file(path: &Path) -> Result<Vec<ObjectSchema>> {
    let content = fs::read_to_string(path)?;
    let parse_error = |source| SchemaError::Parse {
        path: path.to_path_buf(),
        source,
    };

    let value: serde_json::Value = serde_json::from_str(&content).map_err(parse_error)?;
    if value.is_array() {
        serde_json::from_value(value).map_err(parse_error)
    } else {
        serde_json::from_value(value)
            .map(|schema| vec![schema])
            .map_err(parse_error)
    }
}

/// Load schema objects from every `*.json` file under a directory, in
/// file name order
pub fn load_documents(schema_dir: &Path, config: &LoaderConfig) -> Result<Vec<ObjectSchema>> {
    let mut schemas = Vec::new();

    for entry in WalkDir::new(schema_dir).sort_by_file_name() {
        let entry = entry.map_err(std::io::Error::from)?;
        let path = entry.path();
        if !path.is_file() || path.extension().map(|e| e != "json").unwrap_or(true) {
            continue;
        }

        let relative = path.strip_prefix(schema_dir).unwrap_or(path);
        let relative_str = relative.to_string_lossy().replace('\\', "/");
        if config.skip_prefixes.iter().any(|p| relative_str.starts_with(p.as_str())) {
            debug!(path = %relative_str, "skipped");
            continue;
        }

        let loaded = load_file(path)?;
        debug!(path = %relative_str, schemas = loaded.len(), "loaded");
        schemas.extend(loaded);
    }

    Ok(schemas)
}

/// Group schema objects by title, keeping the order titles first appear in
pub fn group_by_title(schemas: Vec<ObjectSchema>) -> Vec<Vec<ObjectSchema>> {
    let mut groups: IndexMap<String, Vec<ObjectSchema>> = IndexMap::new();
    for schema in schemas {
        groups.entry(schema.schema.title.clone()).or_default().push(schema);
    }
    groups.into_values().collect()
}
