pub mod catalog;
pub mod notes;
pub mod product_def;

pub use catalog::Catalog;
pub use notes::{MetaValue, Metadata};
pub use product_def::{ProductDefinition, ProductKind};

use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::DataError;

/// Read every `*.toml` file in `dir` as a table of `T` keyed by id.
///
/// Files are returned in path order so duplicate ids resolve the same way on
/// every load.
pub(crate) fn load_toml_tables<T: DeserializeOwned>(
    dir: &Path,
) -> Result<Vec<(PathBuf, HashMap<String, T>)>, DataError> {
    let entries = std::fs::read_dir(dir).map_err(|e| DataError::io(dir, e))?;

    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| DataError::io(dir, e))?;
        let path = entry.path();
        if path.extension().map_or(false, |ext| ext == "toml") {
            paths.push(path);
        }
    }
    paths.sort();

    let mut tables = Vec::with_capacity(paths.len());
    for path in paths {
        let content = std::fs::read_to_string(&path)
            .map_err(|e| DataError::io(&path, e))?;
        let table: HashMap<String, T> = toml::from_str(&content)
            .map_err(|e| DataError::parse(&path, e))?;
        tables.push((path, table));
    }

    Ok(tables)
}
