//! Data namespace loading.
//!
//! Every `*.json` file under the data folder becomes a leaf in a nested
//! namespace mirroring the folder structure: `a/b/c.json` is reachable as
//! `data.a.b.c`. Parse failures leave the key absent and warn; they never
//! abort the build.

use crate::{config::ProjectConfig, debug, log};
use anyhow::Result;
use futures::future::join_all;
use serde_json::{Map, Value};
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

/// Extension of structured data files.
const DATA_EXTENSION: &str = "json";

/// Load the data namespace.
pub async fn load(config: &ProjectConfig) -> Result<Value> {
    debug!("content"; "loading data");

    let root = &config.compiler.data_folder_absolute;
    let paths: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(walkdir::DirEntry::into_path)
        .filter(|p| p.extension().is_some_and(|ext| ext == DATA_EXTENSION))
        .filter(|p| !config.is_ignored(p))
        .collect();

    let reads = paths.into_iter().map(|path| async move {
        let content = tokio::fs::read_to_string(&path).await;
        (path, content)
    });

    let mut data = Map::new();
    for (path, content) in join_all(reads).await {
        let key = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let relative_dir = path
            .parent()
            .and_then(|dir| dir.strip_prefix(root).ok())
            .unwrap_or(Path::new(""));

        let parsed = content
            .map_err(anyhow::Error::from)
            .and_then(|text| serde_json::from_str(&text).map_err(anyhow::Error::from));
        match parsed {
            Ok(value) => {
                debug!("content"; "found data `{key}`");
                insert_nested(&mut data, relative_dir, key, value);
            }
            // Value stays absent; the rest of the build proceeds
            Err(e) => log!("warn"; "malformed data file {}: {e}", path.display()),
        }
    }

    Ok(Value::Object(data))
}

/// Insert `value` at the namespace path given by `relative_dir` + `key`.
///
/// Intermediate folders become nested objects. A leaf colliding with an
/// existing subtree is reported and resolved last-write-wins.
fn insert_nested(root: &mut Map<String, Value>, relative_dir: &Path, key: String, value: Value) {
    let mut node = root;

    for component in relative_dir.components() {
        let Component::Normal(part) = component else {
            continue;
        };
        let part = part.to_string_lossy().into_owned();

        let entry = node
            .entry(part.clone())
            .or_insert_with(|| Value::Object(Map::new()));
        if !entry.is_object() {
            log!("warn"; "data namespace collision at `{part}`, overwriting earlier value");
            *entry = Value::Object(Map::new());
        }
        node = entry.as_object_mut().expect("entry was just made an object");
    }

    if node.contains_key(&key) {
        log!("warn"; "duplicate data key `{key}`, overwriting earlier entry");
    }
    node.insert(key, value);
}
