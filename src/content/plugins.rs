//! Plugin discovery and manifest validation.
//!
//! When `compiler.allow_plugins` is set, every immediate subfolder of the
//! plugins folder holding a `plugin.json` manifest is registered. Manifests
//! are validated (required `name` string and `functionality` object) but
//! plugins are never invoked by this engine. Invalid manifests are
//! warn-only: the plugin is skipped, nothing else is affected.

use crate::{config::ProjectConfig, debug, log};
use anyhow::Result;
use futures::future::join_all;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::{collections::HashMap, path::PathBuf};

/// Conventional manifest file name inside a plugin folder.
const MANIFEST_FILE_NAME: &str = "plugin.json";

/// A validated plugin manifest.
#[derive(Debug, Clone, Deserialize)]
pub struct PluginManifest {
    /// Display name of the plugin.
    pub name: String,
    /// Declared functionality table. Required, contents are opaque here.
    pub functionality: Map<String, Value>,
    /// Optional manifest version.
    #[serde(default)]
    pub version: Option<String>,
}

/// A discovered plugin: its folder plus the parsed manifest.
#[derive(Debug, Clone)]
pub struct Plugin {
    /// Folder the plugin lives in.
    pub root: PathBuf,
    /// Its validated manifest.
    pub manifest: PluginManifest,
}

/// Discover and validate plugin manifests.
///
/// Returns an empty map when plugins are disabled.
pub async fn load(config: &ProjectConfig) -> Result<HashMap<String, Plugin>> {
    if !config.compiler.allow_plugins {
        return Ok(HashMap::new());
    }
    debug!("content"; "loading plugins");

    let root = &config.compiler.plugins_folder_absolute;
    let mut candidates = Vec::new();

    let Ok(mut dir) = tokio::fs::read_dir(root).await else {
        return Ok(HashMap::new());
    };
    while let Some(entry) = dir.next_entry().await? {
        let path = entry.path();
        if !entry.file_type().await?.is_dir() {
            continue;
        }
        let manifest_path = path.join(MANIFEST_FILE_NAME);
        if !manifest_path.is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        candidates.push((name, path, manifest_path));
    }

    let reads = candidates.into_iter().map(|(name, root, manifest_path)| async move {
        let manifest = tokio::fs::read_to_string(&manifest_path).await;
        (name, root, manifest)
    });

    let mut plugins = HashMap::new();
    for (name, root, manifest) in join_all(reads).await {
        let parsed = manifest
            .map_err(anyhow::Error::from)
            .and_then(|text| serde_json::from_str::<PluginManifest>(&text).map_err(Into::into));
        match parsed {
            Ok(manifest) => {
                debug!("content"; "registered plugin `{name}`");
                plugins.insert(name, Plugin { root, manifest });
            }
            Err(e) => log!("warn"; "invalid plugin manifest for `{name}`: {e}"),
        }
    }

    Ok(plugins)
}
