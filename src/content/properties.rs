//! Custom site property folders.
//!
//! Any `_`-prefixed immediate subfolder of the source root that is not one
//! of the reserved folders (plugins/templates/includes/data/posts/output)
//! becomes a site property namespace: its direct-child files are loaded
//! flatly and exposed to templates under the folder name with the
//! underscore stripped.

use crate::{config::ProjectConfig, debug, log};
use anyhow::Result;
use futures::future::join_all;
use serde::Serialize;
use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

/// One loaded file of a property folder.
#[derive(Debug, Clone, Serialize)]
pub struct PropertyEntry {
    /// File name without extension.
    pub name: String,
    /// File content as text.
    pub content: String,
}

/// Load all custom site property folders.
pub async fn load(config: &ProjectConfig) -> Result<HashMap<String, Vec<PropertyEntry>>> {
    debug!("content"; "loading custom site properties");

    let root = &config.site.source_absolute;
    let reserved = [
        &config.compiler.plugins_folder,
        &config.compiler.templates_folder,
        &config.compiler.includes_folder,
        &config.compiler.data_folder,
        &config.compiler.posts_folder,
        &config.site.output,
    ];

    let mut folders = Vec::new();
    let Ok(mut dir) = tokio::fs::read_dir(root).await else {
        return Ok(HashMap::new());
    };
    while let Some(entry) = dir.next_entry().await? {
        let path = entry.path();
        if !entry.file_type().await?.is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if !name.starts_with('_') {
            continue;
        }
        if reserved.iter().any(|r| r.as_path() == Path::new(&name)) {
            continue;
        }
        if config.is_ignored(&path) {
            continue;
        }
        folders.push((name, path));
    }

    let loads = folders.iter().map(|(name, path)| async move {
        let entries = load_property_folder(path).await;
        (name.trim_start_matches('_').to_owned(), entries)
    });

    let mut properties = HashMap::new();
    for (key, entries) in join_all(loads).await {
        debug!("content"; "found site property `{key}`");
        properties.insert(key, entries);
    }

    Ok(properties)
}

/// Read the direct-child files of one property folder as text.
async fn load_property_folder(folder: &PathBuf) -> Vec<PropertyEntry> {
    let mut entries = Vec::new();

    let Ok(mut dir) = tokio::fs::read_dir(folder).await else {
        return entries;
    };
    while let Ok(Some(entry)) = dir.next_entry().await {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        match tokio::fs::read_to_string(&path).await {
            Ok(content) => entries.push(PropertyEntry { name, content }),
            Err(e) => log!("warn"; "unable to read property file {}: {e}", path.display()),
        }
    }

    entries.sort_by(|a, b| a.name.cmp(&b.name));
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    async fn load_from(dir: &TempDir) -> HashMap<String, Vec<PropertyEntry>> {
        fs::write(dir.path().join("config.daphne"), "{}").unwrap();
        let config = ProjectConfig::load(dir.path()).unwrap();
        load(&config).await.unwrap()
    }

    #[tokio::test]
    async fn test_custom_folder_becomes_property() {
        let dir = TempDir::new().unwrap();
        let music = dir.path().join("_music");
        fs::create_dir(&music).unwrap();
        fs::write(music.join("a.txt"), "first").unwrap();
        fs::write(music.join("b.txt"), "second").unwrap();

        let properties = load_from(&dir).await;

        assert_eq!(properties.len(), 1);
        let entries = &properties["music"];
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name, "a");
        assert_eq!(entries[0].content, "first");
    }

    #[tokio::test]
    async fn test_reserved_folders_are_not_properties() {
        let dir = TempDir::new().unwrap();
        for reserved in ["_templates", "_includes", "_data", "_posts", "_plugins", "_build"] {
            fs::create_dir(dir.path().join(reserved)).unwrap();
        }
        fs::create_dir(dir.path().join("_extras")).unwrap();
        fs::write(dir.path().join("_extras/x.txt"), "x").unwrap();

        let properties = load_from(&dir).await;

        assert_eq!(properties.len(), 1);
        assert!(properties.contains_key("extras"));
    }
}
