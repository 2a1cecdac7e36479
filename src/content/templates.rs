//! Template namespace loading.
//!
//! Every direct-child file under the templates folder becomes a template,
//! keyed by its file name without extension.

use super::{CompilableFile, insert_unique};
use crate::{config::ProjectConfig, debug, log};
use anyhow::Result;
use futures::future::join_all;
use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

/// Load all templates of the project.
///
/// A missing templates folder yields an empty namespace. Files whose
/// absolute path is in the resolved ignore list are skipped; a template
/// with a malformed front-matter header is dropped with an error (files
/// referencing it will fail template lookup later).
pub async fn load(config: &ProjectConfig) -> Result<HashMap<String, CompilableFile>> {
    debug!("content"; "loading templates");

    let root = &config.compiler.templates_folder_absolute;
    let paths = direct_child_files(root, config).await?;

    let reads = paths.into_iter().map(|path| async move {
        let raw = tokio::fs::read(&path).await;
        (path, raw)
    });

    let mut templates = HashMap::new();
    for (path, raw) in join_all(reads).await {
        let raw = match raw {
            Ok(raw) => raw,
            Err(e) => {
                log!("warn"; "unable to read template {}: {e}", path.display());
                continue;
            }
        };

        match CompilableFile::from_raw(&path, root, Some(raw), config) {
            Ok(file) => {
                let name = file.path.stem().to_owned();
                debug!("content"; "found template `{name}`");
                insert_unique(&mut templates, "template", name, file);
            }
            Err(e) => log!("error"; "template {:#}", e),
        }
    }

    Ok(templates)
}

/// Collect the direct-child files of `root`, minus ignored ones.
///
/// Shared by the templates and includes loaders: both namespaces are flat.
pub(super) async fn direct_child_files(
    root: &Path,
    config: &ProjectConfig,
) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();

    let Ok(mut dir) = tokio::fs::read_dir(root).await else {
        return Ok(paths);
    };
    while let Some(entry) = dir.next_entry().await? {
        let path = entry.path();
        if !entry.file_type().await?.is_file() {
            continue;
        }
        if config.is_ignored(&path) {
            continue;
        }
        paths.push(path);
    }

    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    async fn load_from(dir: &TempDir, config_json: &str) -> HashMap<String, CompilableFile> {
        fs::write(dir.path().join("config.daphne"), config_json).unwrap();
        let config = ProjectConfig::load(dir.path()).unwrap();
        load(&config).await.unwrap()
    }

    #[tokio::test]
    async fn test_templates_keyed_by_stem() {
        let dir = TempDir::new().unwrap();
        let templates = dir.path().join("_templates");
        fs::create_dir(&templates).unwrap();
        fs::write(templates.join("default.html"), "<html>{{ content }}</html>").unwrap();
        fs::write(templates.join("post.html"), "<article>{{ content }}</article>").unwrap();

        let loaded = load_from(&dir, "{}").await;

        assert_eq!(loaded.len(), 2);
        assert!(loaded.contains_key("default"));
        assert!(loaded.contains_key("post"));
        assert_eq!(loaded["default"].content, "<html>{{ content }}</html>");
    }

    #[tokio::test]
    async fn test_missing_folder_is_empty_namespace() {
        let dir = TempDir::new().unwrap();
        let loaded = load_from(&dir, "{}").await;

        assert!(loaded.is_empty());
    }

    #[tokio::test]
    async fn test_ignored_template_is_skipped() {
        let dir = TempDir::new().unwrap();
        let templates = dir.path().join("_templates");
        fs::create_dir(&templates).unwrap();
        fs::write(templates.join("default.html"), "kept").unwrap();
        fs::write(templates.join("old.html"), "ignored").unwrap();

        let loaded = load_from(
            &dir,
            r#"{ "compiler": { "ignore": ["_templates/old.html"] } }"#,
        )
        .await;

        assert_eq!(loaded.len(), 1);
        assert!(loaded.contains_key("default"));
    }

    #[tokio::test]
    async fn test_subfolders_are_not_templates() {
        let dir = TempDir::new().unwrap();
        let templates = dir.path().join("_templates");
        fs::create_dir_all(templates.join("partials")).unwrap();
        fs::write(templates.join("partials/x.html"), "nested").unwrap();
        fs::write(templates.join("default.html"), "top").unwrap();

        let loaded = load_from(&dir, "{}").await;

        assert_eq!(loaded.len(), 1);
        assert!(loaded.contains_key("default"));
    }
}
