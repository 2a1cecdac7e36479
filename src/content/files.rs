//! Miscellaneous file discovery.
//!
//! Everything under the source root that is not inside a `_`-prefixed
//! (reserved) folder, is not the configuration file itself and is not
//! ignored becomes a discoverable content file. Dot-prefixed names are
//! skipped when `compiler.ignore_dot_names` is set.

use super::CompilableFile;
use crate::{config::ProjectConfig, debug, log};
use anyhow::Result;
use futures::future::join_all;
use std::path::PathBuf;
use walkdir::WalkDir;

/// Discover and load every other content file of the project.
pub async fn discover(config: &ProjectConfig) -> Result<Vec<CompilableFile>> {
    debug!("content"; "discovering files");

    let root = &config.site.source_absolute;
    let output_root = &config.site.output_absolute;
    let ignore_dot_names = config.compiler.ignore_dot_names;

    let paths: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_entry(|entry| {
            if entry.depth() == 0 {
                return true;
            }
            let name = entry.file_name().to_string_lossy();
            // Reserved-folder marker prunes whole subtrees
            if name.starts_with('_') {
                return false;
            }
            if ignore_dot_names && name.starts_with('.') {
                return false;
            }
            true
        })
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(walkdir::DirEntry::into_path)
        .filter(|p| p != &config.config_path)
        .filter(|p| !p.starts_with(output_root))
        .filter(|p| !config.is_ignored(p))
        .collect();

    let reads = paths.into_iter().map(|path| async move {
        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        let no_compile = config
            .compiler
            .include_no_compile_absolute
            .iter()
            .any(|p| p == &path);
        let raw = if !no_compile && config.compiler.parses_extension(extension) {
            Some(tokio::fs::read(&path).await?)
        } else {
            None
        };
        CompilableFile::from_raw(&path, root, raw, config)
    });

    let mut files = Vec::new();
    for result in join_all(reads).await {
        match result {
            Ok(file) => {
                debug!("content"; "found file {}", file.path.relative.display());
                files.push(file);
            }
            // Fatal for this file only: it is excluded from the build
            Err(e) => log!("error"; "{:#}", e),
        }
    }

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    async fn discover_from(dir: &TempDir, config_json: &str) -> Vec<CompilableFile> {
        fs::write(dir.path().join("config.daphne"), config_json).unwrap();
        let config = ProjectConfig::load(dir.path()).unwrap();
        let mut files = discover(&config).await.unwrap();
        files.sort_by(|a, b| a.path.relative.cmp(&b.path.relative));
        files
    }

    #[tokio::test]
    async fn test_reserved_folders_and_config_are_excluded() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("_templates")).unwrap();
        fs::write(dir.path().join("_templates/default.html"), "t").unwrap();
        fs::create_dir(dir.path().join("blog")).unwrap();
        fs::write(dir.path().join("blog/page.html"), "p").unwrap();
        fs::write(dir.path().join("index.html"), "i").unwrap();

        let files = discover_from(&dir, "{}").await;

        let names: Vec<String> = files
            .iter()
            .map(|f| f.path.relative.display().to_string())
            .collect();
        assert_eq!(names, vec!["blog/page.html", "index.html"]);
    }

    #[tokio::test]
    async fn test_ignore_glob_excludes_files() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("page.html"), "p").unwrap();
        fs::write(dir.path().join("scratch.tmp"), "x").unwrap();

        let files =
            discover_from(&dir, r#"{ "compiler": { "ignore": ["*.tmp"] } }"#).await;

        assert_eq!(files.len(), 1);
        assert_eq!(files[0].path.name, "page.html");
    }

    #[tokio::test]
    async fn test_dot_names_are_skipped_by_default() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(".hidden"), "h").unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();
        fs::write(dir.path().join(".git/HEAD"), "ref").unwrap();
        fs::write(dir.path().join("page.html"), "p").unwrap();

        let files = discover_from(&dir, "{}").await;

        assert_eq!(files.len(), 1);
        assert_eq!(files[0].path.name, "page.html");
    }

    #[tokio::test]
    async fn test_non_parse_files_are_discovered_unread() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("photo.png"), [0u8, 159, 146]).unwrap();

        let files = discover_from(&dir, "{}").await;

        assert_eq!(files.len(), 1);
        assert!(!files[0].should_parse);
        assert!(files[0].raw.is_none());
    }

    #[tokio::test]
    async fn test_include_no_compile_is_copied_not_parsed() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("raw.html"), "---\ntitle: X\n---\nbody").unwrap();

        let files = discover_from(
            &dir,
            r#"{ "compiler": { "include_no_compile": ["raw.html"] } }"#,
        )
        .await;

        // Discovered, but front-matter logic never runs on it
        assert_eq!(files.len(), 1);
        assert!(!files[0].should_parse);
        assert!(files[0].metadata.is_empty());
    }

    #[tokio::test]
    async fn test_malformed_front_matter_drops_only_that_file() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("bad.html"), "---\nno separator\n---\nB").unwrap();
        fs::write(dir.path().join("good.html"), "fine").unwrap();

        let files = discover_from(&dir, "{}").await;

        assert_eq!(files.len(), 1);
        assert_eq!(files[0].path.name, "good.html");
    }
}
