//! Post namespace loading.
//!
//! Each immediate subfolder of the posts folder is one post; its slug is the
//! folder name. A post folder must contain exactly one file whose base name
//! (extension stripped) equals the configured post index name; every other
//! file in the folder is an asset. A post missing that invariant is a
//! post-level error: it is reported and dropped, sibling posts still build.

use super::CompilableFile;
use crate::{config::ProjectConfig, debug, log};
use anyhow::{Result, bail};
use futures::future::join_all;
use indexmap::IndexMap;
use serde_json::{Value, json};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A folder-scoped content unit: one primary document plus co-located assets.
#[derive(Debug)]
pub struct Post {
    /// Post slug, equal to the folder name.
    pub slug: String,
    /// The post's primary file.
    pub index: CompilableFile,
    /// Asset files in discovery order, paths relative to the post folder.
    pub assets: Vec<CompilableFile>,
}

impl Post {
    /// Whether the post is a draft (front-matter `draft: true`).
    pub fn is_draft(&self) -> bool {
        self.index
            .metadata
            .get("draft")
            .is_some_and(|v| v == "true")
    }

    /// The context object template authors see for this post.
    pub fn context(&self) -> Value {
        let mut data = match self.index.context() {
            Value::Object(map) => map,
            _ => serde_json::Map::new(),
        };
        data.insert("slug".into(), json!(self.slug));
        data.insert(
            "assets".into(),
            Value::Array(self.assets.iter().map(CompilableFile::context).collect()),
        );

        Value::Object(data)
    }
}

/// Load all posts of the project.
pub async fn load(config: &ProjectConfig) -> Result<IndexMap<String, Post>> {
    debug!("content"; "loading posts");

    let root = &config.compiler.posts_folder_absolute;
    let mut folders = Vec::new();

    let Ok(mut dir) = tokio::fs::read_dir(root).await else {
        return Ok(IndexMap::new());
    };
    while let Some(entry) = dir.next_entry().await? {
        let path = entry.path();
        if !entry.file_type().await?.is_dir() {
            continue;
        }
        if config.is_ignored(&path) {
            continue;
        }
        folders.push(path);
    }
    folders.sort();

    let loads = folders.iter().map(|folder| load_post(folder, config));

    let mut posts = IndexMap::new();
    for result in join_all(loads).await {
        match result {
            Ok(post) => {
                debug!("content"; "found post `{}`", post.slug);
                posts.insert(post.slug.clone(), post);
            }
            // Post-level error: siblings keep building
            Err(e) => log!("error"; "{:#}", e),
        }
    }

    Ok(posts)
}

/// Load one post folder: locate its index file, read it and its assets.
async fn load_post(folder: &Path, config: &ProjectConfig) -> Result<Post> {
    let slug = folder
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let files: Vec<PathBuf> = WalkDir::new(folder)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(walkdir::DirEntry::into_path)
        .filter(|p| !config.is_ignored(p))
        .collect();

    let index_name = &config.compiler.post_index;
    let (index_files, asset_files): (Vec<_>, Vec<_>) = files
        .into_iter()
        .partition(|p| p.file_stem().is_some_and(|stem| stem == index_name.as_str()));

    let [index_path] = index_files.as_slice() else {
        bail!(
            "post `{slug}`: expected exactly one `{index_name}.*` file, found {}",
            index_files.len()
        );
    };

    let raw = tokio::fs::read(index_path).await?;
    let index = CompilableFile::from_raw(index_path, folder, Some(raw), config)?;

    let asset_reads = asset_files.into_iter().map(|path| async move {
        // Only parse-eligible assets need their bytes up front; the rest are
        // copied verbatim at emission
        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        let raw = if config.compiler.parses_extension(extension) {
            Some(tokio::fs::read(&path).await?)
        } else {
            None
        };
        CompilableFile::from_raw(&path, folder, raw, config)
    });

    let mut assets = Vec::new();
    for result in join_all(asset_reads).await {
        match result {
            Ok(asset) => assets.push(asset),
            Err(e) => log!("error"; "post `{slug}` asset {:#}", e),
        }
    }

    Ok(Post { slug, index, assets })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    async fn load_from(dir: &TempDir) -> IndexMap<String, Post> {
        fs::write(dir.path().join("config.daphne"), "{}").unwrap();
        let config = ProjectConfig::load(dir.path()).unwrap();
        load(&config).await.unwrap()
    }

    #[tokio::test]
    async fn test_post_with_index_and_assets() {
        let dir = TempDir::new().unwrap();
        let post = dir.path().join("_posts/hello-world");
        fs::create_dir_all(post.join("img")).unwrap();
        fs::write(post.join("index.html"), "---\ntitle: Hello\n---\nBody").unwrap();
        fs::write(post.join("img/photo.png"), [0u8, 1, 2]).unwrap();

        let posts = load_from(&dir).await;

        assert_eq!(posts.len(), 1);
        let post = &posts["hello-world"];
        assert_eq!(post.slug, "hello-world");
        assert_eq!(
            post.index.metadata.get("title").map(String::as_str),
            Some("Hello")
        );
        assert_eq!(post.assets.len(), 1);
        assert_eq!(
            post.assets[0].path.relative,
            PathBuf::from("img/photo.png")
        );
    }

    #[tokio::test]
    async fn test_post_without_index_is_dropped() {
        let dir = TempDir::new().unwrap();
        let posts_root = dir.path().join("_posts");
        fs::create_dir_all(posts_root.join("broken")).unwrap();
        fs::write(posts_root.join("broken/readme.txt"), "no index here").unwrap();
        fs::create_dir_all(posts_root.join("valid")).unwrap();
        fs::write(posts_root.join("valid/index.html"), "ok").unwrap();

        let posts = load_from(&dir).await;

        // The broken sibling does not take down the valid post
        assert_eq!(posts.len(), 1);
        assert!(posts.contains_key("valid"));
    }

    #[tokio::test]
    async fn test_post_with_two_index_files_is_dropped() {
        let dir = TempDir::new().unwrap();
        let post = dir.path().join("_posts/twins");
        fs::create_dir_all(&post).unwrap();
        fs::write(post.join("index.html"), "one").unwrap();
        fs::write(post.join("index.txt"), "two").unwrap();

        let posts = load_from(&dir).await;

        assert!(posts.is_empty());
    }

    #[tokio::test]
    async fn test_draft_detection() {
        let dir = TempDir::new().unwrap();
        let post = dir.path().join("_posts/wip");
        fs::create_dir_all(&post).unwrap();
        fs::write(post.join("index.html"), "---\ndraft: true\n---\nsoon").unwrap();

        let posts = load_from(&dir).await;

        assert!(posts["wip"].is_draft());
    }
}
