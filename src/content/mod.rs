//! Content discovery and the per-build repository.
//!
//! This module discovers and loads, by category, every file relevant to a
//! build:
//!
//! - **templates**: shell documents, keyed by file stem
//! - **includes**: reusable fragments, keyed by file name
//! - **data**: parsed JSON values in a nested namespace mirroring folders
//! - **posts**: folder-scoped content units (one index file + assets)
//! - **files**: every other discoverable file under the source root
//! - **properties**: custom `_`-prefixed site property folders
//! - **plugins**: discovered plugin manifests (validated, never invoked)
//!
//! All namespaces load concurrently as independent asynchronous operations
//! behind a fan-out/fan-in barrier; the repository is complete before the
//! rendering engine starts and is never mutated afterwards. A repository is
//! constructed per build, so nothing leaks across builds.

pub mod data;
pub mod file;
pub mod files;
pub mod includes;
pub mod plugins;
pub mod posts;
pub mod properties;
pub mod templates;

pub use file::{CompilableFile, FilePaths};
pub use plugins::{Plugin, PluginManifest};
pub use posts::Post;
pub use properties::PropertyEntry;

use crate::{config::ProjectConfig, debug, log};
use anyhow::Result;
use indexmap::IndexMap;
use serde_json::{Value, json};
use std::collections::HashMap;

/// Every file needed for one build, partitioned into namespaces.
///
/// Namespace maps are owned by the repository; readers get shared references,
/// never copies.
#[derive(Debug, Default)]
pub struct ContentRepository {
    /// Templates keyed by file name without extension.
    pub templates: HashMap<String, CompilableFile>,
    /// Includes keyed by file name, extension included.
    pub includes: HashMap<String, CompilableFile>,
    /// Nested data namespace mirroring the data folder structure.
    pub data: Value,
    /// Posts keyed by slug, in discovery order.
    pub posts: IndexMap<String, Post>,
    /// Every other discoverable content file.
    pub files: Vec<CompilableFile>,
    /// Custom site property folders, keyed by un-prefixed folder name.
    pub properties: HashMap<String, Vec<PropertyEntry>>,
    /// Validated plugin manifests keyed by plugin folder name.
    pub plugins: HashMap<String, Plugin>,
}

impl ContentRepository {
    /// Discover and load everything the build needs.
    ///
    /// Namespaces load concurrently; a fatal error in any loader aborts the
    /// remaining in-flight discovery.
    pub async fn load(config: &ProjectConfig) -> Result<Self> {
        let (templates, includes, data, posts, files, properties, plugins) = tokio::try_join!(
            templates::load(config),
            includes::load(config),
            data::load(config),
            posts::load(config),
            files::discover(config),
            properties::load(config),
            plugins::load(config),
        )?;

        debug!(
            "content";
            "repository loaded: {} templates, {} includes, {} posts, {} files",
            templates.len(), includes.len(), posts.len(), files.len()
        );

        Ok(Self {
            templates,
            includes,
            data,
            posts,
            files,
            properties,
            plugins,
        })
    }

    /// Look up a template by name.
    pub fn template(&self, name: &str) -> Option<&CompilableFile> {
        self.templates.get(name)
    }

    /// Look up an include by file name.
    pub fn include(&self, name: &str) -> Option<&CompilableFile> {
        self.includes.get(name)
    }

    /// The site-wide context template authors conceptually render against:
    /// resolved site configuration, the data namespace, custom property
    /// folders and the full post list with resolved metadata.
    pub fn site_context(&self, config: &ProjectConfig) -> Value {
        let mut site = match serde_json::to_value(&config.site) {
            Ok(Value::Object(map)) => map,
            _ => serde_json::Map::new(),
        };

        site.insert("data".into(), self.data.clone());

        for (name, entries) in &self.properties {
            site.insert(name.clone(), json!(entries));
        }

        let posts: Vec<Value> = self.posts.values().map(Post::context).collect();
        site.insert("posts".into(), Value::Array(posts));

        Value::Object(site)
    }
}

/// Warn-and-overwrite insert for namespace maps.
///
/// Keys within a namespace must be unique; a collision is a configuration
/// error that is reported, then resolved last-write-wins.
pub(crate) fn insert_unique(
    map: &mut HashMap<String, CompilableFile>,
    namespace: &str,
    key: String,
    file: CompilableFile,
) {
    if map.contains_key(&key) {
        log!(
            "warn";
            "duplicate {namespace} key `{key}` ({}), overwriting earlier entry",
            file.path.relative.display()
        );
    }
    map.insert(key, file);
}
