//! Project configuration management for `config.daphne`.
//!
//! # Sections
//!
//! | Section      | Purpose                                              |
//! |--------------|------------------------------------------------------|
//! | `site`       | Site metadata, source/output roots, render knobs     |
//! | `compiler`   | Reserved folders, glob lists, tag markers            |
//!
//! Loading a configuration resolves it completely: declared values are merged
//! over built-in defaults, every folder key gets an absolute companion joined
//! to the project root, and the three glob lists are expanded against the
//! source root into `_absolute` path lists. A resolved configuration is
//! immutable for the duration of a build.

mod compiler;
pub mod defaults;
mod error;
mod site;

pub use compiler::{CompilerSection, TagsSection};
pub use error::ConfigError;
pub use site::SiteSection;

use crate::{debug, log};
use anyhow::Result;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Component, Path, PathBuf},
};

/// Conventional name of the project configuration file.
pub const CONFIG_FILE_NAME: &str = "config.daphne";

// ============================================================================
// Root Configuration
// ============================================================================

/// Root configuration structure representing config.daphne.
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    /// Absolute project root (set after loading).
    #[serde(skip)]
    pub root: PathBuf,

    /// Absolute path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Site metadata and roots.
    #[serde(default)]
    pub site: SiteSection,

    /// Engine settings.
    #[serde(default)]
    pub compiler: CompilerSection,
}

impl ProjectConfig {
    /// Parse configuration from a JSON string.
    ///
    /// List defaults are merged but paths and globs are left unresolved;
    /// use [`ProjectConfig::load`] for a fully resolved configuration.
    pub fn from_str(content: &str) -> Result<Self, serde_json::Error> {
        let mut config: ProjectConfig = serde_json::from_str(content)?;
        config.merge_list_defaults();
        Ok(config)
    }

    /// Load and fully resolve the configuration of the project at `root`.
    ///
    /// # Errors
    ///
    /// Fatal (build-aborting) when the config file is missing, unreadable
    /// or not valid JSON.
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        let root = normalize_path(root);
        let config_path = root.join(CONFIG_FILE_NAME);

        if !config_path.is_file() {
            return Err(ConfigError::Missing(root));
        }

        let content =
            fs::read_to_string(&config_path).map_err(|e| ConfigError::Io(config_path.clone(), e))?;
        let mut config =
            Self::from_str(&content).map_err(|e| ConfigError::Json(config_path.clone(), e))?;

        config.root = root;
        config.config_path = config_path;
        config.expand_paths();
        config.expand_globs();

        debug!("config"; "resolved project config from {}", config.config_path.display());

        Ok(config)
    }

    /// Whether `path` appears in the resolved ignore list.
    ///
    /// Exact-path containment: glob patterns were already expanded at load
    /// time, and unmatched patterns contribute their literal path.
    pub fn is_ignored(&self, path: &Path) -> bool {
        self.compiler.ignore_absolute.iter().any(|p| p == path)
    }

    // ------------------------------------------------------------------------
    // Resolution steps
    // ------------------------------------------------------------------------

    /// Append default list elements the project did not declare.
    ///
    /// Project-declared elements come first; defaults are deduplicated by
    /// equality. Scalar and object defaults are handled by serde directly.
    fn merge_list_defaults(&mut self) {
        merge_list(&mut self.compiler.ignore, defaults::compiler::ignore());
        merge_list(
            &mut self.compiler.extensions_to_parse,
            defaults::compiler::extensions_to_parse(),
        );
    }

    /// Compute the absolute companion of every folder-reference key.
    fn expand_paths(&mut self) {
        self.site.source_absolute = normalize_path(&self.root.join(&self.site.source));
        self.site.output_absolute = normalize_path(&self.root.join(&self.site.output));

        let compiler = &mut self.compiler;
        compiler.plugins_folder_absolute = normalize_path(&self.root.join(&compiler.plugins_folder));
        compiler.templates_folder_absolute =
            normalize_path(&self.root.join(&compiler.templates_folder));
        compiler.includes_folder_absolute =
            normalize_path(&self.root.join(&compiler.includes_folder));
        compiler.data_folder_absolute = normalize_path(&self.root.join(&compiler.data_folder));
        compiler.posts_folder_absolute = normalize_path(&self.root.join(&compiler.posts_folder));
    }

    /// Expand the three glob lists against the source root.
    fn expand_globs(&mut self) {
        let source_root = self.site.source_absolute.clone();

        self.compiler.include_absolute = expand_glob_list(&self.compiler.include, &source_root);
        self.compiler.ignore_absolute = expand_glob_list(&self.compiler.ignore, &source_root);
        self.compiler.include_no_compile_absolute =
            expand_glob_list(&self.compiler.include_no_compile, &source_root);
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Append `defaults` elements missing from `target`, preserving order.
fn merge_list(target: &mut Vec<String>, defaults: Vec<String>) {
    for item in defaults {
        if !target.contains(&item) {
            target.push(item);
        }
    }
}

/// Expand glob patterns relative to `root`.
///
/// Each pattern contributes its own resolved literal path followed by every
/// path it matches on disk, so exact-path containment checks behave
/// predictably even for patterns that match nothing.
fn expand_glob_list(patterns: &[String], root: &Path) -> Vec<PathBuf> {
    let mut resolved = Vec::new();

    for pattern in patterns {
        let full = normalize_path(&root.join(pattern));
        resolved.push(full.clone());

        match glob::glob(&full.to_string_lossy()) {
            Ok(paths) => {
                for path in paths.flatten() {
                    resolved.push(normalize_path(&path));
                }
            }
            Err(e) => log!("warn"; "invalid glob pattern `{pattern}`: {e}"),
        }
    }

    resolved
}

/// Normalize a path to an absolute, lexically cleaned form.
///
/// Does not touch the filesystem: output paths may not exist yet.
pub fn normalize_path(path: &Path) -> PathBuf {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    };

    let mut normalized = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other),
        }
    }
    normalized
}

// ============================================================================
// Tests
// ============================================================================
