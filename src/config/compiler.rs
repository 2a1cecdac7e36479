//! `compiler` section configuration.
//!
//! Reserved folder names, glob lists, tag markers and the set of file
//! extensions the engine will parse as text.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// `compiler` section in config.daphne - engine knobs.
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct CompilerSection {
    /// Folder holding plugin manifests, relative to the project root.
    #[serde(default = "defaults::compiler::plugins_folder")]
    #[educe(Default = defaults::compiler::plugins_folder())]
    pub plugins_folder: PathBuf,

    #[serde(skip)]
    pub plugins_folder_absolute: PathBuf,

    /// Folder holding templates, relative to the project root.
    #[serde(default = "defaults::compiler::templates_folder")]
    #[educe(Default = defaults::compiler::templates_folder())]
    pub templates_folder: PathBuf,

    #[serde(skip)]
    pub templates_folder_absolute: PathBuf,

    /// Folder holding includes, relative to the project root.
    #[serde(default = "defaults::compiler::includes_folder")]
    #[educe(Default = defaults::compiler::includes_folder())]
    pub includes_folder: PathBuf,

    #[serde(skip)]
    pub includes_folder_absolute: PathBuf,

    /// Folder holding structured data files, relative to the project root.
    #[serde(default = "defaults::compiler::data_folder")]
    #[educe(Default = defaults::compiler::data_folder())]
    pub data_folder: PathBuf,

    #[serde(skip)]
    pub data_folder_absolute: PathBuf,

    /// Folder holding post folders, relative to the project root.
    #[serde(default = "defaults::compiler::posts_folder")]
    #[educe(Default = defaults::compiler::posts_folder())]
    pub posts_folder: PathBuf,

    #[serde(skip)]
    pub posts_folder_absolute: PathBuf,

    /// Base name (extension stripped) of a post's primary file.
    #[serde(default = "defaults::compiler::post_index")]
    #[educe(Default = defaults::compiler::post_index())]
    pub post_index: String,

    /// Glob patterns of files to include in the build.
    #[serde(default)]
    pub include: Vec<String>,

    #[serde(skip)]
    pub include_absolute: Vec<PathBuf>,

    /// Glob patterns of files to exclude from the build.
    #[serde(default = "defaults::compiler::ignore")]
    #[educe(Default = defaults::compiler::ignore())]
    pub ignore: Vec<String>,

    #[serde(skip)]
    pub ignore_absolute: Vec<PathBuf>,

    /// Glob patterns of files copied to the output but never parsed.
    #[serde(default)]
    pub include_no_compile: Vec<String>,

    #[serde(skip)]
    pub include_no_compile_absolute: Vec<PathBuf>,

    /// Whether plugin manifests are discovered and validated.
    #[serde(default = "defaults::r#false")]
    pub allow_plugins: bool,

    /// Skip dot-prefixed names during file discovery.
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub ignore_dot_names: bool,

    /// Extensions of files eligible for text parsing.
    #[serde(default = "defaults::compiler::extensions_to_parse")]
    #[educe(Default = defaults::compiler::extensions_to_parse())]
    pub extensions_to_parse: Vec<String>,

    /// Tag markers recognized by the rendering engine.
    #[serde(default)]
    pub tags: TagsSection,
}

/// Tag markers: front-matter delimiter, block tags and print tags.
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct TagsSection {
    /// Line delimiting the front-matter block.
    #[serde(default = "defaults::tags::delimiter")]
    #[educe(Default = defaults::tags::delimiter())]
    pub delimiter: String,

    /// Opening marker of a block tag (include directives).
    #[serde(default = "defaults::tags::opening")]
    #[educe(Default = defaults::tags::opening())]
    pub opening: String,

    /// Closing marker of a block tag.
    #[serde(default = "defaults::tags::closing")]
    #[educe(Default = defaults::tags::closing())]
    pub closing: String,

    /// Opening marker of a print tag (the `content` placeholder).
    #[serde(default = "defaults::tags::print_opening")]
    #[educe(Default = defaults::tags::print_opening())]
    pub print_opening: String,

    /// Closing marker of a print tag.
    #[serde(default = "defaults::tags::print_closing")]
    #[educe(Default = defaults::tags::print_closing())]
    pub print_closing: String,
}

impl CompilerSection {
    /// Whether `extension` (without the dot) is eligible for text parsing.
    pub fn parses_extension(&self, extension: &str) -> bool {
        self.extensions_to_parse.iter().any(|e| e == extension)
    }
}
