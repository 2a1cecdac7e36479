//! `site` section configuration.
//!
//! Basic site metadata plus the source/output roots and rendering knobs
//! (default template, post permalink pattern, "read more" marker).

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// `site` section in config.daphne - site metadata and roots.
///
/// # Example
/// ```json
/// {
///     "site": {
///         "title": "My Blog",
///         "description": "A personal blog",
///         "author": "Alice",
///         "url": "https://myblog.com",
///         "source": ".",
///         "output": "_build"
///     }
/// }
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SiteSection {
    /// Site title displayed in templates.
    #[serde(default = "defaults::site::title")]
    #[educe(Default = defaults::site::title())]
    pub title: String,

    /// Site description.
    #[serde(default = "defaults::site::description")]
    #[educe(Default = defaults::site::description())]
    pub description: String,

    /// Author name.
    #[serde(default = "defaults::site::author")]
    #[educe(Default = defaults::site::author())]
    pub author: String,

    /// Author email.
    #[serde(default)]
    pub author_email: String,

    /// Base URL of the published site.
    #[serde(default)]
    pub url: String,

    /// BCP 47 language code.
    #[serde(default = "defaults::site::language")]
    #[educe(Default = defaults::site::language())]
    pub language: String,

    /// Source root, relative to the project root.
    #[serde(default = "defaults::site::source")]
    #[educe(Default = defaults::site::source())]
    pub source: PathBuf,

    /// Absolute source root (computed after loading).
    #[serde(skip)]
    pub source_absolute: PathBuf,

    /// Output root, relative to the project root.
    #[serde(default = "defaults::site::output")]
    #[educe(Default = defaults::site::output())]
    pub output: PathBuf,

    /// Absolute output root (computed after loading).
    #[serde(skip)]
    pub output_absolute: PathBuf,

    /// Template used when a file declares none.
    #[serde(default = "defaults::site::default_template")]
    #[educe(Default = defaults::site::default_template())]
    pub default_template: String,

    /// Permalink pattern for posts. `%slug%` is replaced by the post slug.
    #[serde(default = "defaults::site::post_permalink")]
    #[educe(Default = defaults::site::post_permalink())]
    pub post_permalink: String,

    /// Marker splitting a post's preview from the rest of its body.
    #[serde(default = "defaults::site::read_more")]
    #[educe(Default = defaults::site::read_more())]
    pub read_more: String,

    /// If true, draft posts are built like finished posts.
    #[serde(default = "defaults::r#false")]
    pub show_drafts: bool,
}
