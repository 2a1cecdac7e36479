//! The two-pass rendering engine.
//!
//! # Passes
//!
//! ```text
//! resolve_all()  (Pass 1, per file, parallel)
//!     │  metadata ──► template wrap ──► include expansion (fixed point)
//!     ▼
//! [barrier: every file resolved before anything is written]
//!     │
//! emit_all()     (Pass 2, per file, parallel)
//!        mirror relative dirs ──► write text / copy bytes verbatim
//! ```
//!
//! A fatal-for-this-file error in Pass 1 logs the file's relative path and
//! excludes the file from Pass 2; it never aborts the build. Pass 2 I/O
//! errors are build-fatal.

mod emit;
mod includes;
mod template;

use crate::{
    config::ProjectConfig,
    content::{CompilableFile, ContentRepository},
    debug, log,
};
use anyhow::Result;
use rayon::prelude::*;
use regex::Regex;
use std::path::PathBuf;

/// Summary of one build's emission.
#[derive(Debug, Default)]
pub struct BuildReport {
    /// Files rendered through the template/include pipeline.
    pub rendered: usize,
    /// Files copied byte-for-byte.
    pub copied: usize,
    /// Files dropped by fatal-for-this-file errors in Pass 1.
    pub dropped: usize,
}

/// One file after Pass 1, ready for emission.
#[derive(Debug)]
pub struct ResolvedPage {
    /// Source path on disk.
    pub source: PathBuf,
    /// Path relative to its owning root (for logging).
    pub relative: PathBuf,
    /// Absolute output path.
    pub output: PathBuf,
    /// Resolved body text; `None` means copy the source bytes verbatim.
    pub body: Option<String>,
}

/// A unit of Pass-1 work: a discovered file and where it will be emitted.
struct WorkItem<'a> {
    file: &'a CompilableFile,
    output: PathBuf,
}

/// The rendering engine for one build.
///
/// Holds the immutable configuration and repository plus the tag patterns
/// compiled once from the configured markers.
pub struct RenderEngine<'a> {
    config: &'a ProjectConfig,
    repository: &'a ContentRepository,
    /// Matches the `content` print-tag placeholder.
    print_content: Regex,
    /// Matches an include directive; capture 1 is the include name.
    include_directive: Regex,
}

impl<'a> RenderEngine<'a> {
    /// Compile tag patterns and bind the engine to a loaded repository.
    pub fn new(config: &'a ProjectConfig, repository: &'a ContentRepository) -> Result<Self> {
        let tags = &config.compiler.tags;

        let print_content = Regex::new(&format!(
            r"{}\s*content\s*{}",
            regex::escape(&tags.print_opening),
            regex::escape(&tags.print_closing),
        ))?;
        let include_directive = Regex::new(&format!(
            r"{}\s*include\s+(\S+?)\s*{}",
            regex::escape(&tags.opening),
            regex::escape(&tags.closing),
        ))?;

        Ok(Self {
            config,
            repository,
            print_content,
            include_directive,
        })
    }

    #[cfg(test)]
    pub(crate) fn print_content_pattern(&self) -> &Regex {
        &self.print_content
    }

    #[cfg(test)]
    pub(crate) fn include_directive_pattern(&self) -> &Regex {
        &self.include_directive
    }

    // ------------------------------------------------------------------------
    // Pass 1
    // ------------------------------------------------------------------------

    /// Resolve every discoverable file independently.
    ///
    /// Returns the resolved pages plus the count of files dropped by
    /// fatal-for-this-file errors.
    pub fn resolve_all(&self) -> (Vec<ResolvedPage>, usize) {
        let items = self.collect_work();
        let total = items.len();

        let resolved: Vec<ResolvedPage> = items
            .par_iter()
            .filter_map(|item| match self.resolve_one(item) {
                Ok(page) => Some(page),
                Err(e) => {
                    log!("error"; "{:#}", e);
                    None
                }
            })
            .collect();

        let dropped = total - resolved.len();
        (resolved, dropped)
    }

    /// Resolve one file: template wrap, then include expansion to a fixed
    /// point. Non-parsed files pass through untouched.
    fn resolve_one(&self, item: &WorkItem) -> Result<ResolvedPage> {
        let file = item.file;

        let body = if file.should_parse {
            let wrapped = template::wrap(file, self.repository, self.config, &self.print_content)?;
            let expanded = includes::expand(
                wrapped,
                self.repository,
                &self.include_directive,
                &file.path.relative,
            )?;
            Some(expanded)
        } else {
            None
        };

        Ok(ResolvedPage {
            source: file.path.absolute.clone(),
            relative: file.path.relative.clone(),
            output: item.output.clone(),
            body,
        })
    }

    /// Gather Pass-1 work: misc files mirror their relative path under the
    /// output root; posts land at their permalink with assets preserving
    /// their layout within the post folder.
    fn collect_work(&self) -> Vec<WorkItem<'a>> {
        let output_root = &self.config.site.output_absolute;
        let mut items = Vec::new();

        for file in &self.repository.files {
            items.push(WorkItem {
                file,
                output: output_root.join(&file.path.relative),
            });
        }

        for post in self.repository.posts.values() {
            if post.is_draft() && !self.config.site.show_drafts {
                debug!("render"; "skipping draft post `{}`", post.slug);
                continue;
            }

            let post_root = self.post_output_dir(&post.slug);
            items.push(WorkItem {
                file: &post.index,
                output: post_root.join(&post.index.path.relative),
            });
            for asset in &post.assets {
                items.push(WorkItem {
                    file: asset,
                    output: post_root.join(&asset.path.relative),
                });
            }
        }

        items
    }

    /// Output folder of a post: the permalink pattern with `%slug%`
    /// substituted, joined under the output root.
    fn post_output_dir(&self, slug: &str) -> PathBuf {
        let permalink = self.config.site.post_permalink.replace("%slug%", slug);
        self.config
            .site
            .output_absolute
            .join(permalink.trim_start_matches('/'))
    }

    // ------------------------------------------------------------------------
    // Pass 2
    // ------------------------------------------------------------------------

    /// Write every resolved file to the output tree.
    ///
    /// Must only run after [`RenderEngine::resolve_all`] has returned: the
    /// barrier between the passes is the caller holding the full resolved
    /// set.
    pub fn emit_all(&self, resolved: &[ResolvedPage], dropped: usize) -> Result<BuildReport> {
        resolved.par_iter().try_for_each(emit::emit)?;

        let rendered = resolved.iter().filter(|p| p.body.is_some()).count();
        Ok(BuildReport {
            rendered,
            copied: resolved.len() - rendered,
            dropped,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
