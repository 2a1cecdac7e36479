//! Site building orchestration.
//!
//! # Architecture
//!
//! ```text
//! build_site()
//!     │
//!     ├── ContentRepository::load()     (async fan-out, all namespaces)
//!     │
//!     ├── RenderEngine::resolve_all()   (Pass 1, parallel per file)
//!     │                                  ── barrier ──
//!     └── RenderEngine::emit_all()      (Pass 2, parallel per file)
//! ```
//!
//! The repository is constructed per build and dropped when the build
//! finishes; nothing persists across builds.

use crate::{
    config::ProjectConfig,
    content::ContentRepository,
    debug, log,
    render::{BuildReport, RenderEngine},
};
use anyhow::Result;
use std::path::Path;

/// The single operation the CLI/watch/serve layers invoke: resolve the
/// project configuration at `root` and build the site.
///
/// Aborts with a fatal error before any content I/O when the configuration
/// is missing or unparsable.
pub async fn build(root: &Path) -> Result<BuildReport> {
    let config = ProjectConfig::load(root)?;
    build_site(&config).await
}

/// Build the entire site: discover content, resolve every file, emit the
/// output tree.
///
/// Per-file problems surface as warnings and drop only the affected file;
/// the returned error is reserved for build-fatal conditions.
pub async fn build_site(config: &ProjectConfig) -> Result<BuildReport> {
    log!("build"; "building site from {}", config.root.display());

    let repository = ContentRepository::load(config).await?;
    log!(
        "content";
        "{} templates, {} includes, {} posts, {} files",
        repository.templates.len(),
        repository.includes.len(),
        repository.posts.len(),
        repository.files.len()
    );
    if config.compiler.allow_plugins {
        log!("content"; "{} plugins registered", repository.plugins.len());
    }
    debug!(
        "build";
        "site context: {}",
        repository.site_context(config)
    );

    let engine = RenderEngine::new(config, &repository)?;
    let (resolved, dropped) = engine.resolve_all();
    let report = engine.emit_all(&resolved, dropped)?;

    log_build_result(&report);
    Ok(report)
}

/// Summarize the build outcome.
fn log_build_result(report: &BuildReport) {
    if report.rendered + report.copied == 0 {
        log!("warn"; "output is empty, check the source folder and ignore patterns");
    } else {
        log!(
            "build";
            "done: {} rendered, {} copied, {} dropped",
            report.rendered,
            report.copied,
            report.dropped
        );
    }
}

// ============================================================================
// Tests
// ============================================================================
