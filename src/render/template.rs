//! Template wrapping.
//!
//! Substitutes a file's body into its declared template at the `content`
//! print-tag placeholder. Every occurrence of the placeholder receives the
//! same body; a template without one keeps its body unchanged, which is
//! surprising enough to warrant a warning but is not an error.

use crate::{
    config::ProjectConfig,
    content::{CompilableFile, ContentRepository},
    log,
};
use anyhow::{Result, bail};
use regex::{NoExpand, Regex};

/// Metadata key naming the template a file wants to be wrapped in.
const TEMPLATE_KEY: &str = "template";

/// Wrap `file`'s body in its template.
///
/// The template name comes from the file's `template` metadata entry,
/// falling back to `site.default_template`.
///
/// # Errors
///
/// Fatal for this file when the named template does not exist.
pub fn wrap(
    file: &CompilableFile,
    repository: &ContentRepository,
    config: &ProjectConfig,
    print_content: &Regex,
) -> Result<String> {
    let name = file
        .metadata
        .get(TEMPLATE_KEY)
        .unwrap_or(&config.site.default_template);

    let Some(template) = repository.template(name) else {
        bail!(
            "{}: unknown template `{name}`",
            file.path.relative.display()
        );
    };

    if !print_content.is_match(&template.content) {
        log!(
            "warn";
            "template `{name}` has no content placeholder, {} will not appear in the output",
            file.path.relative.display()
        );
        return Ok(template.content.clone());
    }

    Ok(print_content
        .replace_all(&template.content, NoExpand(&file.content))
        .into_owned())
}
