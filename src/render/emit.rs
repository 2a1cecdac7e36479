//! Pass 2: writing the output tree.
//!
//! Emission mirrors each file's relative directory under the output root,
//! writes resolved text for parsed files and copies everything else
//! byte-for-byte from its source path.

use super::ResolvedPage;
use crate::debug;
use anyhow::{Context, Result};
use std::fs;

/// Write one resolved file to its output path.
pub fn emit(page: &ResolvedPage) -> Result<()> {
    if let Some(parent) = page.output.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }

    match &page.body {
        Some(text) => {
            fs::write(&page.output, text)
                .with_context(|| format!("failed to write {}", page.output.display()))?;
            debug!("render"; "wrote {}", page.relative.display());
        }
        None => {
            fs::copy(&page.source, &page.output).with_context(|| {
                format!(
                    "failed to copy {} to {}",
                    page.source.display(),
                    page.output.display()
                )
            })?;
            debug!("render"; "copied {}", page.relative.display());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_emit_writes_resolved_text() {
        let dir = TempDir::new().unwrap();
        let page = ResolvedPage {
            source: PathBuf::from("/nonexistent"),
            relative: PathBuf::from("blog/page.html"),
            output: dir.path().join("out/blog/page.html"),
            body: Some("<html>done</html>".into()),
        };

        emit(&page).unwrap();

        let written = fs::read_to_string(dir.path().join("out/blog/page.html")).unwrap();
        assert_eq!(written, "<html>done</html>");
    }

    #[test]
    fn test_emit_copies_binary_verbatim() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("photo.png");
        let bytes = [0u8, 159, 146, 150, 0, 7];
        fs::write(&source, bytes).unwrap();

        let page = ResolvedPage {
            source: source.clone(),
            relative: PathBuf::from("photo.png"),
            output: dir.path().join("out/photo.png"),
            body: None,
        };
        emit(&page).unwrap();

        let copied = fs::read(dir.path().join("out/photo.png")).unwrap();
        assert_eq!(copied, bytes);
    }
}
