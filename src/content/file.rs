//! The compilable file model.
//!
//! A [`CompilableFile`] represents one discovered file: raw bytes, derived
//! path facts, parsed front-matter metadata and body content with the
//! metadata header stripped. Files are created once per discovered path
//! during a build and never mutated after the resolve pass completes.
//!
//! # Front matter
//!
//! ```text
//! ---
//! title: Hello
//! template: post
//! ---
//! BODY
//! ```
//!
//! The block is recognized only when the first non-empty line equals the
//! configured delimiter exactly (after trimming). Header lines split on the
//! first `:`; a header line without one is a fatal error scoped to the file.

use crate::{config::ProjectConfig, log};
use anyhow::{Result, bail};
use indexmap::IndexMap;
use serde_json::{Value, json};
use std::path::{Path, PathBuf};

/// Metadata key whose value overrides the derived preview.
const EXCERPT_KEY: &str = "excerpt";

// ============================================================================
// Path facts
// ============================================================================

/// Derived path information for a discovered file.
#[derive(Debug, Clone)]
pub struct FilePaths {
    /// Absolute path on disk.
    pub absolute: PathBuf,
    /// Path relative to the owning root (source root, templates folder, ...).
    pub relative: PathBuf,
    /// Directory portion of the absolute path.
    pub absolute_dir: PathBuf,
    /// Directory portion of the relative path.
    pub relative_dir: PathBuf,
    /// Base name, extension included.
    pub name: String,
}

impl FilePaths {
    /// Derive path facts for `absolute` against its owning `root`.
    pub fn derive(absolute: &Path, root: &Path) -> Self {
        let relative = absolute
            .strip_prefix(root)
            .unwrap_or(absolute)
            .to_path_buf();
        let name = absolute
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            absolute: absolute.to_path_buf(),
            absolute_dir: absolute.parent().unwrap_or(absolute).to_path_buf(),
            relative_dir: relative.parent().unwrap_or(Path::new("")).to_path_buf(),
            relative,
            name,
        }
    }

    /// Base name with the extension stripped.
    pub fn stem(&self) -> &str {
        self.name
            .rsplit_once('.')
            .map(|(stem, _)| stem)
            .unwrap_or(&self.name)
    }

    /// Extension without the dot, empty if there is none.
    pub fn extension(&self) -> &str {
        Path::new(&self.name)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
    }
}

// ============================================================================
// Compilable file
// ============================================================================

/// One discovered file, ready for the rendering engine.
#[derive(Debug, Clone)]
pub struct CompilableFile {
    /// Path facts.
    pub path: FilePaths,
    /// Raw bytes, `None` for files that were classified without reading.
    pub raw: Option<Vec<u8>>,
    /// Whether the file takes part in text rendering. Computed once at
    /// discovery time, never recomputed.
    pub should_parse: bool,
    /// Front-matter entries in declaration order. Duplicate keys are
    /// last-write-wins. Empty when there is no header or `should_parse`
    /// is false.
    pub metadata: IndexMap<String, String>,
    /// Body text with the front-matter block removed. For unparsed text
    /// files this is the raw text; for binary files it is empty.
    pub content: String,
    /// Content before the first "read more" marker, or the `excerpt`
    /// metadata value if present.
    pub preview: String,
}

impl CompilableFile {
    /// Build a `CompilableFile` from raw content.
    ///
    /// `raw` is `None` for files that were discovered but not read (they are
    /// copied verbatim at emission). A file is parsed only when its raw
    /// content is valid text *and* its extension is in the configured parse
    /// set; a candidate that turns out to be binary is reclassified with a
    /// warning, not an error.
    ///
    /// # Errors
    ///
    /// Fatal for this file when a front-matter header line has no `:`.
    pub fn from_raw(
        absolute: &Path,
        root: &Path,
        raw: Option<Vec<u8>>,
        config: &ProjectConfig,
    ) -> Result<Self> {
        let path = FilePaths::derive(absolute, root);
        let extension_ok = config.compiler.parses_extension(path.extension());

        let Some(bytes) = raw else {
            return Ok(Self::unparsed(path, None));
        };

        if !extension_ok {
            // Keep the text around for includes and similar lookups
            let content = String::from_utf8(bytes.clone()).unwrap_or_default();
            let mut file = Self::unparsed(path, Some(bytes));
            file.content = content;
            return Ok(file);
        }

        let text = match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(e) => {
                log!("warn"; "{}: binary content, reclassified as non-parseable", path.relative.display());
                return Ok(Self::unparsed(path, Some(e.into_bytes())));
            }
        };
        if text.bytes().any(|b| b == 0) {
            log!("warn"; "{}: binary content, reclassified as non-parseable", path.relative.display());
            return Ok(Self::unparsed(path, Some(text.into_bytes())));
        }

        let delimiter = &config.compiler.tags.delimiter;
        let (metadata, content) = match extract_front_matter(&text, delimiter) {
            Ok(parsed) => parsed,
            Err(e) => bail!("{}: {e}", path.relative.display()),
        };

        let preview = derive_preview(&metadata, &content, &config.site.read_more);

        Ok(Self {
            path,
            raw: Some(text.into_bytes()),
            should_parse: true,
            metadata,
            content,
            preview,
        })
    }

    /// A file excluded from text rendering.
    fn unparsed(path: FilePaths, raw: Option<Vec<u8>>) -> Self {
        Self {
            path,
            raw,
            should_parse: false,
            metadata: IndexMap::new(),
            content: String::new(),
            preview: String::new(),
        }
    }

    /// The context object template authors see for this file.
    pub fn context(&self) -> Value {
        let mut data = serde_json::Map::new();
        for (key, value) in &self.metadata {
            data.insert(key.clone(), Value::String(value.clone()));
        }
        data.insert("file_name".into(), json!(self.path.name));
        data.insert("is_binary".into(), json!(!self.should_parse));
        if self.should_parse {
            data.insert("content".into(), json!(self.content));
            data.insert("preview".into(), json!(self.preview));
        } else {
            data.insert("content".into(), Value::Null);
            data.insert("preview".into(), Value::Null);
        }

        Value::Object(data)
    }
}

// ============================================================================
// Front matter
// ============================================================================

/// Split `text` into front-matter entries and remaining content.
///
/// A file whose first non-empty line is not the delimiter has no header;
/// that is not an error and the content is returned unchanged. An opened
/// block ends at the next delimiter line or at end of input.
fn extract_front_matter(
    text: &str,
    delimiter: &str,
) -> Result<(IndexMap<String, String>, String)> {
    let lines: Vec<&str> = text.lines().collect();

    let Some(start) = lines.iter().position(|l| !l.trim().is_empty()) else {
        return Ok((IndexMap::new(), text.to_owned()));
    };
    if lines[start].trim() != delimiter {
        return Ok((IndexMap::new(), text.to_owned()));
    }

    let mut metadata = IndexMap::new();
    let mut index = start + 1;
    while index < lines.len() {
        let line = lines[index].trim();
        index += 1;

        if line == delimiter {
            break;
        }

        let Some((key, value)) = line.split_once(':') else {
            bail!("invalid front matter line (missing `:`): `{line}`");
        };
        // Last declaration wins for duplicate keys
        metadata.insert(key.trim().to_owned(), value.trim().to_owned());
    }

    Ok((metadata, lines[index..].join("\n")))
}

/// Preview: the `excerpt` metadata verbatim, else content up to the
/// "read more" marker, else the whole content.
fn derive_preview(
    metadata: &IndexMap<String, String>,
    content: &str,
    read_more: &str,
) -> String {
    if let Some(excerpt) = metadata.get(EXCERPT_KEY) {
        return excerpt.clone();
    }

    match content.split_once(read_more) {
        Some((preview, _)) => preview.to_owned(),
        None => content.to_owned(),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProjectConfig;

    fn config() -> ProjectConfig {
        ProjectConfig::from_str("{}").unwrap()
    }

    fn parsed(name: &str, content: &str) -> CompilableFile {
        CompilableFile::from_raw(
            Path::new("/site").join(name).as_path(),
            Path::new("/site"),
            Some(content.as_bytes().to_vec()),
            &config(),
        )
        .unwrap()
    }

    // ------------------------------------------------------------------------
    // Path facts
    // ------------------------------------------------------------------------

    #[test]
    fn test_path_facts() {
        let paths = FilePaths::derive(Path::new("/site/blog/page.html"), Path::new("/site"));

        assert_eq!(paths.absolute, PathBuf::from("/site/blog/page.html"));
        assert_eq!(paths.relative, PathBuf::from("blog/page.html"));
        assert_eq!(paths.absolute_dir, PathBuf::from("/site/blog"));
        assert_eq!(paths.relative_dir, PathBuf::from("blog"));
        assert_eq!(paths.name, "page.html");
        assert_eq!(paths.stem(), "page");
        assert_eq!(paths.extension(), "html");
    }

    #[test]
    fn test_path_facts_no_extension() {
        let paths = FilePaths::derive(Path::new("/site/LICENSE"), Path::new("/site"));

        assert_eq!(paths.stem(), "LICENSE");
        assert_eq!(paths.extension(), "");
    }

    // ------------------------------------------------------------------------
    // Front matter
    // ------------------------------------------------------------------------

    #[test]
    fn test_front_matter_round_trip() {
        let file = parsed("page.html", "---\ntitle: X\n---\nBODY");

        assert_eq!(file.metadata.get("title").map(String::as_str), Some("X"));
        assert_eq!(file.content, "BODY");
        assert!(file.should_parse);
    }

    #[test]
    fn test_no_leading_delimiter_keeps_content_unchanged() {
        let input = "just a page\nwith lines";
        let file = parsed("page.html", input);

        assert!(file.metadata.is_empty());
        assert_eq!(file.content, input);
    }

    #[test]
    fn test_header_line_without_colon_is_fatal_for_file() {
        let result = CompilableFile::from_raw(
            Path::new("/site/bad.html"),
            Path::new("/site"),
            Some(b"---\nnot a pair\n---\nBODY".to_vec()),
            &config(),
        );

        let err = result.unwrap_err().to_string();
        assert!(err.contains("bad.html"));
        assert!(err.contains("not a pair"));
    }

    #[test]
    fn test_value_keeps_later_colons() {
        let file = parsed("page.html", "---\nurl: https://example.com\n---\n");

        assert_eq!(
            file.metadata.get("url").map(String::as_str),
            Some("https://example.com")
        );
    }

    #[test]
    fn test_duplicate_keys_last_write_wins() {
        let file = parsed("page.html", "---\ntitle: first\ntitle: second\n---\nB");

        assert_eq!(file.metadata.get("title").map(String::as_str), Some("second"));
        assert_eq!(file.metadata.len(), 1);
    }

    #[test]
    fn test_unterminated_header_consumes_input() {
        let file = parsed("page.html", "---\ntitle: X\nauthor: Y");

        assert_eq!(file.metadata.len(), 2);
        assert_eq!(file.content, "");
    }

    #[test]
    fn test_metadata_preserves_declaration_order() {
        let file = parsed("page.html", "---\nzeta: 1\nalpha: 2\nmid: 3\n---\n");

        let keys: Vec<&str> = file.metadata.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    // ------------------------------------------------------------------------
    // Classification
    // ------------------------------------------------------------------------

    #[test]
    fn test_extension_outside_parse_set_is_not_parsed() {
        let file = parsed("style.css", "---\ntitle: X\n---\nbody {}");

        assert!(!file.should_parse);
        assert!(file.metadata.is_empty());
        // Raw text stays available for include lookups
        assert_eq!(file.content, "---\ntitle: X\n---\nbody {}");
    }

    #[test]
    fn test_binary_content_is_reclassified() {
        let file = CompilableFile::from_raw(
            Path::new("/site/fake.html"),
            Path::new("/site"),
            Some(vec![b'<', 0x00, 0xFF, b'>']),
            &config(),
        )
        .unwrap();

        assert!(!file.should_parse);
        assert!(file.metadata.is_empty());
    }

    #[test]
    fn test_unread_file_is_not_parsed() {
        let file = CompilableFile::from_raw(
            Path::new("/site/huge.bin"),
            Path::new("/site"),
            None,
            &config(),
        )
        .unwrap();

        assert!(!file.should_parse);
        assert!(file.raw.is_none());
    }

    // ------------------------------------------------------------------------
    // Preview
    // ------------------------------------------------------------------------

    #[test]
    fn test_preview_stops_at_read_more_marker() {
        let file = parsed(
            "post.html",
            "---\ntitle: X\n---\nintro\n<!-- more -->\nrest",
        );

        assert_eq!(file.preview, "intro\n");
    }

    #[test]
    fn test_preview_is_whole_content_without_marker() {
        let file = parsed("post.html", "---\ntitle: X\n---\nall of it");

        assert_eq!(file.preview, "all of it");
    }

    #[test]
    fn test_excerpt_metadata_overrides_preview() {
        let file = parsed(
            "post.html",
            "---\nexcerpt: hand-written summary\n---\nintro\n<!-- more -->\nrest",
        );

        assert_eq!(file.preview, "hand-written summary");
    }

    // ------------------------------------------------------------------------
    // Context
    // ------------------------------------------------------------------------

    #[test]
    fn test_context_exposes_metadata_and_body() {
        let file = parsed("page.html", "---\ntitle: X\n---\nBODY");
        let context = file.context();

        assert_eq!(context["title"], "X");
        assert_eq!(context["file_name"], "page.html");
        assert_eq!(context["content"], "BODY");
        assert_eq!(context["is_binary"], false);
    }

    #[test]
    fn test_context_for_binary_file() {
        let file = CompilableFile::from_raw(
            Path::new("/site/img.png"),
            Path::new("/site"),
            None,
            &config(),
        )
        .unwrap();
        let context = file.context();

        assert_eq!(context["is_binary"], true);
        assert_eq!(context["content"], Value::Null);
    }
}
