//! Default values for configuration fields.
//!
//! These functions are used by serde for default deserialization.

pub fn r#true() -> bool {
    true
}

pub fn r#false() -> bool {
    false
}

// ============================================================================
// `site` Section Defaults
// ============================================================================

pub mod site {
    use std::path::PathBuf;

    pub fn title() -> String {
        "No title".into()
    }

    pub fn description() -> String {
        "No description".into()
    }

    pub fn author() -> String {
        "Unknown".into()
    }

    pub fn language() -> String {
        "en".into()
    }

    pub fn source() -> PathBuf {
        ".".into()
    }

    pub fn output() -> PathBuf {
        "_build".into()
    }

    pub fn default_template() -> String {
        "default".into()
    }

    pub fn post_permalink() -> String {
        "/blog/%slug%".into()
    }

    pub fn read_more() -> String {
        "<!-- more -->".into()
    }
}

// ============================================================================
// `compiler` Section Defaults
// ============================================================================

pub mod compiler {
    use std::path::PathBuf;

    pub fn plugins_folder() -> PathBuf {
        "_plugins".into()
    }

    pub fn templates_folder() -> PathBuf {
        "_templates".into()
    }

    pub fn includes_folder() -> PathBuf {
        "_includes".into()
    }

    pub fn data_folder() -> PathBuf {
        "_data".into()
    }

    pub fn posts_folder() -> PathBuf {
        "_posts".into()
    }

    pub fn post_index() -> String {
        "index".into()
    }

    pub fn ignore() -> Vec<String> {
        vec!["*.daphne".into(), "README.md".into()]
    }

    pub fn extensions_to_parse() -> Vec<String> {
        vec!["html".into(), "htm".into(), "txt".into()]
    }
}

// ============================================================================
// `compiler.tags` Defaults
// ============================================================================

pub mod tags {
    pub fn delimiter() -> String {
        "---".into()
    }

    pub fn opening() -> String {
        "{%".into()
    }

    pub fn closing() -> String {
        "%}".into()
    }

    pub fn print_opening() -> String {
        "{{".into()
    }

    pub fn print_closing() -> String {
        "}}".into()
    }
}
