//! Include expansion to a fixed point.
//!
//! Each scan collects the distinct directives present in the body. Known
//! includes replace every literal occurrence of their exact directive text;
//! unknown ones are warned about and left in place. Because an expanded
//! include may itself contain directives, scanning repeats until a pass
//! performs zero expansions. A hard iteration cap guards against cyclic
//! includes, which would otherwise expand forever.

use crate::{content::ContentRepository, log};
use anyhow::{Result, bail};
use regex::Regex;
use std::path::Path;

/// Hard cap on expansion scans per file. Exceeding it means the include
/// graph almost certainly contains a cycle.
pub const EXPANSION_CAP: usize = 64;

/// Expand every include directive in `body` until a fixed point.
///
/// # Errors
///
/// Fatal for this file when `EXPANSION_CAP` scans still perform expansions.
pub fn expand(
    mut body: String,
    repository: &ContentRepository,
    directive: &Regex,
    relative: &Path,
) -> Result<String> {
    for _ in 0..EXPANSION_CAP {
        // Distinct directives of this scan, in order of first appearance
        let mut found: Vec<(String, String)> = Vec::new();
        for captures in directive.captures_iter(&body) {
            let text = captures[0].to_owned();
            if !found.iter().any(|(t, _)| *t == text) {
                found.push((text, captures[1].to_owned()));
            }
        }

        if found.is_empty() {
            return Ok(body);
        }

        let mut expanded_any = false;
        for (text, name) in found {
            match repository.include(&name) {
                Some(include) => {
                    body = body.replace(&text, &include.content);
                    expanded_any = true;
                }
                // Left unexpanded in the output; not an error
                None => log!(
                    "warn";
                    "{}: unknown include `{name}`, directive left in place",
                    relative.display()
                ),
            }
        }

        // Only unknown directives remained: that is the fixed point
        if !expanded_any {
            return Ok(body);
        }
    }

    bail!(
        "{}: include expansion still active after {EXPANSION_CAP} passes (cyclic include?)",
        relative.display()
    )
}
