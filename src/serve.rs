//! Local preview server. Not implemented yet.
//
// TODO: serve the output tree over local HTTP once the preview workflow
// settles (tiny_http, like the watch integration).

use anyhow::{Result, bail};

/// Serve the built site over local HTTP.
pub fn serve_site() -> Result<()> {
    bail!("`serve` is not implemented yet")
}
