//! File watcher. Not implemented yet.
//
// TODO: re-invoke build_site on change events once a watcher backend is
// picked (notify).

use anyhow::{Result, bail};

/// Rebuild the site whenever a source file changes.
pub fn watch_site() -> Result<()> {
    bail!("`watch` is not implemented yet")
}
