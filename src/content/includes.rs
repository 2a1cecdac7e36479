//! Include namespace loading.
//!
//! Every direct-child file under the includes folder becomes an include,
//! keyed by its file name with the extension kept: a directive names the
//! exact file (`{% include header.html %}`).

use super::{CompilableFile, insert_unique, templates::direct_child_files};
use crate::{config::ProjectConfig, debug, log};
use anyhow::Result;
use futures::future::join_all;
use std::collections::HashMap;

/// Load all includable fragments of the project.
pub async fn load(config: &ProjectConfig) -> Result<HashMap<String, CompilableFile>> {
    debug!("content"; "loading includes");

    let root = &config.compiler.includes_folder_absolute;
    let paths = direct_child_files(root, config).await?;

    let reads = paths.into_iter().map(|path| async move {
        let raw = tokio::fs::read(&path).await;
        (path, raw)
    });

    let mut includes = HashMap::new();
    for (path, raw) in join_all(reads).await {
        let raw = match raw {
            Ok(raw) => raw,
            Err(e) => {
                log!("warn"; "unable to read include {}: {e}", path.display());
                continue;
            }
        };

        match CompilableFile::from_raw(&path, root, Some(raw), config) {
            Ok(file) => {
                let name = file.path.name.clone();
                debug!("content"; "found include `{name}`");
                insert_unique(&mut includes, "include", name, file);
            }
            Err(e) => log!("error"; "include {:#}", e),
        }
    }

    Ok(includes)
}
