//! JSON file persistence for the in-memory store.

use std::path::Path;

use tracing::{debug, info};

use campushub_core::result::AppResult;

use crate::memory::state::Collections;

/// Load store contents from a JSON file. A missing file is empty contents.
pub async fn load(path: &Path) -> AppResult<Option<Collections>> {
    match tokio::fs::read(path).await {
        Ok(bytes) => {
            let collections: Collections = serde_json::from_slice(&bytes)?;
            info!(
                path = %path.display(),
                documents = collections.document_count(),
                "Loaded document store"
            );
            Ok(Some(collections))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "No store file yet, starting empty");
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

/// Serialize store contents.
pub fn encode(collections: &Collections) -> AppResult<Vec<u8>> {
    Ok(serde_json::to_vec_pretty(collections)?)
}

/// Replace the file atomically: write a sibling temp file, then rename.
pub async fn save(path: &Path, bytes: &[u8]) -> AppResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    let tmp = path.with_extension("json.tmp");
    tokio::fs::write(&tmp, bytes).await?;
    tokio::fs::rename(&tmp, path).await?;
    debug!(path = %path.display(), bytes = bytes.len(), "Store file written");
    Ok(())
}
