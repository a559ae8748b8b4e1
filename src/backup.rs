use crate::constants::BACKUP_SUFFIX;
use crate::error::{ShrinkError, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Builds the sibling path that holds the untouched original.
///
/// `dir/photo.jpg` becomes `dir/photo_original.jpg`. A name without an
/// extension just gets the suffix appended.
pub fn backup_path(path: &Path) -> Result<PathBuf> {
    let file_stem = path
        .file_stem()
        .ok_or_else(|| ShrinkError::NoFileName(path.to_path_buf()))?;

    let mut backup_name = file_stem.to_os_string();
    backup_name.push(BACKUP_SUFFIX);
    if let Some(extension) = path.extension() {
        backup_name.push(".");
        backup_name.push(extension);
    }

    Ok(path.with_file_name(backup_name))
}

/// Copies `path` to its backup location, replacing any earlier backup.
/// Never modifies `path` itself.
pub async fn back_up_file(path: &Path) -> Result<PathBuf> {
    let target = backup_path(path)?;
    let copied = tokio::fs::copy(path, &target).await?;
    debug!("Backed up {:?} to {:?} ({} bytes)", path, target, copied);
    Ok(target)
}
