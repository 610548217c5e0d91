//! Target directory inspection and clearing

use camino::Utf8Path;
use std::fs;
use tracing::debug;

/// Hidden version-control directory tolerated inside an "empty" target
pub const VCS_DIR: &str = ".git";

/// Whether a directory counts as empty for scaffolding purposes.
///
/// True when it has no entries, or its only entry is [`VCS_DIR`].
pub fn is_empty(dir: &Utf8Path) -> std::io::Result<bool> {
    let mut entries = fs::read_dir(dir)?;
    let first = match entries.next() {
        None => return Ok(true),
        Some(entry) => entry?,
    };
    if entries.next().is_some() {
        return Ok(false);
    }
    Ok(first.file_name() == VCS_DIR)
}

/// Whether the target path needs an overwrite confirmation
pub fn needs_overwrite(dir: &Utf8Path) -> std::io::Result<bool> {
    if !dir.exists() {
        return Ok(false);
    }
    Ok(!is_empty(dir)?)
}

/// Remove every entry of `dir`, recursively. Missing directories are ignored.
pub fn empty_dir(dir: &Utf8Path) -> std::io::Result<()> {
    if !dir.exists() {
        return Ok(());
    }

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        debug!("Removing {}", path.display());
        if entry.file_type()?.is_dir() {
            fs::remove_dir_all(&path)?;
        } else {
            fs::remove_file(&path)?;
        }
    }
    Ok(())
}
