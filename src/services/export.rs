//! Saving the export artifact to disk

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Write `bytes` to `dir/file_name`, creating `dir` if needed and
/// overwriting an existing file. Returns the written path.
pub fn save_artifact(dir: &Path, file_name: &str, bytes: &[u8]) -> Result<PathBuf> {
    if !dir.exists() {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create export directory {}", dir.display()))?;
    }

    let path = dir.join(file_name);
    fs::write(&path, bytes).with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!(path = %path.display(), bytes = bytes.len(), "export saved");
    Ok(path)
}

/// Human-readable byte count
pub fn format_size(bytes: usize) -> String {
    const KIB: f64 = 1024.0;
    let b = bytes as f64;
    if b < KIB {
        format!("{} B", bytes)
    } else if b < KIB * KIB {
        format!("{:.1} KiB", b / KIB)
    } else {
        format!("{:.1} MiB", b / (KIB * KIB))
    }
}
