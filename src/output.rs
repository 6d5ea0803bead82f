//! Saving generated text.
//!
//! The result is written to `<output_dir>/<task_slug>_generated.txt`. Writes go
//! to a temporary file in the same directory which is synced and then renamed
//! over the target, so a reader never sees a half-written file.

use crate::error::{Result, TextforgeError};
use crate::generation::GenerationResult;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Save `result` under `output_dir` and return the path written.
///
/// An existing file of the same name is replaced.
pub fn save_result(output_dir: &Path, result: &GenerationResult) -> Result<PathBuf> {
    let path = output_dir.join(result.filename());
    write_atomically(&path, result.text.as_bytes())?;
    Ok(path)
}

fn write_atomically(path: &Path, content: &[u8]) -> Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).map_err(|e| {
        TextforgeError::UserError(format!(
            "failed to create output directory '{}': {}",
            parent.display(),
            e
        ))
    })?;

    let filename = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| TextforgeError::UserError("invalid output file path".to_string()))?;
    let temp_path = parent.join(format!(".{}.tmp", filename));

    let written = File::create(&temp_path).and_then(|mut file| {
        file.write_all(content)?;
        file.sync_all()
    });
    if let Err(e) = written {
        let _ = fs::remove_file(&temp_path);
        return Err(TextforgeError::UserError(format!(
            "failed to write '{}': {}",
            temp_path.display(),
            e
        )));
    }

    // std's rename replaces an existing target on every supported platform.
    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        TextforgeError::UserError(format!("failed to save '{}': {}", path.display(), e))
    })
}
