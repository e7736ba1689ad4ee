use std::{
    fs,
    path::Path,
};

use serde::{
    Deserialize,
    Serialize,
};

use crate::core::CardError;

/// Writes `contents` next to `path` first and renames it into place, so readers never observe a
/// half-written file.
pub fn write_atomic(path: &Path, contents: &str) -> Result<(), CardError> {
    let failed = |e: std::io::Error| CardError::FailedToWrite {
        path: path.display().to_string(),
        reason: e.to_string(),
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(failed)?;
    }

    let file_name = path.file_name().and_then(|n| n.to_str()).unwrap_or("output");
    let temp_path = path.with_file_name(format!(".{}.partial", file_name));

    if let Err(e) = fs::write(&temp_path, contents) {
        let _ = fs::remove_file(&temp_path);
        return Err(failed(e));
    }
    if let Err(e) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(failed(e));
    }
    Ok(())
}

pub fn save_json<T: Serialize>(data: &T, path: &Path) -> Result<(), CardError> {
    let json = serde_json::to_string_pretty(data)?;
    write_atomic(path, &json)?;
    tracing::debug!("Data saved to: {}", path.display());
    Ok(())
}

/// Returns `None` when the file does not exist.
pub fn load_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<Option<T>, CardError> {
    if !path.exists() {
        return Ok(None);
    }

    let json = fs::read_to_string(path)?;
    let data: T = serde_json::from_str(&json)?;
    tracing::debug!("Data loaded from: {}", path.display());
    Ok(Some(data))
}

pub fn delete_data_file(path: &Path) -> Result<(), CardError> {
    if path.exists() {
        fs::remove_file(path)?;
        tracing::debug!("Deleted: {}", path.display());
    }
    Ok(())
}
