//! # File I/O Module
//!
//! JSON file helpers for requests, canton files, configurations and results:
//! - **Atomic saves**: write to `.tmp`, fsync, rename to prevent corruption
//! - **Version validation**: canton files must match the current schema
//!
//! ## Example
//!
//! ```rust,no_run
//! use celeste_core::file_io::{load_canton, save_canton};
//! use std::path::Path;
//!
//! let path = Path::new("canton-12.json");
//! let canton = load_canton(path)?;
//! save_canton(&canton, Path::new("canton-12-copy.json"))?;
//! # Ok::<(), celeste_core::errors::CalcError>(())
//! ```

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::calculations::canton::{CantonFile, SCHEMA_VERSION};
use crate::errors::{CalcError, CalcResult};

/// Read a file into a string.
pub fn read_text(path: &Path) -> CalcResult<String> {
    let mut file = File::open(path).map_err(|e| {
        CalcError::file_error("open", path.display().to_string(), e.to_string())
    })?;

    let mut contents = String::new();
    file.read_to_string(&mut contents).map_err(|e| {
        CalcError::file_error("read", path.display().to_string(), e.to_string())
    })?;

    Ok(contents)
}

/// Load and deserialize a JSON file.
pub fn load_json<T: DeserializeOwned>(path: &Path) -> CalcResult<T> {
    let contents = read_text(path)?;
    serde_json::from_str(&contents).map_err(|e| {
        CalcError::serialization(format!("Invalid JSON in {}: {}", path.display(), e))
    })
}

/// Serialize a value and write it to disk with atomic write semantics.
///
/// The save process:
/// 1. Serialize to pretty JSON
/// 2. Write to a temporary file next to the target
/// 3. Sync to disk (fsync)
/// 4. Rename over the target (atomic on most filesystems)
pub fn save_json<T: Serialize>(value: &T, path: &Path) -> CalcResult<()> {
    let json = serde_json::to_string_pretty(value).map_err(|e| CalcError::serialization(e.to_string()))?;
    write_atomic(path, json.as_bytes())
}

/// Write bytes to `path` through a synced temporary file.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> CalcResult<()> {
    let tmp_path = tmp_path_for(path);

    let mut tmp_file = File::create(&tmp_path).map_err(|e| {
        CalcError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.write_all(bytes).map_err(|e| {
        CalcError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.sync_all().map_err(|e| {
        CalcError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        CalcError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    Ok(())
}

/// Load a canton file and check its schema version.
pub fn load_canton(path: &Path) -> CalcResult<CantonFile> {
    let file: CantonFile = load_json(path)?;
    validate_version(&file.meta.version)?;
    Ok(file)
}

/// Save a canton file atomically.
pub fn save_canton(file: &CantonFile, path: &Path) -> CalcResult<()> {
    save_json(file, path)
}

fn tmp_path_for(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let extension = path
        .extension()
        .map(|e| format!("{}.tmp", e.to_string_lossy()))
        .unwrap_or_else(|| "tmp".to_string());
    tmp.set_extension(extension);
    tmp
}

/// Validate that a file version is compatible with the current schema.
fn validate_version(file_version: &str) -> CalcResult<()> {
    let file_parts: Vec<u32> = file_version
        .split('.')
        .filter_map(|p| p.parse().ok())
        .collect();
    let current_parts: Vec<u32> = SCHEMA_VERSION
        .split('.')
        .filter_map(|p| p.parse().ok())
        .collect();

    let mismatch = || CalcError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };

    if file_parts.is_empty() || current_parts.is_empty() {
        return Err(mismatch());
    }

    // Major version must match
    if file_parts[0] != current_parts[0] {
        return Err(mismatch());
    }

    // 0.x: a newer minor may carry breaking changes
    if current_parts[0] == 0
        && file_parts.len() > 1
        && current_parts.len() > 1
        && file_parts[1] > current_parts[1]
    {
        return Err(mismatch());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::canton::{CantonInput, CantonSpan};
    use crate::cables;
    use std::env::temp_dir;

    fn temp_path(name: &str) -> PathBuf {
        temp_dir().join(format!("celeste_test_{}_{}.json", name, std::process::id()))
    }

    fn sample_canton() -> CantonFile {
        let cable = cables::find("Aster 570").unwrap();
        CantonFile::new(CantonInput {
            label: "Canton 12".to_string(),
            cable,
            rho_m: 2000.0,
            wind_pressure_dapa: None,
            temperature_delta_c: None,
            spans: vec![
                CantonSpan::new("P1-P2", 400.0, 5.0),
                CantonSpan::new("P2-P3", 450.0, -12.0),
            ],
        })
    }

    #[test]
    fn test_tmp_path_generation() {
        let tmp = tmp_path_for(Path::new("/data/result.json"));
        assert_eq!(tmp, Path::new("/data/result.json.tmp"));
    }

    #[test]
    fn test_save_and_load_canton_roundtrip() {
        let path = temp_path("roundtrip");
        let canton = sample_canton();
        save_canton(&canton, &path).unwrap();

        let loaded = load_canton(&path).unwrap();
        assert_eq!(loaded.canton.label, "Canton 12");
        assert_eq!(loaded.canton.spans.len(), 2);
        assert_eq!(loaded.canton.cable.name, "Aster 570");

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_atomic_save_creates_no_tmp_file() {
        let path = temp_path("atomic");
        save_json(&serde_json::json!({ "ok": true }), &path).unwrap();

        assert!(!tmp_path_for(&path).exists());
        assert!(path.exists());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_missing_file_is_file_error() {
        let err = load_json::<serde_json::Value>(Path::new("/definitely/not/here.json")).unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");
    }

    #[test]
    fn test_version_validation() {
        assert!(validate_version(SCHEMA_VERSION).is_ok());
        assert!(validate_version("0.1.7").is_ok());
        assert!(validate_version("1.0.0").is_err());
        assert!(validate_version("0.2.0").is_err());
        assert!(validate_version("garbage").is_err());
    }
}
