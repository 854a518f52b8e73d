//! # File I/O Module
//!
//! Reads and writes casing program files and design reports:
//! - **Atomic saves**: write to `.tmp`, sync, rename, so an interrupted save
//!   never leaves a half-written file
//! - **Version validation**: program files from a newer schema are refused
//!
//! ## File Format
//!
//! Casing programs are saved as `.csg` files containing JSON. Design
//! reports are written as plain `.json` and are not read back.
//!
//! ## Example
//!
//! ```rust,no_run
//! use casing_core::file_io::{load_program, save_design};
//! use std::path::Path;
//!
//! let program = load_program(Path::new("well-7.csg"))?;
//! let design = program.build_well()?.calculate()?;
//! save_design(&design, Path::new("well-7-design.json"))?;
//! # Ok::<(), casing_core::errors::CalcError>(())
//! ```

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use crate::design::CasingDesign;
use crate::errors::{CalcError, CalcResult};
use crate::program::{CasingProgram, SCHEMA_VERSION};

/// Temp path used during an atomic save: `<path>.tmp`
fn tmp_path_for(path: &Path) -> PathBuf {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    PathBuf::from(tmp)
}

/// Serialize `value` as pretty JSON and write it atomically.
fn write_json_atomic<T: Serialize>(value: &T, path: &Path) -> CalcResult<()> {
    let json = serde_json::to_string_pretty(value).map_err(|e| CalcError::serialization(e.to_string()))?;

    let tmp_path = tmp_path_for(path);

    let mut tmp_file = File::create(&tmp_path).map_err(|e| {
        CalcError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.write_all(json.as_bytes()).map_err(|e| {
        CalcError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.sync_all().map_err(|e| {
        CalcError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        CalcError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    debug!(path = %path.display(), bytes = json.len(), "saved file");
    Ok(())
}

/// Save a casing program with atomic write semantics.
pub fn save_program(program: &CasingProgram, path: &Path) -> CalcResult<()> {
    write_json_atomic(program, path)
}

/// Save a calculated design as a label-keyed JSON report.
pub fn save_design(design: &CasingDesign, path: &Path) -> CalcResult<()> {
    write_json_atomic(design, path)
}

/// Load a casing program from a file.
///
/// # Returns
///
/// * `Err(CalcError::VersionMismatch)` - File schema is incompatible
/// * `Err(CalcError::SerializationError)` - Invalid JSON
/// * `Err(CalcError::FileError)` - I/O error
pub fn load_program(path: &Path) -> CalcResult<CasingProgram> {
    let contents = fs::read_to_string(path)
        .map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))?;

    let program: CasingProgram = serde_json::from_str(&contents).map_err(|e| {
        CalcError::serialization(format!("Invalid JSON in {}: {}", path.display(), e))
    })?;

    validate_version(&program.meta.version)?;

    debug!(
        path = %path.display(),
        well = %program.meta.well_name,
        sections = program.sections.len(),
        "loaded casing program"
    );
    Ok(program)
}

/// Validate that a file version is compatible with the current schema.
fn validate_version(file_version: &str) -> CalcResult<()> {
    let mismatch = || CalcError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };

    let file_parts: Vec<u32> = file_version
        .split('.')
        .filter_map(|p| p.parse().ok())
        .collect();
    let current_parts: Vec<u32> = SCHEMA_VERSION
        .split('.')
        .filter_map(|p| p.parse().ok())
        .collect();

    let (Some(&file_major), Some(&current_major)) = (file_parts.first(), current_parts.first()) else {
        return Err(mismatch());
    };

    if file_major != current_major {
        return Err(mismatch());
    }

    // 0.x: a newer minor may carry breaking changes
    if current_major == 0 {
        if let (Some(&file_minor), Some(&current_minor)) = (file_parts.get(1), current_parts.get(1)) {
            if file_minor > current_minor {
                return Err(mismatch());
            }
        }
    }

    Ok(())
}
