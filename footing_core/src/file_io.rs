//! # File I/O Module
//!
//! Project files are `.ftg` JSON documents.
//!
//! - **Atomic saves**: write to `.ftg.tmp`, fsync, then rename over the target
//! - **Version validation**: refuse files written by an incompatible schema
//!
//! ## Example
//!
//! ```rust,no_run
//! use footing_core::file_io::{load_project, save_project};
//! use footing_core::project::Project;
//! use std::path::Path;
//!
//! let project = Project::new("Engineer", "25-001", "Client");
//! let path = Path::new("foundations.ftg");
//! save_project(&project, path)?;
//! let loaded = load_project(path)?;
//! assert_eq!(loaded.meta.job_id, "25-001");
//! # Ok::<(), footing_core::errors::CalcError>(())
//! ```

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use semver::Version;

use crate::errors::{CalcError, CalcResult};
use crate::project::{Project, SCHEMA_VERSION};

/// Extension of project files
pub const PROJECT_EXTENSION: &str = "ftg";

/// Save a project with atomic write semantics.
///
/// The JSON goes to a sibling `.tmp` file which is synced to disk and then
/// renamed over `path`, so an interrupted save never leaves a truncated file.
pub fn save_project(project: &Project, path: &Path) -> CalcResult<()> {
    let json = serde_json::to_string_pretty(project).map_err(|e| CalcError::SerializationError {
        reason: e.to_string(),
    })?;

    let tmp_path = path.with_extension(format!("{}.tmp", PROJECT_EXTENSION));
    let write_tmp = || -> std::io::Result<()> {
        let mut tmp_file = File::create(&tmp_path)?;
        tmp_file.write_all(json.as_bytes())?;
        tmp_file.sync_all()
    };
    write_tmp().map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        CalcError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        CalcError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    tracing::debug!(path = %path.display(), items = project.item_count(), "project saved");
    Ok(())
}

/// Load a project and check its schema version.
///
/// # Errors
///
/// * `FileError` - the file cannot be read
/// * `SerializationError` - the contents are not a project
/// * `VersionMismatch` - the file was written by an incompatible schema
pub fn load_project(path: &Path) -> CalcResult<Project> {
    let contents = fs::read_to_string(path)
        .map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))?;

    let project: Project = serde_json::from_str(&contents).map_err(|e| CalcError::SerializationError {
        reason: format!("Invalid JSON in {}: {}", path.display(), e),
    })?;

    validate_version(&project.meta.version)?;
    tracing::debug!(path = %path.display(), items = project.item_count(), "project loaded");
    Ok(project)
}

fn mismatch(file_version: &str) -> CalcError {
    CalcError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    }
}

/// Same major version; while the schema is 0.x the file's minor version
/// must not be newer than ours.
fn validate_version(file_version: &str) -> CalcResult<()> {
    let file = Version::parse(file_version).map_err(|_| mismatch(file_version))?;
    let current = Version::parse(SCHEMA_VERSION).map_err(|e| CalcError::Internal {
        message: format!("schema version {} does not parse: {}", SCHEMA_VERSION, e),
    })?;

    if file.major != current.major {
        return Err(mismatch(file_version));
    }
    if current.major == 0 && file.minor > current.minor {
        return Err(mismatch(file_version));
    }
    Ok(())
}
