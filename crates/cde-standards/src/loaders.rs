#![deny(unsafe_code)]

//! Loading CDE releases from a standards directory.
//!
//! Each version lives in its own folder:
//!
//! ```text
//! standards/
//!   v4.1/
//!     cde.csv
//!     layout.toml
//! ```

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::csv::cde::parse_cde_reader;
use crate::error::StandardsError;
use crate::hash::sha256_hex;
use crate::layout::TableLayout;
use crate::registry::{CdeRegistry, CdeRelease};

/// Environment variable for overriding the standards directory.
pub const STANDARDS_ENV_VAR: &str = "CDE_STANDARDS_DIR";

pub const CDE_FILE_NAME: &str = "cde.csv";
pub const LAYOUT_FILE_NAME: &str = "layout.toml";

/// Get the default standards root directory.
///
/// Checks the `CDE_STANDARDS_DIR` environment variable first,
/// then falls back to the `standards/` directory of the workspace.
pub fn default_standards_root() -> PathBuf {
    if let Ok(root) = std::env::var(STANDARDS_ENV_VAR) {
        return PathBuf::from(root);
    }
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../standards")
}

/// Load one release from `<dir>/cde.csv` and `<dir>/layout.toml`.
/// The folder name is the version.
pub fn load_release(dir: &Path) -> Result<CdeRelease, StandardsError> {
    let version = dir
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_default();
    let cde_path = dir.join(CDE_FILE_NAME);
    let bytes = std::fs::read(&cde_path).map_err(|e| StandardsError::io(&cde_path, e))?;
    let rows = parse_cde_reader(&cde_path.display().to_string(), bytes.as_slice())?;

    let layout_path = dir.join(LAYOUT_FILE_NAME);
    let layout_text =
        std::fs::read_to_string(&layout_path).map_err(|e| StandardsError::io(&layout_path, e))?;
    let layout = TableLayout::from_toml_str(&layout_text).map_err(|source| StandardsError::Toml {
        path: layout_path.clone(),
        source,
    })?;

    debug!(version = %version, rows = rows.len(), "loaded CDE release");
    CdeRelease::new(version, sha256_hex(&bytes), rows, layout)
}

/// Load every release folder under `root`.
pub fn load_registry(root: &Path) -> Result<CdeRegistry, StandardsError> {
    let entries = std::fs::read_dir(root).map_err(|e| StandardsError::io(root, e))?;
    let mut dirs = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| StandardsError::io(root, e))?;
        let path = entry.path();
        if path.is_dir() && path.join(CDE_FILE_NAME).is_file() {
            dirs.push(path);
        }
    }
    dirs.sort();

    let mut registry = CdeRegistry::new();
    for dir in dirs {
        registry.register(load_release(&dir)?)?;
    }
    if registry.is_empty() {
        return Err(StandardsError::NoVersions {
            path: root.to_path_buf(),
        });
    }
    info!(
        root = %root.display(),
        versions = ?registry.versions(),
        "loaded CDE registry"
    );
    Ok(registry)
}
