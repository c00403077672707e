use crate::config::CrmConfig;
use crate::error::{CrmError, Result};
use crate::store::fs::FileStore;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Environment variable overriding the data directory (primarily for testing).
pub const DATA_DIR_ENV: &str = "CRM_DATA_DIR";

pub struct CrmContext {
    pub data_dir: PathBuf,
    pub config: CrmConfig,
    pub store: FileStore,
}

/// Picks the data directory: explicit path, then `CRM_DATA_DIR`, then the
/// platform data directory.
pub fn resolve_data_dir(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }

    if let Some(dir) = std::env::var_os(DATA_DIR_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }

    ProjectDirs::from("com", "crm", "crm")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| CrmError::Store("Could not determine data directory".to_string()))
}

pub fn initialize(explicit_dir: Option<&Path>) -> Result<CrmContext> {
    let data_dir = resolve_data_dir(explicit_dir)?;
    let config = CrmConfig::load(&data_dir)?;
    let store = FileStore::new(data_dir.clone());
    tracing::debug!(data_dir = %data_dir.display(), "initialized context");

    Ok(CrmContext {
        data_dir,
        config,
        store,
    })
}
