//! # Context Initialization
//!
//! Everything a client needs before its first command:
//!
//! 1. **Data directory**: `data_override` (the CLI's `--data`), else the
//!    `DOCKET_DATA` environment variable, else the OS data directory from the
//!    `directories` crate (e.g. `~/.local/share/docket` on Linux).
//! 2. **Configuration**: `docket.toml` in the data directory, layered by
//!    [`clapfig`] with `DOCKET__*` environment overrides. A broken config file
//!    is logged and replaced by defaults.
//! 3. **Stores**: an [`FsBackend`] rooted at the data directory, with saved
//!    template overrides reconciled against the catalog.
//!
//! The data directory is not created here; the first write creates it.

use crate::api::DocketApi;
use crate::config::{DocketConfig, CONFIG_FILE};
use crate::error::{DocketError, Result};
use crate::store::docket_store::DocketStore;
use crate::store::fs_backend::FsBackend;
use clapfig::{Clapfig, SearchMode, SearchPath};
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Environment variable naming the data directory.
pub const DATA_DIR_ENV: &str = "DOCKET_DATA";

pub struct DocketContext {
    pub api: DocketApi<FsBackend>,
    pub config: DocketConfig,
    pub data_dir: PathBuf,
}

pub fn resolve_data_dir(data_override: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = data_override {
        return Ok(path);
    }
    if let Some(path) = std::env::var_os(DATA_DIR_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(path));
    }
    ProjectDirs::from("com", "docket", "docket")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| DocketError::Config("Could not determine a data directory".to_string()))
}

pub fn load_config(data_dir: &Path) -> DocketConfig {
    Clapfig::builder::<DocketConfig>()
        .app_name("docket")
        .file_name(CONFIG_FILE)
        .search_paths(vec![SearchPath::Path(data_dir.to_path_buf())])
        .search_mode(SearchMode::Merge)
        .strict(false)
        .load()
        .unwrap_or_else(|e| {
            log::warn!("ignoring configuration in {}: {}", data_dir.display(), e);
            DocketConfig::default()
        })
}

pub fn initialize(data_override: Option<PathBuf>) -> Result<DocketContext> {
    let data_dir = resolve_data_dir(data_override)?;
    log::debug!("data directory: {}", data_dir.display());

    let config = load_config(&data_dir);
    let store = DocketStore::open(FsBackend::new(data_dir.clone()))?;
    let api = DocketApi::new(store, config.clone(), data_dir.clone());

    Ok(DocketContext {
        api,
        config,
        data_dir,
    })
}
