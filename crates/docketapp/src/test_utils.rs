use crate::api::DocketApi;
use crate::config::DocketConfig;
use crate::store::docket_store::DocketStore;
use crate::store::fs_backend::FsBackend;
use std::path::PathBuf;
use tempfile::TempDir;

/// A data directory in a temp dir, dropped with the env.
pub struct TestEnv {
    // Keeps the directory alive until the test is done
    pub _temp_dir: TempDir,
    pub root: PathBuf,
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl TestEnv {
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("failed to create temp dir");
        let root = temp_dir.path().join("data");
        Self {
            _temp_dir: temp_dir,
            root,
        }
    }

    /// A fresh API over the env's data directory, as a new process would see it.
    pub fn open(&self) -> DocketApi<FsBackend> {
        let store = DocketStore::open(FsBackend::new(self.root.clone()))
            .expect("failed to open store");
        DocketApi::new(store, DocketConfig::default(), self.root.clone())
    }
}
