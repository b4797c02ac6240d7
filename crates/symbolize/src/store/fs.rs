use super::fs_backend::FsBackend;
use super::record_store::RecordStore;
use std::path::PathBuf;

/// A record store persisting one JSON table per model.
pub type FileStore = RecordStore<FsBackend>;

impl RecordStore<FsBackend> {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_backend(FsBackend::new(root))
    }
}
