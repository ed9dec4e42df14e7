use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use stig_catalog::prelude::*;

/// Mock SnapshotRepository keeping the snapshot in memory
///
/// Clones share state, so a test can keep a handle after moving one into a
/// use case.
#[derive(Clone)]
pub struct MockSnapshotRepository {
    location: PathBuf,
    snapshot: Arc<Mutex<Option<Snapshot>>>,
    loads: Arc<Mutex<usize>>,
}

impl MockSnapshotRepository {
    pub fn new() -> Self {
        Self {
            location: PathBuf::from("/mock/data/catalog.json"),
            snapshot: Arc::new(Mutex::new(None)),
            loads: Arc::new(Mutex::new(0)),
        }
    }

    pub fn saved(&self) -> Option<Snapshot> {
        self.snapshot.lock().unwrap().clone()
    }

    pub fn load_count(&self) -> usize {
        *self.loads.lock().unwrap()
    }
}

impl SnapshotRepository for MockSnapshotRepository {
    fn location(&self) -> &Path {
        &self.location
    }

    fn load(&self) -> Result<Snapshot> {
        *self.loads.lock().unwrap() += 1;
        self.saved().ok_or_else(|| StigError::StoreNotInitialized {
            path: self.location.clone(),
        })
    }

    fn save(&self, snapshot: &Snapshot) -> Result<()> {
        *self.snapshot.lock().unwrap() = Some(snapshot.clone());
        Ok(())
    }
}
