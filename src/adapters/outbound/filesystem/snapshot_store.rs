use crate::ports::outbound::SnapshotRepository;
use crate::shared::error::StigError;
use crate::shared::security::validate_not_symlink;
use crate::shared::Result;
use crate::stig_catalog::domain::Snapshot;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// File name of the snapshot inside the data directory
pub const SNAPSHOT_FILENAME: &str = "catalog.json";

/// JsonSnapshotStore adapter persisting the catalog as one JSON document
///
/// Saving writes a temporary file next to the snapshot, syncs it and renames
/// it over the old one, so readers see either the previous snapshot or the
/// new one and never a partial write.
pub struct JsonSnapshotStore {
    data_dir: PathBuf,
    path: PathBuf,
}

impl JsonSnapshotStore {
    pub fn new(data_dir: PathBuf) -> Self {
        let path = data_dir.join(SNAPSHOT_FILENAME);
        Self { data_dir, path }
    }

    fn write_temp_file(&self, snapshot: &Snapshot) -> Result<NamedTempFile> {
        let mut temp = NamedTempFile::new_in(&self.data_dir)
            .map_err(|e| StigError::io(&self.data_dir, e))?;
        {
            let mut writer = BufWriter::new(temp.as_file_mut());
            serde_json::to_writer(&mut writer, snapshot)
                .map_err(|e| StigError::io(&self.path, e))?;
            writer
                .flush()
                .map_err(|e| StigError::io(&self.path, e))?;
        }
        temp.as_file()
            .sync_all()
            .map_err(|e| StigError::io(temp.path(), e))?;
        Ok(temp)
    }
}

impl SnapshotRepository for JsonSnapshotStore {
    fn location(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Snapshot> {
        match fs::symlink_metadata(&self.path) {
            Ok(_) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(StigError::StoreNotInitialized {
                    path: self.path.clone(),
                });
            }
            Err(e) => return Err(StigError::io(&self.path, e)),
        }
        validate_not_symlink(&self.path, "read")?;

        let file = File::open(&self.path).map_err(|e| StigError::io(&self.path, e))?;
        serde_json::from_reader(BufReader::new(file)).map_err(|e| {
            StigError::parse(format!(
                "catalog snapshot {} is unreadable: {}",
                self.path.display(),
                e
            ))
        })
    }

    fn save(&self, snapshot: &Snapshot) -> Result<()> {
        fs::create_dir_all(&self.data_dir).map_err(|e| StigError::io(&self.data_dir, e))?;
        if self.path.exists() {
            validate_not_symlink(&self.path, "write")?;
        }

        let temp = self.write_temp_file(snapshot)?;
        temp.persist(&self.path)
            .map_err(|e| StigError::io(&self.path, e.error))?;
        tracing::debug!(path = %self.path.display(), "snapshot replaced");
        Ok(())
    }
}
