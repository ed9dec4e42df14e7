use crate::shared::Result;
use crate::stig_catalog::domain::Snapshot;
use std::path::Path;

/// SnapshotRepository port for the persisted catalog
///
/// A repository is an explicit handle: every use case receives the one it
/// works against, so several independent stores can coexist.
pub trait SnapshotRepository {
    /// Where the snapshot is kept, for messages
    fn location(&self) -> &Path;

    /// Loads the last successfully written snapshot
    ///
    /// # Errors
    /// - `StoreNotInitialized` if no snapshot has ever been written
    /// - `Parse` or `Io` if the snapshot exists but cannot be read
    fn load(&self) -> Result<Snapshot>;

    /// Replaces the stored snapshot as a whole
    ///
    /// Implementations must leave the previous snapshot intact when the
    /// write fails part-way.
    fn save(&self, snapshot: &Snapshot) -> Result<()>;
}
