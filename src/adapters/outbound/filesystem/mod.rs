/// Filesystem adapters for benchmark sources, the catalog snapshot and
/// rendered output
mod file_writer;
mod snapshot_store;
mod source_reader;

pub use file_writer::{FileSystemWriter, StdoutPresenter};
pub use snapshot_store::{JsonSnapshotStore, SNAPSHOT_FILENAME};
pub use source_reader::FileSystemSourceReader;
