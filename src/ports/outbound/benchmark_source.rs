use crate::shared::Result;
use std::path::Path;

/// BenchmarkSource port for reading deposited benchmark documents
///
/// The acquisition step drops one XML document per benchmark into a
/// location; this port lists and reads them without interpreting content.
pub trait BenchmarkSource {
    /// Where the sources live, for messages
    fn location(&self) -> &Path;

    /// Names of all benchmark sources, in the order they must be ingested
    ///
    /// # Errors
    /// Returns an error if the location does not exist or cannot be listed
    fn list_sources(&self) -> Result<Vec<String>>;

    /// Raw bytes of one source returned by `list_sources`
    ///
    /// # Errors
    /// Returns an error if the source cannot be read or fails the file
    /// safety checks (symlink, oversized file)
    fn read_source(&self, name: &str) -> Result<Vec<u8>>;
}
