use crate::shared::Result;

/// OutputPresenter port for presenting final output
///
/// This port abstracts the output destination (stdout, file, etc.)
/// where the rendered listing or rule details end up.
pub trait OutputPresenter {
    /// Presents the rendered content to the output destination
    ///
    /// # Errors
    /// Returns an error if:
    /// - Writing to the output destination fails
    /// - The destination is a symlink or its parent directory is missing
    fn present(&self, content: &str) -> Result<()>;
}
