use crate::adapters::outbound::filesystem::{FileSystemWriter, StdoutPresenter};
use crate::ports::outbound::OutputPresenter;
use std::path::PathBuf;

/// Presenter type enumeration for factory pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresenterType {
    Stdout,
    File(PathBuf),
}

impl PresenterType {
    /// `-o FILE` when given, stdout otherwise
    pub fn from_output(output: Option<PathBuf>) -> Self {
        output.map_or(PresenterType::Stdout, PresenterType::File)
    }
}

/// Factory for creating output presenters
pub struct PresenterFactory;

impl PresenterFactory {
    /// Creates a presenter instance for the specified type
    ///
    /// # Examples
    /// ```
    /// use stig_catalog::application::factories::{PresenterFactory, PresenterType};
    ///
    /// let presenter = PresenterFactory::create(PresenterType::Stdout);
    /// ```
    pub fn create(presenter_type: PresenterType) -> Box<dyn OutputPresenter> {
        match presenter_type {
            PresenterType::Stdout => Box::new(StdoutPresenter::new()),
            PresenterType::File(path) => Box::new(FileSystemWriter::new(path)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_presenter_type_from_output() {
        assert_eq!(PresenterType::from_output(None), PresenterType::Stdout);
        assert_eq!(
            PresenterType::from_output(Some(PathBuf::from("out.json"))),
            PresenterType::File(PathBuf::from("out.json"))
        );
    }

    #[test]
    fn test_create_file_presenter_writes() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("listing.txt");
        let presenter = PresenterFactory::create(PresenterType::File(path.clone()));
        presenter.present("listing").unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "listing");
    }
}
