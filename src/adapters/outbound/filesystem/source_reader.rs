use crate::ports::outbound::BenchmarkSource;
use crate::shared::error::StigError;
use crate::shared::security::{validate_file_size, validate_regular_file, MAX_FILE_SIZE};
use crate::shared::Result;
use std::fs;
use std::path::{Path, PathBuf};

const SOURCE_EXTENSION: &str = "xml";

/// FileSystemSourceReader adapter for a directory of benchmark XML files
///
/// Lists `*.xml` entries (extension matched case-insensitively) sorted by
/// file name. Reads go through the symlink, file type and size checks in
/// `shared::security`.
pub struct FileSystemSourceReader {
    directory: PathBuf,
}

impl FileSystemSourceReader {
    pub fn new(directory: PathBuf) -> Self {
        Self { directory }
    }

    fn is_source_name(name: &str) -> bool {
        Path::new(name)
            .extension()
            .and_then(|extension| extension.to_str())
            .is_some_and(|extension| extension.eq_ignore_ascii_case(SOURCE_EXTENSION))
    }
}

impl BenchmarkSource for FileSystemSourceReader {
    fn location(&self) -> &Path {
        &self.directory
    }

    fn list_sources(&self) -> Result<Vec<String>> {
        if !self.directory.is_dir() {
            return Err(StigError::io(
                &self.directory,
                "Benchmark source directory does not exist. Download and extract the benchmark XML files into it, or pass --source-dir",
            ));
        }

        let entries =
            fs::read_dir(&self.directory).map_err(|e| StigError::io(&self.directory, e))?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| StigError::io(&self.directory, e))?;
            let file_type = entry
                .file_type()
                .map_err(|e| StigError::io(entry.path(), e))?;
            // Symlinks are listed so that reading them reports a security error
            if file_type.is_dir() {
                continue;
            }
            let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                tracing::warn!(path = %entry.path().display(), "skipping non UTF-8 file name");
                continue;
            };
            if Self::is_source_name(&name) {
                names.push(name);
            } else {
                tracing::debug!(name = %name, "ignoring non-XML file");
            }
        }

        names.sort();
        Ok(names)
    }

    fn read_source(&self, name: &str) -> Result<Vec<u8>> {
        let path = self.directory.join(name);
        let size = validate_regular_file(&path, "benchmark source")?;
        validate_file_size(size, &path, MAX_FILE_SIZE)?;
        tracing::debug!(path = %path.display(), size, "reading benchmark source");
        fs::read(&path).map_err(|e| StigError::io(&path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_list_sources_sorted_and_filtered() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("b.xml"), "<b/>").unwrap();
        fs::write(dir.path().join("A.XML"), "<a/>").unwrap();
        fs::write(dir.path().join("readme.txt"), "ignored").unwrap();
        fs::create_dir(dir.path().join("nested.xml")).unwrap();

        let reader = FileSystemSourceReader::new(dir.path().to_path_buf());
        assert_eq!(reader.list_sources().unwrap(), vec!["A.XML", "b.xml"]);
    }

    #[test]
    fn test_list_sources_missing_directory() {
        let dir = TempDir::new().unwrap();
        let reader = FileSystemSourceReader::new(dir.path().join("missing"));
        let error = reader.list_sources().unwrap_err();
        assert!(matches!(error, StigError::Io { .. }));
        assert!(error.to_string().contains("--source-dir"));
    }

    #[test]
    fn test_list_sources_empty_directory() {
        let dir = TempDir::new().unwrap();
        let reader = FileSystemSourceReader::new(dir.path().to_path_buf());
        assert!(reader.list_sources().unwrap().is_empty());
    }

    #[test]
    fn test_read_source() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("one.xml"), "<Benchmark/>").unwrap();
        let reader = FileSystemSourceReader::new(dir.path().to_path_buf());
        assert_eq!(reader.read_source("one.xml").unwrap(), b"<Benchmark/>");
    }

    #[test]
    fn test_read_missing_source() {
        let dir = TempDir::new().unwrap();
        let reader = FileSystemSourceReader::new(dir.path().to_path_buf());
        assert!(matches!(
            reader.read_source("absent.xml"),
            Err(StigError::Io { .. })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_source_is_rejected() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("target.txt");
        fs::write(&target, "<Benchmark/>").unwrap();
        std::os::unix::fs::symlink(&target, dir.path().join("link.xml")).unwrap();

        let reader = FileSystemSourceReader::new(dir.path().to_path_buf());
        assert_eq!(reader.list_sources().unwrap(), vec!["link.xml"]);
        assert!(matches!(
            reader.read_source("link.xml"),
            Err(StigError::Security { .. })
        ));
    }
}
