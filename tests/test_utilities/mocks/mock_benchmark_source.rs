use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use stig_catalog::prelude::*;

/// Mock BenchmarkSource serving documents from memory
///
/// Sources are listed in name order, like the filesystem reader.
pub struct MockBenchmarkSource {
    location: PathBuf,
    documents: BTreeMap<String, Vec<u8>>,
}

impl MockBenchmarkSource {
    pub fn new() -> Self {
        Self {
            location: PathBuf::from("/mock/benchmarks"),
            documents: BTreeMap::new(),
        }
    }

    pub fn with_document(mut self, name: &str, content: impl Into<Vec<u8>>) -> Self {
        self.documents.insert(name.to_string(), content.into());
        self
    }

    /// Loads every file of a fixture directory under `tests/fixtures`
    pub fn from_fixtures(dir: &str) -> Self {
        let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(dir);
        let mut source = Self::new();
        for entry in fs::read_dir(&root).unwrap() {
            let path = entry.unwrap().path();
            let name = path.file_name().unwrap().to_string_lossy().into_owned();
            source = source.with_document(&name, fs::read(&path).unwrap());
        }
        source
    }
}

impl BenchmarkSource for MockBenchmarkSource {
    fn location(&self) -> &Path {
        &self.location
    }

    fn list_sources(&self) -> Result<Vec<String>> {
        Ok(self.documents.keys().cloned().collect())
    }

    fn read_source(&self, name: &str) -> Result<Vec<u8>> {
        self.documents
            .get(name)
            .cloned()
            .ok_or_else(|| StigError::not_found(format!("source {}", name)))
    }
}
