use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Stable identity of a benchmark inside one catalog snapshot
///
/// Assigned sequentially from 1 in insertion order and used by rules as a
/// foreign key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BenchmarkIndex(u32);

impl BenchmarkIndex {
    pub const FIRST: BenchmarkIndex = BenchmarkIndex(1);

    pub fn new(value: u32) -> Self {
        Self(value)
    }

    pub fn value(self) -> u32 {
        self.0
    }

    /// `None` once the identity space is exhausted
    pub fn next(self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

impl std::fmt::Display for BenchmarkIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Normalized benchmark metadata that has not been assigned an identity yet
#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkDraft {
    /// Cleaned title without "STIG" / "Security Technical Implementation Guide"
    pub title: String,
    pub description: Option<String>,
    pub version: u32,
    pub release: u32,
    pub date: DateTime<Utc>,
}

impl BenchmarkDraft {
    /// The title under which the benchmark is stored: `"{title} v{version} r{release}"`
    pub fn composite_title(&self) -> String {
        format!("{} v{} r{}", self.title, self.version, self.release)
    }

    pub fn into_benchmark(self, index: BenchmarkIndex) -> Benchmark {
        Benchmark {
            index,
            title: self.composite_title(),
            description: self.description,
            version: self.version,
            release: self.release,
            date: self.date,
        }
    }
}

/// One versioned compliance guide as stored in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Benchmark {
    pub index: BenchmarkIndex,
    /// Composite title, unique across the catalog
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub version: u32,
    pub release: u32,
    pub date: DateTime<Utc>,
}
